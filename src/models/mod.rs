pub mod loaders;
pub mod locators;
pub mod record;
pub mod request;
pub mod resolved_date;

pub use loaders::{load_locators_file, load_site_locators};
pub use locators::SiteLocators;
pub use record::{ParsedRecord, RecordField};
pub use request::{
    AutomationOutcome, Credentials, RequestDefaults, ResultPayload, ResultStatus,
    ScheduleRequest, SUCCESS_MESSAGE,
};
pub use resolved_date::ResolvedDate;
