pub mod date_resolver;
pub mod record_parser;
pub mod result_reporter;
pub mod run_journal;

pub use date_resolver::resolve_date;
pub use record_parser::parse_record;
pub use result_reporter::report;
pub use run_journal::RunJournal;
