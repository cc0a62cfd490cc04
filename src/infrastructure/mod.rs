//! 基础设施层：持有浏览器资源，只暴露填表能力

pub mod chromium;
pub mod driver;
pub mod js_executor;

pub use chromium::{ChromiumLauncher, ChromiumSession};
pub use driver::{BrowserLauncher, FormSession};
pub use js_executor::JsExecutor;
