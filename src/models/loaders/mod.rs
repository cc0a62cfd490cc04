pub mod toml_loader;

pub use toml_loader::{load_locators_file, load_site_locators, parse_locators};
