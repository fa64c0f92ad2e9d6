mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, parse_config_file};
pub use types::{ConfigOverrides, MonitorConfig};
