use crate::conf::error::ConfigError;
use crate::conf::types::{ConfigOverrides, MonitorConfig};

use std::fs;
use std::path::Path;

/// Resolve the final configuration from an optional HCL file and the
/// command-line layer. Flags win over the file, the file wins over defaults.
pub fn load_config(
    file: Option<&Path>,
    flags: ConfigOverrides,
) -> Result<MonitorConfig, ConfigError> {
    let from_file = match file {
        Some(path) => parse_config_file(path)?,
        None => ConfigOverrides::default(),
    };

    Ok(MonitorConfig::resolve(from_file.merge(flags)))
}

pub fn parse_config_file(path: &Path) -> Result<ConfigOverrides, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    hcl::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
