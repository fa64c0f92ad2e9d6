use crate::conf::{ConfigError, ConfigOverrides, MonitorConfig, load_config};
use clap::Args;
use std::path::PathBuf;

/// Flags shared by every command that needs a resolved configuration.
///
/// Numbers are accepted as signed so that `-f 0` or `-t -5` reach the
/// fallback logic instead of being rejected by the parser.
#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// Access log to follow, or `-` for standard input [default: /var/log/access.log]
    #[arg(short = 'l', long = "log")]
    pub log_source: Option<PathBuf>,

    /// Seconds between summary reports [default: 10]
    #[arg(short = 'f', long = "frequency", allow_negative_numbers = true)]
    pub report_frequency: Option<i64>,

    /// Requests per second before raising the high traffic alert [default: 10]
    #[arg(short = 't', long = "threshold", allow_negative_numbers = true)]
    pub requests_per_second: Option<i64>,

    /// Size of the high traffic window in seconds [default: 120]
    #[arg(short = 'd', long = "duration", allow_negative_numbers = true)]
    pub window: Option<i64>,

    /// Optional HCL file with the same settings; flags take precedence
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

impl WatchArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_source: self.log_source.clone(),
            report_frequency: self.report_frequency,
            requests_per_second: self.requests_per_second,
            window: self.window,
        }
    }

    pub fn resolve(&self) -> Result<MonitorConfig, ConfigError> {
        load_config(self.config.as_deref(), self.overrides())
    }
}
