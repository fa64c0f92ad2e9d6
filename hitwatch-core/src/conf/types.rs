use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOG_SOURCE: &str = "/var/log/access.log";
pub const DEFAULT_REPORT_FREQUENCY_SECS: u64 = 10;
pub const DEFAULT_REQUESTS_PER_SECOND: u64 = 10;
pub const DEFAULT_WINDOW_SECS: u64 = 120;

/// Upper bound for `report_frequency`. Larger periods overflow timer deadlines.
pub const MAX_REPORT_FREQUENCY_SECS: u64 = 86_400;
/// Upper bound for `window`. The saturation ring holds one bucket per second.
pub const MAX_WINDOW_SECS: u64 = 86_400;

/// A partial configuration layer.
///
/// Numbers are signed so that out-of-range input (zero, negative) survives
/// parsing and can be replaced by the default during resolution instead of
/// failing startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub log_source: Option<PathBuf>,
    pub report_frequency: Option<i64>,
    pub requests_per_second: Option<i64>,
    pub window: Option<i64>,
}

impl ConfigOverrides {
    /// Layer `other` on top of `self`; values present in `other` win.
    pub fn merge(self, other: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            log_source: other.log_source.or(self.log_source),
            report_frequency: other.report_frequency.or(self.report_frequency),
            requests_per_second: other.requests_per_second.or(self.requests_per_second),
            window: other.window.or(self.window),
        }
    }
}

/// Fully resolved settings, handed to each component at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorConfig {
    /// File to follow, or `-` for standard input.
    pub log_source: PathBuf,

    /// Seconds between report blocks.
    pub report_frequency: u64,

    /// Requests per second before the saturation alert fires.
    pub requests_per_second: u64,

    /// Size of the saturation window in seconds. Also the event TTL.
    pub window: u64,
}

impl MonitorConfig {
    pub fn resolve(layer: ConfigOverrides) -> MonitorConfig {
        let log_source = layer
            .log_source
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_SOURCE));

        MonitorConfig {
            log_source,
            report_frequency: in_range_or_default(
                "report_frequency",
                layer.report_frequency,
                DEFAULT_REPORT_FREQUENCY_SECS,
                MAX_REPORT_FREQUENCY_SECS,
            ),
            requests_per_second: in_range_or_default(
                "requests_per_second",
                layer.requests_per_second,
                DEFAULT_REQUESTS_PER_SECOND,
                u64::MAX,
            ),
            window: in_range_or_default(
                "window",
                layer.window,
                DEFAULT_WINDOW_SECS,
                MAX_WINDOW_SECS,
            ),
        }
    }

    /// Report period, kept within `1..=MAX_REPORT_FREQUENCY_SECS` even for a
    /// hand-built config.
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_frequency.clamp(1, MAX_REPORT_FREQUENCY_SECS))
    }

    /// Absolute hit count that flips the saturation alert.
    pub fn threshold(&self) -> u64 {
        self.requests_per_second.saturating_mul(self.window)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig::resolve(ConfigOverrides::default())
    }
}

fn in_range_or_default(field: &'static str, value: Option<i64>, default: u64, max: u64) -> u64 {
    let Some(v) = value else {
        return default;
    };

    match u64::try_from(v) {
        Ok(n) if (1..=max).contains(&n) => n,
        _ => {
            tracing::warn!(
                field,
                value = v,
                min = 1,
                max,
                default,
                "value out of range, using default"
            );
            default
        }
    }
}
