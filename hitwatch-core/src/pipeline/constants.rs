use std::time::Duration;

pub const ALERT_TICK: Duration = Duration::from_secs(1);
pub const REPORT_HEADER: &str = "---------------------------------------";
pub const REPORT_FOOTER: &str = "=======================================";
