use super::constants::{REPORT_FOOTER, REPORT_HEADER};
use super::stats_aggregation::ReportSnapshot;
use chrono::{DateTime, Local, Timelike};
use std::time::Duration;

/// Render one report block, or `None` when the window is entirely empty.
///
/// Throughput is the byte total divided by the report interval in whole
/// seconds (integer division).
pub fn render_report(snapshot: &ReportSnapshot, interval: Duration) -> Option<String> {
    if snapshot.is_empty() {
        return None;
    }

    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push('\n');

    if !snapshot.requests.is_empty() {
        out.push_str("Requests:\n");
        for (count, section) in &snapshot.requests {
            out.push_str(&format!("{count:3} {section}\n"));
        }
        out.push('\n');
    }

    if !snapshot.responses.is_empty() {
        out.push_str("Responses:\n");
        for (count, code) in &snapshot.responses {
            out.push_str(&format!("{count:3} {code}\n"));
        }
        out.push('\n');
    }

    if snapshot.total_bytes > 0 {
        let secs = interval.as_secs().max(1);
        out.push_str(&format!("Transmitted:\n {}B/s\n", snapshot.total_bytes / secs));
    }

    out.push_str(REPORT_FOOTER);
    out.push('\n');

    Some(out)
}

/// `HH:MM:SS.ffff` wall-clock time, as used in alert lines.
pub fn format_clock(at: &DateTime<Local>) -> String {
    // chrono has no 4-digit fraction specifier; derive it from nanoseconds.
    let ten_thousandths = (at.nanosecond() % 1_000_000_000) / 100_000;
    format!("{}.{:04}", at.format("%H:%M:%S"), ten_thousandths)
}
