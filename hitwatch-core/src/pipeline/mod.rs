//! Access Log Pipeline
//!
//! Lines arrive from a line source one at a time. Each line is parsed into a
//! [`LogEntry`]; lines that do not have the common log format shape are
//! dropped without output. Every parsed entry feeds two consumers:
//!
//! - the [`StatsAggregator`], which counts request sections, response codes
//!   and transmitted bytes, and is flushed into a report block every
//!   `report_frequency` seconds
//! - the [`SaturationMonitor`], which keeps a per-second ring of hit counts
//!   covering the saturation window and flips between normal and alerting
//!   once per second
//!
//! The overall data processing architecture is:
//!
//! line source
//! parse_line
//! LogEntry
//! StatsAggregator / SaturationMonitor
//! ReportSnapshot / SaturationEvent
//! Console
//!

mod console;
mod constants;
mod parse;
mod render;
mod run;
mod saturation;
mod stats_aggregation;
#[cfg(test)]
mod tests;
mod types;

pub use console::Console;
pub use parse::parse_line;
pub use render::{format_clock, render_report};
pub use run::{IngestSummary, run};
pub use saturation::{SaturationEvent, SaturationMonitor, SaturationState};
pub use stats_aggregation::{ReportSnapshot, StatsAggregator, section_of};
pub use types::{LogEntry, ParseError, RequestLine};
