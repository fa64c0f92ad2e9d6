mod console;
pub mod fixtures;
pub mod tracing;

pub use console::{CapturedConsole, ReportTotals};
pub use tracing::{CapturedEvent, init_test_tracing};
