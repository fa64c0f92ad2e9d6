use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize diagnostics on stderr with environment-based filtering.
///
/// stdout is reserved for report blocks and alert lines, so every diagnostic
/// goes to stderr:
/// - Uses `RUST_LOG` for level filtering (defaults to "info" if not set)
/// - Human-readable output when stderr is a terminal
/// - JSON output with flattened event fields otherwise
pub fn init_logging() {
    match default_log_format() {
        LogFormat::Pretty => init_pretty_logging(),
        LogFormat::Json => init_json_logging(),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_pretty_logging() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn init_json_logging() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .json()
        .flatten_event(true)
        .init();
}

pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}
