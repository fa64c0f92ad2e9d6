//! Line sources feeding the pipeline.
//!
//! A source owns the sending half of a bounded channel and pushes one raw
//! line (without its trailing newline) per message. Dropping the sender is
//! end-of-stream.

mod stdin;
mod tail;
#[cfg(test)]
mod tests;

pub use stdin::forward_lines;
pub use tail::FileFollower;

use crate::shutdown::ShutdownSignal;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const LINE_CHANNEL_CAPACITY: usize = 1024;
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSource {
    File(PathBuf),
    Stdin,
}

impl LineSource {
    pub fn from_path(path: &Path) -> Self {
        if path == Path::new(STDIN_PATH) {
            LineSource::Stdin
        } else {
            LineSource::File(path.to_path_buf())
        }
    }

    /// Start producing lines on a background task.
    pub fn spawn(self, shutdown: ShutdownSignal) -> (mpsc::Receiver<String>, JoinHandle<Result<()>>) {
        let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);

        let handle = match self {
            LineSource::File(path) => {
                tokio::spawn(FileFollower::new(path).run(tx, shutdown))
            }
            LineSource::Stdin => tokio::spawn(async move {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                forward_lines(stdin, tx, shutdown).await
            }),
        };

        (rx, handle)
    }
}

/// Drop the line terminator (`\n` or `\r\n`) and decode lossily; a log line
/// with invalid UTF-8 is still a line.
pub(crate) fn decode_line(mut raw: Vec<u8>) -> String {
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    match String::from_utf8(raw) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
