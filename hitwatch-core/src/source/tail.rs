use crate::shutdown::ShutdownSignal;
use crate::source::{POLL_INTERVAL, decode_line};
use anyhow::{Context, Result};
use std::io::SeekFrom;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Follows a growing file and emits each complete line appended to it.
///
/// - Starts at the end of the file if it exists at startup (existing content
///   is history, not traffic)
/// - A missing file is waited for, never created; once it appears it is read
///   from the start. The follower only ever opens the path read-only, so a
///   mistyped path cannot leave an empty file behind
/// - A partial trailing line is held back until its newline arrives
/// - If the file shrinks below the read offset it was truncated and is read
///   again from the start
#[derive(Debug, Clone)]
pub struct FileFollower {
    path: PathBuf,
    poll: Duration,
    from_start: bool,
}

enum Follow {
    Cancelled,
    Reopen,
}

impl FileFollower {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll: POLL_INTERVAL,
            from_start: false,
        }
    }

    pub fn poll_interval(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    /// Read content that already exists when the follower starts.
    pub fn from_start(mut self, from_start: bool) -> Self {
        self.from_start = from_start;
        self
    }

    pub async fn run(self, tx: mpsc::Sender<String>, mut shutdown: ShutdownSignal) -> Result<()> {
        let mut seek_to_end = !self.from_start;

        loop {
            let Some((file, waited)) = self.open(&mut shutdown).await else {
                return Ok(());
            };
            // A file that appeared while we waited holds only new lines.
            let at_end = seek_to_end && !waited;
            seek_to_end = false;

            match self.follow(file, at_end, &tx, &mut shutdown).await? {
                Follow::Cancelled => return Ok(()),
                Follow::Reopen => continue,
            }
        }
    }

    /// Open the file, retrying until it exists. Returns `None` on shutdown,
    /// otherwise the file and whether we had to wait for it.
    async fn open(&self, shutdown: &mut ShutdownSignal) -> Option<(File, bool)> {
        let mut waited = false;

        loop {
            match File::open(&self.path).await {
                Ok(file) => {
                    if waited {
                        info!(path = %self.path.display(), "log file available");
                    }
                    return Some((file, waited));
                }
                Err(e) => {
                    if !waited {
                        warn!(
                            path = %self.path.display(),
                            error = %e,
                            "cannot open log file, waiting for it"
                        );
                    }
                    waited = true;
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return None,
                _ = tokio::time::sleep(self.poll) => {}
            }
        }
    }

    async fn follow(
        &self,
        mut file: File,
        at_end: bool,
        tx: &mpsc::Sender<String>,
        shutdown: &mut ShutdownSignal,
    ) -> Result<Follow> {
        let mut offset = if at_end {
            file.seek(SeekFrom::End(0))
                .await
                .with_context(|| format!("failed to seek {}", self.path.display()))?
        } else {
            0
        };
        debug!(path = %self.path.display(), offset, "following log file");

        let mut reader = BufReader::new(file);
        let mut pending: Vec<u8> = Vec::new();

        loop {
            let n = reader
                .read_until(b'\n', &mut pending)
                .await
                .with_context(|| format!("failed to read {}", self.path.display()))?;
            offset += n as u64;

            if pending.last() == Some(&b'\n') {
                let line = decode_line(std::mem::take(&mut pending));
                if tx.send(line).await.is_err() {
                    return Ok(Follow::Cancelled);
                }
                continue;
            }

            if n > 0 {
                // Partial line; keep it and wait for the rest.
                continue;
            }

            match tokio::fs::metadata(&self.path).await {
                Ok(meta) if meta.len() < offset => {
                    info!(
                        path = %self.path.display(),
                        offset,
                        len = meta.len(),
                        "log file truncated, reading from start"
                    );
                    return Ok(Follow::Reopen);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "log file went away");
                    return Ok(Follow::Reopen);
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return Ok(Follow::Cancelled),
                _ = tokio::time::sleep(self.poll) => {}
            }
        }
    }
}
