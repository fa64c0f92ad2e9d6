use crate::shutdown::ShutdownSignal;
use crate::source::decode_line;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Forward every line of `reader` until EOF, shutdown, or the receiver goes
/// away. Used for standard input.
pub async fn forward_lines<R>(
    mut reader: R,
    tx: mpsc::Sender<String>,
    mut shutdown: ShutdownSignal,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let mut raw = Vec::new();
        let n = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return Ok(()),
            n = reader.read_until(b'\n', &mut raw) => n.context("failed to read input")?,
        };

        if n == 0 {
            tracing::debug!("input reached end of stream");
            return Ok(());
        }

        if tx.send(decode_line(raw)).await.is_err() {
            return Ok(());
        }
    }
}
