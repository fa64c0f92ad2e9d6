use crate::conf::MonitorConfig;
use crate::pipeline::{self, Console, IngestSummary};
use crate::shutdown::ShutdownHandle;
use crate::source::LineSource;
use anyhow::{Context, Result};
use std::time::Duration;

// Reads from stdin park a blocking thread that cannot be interrupted; don't
// let it hold the process open after shutdown.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Run the monitor on stdout until Ctrl-C or end of input.
pub fn run(config: MonitorConfig) -> Result<()> {
    use tokio::runtime::Builder;

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let result = runtime.block_on(async {
        let shutdown = ShutdownHandle::new();

        // Signal handler
        tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                if let Err(e) = shutdown.install_signal_handler().await {
                    tracing::error!(error = %e, "failed to install signal handler");
                }
            }
        });

        serve(config, Console::stdout(), shutdown).await
    });
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);

    result.map(|_| ())
}

/// Wire the configured line source into the pipeline and run both until
/// `shutdown` fires or the source ends.
pub async fn serve(
    config: MonitorConfig,
    console: Console,
    shutdown: ShutdownHandle,
) -> Result<IngestSummary> {
    let (lines, source) = LineSource::from_path(&config.log_source).spawn(shutdown.subscribe());

    let summary = pipeline::run(&config, lines, console, shutdown.clone()).await;
    shutdown.trigger();

    source
        .await
        .context("line source panicked")?
        .context("line source failed")?;

    summary
}
