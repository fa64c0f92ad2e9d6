use crate::conf::MonitorConfig;
use crate::pipeline::console::Console;
use crate::pipeline::constants::ALERT_TICK;
use crate::pipeline::parse::parse_line;
use crate::pipeline::render::render_report;
use crate::pipeline::saturation::SaturationMonitor;
use crate::pipeline::stats_aggregation::StatsAggregator;
use crate::pipeline::types::LogEntry;
use crate::shutdown::{ShutdownHandle, ShutdownSignal};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Line counts for one run of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub parsed: u64,
    pub dropped: u64,
}

/// Drive the pipeline until the line stream ends or shutdown is requested.
///
/// Three loops run side by side:
/// - ingestion (this task): line -> parse -> aggregator + monitor
/// - report: flush and print the aggregator every `report_frequency` seconds
/// - alert: evaluate the saturation monitor every second
///
/// End of stream triggers the same shutdown as an external cancellation.
/// Returns once all three loops have stopped.
pub async fn run(
    config: &MonitorConfig,
    mut lines: mpsc::Receiver<String>,
    console: Console,
    shutdown: ShutdownHandle,
) -> Result<IngestSummary> {
    let stats = Arc::new(StatsAggregator::new());
    let monitor = Arc::new(SaturationMonitor::new(
        config.requests_per_second,
        config.window,
    ));

    tracing::info!(
        source = %config.log_source.display(),
        report_frequency = config.report_frequency,
        threshold = monitor.threshold(),
        window = config.window,
        "pipeline started"
    );

    let report = tokio::spawn(report_loop(
        stats.clone(),
        config.report_interval(),
        console.clone(),
        shutdown.clone(),
    ));
    let alerts = tokio::spawn(alert_loop(monitor.clone(), console, shutdown.clone()));

    let summary = ingest(&mut lines, &stats, &monitor, shutdown.subscribe()).await;
    shutdown.trigger();

    let report_res = report.await.context("report loop panicked")?;
    let alert_res = alerts.await.context("alert loop panicked")?;

    tracing::info!(
        parsed = summary.parsed,
        dropped = summary.dropped,
        "ingestion stopped"
    );

    report_res?;
    alert_res?;

    Ok(summary)
}

async fn ingest(
    lines: &mut mpsc::Receiver<String>,
    stats: &StatsAggregator,
    monitor: &SaturationMonitor,
    mut shutdown: ShutdownSignal,
) -> IngestSummary {
    let mut summary = IngestSummary::default();

    loop {
        let line = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            line = lines.recv() => match line {
                Some(line) => line,
                None => break,
            },
        };

        match parse_line(&line) {
            Ok(entry) => {
                summary.parsed += 1;
                route(&entry, stats, monitor);
            }
            Err(e) => {
                summary.dropped += 1;
                tracing::trace!(error = %e, line = %line, "dropping line");
            }
        }
    }

    summary
}

fn route(entry: &LogEntry, stats: &StatsAggregator, monitor: &SaturationMonitor) {
    stats.record_request(&entry.request.path);
    stats.record_response(entry.response_code);
    stats.add_bytes(entry.bytes_sent);
    monitor.record_event();
}

async fn report_loop(
    stats: Arc<StatsAggregator>,
    period: Duration,
    console: Console,
    shutdown: ShutdownHandle,
) -> Result<()> {
    let mut signal = shutdown.subscribe();
    let mut ticker = periodic(period);

    loop {
        tokio::select! {
            biased;
            _ = signal.cancelled() => return Ok(()),
            _ = ticker.tick() => {
                let snapshot = stats.flush();
                let Some(block) = render_report(&snapshot, period) else {
                    continue;
                };
                if signal.is_cancelled() {
                    return Ok(());
                }
                if let Err(e) = console.emit(&block) {
                    shutdown.trigger();
                    return Err(e).context("failed to write report");
                }
            }
        }
    }
}

async fn alert_loop(
    monitor: Arc<SaturationMonitor>,
    console: Console,
    shutdown: ShutdownHandle,
) -> Result<()> {
    let mut signal = shutdown.subscribe();
    let mut ticker = periodic(ALERT_TICK);

    loop {
        tokio::select! {
            biased;
            _ = signal.cancelled() => return Ok(()),
            _ = ticker.tick() => {
                let Some(event) = monitor.evaluate() else {
                    continue;
                };
                if signal.is_cancelled() {
                    return Ok(());
                }
                if let Err(e) = console.emit_line(&event.to_string()) {
                    shutdown.trigger();
                    return Err(e).context("failed to write alert");
                }
            }
        }
    }
}

/// Interval whose first tick is one full period from now.
fn periodic(period: Duration) -> time::Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
