use crate::conf::MonitorConfig;
use crate::pipeline::{Console, IngestSummary, run};
use crate::shutdown::ShutdownHandle;
use pretty_assertions::assert_eq;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SAMPLE: &[&str] = &[
    r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:13] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:21] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:21] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:21] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET /default-styles.css HTTP/1.1" 404 -"#,
];

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn config(report_frequency: u64, requests_per_second: u64, window: u64) -> MonitorConfig {
    MonitorConfig {
        report_frequency,
        requests_per_second,
        window,
        ..Default::default()
    }
}

fn start(
    cfg: MonitorConfig,
    console: Console,
    shutdown: ShutdownHandle,
) -> (
    mpsc::Sender<String>,
    JoinHandle<anyhow::Result<IngestSummary>>,
) {
    let (tx, rx) = mpsc::channel(64);
    let handle = tokio::spawn(async move { run(&cfg, rx, console, shutdown).await });
    (tx, handle)
}

async fn feed(tx: &mpsc::Sender<String>, lines: &[&str]) {
    for line in lines {
        tx.send(line.to_string()).await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn sample_stream_merges_sections_and_drops_malformed_lines() {
    // Arrange
    let buf = SharedBuffer::default();
    let (tx, handle) = start(
        config(2, 10, 120),
        Console::from_writer(buf.clone()),
        ShutdownHandle::new(),
    );

    // Act
    feed(&tx, SAMPLE).await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    drop(tx);
    let summary = handle.await.unwrap().unwrap();

    // Assert
    assert_eq!(
        summary,
        IngestSummary {
            parsed: 10,
            dropped: 5
        }
    );
    assert_eq!(
        buf.contents(),
        "---------------------------------------\n\
         Requests:\n\
         \x2010 /\n\
         \n\
         Responses:\n\
         \x20 5 200\n\
         \x20 5 404\n\
         \n\
         =======================================\n"
    );
}

#[tokio::test(start_paused = true)]
async fn each_window_is_reported_once_and_then_cleared() {
    // Arrange
    let buf = SharedBuffer::default();
    let (tx, handle) = start(
        config(2, 10, 120),
        Console::from_writer(buf.clone()),
        ShutdownHandle::new(),
    );

    // Act
    feed(&tx, &[r#"10.0.0.1 - - [x] "GET /blog/a HTTP/1.1" 200 100"#]).await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    feed(&tx, &[r#"10.0.0.1 - - [x] "POST /api/v1 HTTP/1.1" 201 40"#]).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    // An idle window produces no block.
    tokio::time::sleep(Duration::from_secs(2)).await;
    drop(tx);
    handle.await.unwrap().unwrap();

    // Assert
    assert_eq!(
        buf.contents(),
        "---------------------------------------\n\
         Requests:\n\
         \x20 1 /blog\n\
         \n\
         Responses:\n\
         \x20 1 200\n\
         \n\
         Transmitted:\n\
         \x2050B/s\n\
         =======================================\n\
         ---------------------------------------\n\
         Requests:\n\
         \x20 1 /api\n\
         \n\
         Responses:\n\
         \x20 1 201\n\
         \n\
         Transmitted:\n\
         \x2020B/s\n\
         =======================================\n"
    );
}

#[tokio::test(start_paused = true)]
async fn saturation_alerts_and_recovers_on_the_one_second_tick() {
    // Arrange
    let buf = SharedBuffer::default();
    let (tx, handle) = start(
        config(60, 1, 2),
        Console::from_writer(buf.clone()),
        ShutdownHandle::new(),
    );
    let hit = r#"10.0.0.1 - - [x] "GET / HTTP/1.1" 200 1"#;

    // Act
    feed(&tx, &[hit, hit, hit]).await;
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    drop(tx);
    handle.await.unwrap().unwrap();

    // Assert
    let out = buf.contents();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {out}");
    assert!(lines[0].starts_with("High traffic generated an alert - hits = 3, triggered at "));
    assert!(lines[1].starts_with("High traffic recovered at "));
}

#[tokio::test(start_paused = true)]
async fn only_malformed_lines_produce_no_output() {
    let buf = SharedBuffer::default();
    let (tx, handle) = start(
        config(1, 1, 1),
        Console::from_writer(buf.clone()),
        ShutdownHandle::new(),
    );

    feed(&tx, &["garbage", "", "127.0.0.1 - - [x] code 404, message File not found"]).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    drop(tx);
    let summary = handle.await.unwrap().unwrap();

    assert_eq!(summary, IngestSummary { parsed: 0, dropped: 3 });
    assert_eq!(buf.contents(), "");
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_every_loop_without_further_output() {
    // Arrange
    let buf = SharedBuffer::default();
    let shutdown = ShutdownHandle::new();
    let (tx, handle) = start(
        config(2, 1, 1),
        Console::from_writer(buf.clone()),
        shutdown.clone(),
    );
    feed(&tx, SAMPLE).await;
    tokio::task::yield_now().await;

    // Act
    shutdown.trigger();
    let res = tokio::time::timeout(Duration::from_secs(1), handle).await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    // Assert
    assert!(res.is_ok(), "pipeline did not stop on shutdown");
    assert!(tx.is_closed());
    assert_eq!(buf.contents(), "");
}

#[tokio::test(start_paused = true)]
async fn console_failure_stops_the_pipeline_with_an_error() {
    // Arrange
    let shutdown = ShutdownHandle::new();
    let (tx, handle) = start(
        config(1, 10, 120),
        Console::from_writer(BrokenPipe),
        shutdown.clone(),
    );

    // Act
    feed(&tx, &[SAMPLE[0]]).await;
    let res = tokio::time::timeout(Duration::from_secs(5), handle).await;

    // Assert
    let res = res.expect("pipeline kept running after console failure");
    assert!(res.unwrap().is_err());
    assert!(shutdown.is_triggered());
}

#[tokio::test(start_paused = true)]
async fn oversized_periods_in_a_hand_built_config_do_not_panic() {
    // Arrange
    let buf = SharedBuffer::default();
    let shutdown = ShutdownHandle::new();
    let (tx, handle) = start(
        config(u64::MAX, 1, u64::MAX),
        Console::from_writer(buf.clone()),
        shutdown.clone(),
    );

    // Act
    feed(&tx, SAMPLE).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    shutdown.trigger();
    let res = tokio::time::timeout(Duration::from_secs(1), handle).await;

    // Assert
    let summary = res
        .expect("pipeline did not stop on shutdown")
        .expect("pipeline task panicked")
        .expect("pipeline failed");
    assert_eq!(summary.parsed, 10);
    assert_eq!(buf.contents(), "");
}
