use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use ipfinder_common::config::DelayRange;
use ipfinder_core::{RunSummary, ScanEngine, ScanError, Source};
use reqwest::Client;

use crate::support::{
    EchoSource, ProbeSource, RecordingReporter, StaticSource, config, ips, read_lines,
};

/// One IP, one source returning the same domain twice (once with `www.`),
/// one failing source: the file holds exactly one line.
#[tokio::test]
async fn single_ip_with_duplicate_and_failing_source() {
    let dir = tempfile::tempdir().unwrap();
    let reporter: Arc<RecordingReporter> = Arc::new(RecordingReporter::default());
    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(StaticSource::new("A", &["dns.google", "www.dns.google"])),
        Box::new(EchoSource { name: "B", fail_for: vec!["8.8.8.8"] }),
    ];

    let engine: ScanEngine = ScanEngine::new(
        vec!["8.8.8.8".to_string()],
        config(dir.path(), 1),
        Client::new(),
        sources,
    )
    .with_reporter(reporter.clone());

    let summary: RunSummary = engine.run().await.unwrap();

    assert_eq!(read_lines(&summary.destination), vec!["dns.google"]);
    assert_eq!(summary.unique_domains, 1);
    assert_eq!(summary.source_count, 2);
    assert_eq!(summary.ip_count, 1);
    assert_eq!(reporter.summary(), summary);

    assert_eq!(reporter.successes(), vec![("A".to_string(), "8.8.8.8".to_string(), 1)]);
    let warnings: Vec<String> = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("B error for 8.8.8.8"), "{warnings:?}");
}

#[tokio::test]
async fn failing_source_does_not_affect_other_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let reporter: Arc<RecordingReporter> = Arc::new(RecordingReporter::default());
    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(EchoSource { name: "flaky", fail_for: vec!["10.0.0.1"] }),
        Box::new(EchoSource { name: "steady", fail_for: vec![] }),
    ];

    let engine: ScanEngine = ScanEngine::new(ips(3), config(dir.path(), 2), Client::new(), sources)
        .with_reporter(reporter.clone());
    let summary: RunSummary = engine.run().await.unwrap();

    let mut lines: Vec<String> = read_lines(&summary.destination);
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "flaky-10.0.0.2.example",
            "flaky-10.0.0.3.example",
            "steady-10.0.0.1.example",
            "steady-10.0.0.2.example",
            "steady-10.0.0.3.example",
        ]
    );
    assert_eq!(summary.unique_domains, 5);
    assert_eq!(reporter.warnings().len(), 1);
    assert_eq!(reporter.successes().len(), 5);
}

#[tokio::test]
async fn domains_shared_across_ips_and_sources_are_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(StaticSource::new("first", &["shared.example", "https://Shared.example/"])),
        Box::new(StaticSource::new("second", &["www.shared.example", "other.example"])),
    ];

    let engine: ScanEngine = ScanEngine::new(ips(6), config(dir.path(), 4), Client::new(), sources);
    let summary: RunSummary = engine.run().await.unwrap();

    let mut lines: Vec<String> = read_lines(&summary.destination);
    lines.sort();
    assert_eq!(lines, vec!["other.example", "shared.example"]);
    assert_eq!(summary.unique_domains, 2);
}

#[tokio::test]
async fn concurrency_never_exceeds_the_limit() {
    let dir = tempfile::tempdir().unwrap();
    let probe: ProbeSource = ProbeSource::default();
    let peak = probe.peak.clone();
    let calls = probe.calls.clone();
    let reporter: Arc<RecordingReporter> = Arc::new(RecordingReporter::default());

    let engine: ScanEngine =
        ScanEngine::new(ips(12), config(dir.path(), 3), Client::new(), vec![Box::new(probe)])
            .with_reporter(reporter.clone());
    let summary: RunSummary = engine.run().await.unwrap();

    let peak: usize = peak.load(Ordering::SeqCst);
    assert!(peak >= 1 && peak <= 3, "peak concurrency was {peak}");
    assert_eq!(calls.load(Ordering::SeqCst), 12);
    assert_eq!(summary.unique_domains, 12);
    assert_eq!(reporter.last_progress(), Some((12, 12)));
}

#[tokio::test]
async fn zero_threads_still_makes_progress() {
    let dir = tempfile::tempdir().unwrap();
    let probe: ProbeSource = ProbeSource::default();
    let peak = probe.peak.clone();

    let engine: ScanEngine =
        ScanEngine::new(ips(3), config(dir.path(), 0), Client::new(), vec![Box::new(probe)]);
    let summary: RunSummary = engine.run().await.unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert_eq!(summary.unique_domains, 3);
}

#[tokio::test]
async fn unusable_output_aborts_before_any_query() {
    let dir = tempfile::tempdir().unwrap();
    let blocker: PathBuf = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let source: StaticSource = StaticSource::new("A", &["dns.google"]);
    let calls = source.calls.clone();
    let reporter: Arc<RecordingReporter> = Arc::new(RecordingReporter::default());

    let mut cfg = config(dir.path(), 2);
    cfg.output = blocker.join("domains.txt");

    let engine: ScanEngine = ScanEngine::new(ips(2), cfg, Client::new(), vec![Box::new(source)])
        .with_reporter(reporter.clone());
    let result: Result<RunSummary, ScanError> = engine.run().await;

    assert!(matches!(result, Err(ScanError::Sink { .. })), "{result:?}");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(reporter.summaries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn output_from_a_previous_run_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);
    std::fs::create_dir_all(cfg.output.parent().unwrap()).unwrap();
    std::fs::write(&cfg.output, "stale.example\n").unwrap();

    let engine: ScanEngine = ScanEngine::new(
        ips(1),
        cfg,
        Client::new(),
        vec![Box::new(StaticSource::new("A", &["fresh.example"]))],
    );
    let summary: RunSummary = engine.run().await.unwrap();

    assert_eq!(read_lines(&summary.destination), vec!["fresh.example"]);
}

/// Every write fails on `/dev/full`; each failure is only a warning and the
/// remaining sources are still queried.
#[cfg(target_os = "linux")]
#[tokio::test]
async fn failed_writes_are_warnings_only() {
    let dir = tempfile::tempdir().unwrap();
    let reporter: Arc<RecordingReporter> = Arc::new(RecordingReporter::default());
    let first: StaticSource = StaticSource::new("first", &["a.example", "b.example"]);
    let second: StaticSource = StaticSource::new("second", &["c.example"]);
    let first_calls = first.calls.clone();
    let second_calls = second.calls.clone();

    let mut cfg = config(dir.path(), 1);
    cfg.output = PathBuf::from("/dev/full");
    let engine: ScanEngine = ScanEngine::new(
        vec!["8.8.8.8".to_string()],
        cfg,
        Client::new(),
        vec![Box::new(first), Box::new(second)],
    )
    .with_reporter(reporter.clone());

    let summary: RunSummary = engine.run().await.unwrap();

    assert_eq!(summary.unique_domains, 0);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);

    let failed: Vec<String> = reporter
        .warnings()
        .into_iter()
        .filter(|w| w.starts_with("Failed to write domain"))
        .collect();
    assert_eq!(failed.len(), 3, "{failed:?}");
}

/// Bounds given in the wrong order still yield a usable delay.
#[tokio::test]
async fn inverted_delay_range_still_processes_every_ip() {
    let dir = tempfile::tempdir().unwrap();
    let reporter: Arc<RecordingReporter> = Arc::new(RecordingReporter::default());

    let mut cfg = config(dir.path(), 2);
    cfg.delay = DelayRange::new(5, 1);
    let engine: ScanEngine = ScanEngine::new(
        ips(2),
        cfg,
        Client::new(),
        vec![Box::new(EchoSource { name: "echo", fail_for: vec![] })],
    )
    .with_reporter(reporter.clone());

    let summary: RunSummary = engine.run().await.unwrap();

    assert_eq!(summary.unique_domains, 2);
    assert!(reporter.warnings().is_empty(), "{:?}", reporter.warnings());
}
