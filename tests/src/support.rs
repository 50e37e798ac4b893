//! Mock sources and a recording reporter shared by the engine tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ipfinder_common::config::{DelayRange, ScanConfig};
use ipfinder_core::{Reporter, RunSummary, Source, SourceError};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

pub fn config(dir: &Path, threads: usize) -> ScanConfig {
    ScanConfig {
        output: dir.join("results/domains.txt"),
        threads,
        delay: DelayRange::none(),
        verbose: true,
        silent: false,
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn ips(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("10.0.0.{i}")).collect()
}

/// Always returns the same list, counting calls.
pub struct StaticSource {
    pub name: &'static str,
    pub domains: Vec<&'static str>,
    pub calls: Arc<AtomicUsize>,
}

impl StaticSource {
    pub fn new(name: &'static str, domains: &[&'static str]) -> Self {
        Self {
            name,
            domains: domains.to_vec(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Source for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn query(&self, _ip: &str, _client: &Client) -> Result<Vec<String>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.domains.iter().map(|d| d.to_string()).collect())
    }
}

/// Returns `<name>-<ip>.example` unless the IP is listed as failing.
pub struct EchoSource {
    pub name: &'static str,
    pub fail_for: Vec<&'static str>,
}

#[async_trait]
impl Source for EchoSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn query(&self, ip: &str, _client: &Client) -> Result<Vec<String>, SourceError> {
        if self.fail_for.iter().any(|blocked| *blocked == ip) {
            return Err(SourceError::Rejected(format!("{ip} is blocked")));
        }
        Ok(vec![format!("{}-{ip}.example", self.name)])
    }
}

/// Records how many queries run at the same time.
#[derive(Default)]
pub struct ProbeSource {
    pub active: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Source for ProbeSource {
    fn name(&self) -> &'static str {
        "probe"
    }

    async fn query(&self, ip: &str, _client: &Client) -> Result<Vec<String>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now: usize = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(25)).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(vec![format!("probe-{ip}.example")])
    }
}

/// Fires the cancellation token from inside its first query.
pub struct CancellingSource {
    pub cancel: CancellationToken,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Source for CancellingSource {
    fn name(&self) -> &'static str {
        "canceller"
    }

    async fn query(&self, ip: &str, _client: &Client) -> Result<Vec<String>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cancel.cancel();
        Ok(vec![format!("before-cancel-{ip}.example")])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Info(String),
    Verbose(String),
    Warning(String),
    Success { source: String, ip: String, count: usize },
    Progress { completed: usize, total: usize },
}

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<Event>>,
    pub summaries: Mutex<Vec<RunSummary>>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Warning(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<(String, String, usize)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Success { source, ip, count } => Some((source.clone(), ip.clone(), *count)),
                _ => None,
            })
            .collect()
    }

    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Progress { completed, total } => Some((*completed, *total)),
                _ => None,
            })
            .max()
    }

    pub fn summary(&self) -> RunSummary {
        let summaries = self.summaries.lock().unwrap();
        assert_eq!(summaries.len(), 1, "summary must be reported exactly once");
        summaries[0].clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Event::Info(message.to_string()));
    }

    fn verbose(&self, message: &str) {
        self.push(Event::Verbose(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Event::Warning(message.to_string()));
    }

    fn success(&self, source: &str, ip: &str, count: usize) {
        self.push(Event::Success {
            source: source.to_string(),
            ip: ip.to_string(),
            count,
        });
    }

    fn progress(&self, completed: usize, total: usize) {
        self.push(Event::Progress { completed, total });
    }

    fn summary(&self, summary: &RunSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}
