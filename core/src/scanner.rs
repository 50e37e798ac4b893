//! The concurrent **scan engine**.
//!
//! One task is spawned per target IP. A semaphore sized to the configured
//! concurrency gates dispatch, so at most `threads` IPs are in flight and the
//! number of spawned tasks never grows with the input size. Inside a task the
//! sources are queried one after another (see [`worker`]).
//!
//! Cancellation is cooperative: the token is checked before each dispatch and
//! before each source query. Tasks that were already dispatched always run to
//! their next check; none is aborted.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use ipfinder_common::config::ScanConfig;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::reporter::{NullReporter, Reporter, RunSummary};
use crate::sink::DedupSink;
use crate::source::Source;

mod worker;

use worker::IpWorker;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to create output file {path}: {source}")]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scan cancelled")]
    Cancelled,
}

pub struct ScanEngine {
    targets: Vec<String>,
    config: ScanConfig,
    client: Client,
    sources: Arc<[Box<dyn Source>]>,
    reporter: Arc<dyn Reporter>,
    cancel: CancellationToken,
}

impl ScanEngine {
    pub fn new(
        targets: Vec<String>,
        config: ScanConfig,
        client: Client,
        sources: Vec<Box<dyn Source>>,
    ) -> Self {
        Self {
            targets,
            config,
            client,
            sources: sources.into(),
            reporter: Arc::new(NullReporter),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token observed by the run; cancelling it stops dispatch.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Processes every target and returns the run totals.
    ///
    /// Fails before doing any work if the output file cannot be created. On
    /// cancellation the summary is still reported and the domains written so
    /// far stay on disk, but the run returns [`ScanError::Cancelled`].
    pub async fn run(&self) -> Result<RunSummary, ScanError> {
        let started: Instant = Instant::now();

        let sink: Arc<DedupSink> = match DedupSink::create(&self.config.output) {
            Ok(sink) => Arc::new(sink),
            Err(source) => {
                return Err(ScanError::Sink {
                    path: self.config.output.clone(),
                    source,
                });
            }
        };

        self.announce();

        let cancelled: bool = self.dispatch_all(&sink).await;

        if let Err(e) = sink.close() {
            self.reporter.warning(&format!("Failed to close {}: {e}", self.config.output.display()));
        }

        let summary: RunSummary = self.summarize(started.elapsed(), sink.count());
        self.reporter.summary(&summary);

        if cancelled {
            return Err(ScanError::Cancelled);
        }
        Ok(summary)
    }

    fn announce(&self) {
        let names: Vec<&str> = self.source_names();
        self.reporter.info(&format!("Loaded {} IPs", self.targets.len()));
        self.reporter.info(&format!("Using {} sources: {}", names.len(), names.join(", ")));
        self.reporter.info(&format!("Threads: {}", self.config.concurrency()));
        self.reporter.info(&format!("Output: {}", self.config.output.display()));
    }

    /// Spawns one worker per IP and waits for all of them.
    ///
    /// Returns `true` if dispatch stopped because of cancellation.
    async fn dispatch_all(&self, sink: &Arc<DedupSink>) -> bool {
        let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(self.config.concurrency()));
        let completed: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let total: usize = self.targets.len();
        let mut tasks: JoinSet<()> = JoinSet::new();
        let mut cancelled: bool = false;

        for ip in &self.targets {
            let Some(permit) = self.admit(&semaphore).await else {
                cancelled = true;
                break;
            };

            let worker: IpWorker = self.worker(sink.clone());
            let completed = completed.clone();
            let ip: String = ip.clone();

            tasks.spawn(async move {
                let _permit: OwnedSemaphorePermit = permit;
                worker.process(&ip).await;
                let done: usize = completed.fetch_add(1, Ordering::Relaxed) + 1;
                worker.reporter().progress(done, total);
            });
        }

        if cancelled {
            self.reporter.info("Cancelled by user, waiting for running lookups");
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                self.reporter.warning(&format!("Worker task failed: {e}"));
            }
        }

        cancelled || self.cancel.is_cancelled()
    }

    /// Waits for a free slot, giving up as soon as the run is cancelled.
    async fn admit(&self, semaphore: &Arc<Semaphore>) -> Option<OwnedSemaphorePermit> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            permit = semaphore.clone().acquire_owned() => {
                // The semaphore is never closed while dispatching.
                permit.inspect_err(|e| debug!("semaphore unavailable: {e}")).ok()
            }
        }
    }

    fn worker(&self, sink: Arc<DedupSink>) -> IpWorker {
        IpWorker {
            client: self.client.clone(),
            sources: self.sources.clone(),
            reporter: self.reporter.clone(),
            sink,
            cancel: self.cancel.clone(),
            delay: self.config.delay,
        }
    }

    fn summarize(&self, elapsed: Duration, unique_domains: usize) -> RunSummary {
        RunSummary {
            elapsed,
            ip_count: self.targets.len(),
            source_count: self.sources.len(),
            unique_domains,
            destination: self.config.output.clone(),
        }
    }
}
