use std::path::PathBuf;
use std::time::Duration;

/// Totals of a finished run, computed once after every worker has returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub elapsed: Duration,
    pub ip_count: usize,
    pub source_count: usize,
    pub unique_domains: usize,
    pub destination: PathBuf,
}

/// Receives progress and results from the engine.
///
/// The engine never prints anything itself; every user-facing line goes
/// through this trait. Implementations must be cheap, as they are called
/// from inside the worker tasks.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);

    /// Detail lines, only shown in verbose mode.
    fn verbose(&self, _message: &str) {}

    fn warning(&self, message: &str);

    /// A source returned `count` domains for `ip`.
    fn success(&self, source: &str, ip: &str, count: usize);

    /// `completed` of `total` IPs are done.
    fn progress(&self, _completed: usize, _total: usize) {}

    fn summary(&self, summary: &RunSummary);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn success(&self, _source: &str, _ip: &str, _count: usize) {}
    fn summary(&self, _summary: &RunSummary) {}
}
