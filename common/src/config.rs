use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_THREADS: usize = 30;
pub const DEFAULT_OUTPUT: &str = "results/domains.txt";

/// Settings consumed by the scan engine for a single run.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Where discovered domains are written, one per line.
    pub output: PathBuf,
    /// Maximum number of IPs processed at the same time.
    ///
    /// Read through [`ScanConfig::concurrency`], which never yields zero.
    pub threads: usize,
    /// Pause inserted before every source query.
    pub delay: DelayRange,
    /// Emit per-query detail lines.
    pub verbose: bool,
    /// Suppress everything except the final unique-domain count.
    pub silent: bool,
}

impl ScanConfig {
    pub fn concurrency(&self) -> usize {
        self.threads.max(1)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            threads: DEFAULT_THREADS,
            delay: DelayRange::default(),
            verbose: false,
            silent: false,
        }
    }
}

/// Bounds of the randomized pre-query pause, in milliseconds.
///
/// Only built through [`DelayRange::new`], [`DelayRange::none`] or `Default`,
/// so `min_ms <= max_ms` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        if min_ms <= max_ms {
            Self { min_ms, max_ms }
        } else {
            Self { min_ms: max_ms, max_ms: min_ms }
        }
    }

    /// No pause at all. Used by tests and by callers that throttle elsewhere.
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    pub fn as_range(&self) -> RangeInclusive<u64> {
        self.min_ms..=self.max_ms
    }

    /// Picks a duration uniformly from the range.
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::random_range(self.as_range()))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self { min_ms: 1_000, max_ms: 3_000 }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
