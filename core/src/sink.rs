//! Deduplicating, append-only output file.
//!
//! Workers write into the sink concurrently; a single mutex serializes the
//! seen-set, the counter and the file handle so a domain is accepted at most
//! once per run. Throughput is bounded by network latency, not by this lock.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("output already closed")]
    Closed,
}

pub struct DedupSink {
    path: PathBuf,
    state: Mutex<SinkState>,
}

struct SinkState {
    seen: HashSet<String>,
    count: usize,
    writer: Option<LineWriter<File>>,
}

impl DedupSink {
    /// Creates the destination fresh, truncating any previous run's output.
    ///
    /// Missing parent directories are created first.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path: &Path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file: File = File::create(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(SinkState {
                seen: HashSet::new(),
                count: 0,
                writer: Some(LineWriter::new(file)),
            }),
        })
    }

    /// Appends `domain` unless it was already written.
    ///
    /// Returns `Ok(true)` when the domain is new, `Ok(false)` for a repeat.
    /// A domain whose write fails is not marked as seen.
    pub fn write(&self, domain: &str) -> Result<bool, SinkError> {
        let mut state = self.lock();
        if state.seen.contains(domain) {
            return Ok(false);
        }

        // One write per line: a failed write leaves nothing buffered behind.
        let line: String = format!("{domain}\n");
        let writer: &mut LineWriter<File> = state.writer.as_mut().ok_or(SinkError::Closed)?;
        writer.write_all(line.as_bytes())?;

        state.seen.insert(domain.to_string());
        state.count += 1;
        Ok(true)
    }

    pub fn count(&self) -> usize {
        self.lock().count
    }

    /// Flushes and releases the file. Later writes fail with [`SinkError::Closed`].
    pub fn close(&self) -> Result<(), SinkError> {
        let mut state = self.lock();
        if let Some(mut writer) = state.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // The state stays consistent even if a holder panicked: every mutation
    // happens after the only fallible step.
    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
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
