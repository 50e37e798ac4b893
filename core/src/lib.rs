//! # ipfinder core
//!
//! The reverse-IP scanning engine and the contracts around it.
//!
//! * **[`source`]**: the [`Source`] trait every lookup service implements.
//! * **[`sink`]**: the deduplicating output file shared by all workers.
//! * **[`reporter`]**: the callback interface the engine reports through.
//! * **[`scanner`]**: the bounded worker pool tying them together.

pub mod reporter;
pub mod scanner;
pub mod sink;
pub mod source;

pub use reporter::{NullReporter, Reporter, RunSummary};
pub use scanner::{ScanEngine, ScanError};
pub use sink::{DedupSink, SinkError};
pub use source::{Source, SourceError};
