//! The contract every reverse-IP lookup service implements.
//!
//! The engine only ever sees `dyn Source`: it asks for a [`Source::name`] when
//! reporting and calls [`Source::query`] once per target IP. Adding a service
//! means adding a type, never touching the engine.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Why a single (IP, source) lookup produced no result.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("service refused the query: {0}")]
    Rejected(String),
    #[error("unparsable response: {0}")]
    Parse(String),
}

/// A reverse-IP lookup service.
///
/// Implementations are stateless between calls and must not retry: a failed
/// call is reported once and the engine moves on.
#[async_trait]
pub trait Source: Send + Sync {
    /// Stable name used in progress and warning lines.
    fn name(&self) -> &'static str;

    /// Looks up the domains hosted on `ip`.
    ///
    /// Returned names should already be normalized; the engine normalizes
    /// them again before writing.
    async fn query(&self, ip: &str, client: &Client) -> Result<Vec<String>, SourceError>;
}
