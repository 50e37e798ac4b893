//! Concrete reverse-IP lookup services.
//!
//! Each module wraps one public service behind [`ipfinder_core::Source`].
//! Response parsing lives in a plain `parse` function per module so it can be
//! tested without the network.

use ipfinder_common::http;
use ipfinder_core::{Source, SourceError};
use reqwest::{Client, header};
use tracing::debug;

pub mod hackertarget;
pub mod rapiddns;
pub mod thc;
pub mod webscan;

pub use hackertarget::HackerTarget;
pub use rapiddns::RapidDns;
pub use thc::Thc;
pub use webscan::WebScan;

/// Every built-in source, in query order.
pub fn all() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(RapidDns),
        Box::new(HackerTarget),
        Box::new(WebScan),
        Box::new(Thc),
    ]
}

/// Issues a single GET with a random browser user agent and returns the body.
///
/// Non-success statuses are errors; the body is not inspected.
pub(crate) async fn fetch_text(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .header(header::USER_AGENT, http::random_user_agent())
        .header(header::ACCEPT, "text/html,application/json;q=0.9,*/*;q=0.8")
        .send()
        .await?;

    let status = response.status();
    debug!("GET {url} -> {status}");
    if !status.is_success() {
        return Err(SourceError::Status(status));
    }
    Ok(response.text().await?)
}
