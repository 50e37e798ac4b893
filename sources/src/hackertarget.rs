use async_trait::async_trait;
use ipfinder_common::domain;
use ipfinder_core::{Source, SourceError};
use reqwest::Client;

const NO_RECORDS: &str = "no dns a records found";

/// HackerTarget's free reverse-IP API. Plain text, one host per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct HackerTarget;

#[async_trait]
impl Source for HackerTarget {
    fn name(&self) -> &'static str {
        "hackertarget"
    }

    async fn query(&self, ip: &str, client: &Client) -> Result<Vec<String>, SourceError> {
        let url: String = format!("https://api.hackertarget.com/reverseiplookup/?q={ip}");
        let body: String = crate::fetch_text(client, &url).await?;
        parse(&body)
    }
}

/// The API answers errors with a 200 and a one-line message instead of data.
pub fn parse(body: &str) -> Result<Vec<String>, SourceError> {
    let first: String = body.trim().lines().next().unwrap_or_default().to_ascii_lowercase();

    if first.starts_with(NO_RECORDS) {
        return Ok(Vec::new());
    }
    if first.starts_with("error") || first.contains("api count exceeded") {
        return Err(SourceError::Rejected(body.trim().to_string()));
    }

    Ok(domain::normalize_all(body.lines()))
}
