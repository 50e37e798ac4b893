use async_trait::async_trait;
use ipfinder_common::domain;
use ipfinder_core::{Source, SourceError};
use reqwest::Client;
use serde::Deserialize;

/// webscan.cc same-IP API, answering with a JSON array.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebScan;

#[derive(Debug, Deserialize)]
struct Entry {
    domain: String,
}

#[async_trait]
impl Source for WebScan {
    fn name(&self) -> &'static str {
        "webscan"
    }

    async fn query(&self, ip: &str, client: &Client) -> Result<Vec<String>, SourceError> {
        let url: String = format!("https://api.webscan.cc/?action=query&ip={ip}");
        let body: String = crate::fetch_text(client, &url).await?;
        parse(&body)
    }
}

/// An empty body or a literal `null` means nothing is hosted there.
pub fn parse(body: &str) -> Result<Vec<String>, SourceError> {
    // The API prefixes its JSON with a UTF-8 BOM on some responses.
    let body: &str = body.trim().trim_start_matches('\u{feff}');
    if body.is_empty() || body == "null" {
        return Ok(Vec::new());
    }

    let entries: Vec<Entry> =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;
    Ok(domain::normalize_all(entries.iter().map(|e| e.domain.as_str())))
}
