use async_trait::async_trait;
use ipfinder_common::domain;
use ipfinder_core::{Source, SourceError};
use reqwest::Client;

/// ip.thc.org reverse lookup. Plain text; lines starting with `;` are comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Thc;

#[async_trait]
impl Source for Thc {
    fn name(&self) -> &'static str {
        "thc"
    }

    async fn query(&self, ip: &str, client: &Client) -> Result<Vec<String>, SourceError> {
        let url: String = format!("https://ip.thc.org/{ip}?l=100&nocolor=1");
        let body: String = crate::fetch_text(client, &url).await?;
        Ok(parse(&body))
    }
}

pub fn parse(body: &str) -> Vec<String> {
    domain::normalize_all(
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(';')),
    )
}
