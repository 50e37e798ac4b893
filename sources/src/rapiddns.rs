use std::sync::LazyLock;

use async_trait::async_trait;
use ipfinder_common::domain;
use ipfinder_core::{Source, SourceError};
use regex::Regex;
use reqwest::Client;

// Domain names sit alone in a table cell, e.g. `<td>mail.example.com</td>`.
static CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<td>\s*([A-Za-z0-9][A-Za-z0-9.\-]*\.[A-Za-z]{2,})\s*</td>")
        .unwrap_or_else(|e| panic!("invalid rapiddns pattern: {e}"))
});

/// <https://rapiddns.io> same-IP listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct RapidDns;

#[async_trait]
impl Source for RapidDns {
    fn name(&self) -> &'static str {
        "rapiddns"
    }

    async fn query(&self, ip: &str, client: &Client) -> Result<Vec<String>, SourceError> {
        let url: String = format!("https://rapiddns.io/sameip/{ip}?full=1");
        let body: String = crate::fetch_text(client, &url).await?;
        Ok(parse(&body))
    }
}

pub fn parse(body: &str) -> Vec<String> {
    domain::normalize_all(CELL.captures_iter(body).filter_map(|c| c.get(1).map(|m| m.as_str())))
}
