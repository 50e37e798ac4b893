use std::time::Duration;

use rand::seq::IndexedRandom;
use reqwest::Client;
use thiserror::Error;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
pub const MAX_IDLE_PER_HOST: usize = 10;
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(90);

const FALLBACK_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const PLATFORMS: &[&str] = &[
    "Windows NT 10.0",
    "Windows NT 6.3",
    "Windows NT 6.1",
    "Macintosh; Intel Mac OS X 10_15",
    "Macintosh; Intel Mac OS X 10_14",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
];

const CHROME_VERSIONS: &[&str] = &[
    "120.0.0.0", "119.0.0.0", "118.0.0.0", "117.0.0.0", "116.0.0.0",
    "115.0.0.0", "114.0.0.0", "112.0.0.0", "110.0.0.0", "108.0.0.0",
];

const FIREFOX_VERSIONS: &[&str] = &[
    "120.0", "119.0", "118.0", "117.0", "115.0", "113.0", "110.0", "105.0",
];

#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientError(#[from] reqwest::Error);

/// Builds the client shared by every source for the whole run.
///
/// Idle connections are capped per host and expire, so a large target list
/// does not keep piling up sockets.
pub fn build_client() -> Result<Client, ClientError> {
    let client: Client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
        .pool_idle_timeout(IDLE_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Returns a plausible desktop browser user agent.
pub fn random_user_agent() -> String {
    let mut rng = rand::rng();
    let Some(platform) = PLATFORMS.choose(&mut rng) else {
        return FALLBACK_AGENT.to_string();
    };
    let win64: &str = if platform.starts_with("Windows") { "; Win64; x64" } else { "" };

    if rand::random_bool(0.5) {
        let version: &str = FIREFOX_VERSIONS.choose(&mut rng).unwrap_or(&"120.0");
        format!("Mozilla/5.0 ({platform}{win64}; rv:{version}) Gecko/20100101 Firefox/{version}")
    } else {
        let version: &str = CHROME_VERSIONS.choose(&mut rng).unwrap_or(&"120.0.0.0");
        format!(
            "Mozilla/5.0 ({platform}{win64}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36"
        )
    }
}
