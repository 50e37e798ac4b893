use std::sync::Arc;
use std::time::Duration;

use ipfinder_common::{config::DelayRange, domain};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::reporter::Reporter;
use crate::sink::DedupSink;
use crate::source::Source;

/// Everything one IP task needs, cloned out of the engine per dispatch.
pub(super) struct IpWorker {
    pub(super) client: Client,
    pub(super) sources: Arc<[Box<dyn Source>]>,
    pub(super) reporter: Arc<dyn Reporter>,
    pub(super) sink: Arc<DedupSink>,
    pub(super) cancel: CancellationToken,
    pub(super) delay: DelayRange,
}

impl IpWorker {
    pub(super) fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    /// Queries every source for `ip` in turn and reports the per-IP total.
    ///
    /// A failing source only costs its own result.
    pub(super) async fn process(&self, ip: &str) {
        self.reporter.info(&format!("Processing: {ip}"));
        let mut total: usize = 0;

        for source in self.sources.iter() {
            if !self.pause().await {
                self.reporter.verbose(&format!("{ip}: cancelled before {}", source.name()));
                return;
            }

            self.reporter.verbose(&format!("Querying {ip} with {}", source.name()));

            let raw: Vec<String> = match source.query(ip, &self.client).await {
                Ok(raw) => raw,
                Err(e) => {
                    self.reporter.warning(&format!("{} error for {ip}: {e}", source.name()));
                    continue;
                }
            };

            let domains: Vec<String> = domain::normalize_all(raw);
            if domains.is_empty() {
                self.reporter.verbose(&format!("{}: {ip} - 0 domains", source.name()));
                continue;
            }

            for name in &domains {
                if let Err(e) = self.sink.write(name) {
                    self.reporter.warning(&format!("Failed to write domain {name}: {e}"));
                }
            }

            total += domains.len();
            self.reporter.success(source.name(), ip, domains.len());
        }

        if total > 0 {
            self.reporter.info(&format!("{ip}: Total {total} domains"));
        } else {
            self.reporter.info(&format!("{ip}: No domains found"));
        }
    }

    /// Sleeps for a random delay before the next query.
    ///
    /// Returns `false` if the run is, or becomes, cancelled.
    async fn pause(&self) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        let delay: Duration = self.delay.sample();
        if delay.is_zero() {
            return true;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => !self.cancel.is_cancelled(),
        }
    }
}
