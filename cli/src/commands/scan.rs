use std::sync::Arc;

use ipfinder_common::{config::ScanConfig, http, target};
use ipfinder_core::{RunSummary, ScanEngine, ScanError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::commands::CommandLine;
use crate::terminal::{print, progress, reporter::TerminalReporter};

pub async fn scan(cli: &CommandLine) -> anyhow::Result<()> {
    let cfg: ScanConfig = cli.scan_config();
    let targets: Vec<String> = load_targets(cli)?;
    let target_count: usize = targets.len();
    let client = http::build_client()?;

    let cancel: CancellationToken = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let engine: ScanEngine = ScanEngine::new(targets, cfg.clone(), client, ipfinder_sources::all())
        .with_reporter(Arc::new(TerminalReporter::new(cfg.silent)))
        .with_cancel_token(cancel);

    print::header("starting reverse ip lookup", cfg.silent);
    if !cfg.silent {
        progress::start(target_count);
    }

    let result: Result<RunSummary, ScanError> = engine.run().await;
    progress::finish();

    match result {
        Ok(summary) => {
            if summary.unique_domains == 0 && !cfg.silent {
                warn!("No domains found");
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_targets(cli: &CommandLine) -> anyhow::Result<Vec<String>> {
    match (&cli.ip, &cli.list) {
        (Some(ip), _) => Ok(target::from_single(ip)?),
        (None, Some(path)) => Ok(target::from_file(path)?),
        (None, None) => anyhow::bail!("either --ip or --list must be specified"),
    }
}

/// Cancels the run on the first Ctrl-C. Running lookups finish on their own.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping after running lookups");
            cancel.cancel();
        }
    });
}
