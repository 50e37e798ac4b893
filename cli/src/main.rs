mod commands;
mod terminal;

use commands::{CommandLine, scan};
use ipfinder_common::config::ScanConfig;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: ScanConfig = commands.scan_config();

    logging::init(cfg.verbose, cfg.silent, commands.no_color);
    print::banner(cfg.silent);

    scan::scan(&commands).await
}
