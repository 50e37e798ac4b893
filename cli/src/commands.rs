pub mod scan;

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use ipfinder_common::config::{DEFAULT_OUTPUT, DEFAULT_THREADS, DelayRange, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "ipfinder", version)]
#[command(about = "Reverse IP finder: list the domains hosted on an IP address.")]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("input").required(true).args(["ip", "list"])))]
#[command(after_help = "Examples:
  ipfinder -d 8.8.8.8
  ipfinder -l ips.txt -t 100 -o results.txt
  ipfinder -d 1.1.1.1 -v
  ipfinder -l ips.txt --silent")]
pub struct CommandLine {
    /// Single IP address to scan
    #[arg(short = 'd', long = "ip", value_name = "IP")]
    pub ip: Option<String>,

    /// File containing a list of IPs, one per line
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of IPs processed concurrently
    #[arg(short = 't', long = "threads", default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long, conflicts_with = "silent")]
    pub verbose: bool,

    /// Only print the number of unique domains found
    #[arg(long)]
    pub silent: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            output: self.output.clone(),
            threads: self.threads,
            delay: DelayRange::default(),
            verbose: self.verbose,
            silent: self.silent,
        }
    }
}
