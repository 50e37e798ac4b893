//! # Scan Target Input
//!
//! Turns user input into the list of IP literals handed to the engine.
//!
//! Targets come from either:
//! * A single address given on the command line.
//! * A newline-delimited file. Blank lines and lines starting with `#` or
//!   `//` are skipped.
//!
//! Validation is deliberately loose for IPv6: anything containing `:` is
//! accepted as a plausible literal and left to the lookup services to judge.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("failed to read target list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid IP address: {0}")]
    Invalid(String),
    #[error("no valid IPs found in {0}")]
    Empty(String),
}

/// Validates and wraps a single command-line target.
pub fn from_single(raw: &str) -> Result<Vec<String>, TargetError> {
    let ip: &str = raw.trim();
    if !is_valid_ip(ip) {
        return Err(TargetError::Invalid(ip.to_string()));
    }
    Ok(vec![ip.to_string()])
}

/// Loads targets from a list file.
pub fn from_file(path: &Path) -> Result<Vec<String>, TargetError> {
    let file: File = File::open(path).map_err(|source| TargetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let ips: Vec<String> = parse_lines(BufReader::new(file)).map_err(|source| TargetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if ips.is_empty() {
        return Err(TargetError::Empty(path.display().to_string()));
    }
    Ok(ips)
}

/// Reads one target per line, skipping comments and invalid entries.
///
/// Duplicates are dropped; the first occurrence keeps its position.
pub fn parse_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut ips: Vec<String> = Vec::new();

    for line in reader.lines() {
        let line: String = line?;
        let entry: &str = line.trim();
        if is_ignored(entry) {
            continue;
        }
        if !is_valid_ip(entry) {
            warn!("Skipping invalid IP: {entry}");
            continue;
        }
        if seen.insert(entry.to_string()) {
            ips.push(entry.to_string());
        }
    }

    Ok(ips)
}

fn is_ignored(entry: &str) -> bool {
    entry.is_empty() || entry.starts_with('#') || entry.starts_with("//")
}

/// Basic syntactic check for an IP literal.
pub fn is_valid_ip(ip: &str) -> bool {
    if ip.is_empty() || ip.contains(char::is_whitespace) {
        return false;
    }
    if ip.contains(':') {
        return true;
    }

    let octets: Vec<&str> = ip.split('.').collect();
    octets.len() == 4 && octets.iter().all(|octet| is_valid_octet(octet))
}

fn is_valid_octet(octet: &str) -> bool {
    (1..=3).contains(&octet.len())
        && octet.chars().all(|c| c.is_ascii_digit())
        && octet.parse::<u16>().is_ok_and(|n| n <= 255)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
