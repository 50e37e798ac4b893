//! # Domain Normalization
//!
//! Every lookup service formats its answers differently: some return bare
//! hostnames, some full URLs, some mixed-case names with ports attached.
//! [`normalize`] folds all of them into one canonical form so the output
//! sink can deduplicate on plain string equality.

use std::collections::HashSet;

const SCHEMES: &[&str] = &["https://", "http://"];
const WWW: &str = "www.";

/// Reduces a raw, domain-like string to its canonical form.
///
/// The result is lower-cased, has no scheme, path or port, no leading `www.`,
/// contains only `[a-z0-9.-]` and at least one dot. Inputs that cannot be
/// reduced to such a name yield `None`.
///
/// Applying `normalize` to its own output returns the same value.
pub fn normalize(raw: &str) -> Option<String> {
    let lowered: String = raw.trim().to_ascii_lowercase();

    let mut host: &str = lowered.as_str();
    for scheme in SCHEMES {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest;
            break;
        }
    }
    host = host.split('/').next().unwrap_or_default();
    host = host.split(':').next().unwrap_or_default();

    let cleaned: String = host
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut name: &str = cleaned.trim_matches('.');
    while let Some(rest) = name.strip_prefix(WWW) {
        name = rest.trim_matches('.');
    }

    if name.is_empty() || !name.contains('.') {
        return None;
    }
    Some(name.to_string())
}

/// Normalizes a batch, dropping unusable entries and repeats while keeping
/// first-seen order.
pub fn normalize_all<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    raw.into_iter()
        .filter_map(|d| normalize(d.as_ref()))
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
