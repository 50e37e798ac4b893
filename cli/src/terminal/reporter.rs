use std::sync::atomic::{AtomicUsize, Ordering};

use colored::*;
use ipfinder_core::{Reporter, RunSummary};
use tracing::{debug, info, warn};

use crate::mprint;
use crate::terminal::{colors, print, progress};

/// Reports engine events on the terminal.
///
/// In silent mode every event is dropped except the summary, which shrinks
/// to the bare unique-domain count on stdout.
pub struct TerminalReporter {
    silent: bool,
    hits: AtomicUsize,
}

impl TerminalReporter {
    pub fn new(silent: bool) -> Self {
        Self {
            silent,
            hits: AtomicUsize::new(0),
        }
    }
}

impl Reporter for TerminalReporter {
    fn info(&self, message: &str) {
        if !self.silent {
            info!("{message}");
        }
    }

    fn verbose(&self, message: &str) {
        if !self.silent {
            debug!("{message}");
        }
    }

    fn warning(&self, message: &str) {
        if !self.silent {
            warn!("{message}");
        }
    }

    fn success(&self, source: &str, ip: &str, count: usize) {
        if self.silent {
            return;
        }
        print::print(&format!(
            "{} {} {}",
            source.color(colors::SOURCE),
            ip.color(colors::IP_ADDR),
            count.to_string().color(colors::COUNT)
        ));

        let hits: usize = self.hits.fetch_add(count, Ordering::Relaxed) + count;
        progress::set_message(format!("{} hits", hits.to_string().green().bold()));
    }

    fn progress(&self, completed: usize, _total: usize) {
        if !self.silent {
            progress::advance(completed);
        }
    }

    fn summary(&self, summary: &RunSummary) {
        progress::finish();

        if self.silent {
            println!("{}", silent_summary(summary));
            return;
        }

        print_summary(summary);
    }
}

/// The whole stdout of a silent run: the unique count, nothing else.
fn silent_summary(summary: &RunSummary) -> String {
    summary.unique_domains.to_string()
}

fn print_summary(summary: &RunSummary) {
    mprint!();
    print::header("scan complete", false);
    print::set_key_width(["Completed in", "IPs processed", "Sources used", "Unique domains", "Saved to"]);
    print::aligned_line("Completed in", format!("{:.2}s", summary.elapsed.as_secs_f64()));
    print::aligned_line("IPs processed", summary.ip_count.to_string());
    print::aligned_line("Sources used", summary.source_count.to_string());
    print::aligned_line(
        "Unique domains",
        summary.unique_domains.to_string().bold().green(),
    );
    print::aligned_line("Saved to", summary.destination.display().to_string());

    let unique: ColoredString = format!("{} unique domains", summary.unique_domains).bold().green();
    print::fat_separator();
    print::centerln(&format!("Lookup complete: {unique} identified"));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
