use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub(crate) static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

/// Shows a bar counting finished IPs. Only the first call has any effect.
pub fn start(total: usize) {
    PROGRESS.get_or_init(|| {
        let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        let style = ProgressStyle::with_template(
            "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} IPs {elapsed_precise} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
        .progress_chars("━╸ ");

        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });
}

pub fn advance(completed: usize) {
    if let Some(pb) = PROGRESS.get() {
        pb.set_position(completed as u64);
    }
}

pub fn set_message(msg: String) {
    if let Some(pb) = PROGRESS.get() {
        pb.set_message(msg);
    }
}

pub fn finish() {
    if let Some(pb) = PROGRESS.get() {
        pb.finish_and_clear();
    }
}

/// Log sink that prints above the progress bar while it is visible.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match PROGRESS.get() {
            Some(pb) if !pb.is_finished() && !pb.is_hidden() => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
                Ok(buf.len())
            }
            _ => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
