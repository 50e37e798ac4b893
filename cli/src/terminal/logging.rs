use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::{colors, print, progress};

/// Renders `[HH:MM:SS] [+] message`, or `[HH:MM:SS] message` for lines
/// emitted through [`print::print`].
pub struct IpfinderFormatter;

impl<S, N> FormatEvent<S, N> for IpfinderFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let timestamp: String = format!("[{}]", chrono::Local::now().format("%H:%M:%S"));
        write!(writer, "{} ", timestamp.color(colors::TIMESTAMP))?;

        if meta.target() != print::PRINT_TARGET {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
                Level::TRACE => ("[ ]", |s| s.dimmed()),
                Level::DEBUG => ("[?]", |s| s.blue()),
                Level::INFO => ("[+]", |s| s.green().bold()),
                Level::WARN => ("[*]", |s| s.yellow().bold()),
                Level::ERROR => ("[-]", |s| s.red().bold()),
            };
            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the level picked from the flags. Output goes through
/// the progress bar so log lines never tear it.
pub fn init(verbose: bool, silent: bool, no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }

    let level: &str = match (silent, verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "info",
    };
    let filter: EnvFilter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .event_format(IpfinderFormatter)
        .with_writer(|| progress::ProgressWriter)
        .init();
}
