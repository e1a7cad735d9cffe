use std::io::{self, Stderr, Stdout, Write};

use nu_ansi_term::Color::{self, Blue, Magenta, Red, Yellow};
use tracing::{field::Field, Event, Level, Metadata, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields, MakeWriter},
    registry::LookupSpan,
};

use crate::{cli::Args, utils::Colored};

/// Where a level is printed and how it is tagged.
///
/// `INFO` is regular command output: untagged, on stdout so it can be piped.
/// Everything else is a diagnostic and goes to stderr with a colored tag.
fn level_style(level: &Level) -> Option<(Color, &'static str)> {
    match *level {
        Level::TRACE => Some((Magenta, "[TRACE]")),
        Level::DEBUG => Some((Blue, "[DEBUG]")),
        Level::INFO => None,
        Level::WARN => Some((Yellow, "[WARN]")),
        Level::ERROR => Some((Red, "[ERROR]")),
    }
}

fn is_output(level: &Level) -> bool {
    level_style(level).is_none()
}

/// Collects the formatted `message` field; structured fields only show up
/// in JSON mode.
#[derive(Default)]
struct Message(String);

impl tracing::field::Visit for Message {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut message = Message::default();
        event.record(&mut message);

        if let Some((color, tag)) = level_style(event.metadata().level()) {
            write!(writer, "{} ", Colored(color, tag))?;
        }
        writeln!(writer, "{}", message.0)
    }
}

enum ConsoleStream {
    Out(Stdout),
    Err(Stderr),
}

impl Write for ConsoleStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ConsoleStream::Out(out) => out.write(buf),
            ConsoleStream::Err(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleStream::Out(out) => out.flush(),
            ConsoleStream::Err(err) => err.flush(),
        }
    }
}

struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleStream;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleStream::Out(io::stdout())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if is_output(meta.level()) {
            ConsoleStream::Out(io::stdout())
        } else {
            ConsoleStream::Err(io::stderr())
        }
    }
}

fn filter_level(args: &Args) -> Level {
    if args.quiet {
        Level::ERROR
    } else if args.verbose >= 2 {
        Level::TRACE
    } else if args.verbose == 1 {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Installs the global subscriber: the console format by default, one JSON
/// object per event with `--json`.
pub fn setup_logging(args: &Args) {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(format!("cogindex={}", filter_level(args)))
        .with_target(false)
        .with_writer(Console)
        .without_time();

    let subscriber: Box<dyn Subscriber + Send + Sync> = if args.json {
        Box::new(builder.json().flatten_event(true).finish())
    } else {
        Box::new(builder.event_format(ConsoleFormat).finish())
    };

    // A second call only happens in tests, where the first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use clap::Parser;
    use tracing::{info, warn};

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_filter_level() {
        let level = |argv: &[&str]| filter_level(&Args::parse_from(argv));

        assert_eq!(level(&["cogindex", "tags"]), Level::INFO);
        assert_eq!(level(&["cogindex", "-v", "tags"]), Level::DEBUG);
        assert_eq!(level(&["cogindex", "-vv", "tags"]), Level::TRACE);
        assert_eq!(level(&["cogindex", "-q", "-vv", "tags"]), Level::ERROR);
    }

    #[test]
    fn test_only_info_is_output() {
        assert!(is_output(&Level::INFO));
        for level in [Level::TRACE, Level::DEBUG, Level::WARN, Level::ERROR] {
            assert!(!is_output(&level));
        }
    }

    #[test]
    fn test_console_format() {
        let buffer = Buffer::default();
        let sink = buffer.clone();
        let subscriber = fmt::Subscriber::builder()
            .with_writer(move || sink.clone())
            .event_format(ConsoleFormat)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            info!(tag = "audio", "audio (3)");
            warn!("config file missing");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("audio (3)"));

        let warning = lines.next().unwrap();
        assert!(warning.contains("[WARN]"));
        assert!(warning.ends_with(" config file missing"));
        assert!(!output.contains("tag="));
    }
}
