use crate::data::Data;
use crate::event::Event;
use crate::level::Level;
use crate::sink::Sink;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

/// Layout of the timestamp at the start of each console line.
pub const CONSOLE_TIME_FORMAT: &str = "%H:%M:%S%.3f";

type Stream = Mutex<Box<dyn Write + Send>>;

/// Writes one line per event:
///
/// ```text
/// 15:04:05.000 [INF] message | key = value, other = value
/// ```
///
/// Errors and warnings go to the error stream (stderr by default), info
/// and debug to the output stream (stdout). The trailing part lists the
/// logger's context sorted by key and is left out when the context is
/// empty. Write failures are ignored.
pub struct ConsoleSink {
    out: Stream,
    err: Stream,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    /// Console sink writing to arbitrary streams.
    pub fn with_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        ConsoleSink {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
        }
    }

    fn stream(&self, level: Level) -> &Stream {
        match level {
            Level::Error | Level::Warning => &self.err,
            Level::Suppressed | Level::Info | Level::Debug => &self.out,
        }
    }
}

impl Sink for ConsoleSink {
    fn handle(&self, event: &Event) {
        let line = format_line(event);
        let mut stream = self
            .stream(event.level())
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let _ = stream.write_all(line.as_bytes());
        let _ = stream.flush();
    }
}

/// The line [`ConsoleSink`] writes for `event`, newline included.
pub fn format_line(event: &Event) -> String {
    let mut line = String::with_capacity(event.message().len() + 32);
    let _ = write!(
        line,
        "{} [{}] {}",
        event.time().format(CONSOLE_TIME_FORMAT),
        event.level().label(),
        event.message()
    );
    write_data(&mut line, event.context());
    line.push('\n');
    line
}

fn write_data(line: &mut String, data: &Data) {
    if data.is_empty() {
        return;
    }

    line.push_str(" | ");
    for (i, (key, value)) in data.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        let _ = write!(line, "{} = {}", key, value);
    }
}
