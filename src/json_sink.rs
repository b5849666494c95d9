use crate::event::Event;
use crate::settings::ReservedKeys;
use crate::sink::Sink;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes each event's merged record ([`Event::data`]) as one JSON
/// object per line. The reserved key names come from the event unless
/// [`JsonSink::with_keys`] overrides them.
///
/// Keys come out sorted. Serialization or write failures are reported
/// through `tracing` and otherwise ignored.
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
    keys: Option<ReservedKeys>,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        JsonSink::new(io::stdout())
    }
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        JsonSink {
            writer: Mutex::new(writer),
            keys: None,
        }
    }

    /// Use non-default names for the level/message/time entries.
    pub fn with_keys(mut self, keys: ReservedKeys) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_event(&self, event: &Event) -> Result<(), serde_json::Error> {
        let data = match &self.keys {
            Some(keys) => event.data_with(keys),
            None => event.data(),
        };
        let mut line = serde_json::to_vec(&data)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(&line).map_err(serde_json::Error::io)?;
        writer.flush().map_err(serde_json::Error::io)
    }
}

impl<W: Write + Send> Sink for JsonSink<W> {
    fn handle(&self, event: &Event) {
        if let Err(e) = self.write_event(event) {
            tracing::warn!(target: "templated_log", error = %e, "json sink dropped an event");
        }
    }
}
