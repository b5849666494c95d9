use crate::data::Data;
use crate::event::Event;
use crate::sink::Sink;
use std::fmt;

/// Re-emits events through `tracing`, so applications that already
/// install a `tracing` subscriber get templated output in the same place.
///
/// The rendered message becomes the event message; context and details
/// (details winning) are attached as a single `data` field. Events at
/// [`Level::Suppressed`] have no `tracing` counterpart and are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn handle(&self, event: &Event) {
        let Some(level) = event.level().as_tracing() else {
            return;
        };
        let data = Fields(event.context().merged(event.details()));
        let message = event.message();

        match level {
            tracing::Level::ERROR => tracing::error!(target: "templated_log", data = %data, "{}", message),
            tracing::Level::WARN => tracing::warn!(target: "templated_log", data = %data, "{}", message),
            tracing::Level::INFO => tracing::info!(target: "templated_log", data = %data, "{}", message),
            _ => tracing::debug!(target: "templated_log", data = %data, "{}", message),
        }
    }
}

/// `key=value` pairs separated by spaces.
struct Fields(Data);

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use chrono::Utc;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(events: &[Event]) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            for event in events {
                TracingSink.handle(event);
            }
        });

        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn event(level: Level, message: &str) -> Event {
        Event::new(
            level,
            message.to_string(),
            Arc::new(Data::new().with("service", "api")),
            Data::new().with("disk", "sda1"),
            Utc::now().fixed_offset(),
        )
    }

    #[test]
    fn forwards_at_mapped_level() {
        let output = capture(&[
            event(Level::Error, "disk full"),
            event(Level::Debug, "checked quota"),
        ]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "{output}");
        assert!(lines[0].contains("ERROR"), "{output}");
        assert!(lines[0].contains("disk full"), "{output}");
        assert!(lines[0].contains("data=disk=sda1 service=api"), "{output}");
        assert!(lines[1].contains("DEBUG"), "{output}");
    }

    #[test]
    fn suppressed_events_are_dropped() {
        let output = capture(&[event(Level::Suppressed, "never")]);
        assert!(output.is_empty(), "{output}");
    }
}
