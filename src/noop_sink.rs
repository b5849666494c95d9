use crate::event::Event;
use crate::sink::Sink;

/// A sink that simply drops all events.
///
/// Useful for measuring the overhead of rendering itself without any
/// I/O, and for tests that don't care about output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn handle(&self, _event: &Event) {}
}
