use crate::event::Event;
use std::sync::Arc;

/// Synchronous destination for [`Event`]s accepted by a logger.
///
/// `handle` runs on the emitting thread, once per accepted event, and
/// must not assume anything about the caller beyond that. Sinks that
/// can fail (I/O, full queues) deal with the failure themselves; the
/// logger has no error path back to the caller.
pub trait Sink: Send + Sync {
    /// Consume one event.
    fn handle(&self, event: &Event);
}

/// Adapts a plain function or closure into a [`Sink`].
///
/// ```
/// use templated_log::{Logger, SinkFn};
///
/// let log = Logger::new(SinkFn(|event: &templated_log::Event| {
///     eprintln!("{}", event.message());
/// }));
/// log.info("ready", vec![]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SinkFn<F>(pub F);

impl<F> Sink for SinkFn<F>
where
    F: Fn(&Event) + Send + Sync,
{
    fn handle(&self, event: &Event) {
        (self.0)(event)
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn handle(&self, event: &Event) {
        (**self).handle(event)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn handle(&self, event: &Event) {
        (**self).handle(event)
    }
}
