use crate::event::Event;
use crate::sink::Sink;
use std::sync::{Mutex, MutexGuard};

/// A sink that keeps every event in memory.
///
/// Meant for tests: share it through an `Arc` with the logger and
/// inspect [`MemorySink::events`] afterwards.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything received so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.lock())
    }
}

impl Sink for MemorySink {
    fn handle(&self, event: &Event) {
        self.lock().push(event.clone());
    }
}
