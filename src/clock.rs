use chrono::{DateTime, FixedOffset, Local};
use std::sync::Mutex;

/// Source of event timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the local offset.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that returns a settable instant. Useful in tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: impl Into<DateTime<FixedOffset>>) -> Self {
        FixedClock { now: Mutex::new(now.into()) }
    }

    pub fn set(&self, now: impl Into<DateTime<FixedOffset>>) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard = now.into();
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
