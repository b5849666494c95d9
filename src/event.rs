use crate::data::{Data, Value};
use crate::level::Level;
use crate::settings::{ReservedKeys, Settings};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// One accepted emission, as handed to a [`Sink`](crate::sink::Sink).
///
/// `context` is shared with the logger that produced the event;
/// `details` were extracted from the message template. `settings` are
/// the emitting logger's, and name the reserved keys of the merged view.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    level: Level,
    message: String,
    context: Arc<Data>,
    details: Data,
    time: DateTime<FixedOffset>,
    settings: Arc<Settings>,
}

impl Event {
    pub fn new(
        level: Level,
        message: String,
        context: Arc<Data>,
        details: Data,
        time: DateTime<FixedOffset>,
    ) -> Self {
        Event {
            level,
            message,
            context,
            details,
            time,
            settings: Settings::default_ref(),
        }
    }

    pub fn with_settings(mut self, settings: Arc<Settings>) -> Self {
        self.settings = settings;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &Data {
        &self.context
    }

    pub fn details(&self) -> &Data {
        &self.details
    }

    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Context and details flattened into one record, details winning,
    /// with the level, message and time stored under the reserved keys
    /// of the event's settings.
    pub fn data(&self) -> Data {
        self.data_with(&self.settings.keys)
    }

    /// [`Event::data`] with explicit reserved key names. The reserved
    /// entries always override context or details of the same name.
    pub fn data_with(&self, keys: &ReservedKeys) -> Data {
        let mut result = self.context.merged(&self.details);
        result
            .set(keys.level.as_str(), self.level.as_str())
            .set(keys.message.as_str(), self.message.as_str())
            .set(keys.time.as_str(), Value::Time(self.time));
        result
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data().serialize(serializer)
    }
}
