use std::sync::{Arc, OnceLock};

/// Default layout for timestamps rendered into messages
/// (`2006-01-02T15:04:05.000` style).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Record keys reserved for event metadata in [`Event::data`].
///
/// [`Event::data`]: crate::event::Event::data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedKeys {
    pub level: String,
    pub message: String,
    pub time: String,
    pub type_tag: String,
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self {
            level: "level".to_string(),
            message: "message".to_string(),
            time: "time".to_string(),
            type_tag: "type".to_string(),
        }
    }
}

/// Rendering configuration shared by a logger and its template engine.
///
/// **Fields**
/// - `date_format`: chrono `strftime` layout used when a timestamp is
///   rendered into a message with default formatting.
/// - `utc`: convert timestamps to UTC before rendering them.
/// - `keys`: names of the reserved keys in the merged event record.
///
/// Settings are immutable once shared; derive a new value with the
/// `with_*` builders and hand it to the logger explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub date_format: String,
    pub utc: bool,
    pub keys: ReservedKeys,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            utc: true,
            keys: ReservedKeys::default(),
        }
    }
}

impl Settings {
    /// Process-wide default instance.
    pub fn default_ref() -> Arc<Settings> {
        static DEFAULT: OnceLock<Arc<Settings>> = OnceLock::new();
        Arc::clone(DEFAULT.get_or_init(|| Arc::new(Settings::default())))
    }

    pub fn with_date_format(mut self, layout: impl Into<String>) -> Self {
        self.date_format = layout.into();
        self
    }

    pub fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    pub fn with_keys(mut self, keys: ReservedKeys) -> Self {
        self.keys = keys;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ref_is_shared() {
        let a = Settings::default_ref();
        let b = Settings::default_ref();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, Settings::default());
    }

    #[test]
    fn builders_do_not_touch_the_default() {
        let custom = Settings::default().with_utc(false).with_date_format("%H:%M");
        assert!(!custom.utc);
        assert_eq!(custom.date_format, "%H:%M");
        assert!(Settings::default_ref().utc);
    }
}
