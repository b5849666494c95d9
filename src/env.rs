//! Environment variable names used by this crate for configuring the
//! default logger from a service's environment.
//!
//! These are purely helpers; `Logger` and `Settings` stay decoupled
//! from environment access.

use crate::backend::{parse_sink_kind, SinkKind, SinkKindError};
use crate::level::{Level, ParseLevelError};
use crate::settings::Settings;

/// Most verbose level to emit, e.g. `debug`.
pub const TEMPLATED_LOG_LEVEL_ENV: &str = "TEMPLATED_LOG_LEVEL";

/// Convert rendered timestamps to UTC (`true`/`false`).
pub const TEMPLATED_LOG_UTC_ENV: &str = "TEMPLATED_LOG_UTC";

/// chrono `strftime` layout for timestamps rendered into messages.
pub const TEMPLATED_LOG_DATE_FORMAT_ENV: &str = "TEMPLATED_LOG_DATE_FORMAT";

/// Destination name, see [`parse_sink_kind`].
pub const TEMPLATED_LOG_SINK_ENV: &str = "TEMPLATED_LOG_SINK";

/// Error type returned when the environment holds an invalid value.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    Level {
        var: &'static str,
        #[source]
        source: ParseLevelError,
    },

    #[error("{var}: expected a boolean, got {value:?}")]
    Bool { var: &'static str, value: String },

    #[error("{var}: {source}")]
    Sink {
        var: &'static str,
        #[source]
        source: SinkKindError,
    },
}

/// Everything the environment can configure for a logger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    pub level: Level,
    pub settings: Settings,
    pub sink: SinkKind,
}

impl EnvConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = match lookup(TEMPLATED_LOG_LEVEL_ENV) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::Level {
                var: TEMPLATED_LOG_LEVEL_ENV,
                source,
            })?,
            None => Level::default(),
        };

        let mut settings = Settings::default();
        if let Some(raw) = lookup(TEMPLATED_LOG_UTC_ENV) {
            settings.utc = parse_bool(&raw).ok_or(ConfigError::Bool {
                var: TEMPLATED_LOG_UTC_ENV,
                value: raw,
            })?;
        }
        if let Some(layout) = lookup(TEMPLATED_LOG_DATE_FORMAT_ENV) {
            settings.date_format = layout;
        }

        let sink = match lookup(TEMPLATED_LOG_SINK_ENV) {
            Some(raw) => parse_sink_kind(&raw).map_err(|source| ConfigError::Sink {
                var: TEMPLATED_LOG_SINK_ENV,
                source,
            })?,
            None => SinkKind::Console,
        };

        Ok(EnvConfig { level, settings, sink })
    }
}

impl Settings {
    /// [`Settings`] from the process environment, defaults for unset keys.
    pub fn from_env() -> Result<Settings, ConfigError> {
        EnvConfig::from_env().map(|cfg| cfg.settings)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = EnvConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.level, Level::Info);
        assert_eq!(cfg.settings, Settings::default());
        assert_eq!(cfg.sink, SinkKind::Console);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = EnvConfig::from_lookup(lookup(&[
            (TEMPLATED_LOG_LEVEL_ENV, "debug"),
            (TEMPLATED_LOG_UTC_ENV, "no"),
            (TEMPLATED_LOG_DATE_FORMAT_ENV, "%H:%M"),
            (TEMPLATED_LOG_SINK_ENV, "noop"),
        ]))
        .unwrap();

        assert_eq!(cfg.level, Level::Debug);
        assert!(!cfg.settings.utc);
        assert_eq!(cfg.settings.date_format, "%H:%M");
        assert_eq!(cfg.sink, SinkKind::Noop);
    }

    #[test]
    fn rejects_bad_values() {
        let err = EnvConfig::from_lookup(lookup(&[(TEMPLATED_LOG_UTC_ENV, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Bool { .. }));

        let err = EnvConfig::from_lookup(lookup(&[(TEMPLATED_LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(err.to_string().contains(TEMPLATED_LOG_LEVEL_ENV));

        let err = EnvConfig::from_lookup(lookup(&[(TEMPLATED_LOG_SINK_ENV, "kafka")])).unwrap_err();
        assert!(matches!(err, ConfigError::Sink { .. }));
    }
}
