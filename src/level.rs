use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Event severity, ordered by verbosity.
///
/// A logger's level is the most verbose level it still accepts, so an
/// event at `level` is emitted when `threshold >= level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Suppressed,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Suppressed,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Suppressed => "suppressed",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Three-letter tag used by the console sink.
    pub fn label(self) -> &'static str {
        match self {
            Level::Suppressed => "OFF",
            Level::Error => "ERR",
            Level::Warning => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
        }
    }

    /// The matching `tracing` level. `Suppressed` has none.
    pub fn as_tracing(self) -> Option<tracing::Level> {
        match self {
            Level::Suppressed => None,
            Level::Error => Some(tracing::Level::ERROR),
            Level::Warning => Some(tracing::Level::WARN),
            Level::Info => Some(tracing::Level::INFO),
            Level::Debug => Some(tracing::Level::DEBUG),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Level`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suppressed" | "off" | "none" => Ok(Level::Suppressed),
            "error" | "err" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "debug" | "dbg" => Ok(Level::Debug),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_verbosity() {
        assert!(Level::Suppressed < Level::Error);
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warning));
        assert_eq!(" debug ".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("off".parse::<Level>(), Ok(Level::Suppressed));
        assert_eq!(
            "loud".parse::<Level>(),
            Err(ParseLevelError("loud".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }

    #[test]
    fn tracing_mapping() {
        assert_eq!(Level::Suppressed.as_tracing(), None);
        assert_eq!(Level::Warning.as_tracing(), Some(tracing::Level::WARN));
    }
}
