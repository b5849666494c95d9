use crate::backend::{make_sink, SinkBuildError, SinkKind};
use crate::env::{ConfigError, EnvConfig};
use crate::logger::Logger;
use crate::sink::Sink;
use crate::tracing_sink::TracingSink;
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// Error type returned when installing the process-wide logger.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("default logger is already initialized")]
    AlreadyInitialized,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] SinkBuildError),
}

/// The process-wide logger.
///
/// Unless [`init_default`] or [`init_from_env`] ran first, this is a
/// console logger at `info` created on first use.
pub fn default_logger() -> &'static Logger {
    DEFAULT.get_or_init(|| {
        let sink = make_sink(SinkKind::Console).unwrap_or_else(|_| Arc::new(TracingSink) as Arc<dyn Sink>);
        Logger::new(sink)
    })
}

/// Install `logger` as the process-wide logger.
///
/// **Returns**
/// - `Ok(())` if no default logger existed yet.
/// - `Err(InitError::AlreadyInitialized)` if one was installed, or
///   [`default_logger`] was already called.
pub fn init_default(logger: Logger) -> Result<(), InitError> {
    DEFAULT.set(logger).map_err(|_| InitError::AlreadyInitialized)
}

/// Build a logger from environment settings.
pub fn logger_from_config(config: &EnvConfig) -> Result<Logger, InitError> {
    let sink = make_sink(config.sink)?;
    Ok(Logger::new(sink)
        .with_level(config.level)
        .with_settings(Arc::new(config.settings.clone())))
}

/// Configure the process-wide logger from `TEMPLATED_LOG_*` variables
/// and install it.
///
/// This is the recommended entrypoint for typical services.
pub fn init_from_env() -> Result<&'static Logger, InitError> {
    let config = EnvConfig::from_env()?;
    init_default(logger_from_config(&config)?)?;
    tracing::debug!(
        target: "templated_log",
        level = %config.level,
        sink = ?config.sink,
        "default logger initialized from environment"
    );
    Ok(default_logger())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::settings::Settings;

    #[test]
    fn builds_logger_from_config() {
        let config = EnvConfig {
            level: Level::Debug,
            settings: Settings::default().with_utc(false),
            sink: SinkKind::Noop,
        };

        let log = logger_from_config(&config).unwrap();
        assert_eq!(log.level(), Level::Debug);
        assert!(!log.settings().utc);
        assert!(log.context().is_empty());
    }
}
