use std::sync::Arc;

use crate::noop_sink::NoopSink;
use crate::sink::Sink;
use crate::tracing_sink::TracingSink;

/// Built-in destinations that can be selected by name, e.g. from
/// `TEMPLATED_LOG_SINK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    Json,
    Tracing,
    Noop,
}

/// Parse a destination name.
///
/// Accepted names (case-insensitive):
/// - "console", "stdout"
/// - "json", "jsonl"
/// - "tracing"
/// - "noop", "null", "none"
pub fn parse_sink_kind(name: &str) -> Result<SinkKind, SinkKindError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "console" | "stdout" => Ok(SinkKind::Console),
        "json" | "jsonl" => Ok(SinkKind::Json),
        "tracing" => Ok(SinkKind::Tracing),
        "noop" | "null" | "none" => Ok(SinkKind::Noop),
        _ => Err(SinkKindError::Unknown(name.to_string())),
    }
}

/// Error type returned when parsing a destination name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkKindError {
    #[error("unknown or unsupported sink: {0:?}")]
    Unknown(String),
}

/// Error type returned when building a sink from a [`SinkKind`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkBuildError {
    #[error("console feature is not enabled")]
    ConsoleFeatureDisabled,

    #[error("json feature is not enabled")]
    JsonFeatureDisabled,
}

/// Create a concrete [`Sink`] for `kind`.
///
/// This is the main entry point for applications that select a
/// destination with a single name instead of constructing sinks
/// manually. JSON output goes to stdout.
pub fn make_sink(kind: SinkKind) -> Result<Arc<dyn Sink>, SinkBuildError> {
    match kind {
        SinkKind::Console => {
            #[cfg(feature = "console")]
            {
                Ok(Arc::new(crate::console::ConsoleSink::new()) as Arc<dyn Sink>)
            }

            #[cfg(not(feature = "console"))]
            {
                Err(SinkBuildError::ConsoleFeatureDisabled)
            }
        }
        SinkKind::Json => {
            #[cfg(feature = "json")]
            {
                Ok(Arc::new(crate::json_sink::JsonSink::stdout()) as Arc<dyn Sink>)
            }

            #[cfg(not(feature = "json"))]
            {
                Err(SinkBuildError::JsonFeatureDisabled)
            }
        }
        SinkKind::Tracing => Ok(Arc::new(TracingSink) as Arc<dyn Sink>),
        SinkKind::Noop => Ok(Arc::new(NoopSink) as Arc<dyn Sink>),
    }
}
