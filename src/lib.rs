//! Leveled logging where one message template yields both the rendered
//! line and a structured record.
//!
//! ```
//! use templated_log::{args, Logger, MemorySink, Value};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let log = Logger::new(Arc::clone(&sink)).with_context("service", "billing");
//!
//! log.info("charged {user} {amount|%.2f} EUR", args!["ana", 12.5]);
//!
//! let event = &sink.events()[0];
//! assert_eq!(event.message(), "charged ana 12.50 EUR");
//! assert_eq!(event.details().get("amount"), Some(&Value::Float(12.5)));
//! ```

pub mod arg;
pub mod backend;
pub mod buffered;
pub mod clock;
pub mod data;
pub mod env;
pub mod event;
mod format;
pub mod init;
pub mod level;
pub mod logger;
pub mod memory_sink;
pub mod noop_sink;
pub mod settings;
pub mod sink;
pub mod template;
pub mod tracing_sink;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "json")]
pub mod json_sink;

pub use arg::Arg;
pub use clock::{Clock, FixedClock, SystemClock};
pub use data::{Data, Value};
pub use event::Event;
pub use level::Level;
pub use logger::Logger;
pub use memory_sink::MemorySink;
pub use noop_sink::NoopSink;
pub use settings::{ReservedKeys, Settings};
pub use sink::{Sink, SinkFn};
pub use template::{render, Renderer};
