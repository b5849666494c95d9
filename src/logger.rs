use crate::arg::Arg;
use crate::clock::{Clock, SystemClock};
use crate::data::{Data, Value};
use crate::event::Event;
use crate::level::Level;
use crate::settings::Settings;
use crate::sink::Sink;
use crate::template::Renderer;
use std::fmt;
use std::sync::Arc;

/// Leveled logger carrying a context record.
///
/// A logger is never mutated once shared: [`Logger::with_context`] and
/// the other derivations return a new logger that shares the sink,
/// clock and settings with its parent. Cloning is cheap.
///
/// ```
/// use templated_log::{args, Level, Logger, MemorySink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let log = Logger::new(Arc::clone(&sink))
///     .with_level(Level::Debug)
///     .with_context("request_id", 42);
///
/// log.info("served {path} in {ms|%.1f}ms", args!["/health", 1.25]);
///
/// let event = &sink.events()[0];
/// assert_eq!(event.message(), "served /health in 1.3ms");
/// ```
#[derive(Clone)]
pub struct Logger {
    level: Level,
    context: Arc<Data>,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    renderer: Renderer,
}

impl Logger {
    /// Logger at [`Level::Info`] with an empty context, the system clock
    /// and the default settings.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Logger {
            level: Level::default(),
            context: Arc::new(Data::new()),
            sink: Arc::new(sink),
            clock: Arc::new(SystemClock),
            renderer: Renderer::default(),
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_settings(mut self, settings: Arc<Settings>) -> Self {
        self.renderer = Renderer::new(settings);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn context(&self) -> &Data {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        self.renderer.settings()
    }

    /// Whether an event at `level` would reach the sink.
    pub fn enabled(&self, level: Level) -> bool {
        self.level >= level
    }

    /// Render `template` against `args` and hand the event to the sink.
    ///
    /// When `level` is more verbose than the logger's level nothing
    /// happens: the template is not parsed and deferred arguments are
    /// dropped without running.
    pub fn emit(&self, level: Level, template: &str, args: Vec<Arg>) {
        if !self.enabled(level) {
            return;
        }

        let (message, details) = self.renderer.render(template, args);
        let event = Event::new(
            level,
            message,
            Arc::clone(&self.context),
            details,
            self.clock.now(),
        )
        .with_settings(self.renderer.shared_settings());

        tracing::trace!(
            target: "templated_log",
            level = %level,
            details = event.details().len(),
            "dispatching event"
        );

        self.sink.handle(&event);
    }

    pub fn error(&self, template: &str, args: Vec<Arg>) {
        self.emit(Level::Error, template, args)
    }

    pub fn warn(&self, template: &str, args: Vec<Arg>) {
        self.emit(Level::Warning, template, args)
    }

    pub fn info(&self, template: &str, args: Vec<Arg>) {
        self.emit(Level::Info, template, args)
    }

    pub fn debug(&self, template: &str, args: Vec<Arg>) {
        self.emit(Level::Debug, template, args)
    }

    /// A new logger whose context also holds `key`. `self` is left as is.
    pub fn with_context(&self, key: impl Into<String>, value: impl Into<Value>) -> Logger {
        let mut context = (*self.context).clone();
        context.set(key, value);

        Logger {
            context: Arc::new(context),
            ..self.clone()
        }
    }

    /// Tag the context with the type name of `value` under the reserved
    /// type key.
    pub fn with_type_tag<T: ?Sized>(&self, _value: &T) -> Logger {
        self.with_type::<T>()
    }

    /// [`Logger::with_type_tag`] without needing a value.
    pub fn with_type<T: ?Sized>(&self) -> Logger {
        let key = self.settings().keys.type_tag.clone();
        self.with_context(key, std::any::type_name::<T>())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("context", &self.context)
            .field("settings", self.settings())
            .finish_non_exhaustive()
    }
}

/// Emit at an explicit level, building the arguments only when the
/// level is enabled.
///
/// ```
/// use templated_log::{emit, Level, Logger, NoopSink};
///
/// let log = Logger::new(NoopSink);
/// emit!(log, Level::Info, "{user} signed in", "ana");
/// ```
#[macro_export]
macro_rules! emit {
    ($log:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let log = &$log;
        let level = $level;
        if log.enabled(level) {
            log.emit(level, $template, $crate::args![$($arg),*]);
        }
    }};
}

#[macro_export]
macro_rules! error {
    ($log:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::emit!($log, $crate::Level::Error, $template $(, $arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($log:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::emit!($log, $crate::Level::Warning, $template $(, $arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($log:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::emit!($log, $crate::Level::Info, $template $(, $arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($log:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::emit!($log, $crate::Level::Debug, $template $(, $arg)*)
    };
}
