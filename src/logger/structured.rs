//! Sink-backed logger.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use super::{Context, Level, Logger};
use crate::config::{Format, Output, Settings};
use crate::fields::normalize;
use crate::sink::{ConsoleSink, ErrorInfo, JsonSink, Record, Sink};

/// Build a logger for an environment name.
///
/// `"production"` logs info and above as JSON lines to stdout. Any other name
/// logs everything as console lines to stdout, with call sites and error
/// chains attached.
pub fn new_logger(environment: &str) -> StructuredLogger {
    StructuredLogger::from_settings(&Settings::for_environment(environment))
}

/// [`Logger`] that assembles records and hands them to a [`Sink`].
///
/// Cloning is cheap and clones share the sink. Derived loggers share the sink
/// with their parent and own a new context.
#[derive(Clone)]
pub struct StructuredLogger {
    sink: Arc<dyn Sink>,
    context: Context,
    level: Level,
    caller: bool,
    stack_traces: bool,
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("context", &self.context)
            .field("level", &self.level)
            .field("caller", &self.caller)
            .field("stack_traces", &self.stack_traces)
            .finish_non_exhaustive()
    }
}

impl StructuredLogger {
    /// Logger writing records at `level` and above to `sink`, without call
    /// sites or error chains.
    pub fn new(sink: Arc<dyn Sink>, level: Level) -> Self {
        Self {
            sink,
            context: Context::new(),
            level,
            caller: false,
            stack_traces: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let sink: Arc<dyn Sink> = match (settings.format, settings.output) {
            (Format::Json, Output::Stdout) => Arc::new(JsonSink::stdout()),
            (Format::Json, Output::Stderr) => Arc::new(JsonSink::stderr()),
            (Format::Pretty, Output::Stdout) => Arc::new(ConsoleSink::stdout()),
            (Format::Pretty, Output::Stderr) => Arc::new(ConsoleSink::stderr()),
        };
        Self::new(sink, settings.level)
            .with_caller(settings.caller)
            .with_stack_traces(settings.stack_traces)
    }

    /// Annotate records with the logging call site.
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.caller = enabled;
        self
    }

    /// Attach the error source chain and a backtrace to error records.
    pub fn with_stack_traces(mut self, enabled: bool) -> Self {
        self.stack_traces = enabled;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Typed form of [`Logger::new_group`].
    pub fn group(&self, name: &str) -> Self {
        Self {
            context: self.context.with_group(name),
            ..self.clone()
        }
    }

    /// Typed form of [`Logger::with`].
    pub fn with_args(&self, args: &[Value]) -> Self {
        Self {
            context: self.context.with_additional(&normalize(args)),
            ..self.clone()
        }
    }

    fn error_info(&self, err: &(dyn Error + 'static)) -> ErrorInfo {
        let mut info = ErrorInfo {
            message: err.to_string(),
            ..ErrorInfo::default()
        };
        if !self.stack_traces {
            return info;
        }

        let mut source = err.source();
        while let Some(cause) = source {
            info.stack.push(cause.to_string());
            source = cause.source();
        }

        // Ignores RUST_BACKTRACE.
        let backtrace = Backtrace::force_capture();
        if backtrace.status() == BacktraceStatus::Captured {
            info.backtrace = Some(backtrace.to_string());
        }
        info
    }

    fn emit(
        &self,
        level: Level,
        msg: &str,
        location: &'static Location<'static>,
        err: Option<&(dyn Error + 'static)>,
        args: &[Value],
    ) {
        if !self.enabled(level) {
            return;
        }

        let fields = normalize(args);
        let record = Record {
            time: Utc::now(),
            level,
            message: msg,
            caller: self.caller.then_some(location),
            context: &self.context,
            fields: &fields,
            error: err.map(|e| self.error_info(e)),
        };
        self.sink.emit(&record);
    }
}

impl Logger for StructuredLogger {
    #[track_caller]
    fn debug(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Debug, msg, Location::caller(), None, args);
    }

    #[track_caller]
    fn info(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Info, msg, Location::caller(), None, args);
    }

    #[track_caller]
    fn warning(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Warn, msg, Location::caller(), None, args);
    }

    #[track_caller]
    fn error(&self, msg: &str, err: Option<&(dyn Error + 'static)>, args: &[Value]) {
        self.emit(Level::Error, msg, Location::caller(), err, args);
    }

    fn new_group(&self, name: &str) -> Box<dyn Logger> {
        Box::new(self.group(name))
    }

    fn with(&self, args: &[Value]) -> Box<dyn Logger> {
        Box::new(self.with_args(args))
    }
}
