//! Logger facade.
//!
//! # Responsibilities
//! - Leveled logging with flat key/value args
//! - Derive child loggers carrying extra context (`new_group`, `with`)
//! - Build a logger from an environment name or resolved settings
//!
//! # Design Decisions
//! - Logging never returns errors; malformed args become sentinel fields
//! - Context is immutable; derivation returns a new logger
//! - Call sites are captured with `#[track_caller]`

mod context;
mod level;
mod structured;

pub use context::{Context, ADDITIONAL_INFO_KEY, GROUP_KEY};
pub use level::{Level, ParseLevelError};
pub use structured::{new_logger, StructuredLogger};

use std::error::Error;

use serde_json::Value;

/// Leveled, structured logging with derivable context.
///
/// `args` is a flat `key, value, key, value, ...` list, usually built with
/// [`args!`](crate::args).
pub trait Logger: Send + Sync {
    /// Log at debug level.
    #[track_caller]
    fn debug(&self, msg: &str, args: &[Value]);

    /// Log at info level.
    #[track_caller]
    fn info(&self, msg: &str, args: &[Value]);

    /// Log at warning level.
    #[track_caller]
    fn warning(&self, msg: &str, args: &[Value]);

    /// Log at error level, attaching `err` when present.
    #[track_caller]
    fn error(&self, msg: &str, err: Option<&(dyn Error + 'static)>, args: &[Value]);

    /// Child logger whose records carry `group = name`.
    fn new_group(&self, name: &str) -> Box<dyn Logger>;

    /// Child logger whose records carry `args` under `additionalInfo`.
    fn with(&self, args: &[Value]) -> Box<dyn Logger>;
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn debug(&self, _msg: &str, _args: &[Value]) {}

    fn info(&self, _msg: &str, _args: &[Value]) {}

    fn warning(&self, _msg: &str, _args: &[Value]) {}

    fn error(&self, _msg: &str, _err: Option<&(dyn Error + 'static)>, _args: &[Value]) {}

    fn new_group(&self, _name: &str) -> Box<dyn Logger> {
        Box::new(NopLogger)
    }

    fn with(&self, _args: &[Value]) -> Box<dyn Logger> {
        Box::new(NopLogger)
    }
}
