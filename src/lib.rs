//! Structured logging facade.
//!
//! Leveled logging with flat key/value args, context propagation and named
//! sub-loggers, written to a swappable [`sink::Sink`].
//!
//! ```no_run
//! use fieldlog::{args, new_logger, Logger};
//!
//! let logger = new_logger("production");
//! let api = logger.new_group("api").with(&args!["request_id", "abc123"]);
//! api.info("request handled", &args!["status", 200]);
//! ```

pub mod config;
pub mod fields;
pub mod logger;
pub mod sink;

pub use serde_json::Value;

pub use config::{LogConfig, Settings};
pub use fields::{normalize, to_arg, Fields};
pub use logger::{new_logger, Level, Logger, NopLogger, StructuredLogger};
