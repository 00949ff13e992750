//! Record sinks.
//!
//! # Data Flow
//! ```text
//! StructuredLogger
//!     → Record (context, fields, level, time, error, caller, message)
//!     → Sink::emit
//!         → JsonSink    (one JSON object per line)
//!         → ConsoleSink (human-readable line)
//!         → TracingSink (tracing event for a tracing-subscriber pipeline)
//! ```
//!
//! # Design Decisions
//! - Sinks own their write discipline; a record is written under one lock
//! - Write failures are counted in [`SinkStats`] and otherwise ignored
//! - Sinks never see level filtering; the logger filters before emitting
//! - Reserved keys are written after context and call fields, so a call
//!   field named `level` or `time` never shadows the real one

mod bridge;
mod console;
mod json;

pub use bridge::{TracingSink, TRACING_TARGET};
pub use console::ConsoleSink;
pub use json::JsonSink;

use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::fields::Fields;
use crate::logger::{Context, Level};

/// Destination for finished records.
pub trait Sink: Send + Sync {
    /// Write one record. Must not panic on I/O failure.
    fn emit(&self, record: &Record<'_>);
}

/// Error details attached to an error-level record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorInfo {
    /// `Display` text of the error.
    pub message: String,
    /// `Display` text of each `source()` below the error, outermost first.
    pub stack: Vec<String>,
    /// Backtrace captured at the logging call when stack capture is enabled.
    pub backtrace: Option<String>,
}

/// One log event on its way to a sink.
#[derive(Debug)]
pub struct Record<'a> {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: &'a str,
    pub caller: Option<&'static Location<'static>>,
    pub context: &'a Context,
    pub fields: &'a Fields,
    pub error: Option<ErrorInfo>,
}

impl Record<'_> {
    pub fn time_str(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn caller_str(&self) -> Option<String> {
        self.caller.map(|loc| format!("{}:{}", loc.file(), loc.line()))
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.context.serialize_entries(&mut map)?;
        for (k, v) in self.fields.iter() {
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("time", &self.time_str())?;
        if let Some(error) = &self.error {
            map.serialize_entry("error", &error.message)?;
            if !error.stack.is_empty() {
                map.serialize_entry("stack", &error.stack)?;
            }
            if let Some(backtrace) = &error.backtrace {
                map.serialize_entry("backtrace", backtrace)?;
            }
        }
        if let Some(caller) = self.caller_str() {
            map.serialize_entry("caller", &caller)?;
        }
        map.serialize_entry("message", self.message)?;
        map.end()
    }
}

/// Write counters shared by the writer-backed sinks.
#[derive(Debug, Default)]
pub struct SinkStats {
    written: AtomicU64,
    dropped: AtomicU64,
}

impl SinkStats {
    pub fn add_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records fully written to the destination.
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Records lost to I/O or encoding failures.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_record_serialization_order() {
        let context = Context::new().with_group("api");
        let fields: Fields = [("request_id", json!("abc123"))].into_iter().collect();
        let record = Record {
            time: Utc::now(),
            level: Level::Error,
            message: "failed",
            caller: None,
            context: &context,
            fields: &fields,
            error: Some(ErrorInfo {
                message: "boom".into(),
                stack: vec!["disk full".into()],
                backtrace: None,
            }),
        };

        let text = serde_json::to_string(&record).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["level"], "error");
        assert_eq!(value["group"], "api");
        assert_eq!(value["request_id"], "abc123");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["stack"], json!(["disk full"]));
        assert_eq!(value["message"], "failed");
        assert!(value.get("caller").is_none());
        assert!(value.get("backtrace").is_none());

        assert!(text.starts_with(r#"{"group":"api","request_id":"abc123","level":"error","time":""#));
        assert!(text.find("\"time\"").unwrap() < text.find("\"error\"").unwrap());
        assert!(text.ends_with(r#""message":"failed"}"#));
    }

    #[test]
    fn test_reserved_keys_win_over_call_fields() {
        let context = Context::new();
        let fields: Fields = [
            ("level", json!("debug")),
            ("time", json!("yesterday")),
            ("message", json!("spoofed")),
        ]
        .into_iter()
        .collect();
        let record = Record {
            time: Utc::now(),
            level: Level::Warn,
            message: "real",
            caller: None,
            context: &context,
            fields: &fields,
            error: None,
        };

        let text = serde_json::to_string(&record).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["level"], "warn");
        assert_ne!(value["time"], "yesterday");
        assert_eq!(value["message"], "real");
    }

    #[test]
    fn test_stats_counters() {
        let stats = SinkStats::default();
        stats.add_written();
        stats.add_written();
        stats.add_dropped();
        assert_eq!(stats.written(), 2);
        assert_eq!(stats.dropped(), 1);
    }
}
