//! Bridge into `tracing`.
//!
//! `tracing` field names are fixed at compile time, so the context and call
//! fields of a record travel as one JSON-encoded `fields` attribute.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Record, Sink};
use crate::logger::Level;

/// Target attached to forwarded events, usable in `EnvFilter` directives.
pub const TRACING_TARGET: &str = "fieldlog";

/// Re-emits records as `tracing` events for the current subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

/// Context entries followed by call fields, as one JSON object.
struct RecordFields<'r, 'a>(&'r Record<'a>);

impl Serialize for RecordFields<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.0.context.serialize_entries(&mut map)?;
        for (k, v) in self.0.fields.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

fn encode_fields(record: &Record<'_>) -> Option<String> {
    if record.context.is_empty() && record.fields.is_empty() {
        return None;
    }
    serde_json::to_string(&RecordFields(record)).ok()
}

macro_rules! forward {
    ($level:expr, $record:expr, $fields:expr, $caller:expr) => {{
        let error = $record.error.as_ref().map(|e| e.message.as_str());
        let stack = $record
            .error
            .as_ref()
            .filter(|e| !e.stack.is_empty())
            .map(|e| e.stack.join("; "));
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            fields = $fields,
            caller = $caller,
            error = error,
            stack = stack.as_deref(),
            "{}",
            $record.message
        )
    }};
}

impl Sink for TracingSink {
    fn emit(&self, record: &Record<'_>) {
        let fields = encode_fields(record);
        let fields = fields.as_deref();
        let caller = record.caller_str();
        let caller = caller.as_deref();

        match record.level {
            Level::Trace => forward!(tracing::Level::TRACE, record, fields, caller),
            Level::Debug => forward!(tracing::Level::DEBUG, record, fields, caller),
            Level::Info => forward!(tracing::Level::INFO, record, fields, caller),
            Level::Warn => forward!(tracing::Level::WARN, record, fields, caller),
            Level::Error => forward!(tracing::Level::ERROR, record, fields, caller),
        }
    }
}
