//! Human-readable console sink.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::Value;

use super::{Record, Sink, SinkStats};

/// Writes records as single `key=value` lines for reading in a terminal.
///
/// ```text
/// 2026-10-19T09:00:00.123Z INF src/main.rs:42 > start group=api request_id=abc123
/// ```
pub struct ConsoleSink<W> {
    writer: Mutex<W>,
    stats: SinkStats,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl ConsoleSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            stats: SinkStats::default(),
        }
    }

    pub fn stats(&self) -> &SinkStats {
        &self.stats
    }
}

/// Strings print bare unless they need quoting; everything else prints as JSON.
fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) if !needs_quotes(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.contains(|c: char| c.is_whitespace() || c.is_control() || c == '"' || c == '=')
}

/// Append free text with control characters escaped, keeping it on one line.
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_debug());
        } else {
            out.push(c);
        }
    }
}

pub(crate) fn format_line(record: &Record<'_>) -> String {
    let mut line = String::with_capacity(128);
    let _ = write!(line, "{} {}", record.time_str(), record.level.short());
    if let Some(caller) = record.caller_str() {
        let _ = write!(line, " {caller}");
    }
    line.push_str(" > ");
    push_escaped(&mut line, record.message);

    if let Some(group) = record.context.group() {
        line.push_str(" group=");
        push_value(&mut line, &Value::String(group.to_string()));
    }
    if let Some(additional) = record.context.additional_info() {
        line.push_str(" additionalInfo=");
        match serde_json::to_string(additional) {
            Ok(text) => line.push_str(&text),
            Err(_) => line.push_str("{}"),
        }
    }
    for (k, v) in record.fields.iter() {
        line.push(' ');
        push_escaped(&mut line, k);
        line.push('=');
        push_value(&mut line, v);
    }

    if let Some(error) = &record.error {
        line.push_str(" error=");
        push_value(&mut line, &Value::String(error.message.clone()));
        for cause in &error.stack {
            line.push_str("\n    caused by: ");
            push_escaped(&mut line, cause);
        }
        if let Some(backtrace) = &error.backtrace {
            for frame in backtrace.lines() {
                let _ = write!(line, "\n    {frame}");
            }
        }
    }

    line.push('\n');
    line
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn emit(&self, record: &Record<'_>) {
        let line = format_line(record);
        let result = match self.writer.lock() {
            Ok(mut writer) => writer
                .write_all(line.as_bytes())
                .and_then(|_| writer.flush()),
            Err(_) => Err(io::Error::other("writer lock poisoned")),
        };
        match result {
            Ok(()) => self.stats.add_written(),
            Err(_) => self.stats.add_dropped(),
        }
    }
}
