//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use fieldlog::sink::{JsonSink, Sink};
use fieldlog::{Level, StructuredLogger};
use serde_json::Value;

/// In-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Parse every line as one JSON record.
    pub fn records(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Logger writing JSON lines into a fresh buffer.
pub fn json_logger(level: Level) -> (SharedBuffer, StructuredLogger) {
    let buf = SharedBuffer::default();
    let sink: Arc<dyn Sink> = Arc::new(JsonSink::new(buf.clone()));
    (buf, StructuredLogger::new(sink, level))
}
