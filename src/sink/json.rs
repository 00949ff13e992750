//! JSON lines sink.

use std::io::{self, Write};
use std::sync::Mutex;

use super::{Record, Sink, SinkStats};

/// Writes each record as a single JSON object followed by a newline.
pub struct JsonSink<W> {
    writer: Mutex<W>,
    stats: SinkStats,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            stats: SinkStats::default(),
        }
    }

    pub fn stats(&self) -> &SinkStats {
        &self.stats
    }

    fn write_line(&self, buf: &[u8]) -> io::Result<()> {
        let Ok(mut writer) = self.writer.lock() else {
            return Err(io::Error::other("writer lock poisoned"));
        };
        writer.write_all(buf)?;
        writer.flush()
    }
}

impl<W: Write + Send> Sink for JsonSink<W> {
    fn emit(&self, record: &Record<'_>) {
        let mut buf = Vec::with_capacity(256);
        if serde_json::to_writer(&mut buf, record).is_err() {
            self.stats.add_dropped();
            return;
        }
        buf.push(b'\n');

        match self.write_line(&buf) {
            Ok(()) => self.stats.add_written(),
            Err(_) => self.stats.add_dropped(),
        }
    }
}
