use chrono::Local;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 500;

/// A log entry with timestamp and message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S.%3f").to_string(),
            level: level.to_string().to_uppercase(),
            message,
        }
    }

    /// Format for display in the log overlay
    pub fn format_for_display(&self) -> String {
        format!("[{}] {} {}", self.timestamp, self.level, self.message)
    }
}

/// Thread-safe ring buffer for log entries. The TUI owns the terminal,
/// so log lines land here instead of stderr and the overlay reads them
/// back on demand.
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The most recent `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap();
        entries.iter().rev().take(count).rev().cloned().collect()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap();
        entries.clear();
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap();
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that feeds formatted tracing output into the ring buffer
#[derive(Clone)]
pub struct BufferWriter {
    buffer: LogBuffer,
}

impl BufferWriter {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl std::io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(message) = std::str::from_utf8(buf) {
            let message = message.trim();
            if !message.is_empty() {
                // The compact format is "LEVEL message"; peel the level off
                let (level, rest) = if let Some(rest) = message.strip_prefix("TRACE ") {
                    (Level::TRACE, rest)
                } else if let Some(rest) = message.strip_prefix("DEBUG ") {
                    (Level::DEBUG, rest)
                } else if let Some(rest) = message.strip_prefix("INFO ") {
                    (Level::INFO, rest)
                } else if let Some(rest) = message.strip_prefix("WARN ") {
                    (Level::WARN, rest)
                } else if let Some(rest) = message.strip_prefix("ERROR ") {
                    (Level::ERROR, rest)
                } else {
                    (Level::INFO, message)
                };

                self.buffer.push(LogEntry::new(level, rest.to_string()));
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize tracing with the ring buffer writer.
///
/// The returned buffer is the only handle; callers thread it to the UI
/// the same way the auth context travels. Honors `RUST_LOG`, defaulting
/// to `info`.
pub fn init_tracing() -> LogBuffer {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let buffer = LogBuffer::new();
    let writer = BufferWriter::new(buffer.clone());

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .without_time()
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized");

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffer_caps_entries() {
        let buffer = LogBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            buffer.push(LogEntry::new(Level::INFO, format!("entry {}", i)));
        }
        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);
        // Oldest entries fell off the front.
        let recent = buffer.recent(MAX_LOG_ENTRIES);
        assert_eq!(recent[0].message, "entry 10");
    }

    #[test]
    fn test_recent_returns_oldest_first() {
        let buffer = LogBuffer::new();
        for msg in ["one", "two", "three"] {
            buffer.push(LogEntry::new(Level::INFO, msg.to_string()));
        }
        let recent = buffer.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "two");
        assert_eq!(recent[1].message, "three");
    }

    #[test]
    fn test_writer_peels_level_prefix() {
        let buffer = LogBuffer::new();
        let mut writer = BufferWriter::new(buffer.clone());
        writer.write_all(b"WARN page size out of range\n").unwrap();

        let entries = buffer.recent(1);
        assert_eq!(entries[0].level, "WARN");
        assert_eq!(entries[0].message, "page size out of range");
    }

    #[test]
    fn test_writer_ignores_blank_lines() {
        let buffer = LogBuffer::new();
        let mut writer = BufferWriter::new(buffer.clone());
        writer.write_all(b"   \n").unwrap();
        assert!(buffer.is_empty());
    }
}
