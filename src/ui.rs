//! Operator-visible diagnostics.
//!
//! The CI harness owns stdout for protocol JSON, so every human-readable
//! line goes to stderr. Components take the [LogSink] capability instead of
//! printing directly, which keeps the resolver and provider testable.

use std::sync::Mutex;

use console::style;

/// Sink for single-line human-readable diagnostics. Not used for control flow.
pub trait LogSink: Send + Sync {
    fn line(&self, message: &str);
}

/// Writes diagnostic lines to stderr with a status marker
pub struct StderrSink;

impl LogSink for StderrSink {
    fn line(&self, message: &str) {
        eprintln!("{} {}", style("→").yellow(), message);
    }
}

/// Captures diagnostic lines for assertions in tests
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }
}

impl LogSink for MemorySink {
    fn line(&self, message: &str) {
        self.lines
            .lock()
            .expect("sink lock poisoned")
            .push(message.to_string());
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}
