//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` and `severity` first, remaining fields in key order
//! - Synchronous, no buffering
//! - Written to stderr so stdout stays reserved for command output

use std::fmt;
use std::io::{self, Write};

use serde_json::Value;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-operation detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Rejected caller input
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Precondition violations
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    /// Formats one log line, newline included
    pub fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = fields.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        // Assembled pair by pair; a serde_json Map would reorder the keys
        let mut parts = Vec::with_capacity(sorted.len() + 2);
        parts.push(Self::pair("event", event));
        parts.push(Self::pair("severity", severity.as_str()));
        for (key, value) in sorted {
            parts.push(Self::pair(key, value));
        }

        format!("{{{}}}\n", parts.join(","))
    }

    fn pair(key: &str, value: &str) -> String {
        format!("{}:{}", Value::from(key), Value::from(value))
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::format_line(severity, event, fields);
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Parses a log line back into a JSON object
#[cfg(test)]
pub fn parse_line(line: &str) -> serde_json::Map<String, Value> {
    match serde_json::from_str::<Value>(line).unwrap() {
        Value::Object(map) => map,
        other => panic!("log line is not an object: {}", other),
    }
}
