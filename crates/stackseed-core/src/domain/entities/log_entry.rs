use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::domain::value_objects::{LogLevel, LogStream};

/// One audit log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub stream: LogStream,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// `<RFC3339 millis> <LEVEL> <message>`, level padded to five columns.
    pub fn to_line(&self) -> String {
        format!(
            "{} {:<5} {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
            self.level.as_str(),
            self.message
        )
    }
}
