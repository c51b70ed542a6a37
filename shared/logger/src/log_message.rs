//! Internal log message structure.

use crate::log_level::LogLevel;
use chrono::Local;
use std::sync::mpsc::Sender;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Internal representation of a log message.
#[derive(Debug, Clone)]
pub(crate) struct LogMessage {
    pub timestamp: String,
    pub level: LogLevel,
    pub component: Option<String>,
    pub message: String,
}

impl LogMessage {
    /// Creates a message stamped with the current local time.
    pub fn new(level: LogLevel, component: Option<String>, message: String) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            level,
            component,
            message,
        }
    }

    /// Formats message for output: `[timestamp] LEVEL [component]: message\n`
    pub fn format(&self) -> String {
        match &self.component {
            Some(component) => format!(
                "[{}] {} [{}]: {}\n",
                self.timestamp,
                self.level.as_str(),
                component,
                self.message
            ),
            None => format!(
                "[{}] {}: {}\n",
                self.timestamp,
                self.level.as_str(),
                self.message
            ),
        }
    }
}

/// Work item for the writer thread.
pub(crate) enum Command {
    Write(LogMessage),
    /// Flush the file, then acknowledge on the enclosed channel.
    Flush(Sender<()>),
}
