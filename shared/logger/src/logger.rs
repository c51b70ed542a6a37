//! Thread-safe asynchronous logger.
//!
//! [`Logger`] hands messages to a dedicated writer thread, so recording a
//! measurement never waits on file I/O.

use crate::error::{LoggingError, Result};
use crate::log_level::LogLevel;
use crate::log_message::{Command, LogMessage};
use crate::log_writer::spawn_writer_thread;
use std::path::Path;
use std::sync::mpsc::{Sender, channel};

/// Thread-safe, non-blocking logger.
///
/// Clones and component loggers share one channel to one writer thread.
///
/// # Examples
///
/// ```
/// use logging::{LogLevel, Logger};
///
/// let path = std::env::temp_dir().join("logging_doc_example.log");
/// let logger = Logger::new(&path, LogLevel::Info).unwrap();
/// let decode = logger.for_component("decode");
/// decode.info("Parsed 12 documents");
/// logger.flush().unwrap();
/// ```
#[derive(Clone)]
pub struct Logger {
    sender: Sender<Command>,
    level: LogLevel,
    component: Option<String>,
    console_output: bool,
}

impl Logger {
    /// Creates a logger writing to `log_path` (created if missing, appended
    /// otherwise) and records messages at `level` or above.
    ///
    /// # Errors
    ///
    /// Returns error if the log file cannot be opened or the writer thread
    /// cannot be started.
    pub fn new(log_path: &Path, level: LogLevel) -> Result<Self> {
        Self::with_console(log_path, level, false)
    }

    /// Like [`Logger::new`], optionally echoing every recorded line to stdout.
    pub fn with_console(log_path: &Path, level: LogLevel, console_output: bool) -> Result<Self> {
        let (sender, receiver) = channel();
        spawn_writer_thread(log_path, receiver)?;
        Ok(Logger {
            sender,
            level,
            component: None,
            console_output,
        })
    }

    /// Returns a logger tagging its lines with `component` and sharing this
    /// logger's writer, level and console setting.
    pub fn for_component(&self, component: &str) -> Self {
        Logger {
            component: Some(component.to_string()),
            ..self.clone()
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Logs an error message (always recorded).
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Blocks until everything logged so far is on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer thread has stopped.
    pub fn flush(&self) -> Result<()> {
        let (ack_sender, ack_receiver) = channel();
        self.sender
            .send(Command::Flush(ack_sender))
            .map_err(|_| LoggingError::WriterStopped)?;
        ack_receiver.recv().map_err(|_| LoggingError::WriterStopped)
    }

    fn log(&self, level: LogLevel, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let msg = LogMessage::new(level, self.component.clone(), message.to_string());
        if self.console_output {
            print!("{}", msg.format());
        }
        let _ = self.sender.send(Command::Write(msg));
    }
}
