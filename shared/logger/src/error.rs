//! Errors reported by the logger.

use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, LoggingError>;

#[derive(Debug)]
pub enum LoggingError {
    /// Opening the log file or spawning the writer thread failed.
    Io(io::Error),
    /// A level name that is not debug, info, warn(ing) or error.
    InvalidLevel(String),
    /// The writer thread exited; nothing more can be recorded.
    WriterStopped,
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::Io(err) => write!(f, "Log file error: {}", err),
            LoggingError::InvalidLevel(name) => write!(f, "Invalid log level: '{}'", name),
            LoggingError::WriterStopped => f.write_str("Log writer thread has stopped"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoggingError {
    fn from(err: io::Error) -> Self {
        LoggingError::Io(err)
    }
}
