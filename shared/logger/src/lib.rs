//! Thread-safe asynchronous logging for the JSON benchmark harness.
//!
//! Lines are formatted as `[timestamp] LEVEL [component]: message` and
//! appended to a file by a dedicated writer thread.

pub mod error;
mod log_level;
mod log_message;
mod log_writer;
mod logger;

pub use error::{LoggingError, Result};
pub use log_level::LogLevel;
pub use logger::Logger;
