use json_value::JsonError;
use std::fmt;
use std::io;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while locating, reading or decoding a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// No config file at the given path or in any searched location.
    NotFound(String),

    /// The file exists but could not be read.
    Read(io::Error),

    /// The file is not valid JSON or does not match the expected shape.
    Parse(JsonError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::Read(err) => write!(f, "Failed to read config file: {}", err),
            ConfigError::Parse(err) => write!(f, "Invalid config file: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NotFound(_) => None,
            ConfigError::Read(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Read(err)
    }
}

impl From<JsonError> for ConfigError {
    fn from(err: JsonError) -> Self {
        ConfigError::Parse(err)
    }
}
