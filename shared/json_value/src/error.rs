//! Error types for JSON values, parsing and serialization.

use std::fmt;

/// Result type for JSON operations.
pub type Result<T> = std::result::Result<T, JsonError>;

/// Error type for every failure the crate can report.
///
/// The four variants mirror the four ways an operation can go wrong: the
/// input text is malformed, a value is used as the wrong kind, a value cannot
/// be represented, or a `\u` escape does not form a valid code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// Malformed JSON text, optionally with the byte offset of the offending token.
    Syntax {
        message: String,
        offset: Option<usize>,
    },
    /// Operation attempted on a value of the wrong kind.
    Type(String),
    /// Value is well-typed but cannot be represented (e.g. serializing NaN).
    Value(String),
    /// Invalid or incomplete surrogate pair in a `\u` escape.
    Unicode(String),
}

impl JsonError {
    /// Creates a syntax error without position information.
    pub fn syntax(message: impl Into<String>) -> Self {
        JsonError::Syntax {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a syntax error pointing at `offset` bytes into the input.
    pub fn syntax_at(message: impl Into<String>, offset: usize) -> Self {
        JsonError::Syntax {
            message: message.into(),
            offset: Some(offset),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        JsonError::Type(message.into())
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        JsonError::Value(message.into())
    }

    pub fn unicode(message: impl Into<String>) -> Self {
        JsonError::Unicode(message.into())
    }

    /// Byte offset of a syntax error, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::Syntax { offset, .. } => *offset,
            _ => None,
        }
    }

    /// Short name of the error kind, e.g. `"SyntaxError"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonError::Syntax { .. } => "SyntaxError",
            JsonError::Type(_) => "TypeError",
            JsonError::Value(_) => "ValueError",
            JsonError::Unicode(_) => "UnicodeError",
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, JsonError::Syntax { .. })
    }

    pub fn is_type(&self) -> bool {
        matches!(self, JsonError::Type(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, JsonError::Value(_))
    }

    pub fn is_unicode(&self) -> bool {
        matches!(self, JsonError::Unicode(_))
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Syntax {
                message,
                offset: Some(offset),
            } => write!(f, "Syntax error: {} at byte {}", message, offset),
            JsonError::Syntax {
                message,
                offset: None,
            } => write!(f, "Syntax error: {}", message),
            JsonError::Type(msg) => write!(f, "Type error: {}", msg),
            JsonError::Value(msg) => write!(f, "Value error: {}", msg),
            JsonError::Unicode(msg) => write!(f, "Unicode error: {}", msg),
        }
    }
}

impl std::error::Error for JsonError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_display() {
        let err = JsonError::syntax("Missing colon");
        assert_eq!(err.to_string(), "Syntax error: Missing colon");

        let err = JsonError::syntax_at("Not a JSON value", 5);
        assert_eq!(err.to_string(), "Syntax error: Not a JSON value at byte 5");

        let err = JsonError::type_error("Value is not array");
        assert_eq!(err.to_string(), "Type error: Value is not array");

        let err = JsonError::value_error("No way to serialize NaN value");
        assert_eq!(err.to_string(), "Value error: No way to serialize NaN value");
    }

    #[test]
    fn test_offset_only_on_syntax_errors() {
        assert_eq!(JsonError::syntax_at("x", 3).offset(), Some(3));
        assert_eq!(JsonError::syntax("x").offset(), None);
        assert_eq!(JsonError::unicode("x").offset(), None);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(JsonError::syntax("x").is_syntax());
        assert!(JsonError::type_error("x").is_type());
        assert!(JsonError::value_error("x").is_value());
        assert!(JsonError::unicode("x").is_unicode());
        assert_eq!(JsonError::unicode("x").kind_name(), "UnicodeError");
    }
}
