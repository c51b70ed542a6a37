//! Recursive-descent JSON parser.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::number::decode_number;
use crate::string::decode_string;
use crate::value::{Map, Value};

/// Parses JSON text into a [`Value`].
///
/// The text must hold exactly one value, optionally surrounded by whitespace.
/// Nesting depth is bounded by the native call stack; use
/// [`parse_nonrecursive`](crate::parse_nonrecursive) for input that may be
/// nested arbitrarily deep.
///
/// # Errors
///
/// Returns a syntax error (with byte offset) for malformed input or data
/// after the value, and a unicode error for a broken surrogate pair.
///
/// # Examples
///
/// ```
/// use json_value::{Value, parse};
///
/// let json = parse(r#"{"key": "value", "number": 42}"#).unwrap();
/// let object = json.as_object().unwrap();
/// assert_eq!(object["key"].as_str(), Some("value"));
/// assert_eq!(object["number"], Value::Int(42));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    let mut parser = JsonParser::new(input);
    let value = parser.parse_value()?;
    expect_end(&mut parser.cursor)?;
    Ok(value)
}

/// Parses text that must consist of a single JSON object.
///
/// # Errors
///
/// Same as [`parse`], plus a syntax error if the top-level value is not an
/// object.
pub fn parse_object(input: &str) -> Result<Value> {
    let mut parser = JsonParser::new(input);
    if parser.cursor.skip_whitespace() != Some(b'{') {
        return Err(parser.cursor.error("Expected '{' at the start of object"));
    }
    let value = parser.parse_object()?;
    expect_end(&mut parser.cursor)?;
    Ok(value)
}

struct JsonParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> JsonParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.cursor.skip_whitespace() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            _ => parse_scalar(&mut self.cursor),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.cursor.expect_byte(b'[', "Expected '['")?;
        let mut array = Vec::new();

        if self.cursor.skip_whitespace() == Some(b']') {
            self.cursor.bump();
            return Ok(Value::Array(array));
        }

        loop {
            array.push(self.parse_value()?);
            match self.cursor.skip_whitespace() {
                Some(b',') => {
                    self.cursor.bump();
                }
                Some(b']') => {
                    self.cursor.bump();
                    return Ok(Value::Array(array));
                }
                _ => return Err(self.cursor.error("Expected ',' or ']' in array")),
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.cursor.expect_byte(b'{', "Expected '{'")?;
        let mut map = Map::new();

        if self.cursor.skip_whitespace() == Some(b'}') {
            self.cursor.bump();
            return Ok(Value::Object(map));
        }

        loop {
            let key = parse_key_and_colon(&mut self.cursor)?;
            let value = self.parse_value()?;
            // Later duplicates replace earlier ones.
            map.insert(key, value);

            match self.cursor.skip_whitespace() {
                Some(b',') => {
                    self.cursor.bump();
                }
                Some(b'}') => {
                    self.cursor.bump();
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.cursor.error("Expected ',' or '}' in object")),
            }
        }
    }
}

/// Rejects anything but whitespace after the top-level value.
pub(crate) fn expect_end(cursor: &mut Cursor<'_>) -> Result<()> {
    cursor.skip_whitespace();
    if cursor.is_at_end() {
        Ok(())
    } else {
        Err(cursor.error("Parsed a value, but data continues"))
    }
}

/// Parses one object key and consumes the `:` after it.
pub(crate) fn parse_key_and_colon(cursor: &mut Cursor<'_>) -> Result<String> {
    if cursor.skip_whitespace() != Some(b'"') {
        return Err(cursor.error("Object key must be a string"));
    }
    let key = decode_string(cursor)?;
    cursor.expect_byte(b':', "Expected ':' after object key")?;
    Ok(key)
}

/// Parses a string, number or literal. The caller has already skipped
/// whitespace; container openers are not scalars and are rejected.
pub(crate) fn parse_scalar(cursor: &mut Cursor<'_>) -> Result<Value> {
    match cursor.peek() {
        Some(b'"') => decode_string(cursor).map(Value::String),
        Some(b't') => cursor
            .expect_literal("true", "Expected 'true'")
            .map(|()| Value::Bool(true)),
        Some(b'f') => cursor
            .expect_literal("false", "Expected 'false'")
            .map(|()| Value::Bool(false)),
        Some(b'n') => cursor
            .expect_literal("null", "Expected 'null'")
            .map(|()| Value::Null),
        Some(b'-' | b'0'..=b'9') => decode_number(cursor),
        Some(_) => Err(cursor.error("Not a JSON value")),
        None => Err(cursor.error("Unexpected end of input, expected a value")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
        assert_eq!(parse("  \n true \t").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse("42").unwrap(), Value::Int(42));
        assert_eq!(parse("-7").unwrap(), Value::Int(-7));
        assert_eq!(parse("2.5").unwrap(), Value::Float(2.5));
        assert_eq!(parse("1e2").unwrap(), Value::Float(100.0));
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(
            parse(r#""hello\nworld""#).unwrap(),
            Value::String("hello\nworld".to_string())
        );
    }

    #[test]
    fn test_parse_array() {
        let value = parse("[1, 2.0, \"three\", null]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Int(1),
                Value::Float(2.0),
                Value::String("three".to_string()),
                Value::Null,
            ])
        );
        assert_eq!(parse("[ ]").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_parse_object() {
        let value = parse(r#"{"name": "test", "list": [true, {}]}"#).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["name"].as_str(), Some("test"));
        assert_eq!(
            object["list"],
            Value::Array(vec![Value::Bool(true), Value::Object(Map::new())])
        );
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(value.as_object().unwrap()["a"], Value::Int(2));
    }

    #[test]
    fn test_trailing_data_rejected() {
        let err = parse("1 2").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.offset(), Some(2));
        assert!(parse("{} x").unwrap_err().is_syntax());
    }

    #[test]
    fn test_malformed_containers() {
        for text in [
            "", "   ", "[", "]", "[1,]", "[1 2]", "[,1]", "{", "}", r#"{"a"}"#, r#"{"a":}"#,
            r#"{"a":1,}"#, r#"{"a":1 "b":2}"#, r#"{1:2}"#, "[1}", r#"{"a":1]"#, "tru", "nul",
            "falsy", "+1", "'x'",
        ] {
            assert!(parse(text).unwrap_err().is_syntax(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_error_offset_points_at_token() {
        let err = parse("[1, @]").unwrap_err();
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_parse_object_entry_point() {
        let value = parse_object(r#" {"x": [1]} "#).unwrap();
        assert!(value.as_object().unwrap().contains_key("x"));
        assert!(parse_object("[1]").unwrap_err().is_syntax());
        assert!(parse_object(r#"{"x":1} {"#).unwrap_err().is_syntax());
    }

    #[test]
    fn test_unicode_error_propagates() {
        assert!(parse(r#"["\uDC00"]"#).unwrap_err().is_unicode());
    }
}
