//! JSON serialization.

use std::fmt::{self, Write};

use crate::error::{JsonError, Result};
use crate::value::Value;

/// Text emitted for positive infinity. It overflows back to infinity when
/// parsed, so infinite magnitudes survive a round trip.
pub(crate) const POSITIVE_INFINITY: &str = "1e1000";
pub(crate) const NEGATIVE_INFINITY: &str = "-1e1000";

impl Value {
    /// Serializes the value to compact JSON text.
    ///
    /// Object members follow the map's iteration order, which is unspecified.
    ///
    /// # Errors
    ///
    /// Returns a value error if the tree contains a NaN double or an
    /// unparsed span.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_value::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// map.insert("a".to_string(), Value::Array(vec![]));
    /// assert_eq!(Value::Object(map).to_json().unwrap(), r#"{"a":[]}"#);
    /// ```
    pub fn to_json(&self) -> Result<String> {
        let mut out = String::new();
        self.write_json(&mut out)?;
        Ok(out)
    }

    /// Appends the JSON text of the value to `out`.
    ///
    /// On error `out` may hold a partial document.
    pub fn write_json(&self, out: &mut String) -> Result<()> {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Int(i) => write_fmt(out, format_args!("{}", i))?,
            Value::Float(d) => write_float(out, *d)?,
            Value::String(s) => write_escaped(out, s)?,
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_json(out)?;
                }
                out.push(']');
            }
            Value::Object(map) => {
                out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_escaped(out, key)?;
                    out.push(':');
                    value.write_json(out)?;
                }
                out.push('}');
            }
            Value::Unparsed(_) => return Err(unparsed_error()),
        }
        Ok(())
    }
}

pub(crate) fn unparsed_error() -> JsonError {
    JsonError::value_error("Serializing unparsed values is not implemented")
}

fn write_fmt<W: Write>(out: &mut W, args: fmt::Arguments<'_>) -> Result<()> {
    out.write_fmt(args)
        .map_err(|_| JsonError::value_error("Failed to write JSON text"))
}

/// Writes `s` as a quoted JSON string.
///
/// Quote, backslash and the named control characters use their short
/// escapes, other bytes below 0x20 use `\u00XX`, everything else is copied
/// through unchanged.
pub(crate) fn write_escaped<W: Write>(out: &mut W, s: &str) -> Result<()> {
    write_str(out, "\"")?;
    let bytes = s.as_bytes();
    let mut run_start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let short = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        // Escaped bytes are ASCII, so `i` is always a char boundary.
        write_str(out, &s[run_start..i])?;
        if short.is_empty() {
            write_fmt(out, format_args!("\\u{:04x}", byte))?;
        } else {
            write_str(out, short)?;
        }
        run_start = i + 1;
    }
    write_str(out, &s[run_start..])?;
    write_str(out, "\"")
}

fn write_str<W: Write>(out: &mut W, s: &str) -> Result<()> {
    out.write_str(s)
        .map_err(|_| JsonError::value_error("Failed to write JSON text"))
}

/// Writes a double so that it parses back to the same bits.
///
/// The text always contains `.` or `e`, so it re-parses as a double rather
/// than an integer. Infinities become `1e1000` / `-1e1000`.
///
/// # Errors
///
/// Returns a value error for NaN, which has no JSON representation.
pub(crate) fn write_float<W: Write>(out: &mut W, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(JsonError::value_error("No way to serialize NaN value"));
    }
    if value.is_infinite() {
        let text = if value > 0.0 {
            POSITIVE_INFINITY
        } else {
            NEGATIVE_INFINITY
        };
        return write_str(out, text);
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-5..1e17).contains(&magnitude) {
        return write_fmt(out, format_args!("{:e}", value));
    }

    let mut digits = String::with_capacity(24);
    write_fmt(&mut digits, format_args!("{}", value))?;
    if !digits.contains('.') {
        digits.push_str(".0");
    }
    write_str(out, &digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::value::Map;

    fn float_text(value: f64) -> String {
        Value::Float(value).to_json().unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(Value::Null.to_json().unwrap(), "null");
        assert_eq!(Value::Bool(true).to_json().unwrap(), "true");
        assert_eq!(Value::Bool(false).to_json().unwrap(), "false");
        assert_eq!(Value::Int(-42).to_json().unwrap(), "-42");
        assert_eq!(Value::Int(i64::MIN).to_json().unwrap(), "-9223372036854775808");
    }

    #[test]
    fn test_escape_json_string() {
        let text = |s: &str| Value::from(s).to_json().unwrap();
        assert_eq!(text("hello"), r#""hello""#);
        assert_eq!(text("hello\"world"), r#""hello\"world""#);
        assert_eq!(text("hello\\world"), r#""hello\\world""#);
        assert_eq!(text("a\nb\rc\td"), r#""a\nb\rc\td""#);
        assert_eq!(text("a\x08b\x0Cc"), r#""a\bb\fc""#);
        assert_eq!(text("/"), r#""/""#);
    }

    #[test]
    fn test_escape_other_control_bytes() {
        let escaped = Value::from("\x00\x1f\x7f").to_json().unwrap();
        assert_eq!(escaped, "\"\\u0000\\u001f\x7f\"");
    }

    #[test]
    fn test_utf8_passes_through() {
        assert_eq!(Value::from("żółw").to_json().unwrap(), "\"żółw\"");
    }

    #[test]
    fn test_containers_are_compact() {
        let mut map = Map::new();
        map.insert("a".to_string(), Value::Array(vec![]));
        assert_eq!(Value::Object(map).to_json().unwrap(), r#"{"a":[]}"#);

        let array = Value::Array(vec![Value::Int(1), Value::Null, Value::from("x")]);
        assert_eq!(array.to_json().unwrap(), r#"[1,null,"x"]"#);
        assert_eq!(Value::Object(Map::new()).to_json().unwrap(), "{}");
    }

    #[test]
    fn test_float_text_keeps_float_kind() {
        assert_eq!(float_text(1.0), "1.0");
        assert_eq!(float_text(-0.0), "-0.0");
        assert_eq!(float_text(0.1), "0.1");
        assert_eq!(float_text(2.5e-3), "0.0025");
        assert_eq!(float_text(1e16), "10000000000000000.0");
        assert_eq!(float_text(1e17), "1e17");
        assert_eq!(float_text(1e300), "1e300");
        assert_eq!(float_text(-1.5e-7), "-1.5e-7");
    }

    #[test]
    fn test_float_round_trip() {
        for value in [0.1, 1.0 / 3.0, 2.7182818284591e-120, 1.7976931348623157e308, 5e-324] {
            let text = float_text(value);
            assert_eq!(parse(&text).unwrap(), Value::Float(value), "{}", text);
        }
    }

    #[test]
    fn test_infinity_sentinels() {
        assert_eq!(float_text(f64::INFINITY), "1e1000");
        assert_eq!(float_text(f64::NEG_INFINITY), "-1e1000");
        assert_eq!(parse("1e1000").unwrap(), Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_nan_is_value_error() {
        assert!(Value::Float(f64::NAN).to_json().unwrap_err().is_value());
        let nested = Value::Array(vec![Value::Int(1), Value::Float(f64::NAN)]);
        assert!(nested.to_json().unwrap_err().is_value());
    }

    #[test]
    fn test_unparsed_is_value_error() {
        let value = Value::Unparsed(crate::value::Span { start: 0, end: 4 });
        assert!(value.to_json().unwrap_err().is_value());
    }

    #[test]
    fn test_write_json_appends() {
        let mut out = String::from("data=");
        Value::Bool(true).write_json(&mut out).unwrap();
        assert_eq!(out, "data=true");
    }

    #[test]
    fn test_display_renders_json() {
        assert_eq!(Value::Array(vec![Value::Int(1)]).to_string(), "[1]");
        assert_eq!(Value::Float(f64::NAN).to_string(), "<Value error: No way to serialize NaN value>");
    }
}
