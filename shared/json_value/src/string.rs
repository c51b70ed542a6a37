//! Decoding of JSON string literals.

use crate::cursor::Cursor;
use crate::error::{JsonError, Result};

const HIGH_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Decodes the string literal at the cursor (which must sit on the opening
/// quote) through its closing quote and returns the unescaped UTF-8 text.
///
/// # Errors
///
/// - Syntax error for a missing quote, an unknown escape, a bad hex digit or
///   a raw control character (bytes 0-31).
/// - Unicode error for an unpaired or malformed UTF-16 surrogate.
pub(crate) fn decode_string(cursor: &mut Cursor<'_>) -> Result<String> {
    if cursor.peek() != Some(b'"') {
        return Err(cursor.error("String must start with double quote"));
    }
    cursor.bump();

    let mut decoded = String::new();
    let mut run_start = cursor.position();
    loop {
        match cursor.peek() {
            None => return Err(cursor.error("String must end with unescaped '\"' character")),
            Some(b'"') => {
                decoded.push_str(cursor.slice_from(run_start));
                cursor.bump();
                return Ok(decoded);
            }
            Some(b'\\') => {
                decoded.push_str(cursor.slice_from(run_start));
                cursor.bump();
                decode_escape(cursor, &mut decoded)?;
                run_start = cursor.position();
            }
            Some(byte) if byte < 0x20 => {
                return Err(cursor.error("Characters with values 0-31 must be escaped within string"));
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}

/// Decodes one escape sequence; the backslash has already been consumed.
fn decode_escape(cursor: &mut Cursor<'_>, decoded: &mut String) -> Result<()> {
    let escape_start = cursor.position() - 1;
    let unescaped = match cursor.bump() {
        Some(b'"') => '"',
        Some(b'\\') => '\\',
        Some(b'/') => '/',
        Some(b'b') => '\x08',
        Some(b'f') => '\x0C',
        Some(b'n') => '\n',
        Some(b'r') => '\r',
        Some(b't') => '\t',
        Some(b'u') => decode_unicode_escape(cursor)?,
        _ => return Err(JsonError::syntax_at("Invalid escape sequence", escape_start)),
    };
    decoded.push(unescaped);
    Ok(())
}

/// Decodes the code point of a `\u` escape whose `\u` is already consumed,
/// combining a high surrogate with the low surrogate escape that must follow.
fn decode_unicode_escape(cursor: &mut Cursor<'_>) -> Result<char> {
    let first = read_hex4(cursor)?;
    if LOW_SURROGATES.contains(&first) {
        return Err(JsonError::unicode(
            "Encountered low surrogate, but no preceding high surrogate",
        ));
    }

    let code_point = if HIGH_SURROGATES.contains(&first) {
        if cursor.bump() != Some(b'\\') {
            return Err(JsonError::unicode("Invalid unicode sequence, expected '\\'"));
        }
        if cursor.bump() != Some(b'u') {
            return Err(JsonError::unicode("Invalid unicode sequence, expected 'u'"));
        }
        let second = read_hex4(cursor)?;
        if !LOW_SURROGATES.contains(&second) {
            return Err(JsonError::unicode("Invalid low surrogate value"));
        }
        0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
    } else {
        first
    };

    char::from_u32(code_point)
        .ok_or_else(|| JsonError::unicode(format!("Invalid code point U+{:04X}", code_point)))
}

fn read_hex4(cursor: &mut Cursor<'_>) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = cursor
            .peek()
            .and_then(|byte| char::from(byte).to_digit(16))
            .ok_or_else(|| cursor.error("Expected character 0-9, a-f or A-F"))?;
        cursor.bump();
        value = (value << 4) | digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<String> {
        let mut cursor = Cursor::new(text);
        decode_string(&mut cursor)
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(decode(r#""hello world""#).unwrap(), "hello world");
        assert_eq!(decode(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_short_escapes() {
        assert_eq!(decode(r#""\r\t\n""#).unwrap(), "\r\t\n");
        assert_eq!(decode(r#""\"\\\/\b\f""#).unwrap(), "\"\\/\x08\x0C");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(decode(r#""\u000aaaaa""#).unwrap(), "\naaaa");
        assert_eq!(decode(r#""\u00e9""#).unwrap(), "é");
        assert_eq!(decode(r#""\u20AC""#).unwrap(), "€");
    }

    #[test]
    fn test_surrogate_pair() {
        let decoded = decode(r#""\uD801\uDC37""#).unwrap();
        assert_eq!(decoded.as_bytes(), b"\xf0\x90\x90\xb7");
        assert_eq!(decoded, "\u{10437}");
    }

    #[test]
    fn test_surrogate_errors() {
        assert!(decode(r#""\uDC00""#).unwrap_err().is_unicode());
        assert!(decode(r#""\uD8DD""#).unwrap_err().is_unicode());
        assert!(decode(r#""\uD800x""#).unwrap_err().is_unicode());
        assert!(decode(r#""\uD800\n""#).unwrap_err().is_unicode());
        assert!(decode(r#""\uD800A""#).unwrap_err().is_unicode());
        assert!(decode(r#""\uD800\u0041""#).unwrap_err().is_unicode());
    }

    #[test]
    fn test_malformed_hex_is_syntax_error() {
        assert!(decode(r#""\uabc""#).unwrap_err().is_syntax());
        assert!(decode(r#""\u000""#).unwrap_err().is_syntax());
        assert!(decode(r#""\uzzzz""#).unwrap_err().is_syntax());
    }

    #[test]
    fn test_invalid_escape_and_termination() {
        assert!(decode(r#""\x""#).unwrap_err().is_syntax());
        assert!(decode(r#""abc"#).unwrap_err().is_syntax());
        assert!(decode(r#""\""#).unwrap_err().is_syntax());
        assert!(decode("abc").unwrap_err().is_syntax());
    }

    #[test]
    fn test_raw_control_characters_rejected() {
        assert!(decode("\"a\nb\"").unwrap_err().is_syntax());
        assert!(decode("\"\x01\"").unwrap_err().is_syntax());
    }

    #[test]
    fn test_multibyte_passthrough() {
        assert_eq!(decode("\"żółw 🐢\"").unwrap(), "żółw 🐢");
    }

    #[test]
    fn test_stops_after_closing_quote() {
        let mut cursor = Cursor::new(r#""key": 1"#);
        assert_eq!(decode_string(&mut cursor).unwrap(), "key");
        assert_eq!(cursor.peek(), Some(b':'));
    }
}
