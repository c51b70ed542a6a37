//! Decoding of JSON number literals.
//!
//! Integers are decoded exactly into `i64`. Doubles are accumulated into a
//! 64-bit significand plus a power-of-ten correction, so literals of any
//! length decode in linear time and constant memory. Digits beyond what the
//! significand can hold cannot change the nearest double and are dropped.

use crate::cursor::Cursor;
use crate::error::{JsonError, Result};
use crate::value::Value;

/// Largest significand that can take one more decimal digit without overflow.
const WONT_OVERFLOW: u64 = (u64::MAX - 9) / 10;

/// The exponent stops accumulating digits past this bound.
const EXPONENT_CAP: i64 = 100_000_000;

/// Powers of ten that are exactly representable as doubles.
const EXACT_POWERS: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];
const MAX_EXACT_POWER: i64 = 22;

/// Every integer up to 2^53 is exactly representable as a double.
const MAX_EXACT_SIGNIFICAND: u64 = 1 << 53;

/// Decodes the number starting at the cursor, consuming exactly its characters.
///
/// A literal containing `.`, `e` or `E` becomes `Value::Float`, anything else
/// `Value::Int`. Magnitudes too large for a double round to infinity; the
/// decoder never produces NaN.
///
/// # Errors
///
/// Syntax error on a missing digit, a leading zero, or an integer outside the
/// signed 64-bit range.
pub(crate) fn decode_number(cursor: &mut Cursor<'_>) -> Result<Value> {
    let start = cursor.position();
    let negative = cursor.peek() == Some(b'-');
    if negative {
        cursor.bump();
    }

    let mut significand: u64 = 0;
    // Power of ten still owed to the significand.
    let mut correction: i64 = 0;
    let mut is_float = false;

    match cursor.peek() {
        Some(b'0') => {
            cursor.bump();
            if next_digit(cursor).is_some() {
                return Err(cursor.error("Leading zeros are not allowed"));
            }
        }
        Some(b'1'..=b'9') => {
            while let Some(digit) = next_digit(cursor) {
                if significand <= WONT_OVERFLOW {
                    significand = significand * 10 + digit;
                } else {
                    correction += 1;
                }
                cursor.bump();
            }
        }
        _ => return Err(cursor.error("There should be digit")),
    }

    if cursor.peek() == Some(b'.') {
        is_float = true;
        cursor.bump();
        if next_digit(cursor).is_none() {
            return Err(cursor.error("There must be at least one digit after decimal point"));
        }
        while let Some(digit) = next_digit(cursor) {
            if significand <= WONT_OVERFLOW {
                significand = significand * 10 + digit;
                correction -= 1;
            }
            cursor.bump();
        }
    }

    let mut exponent: i64 = 0;
    if matches!(cursor.peek(), Some(b'e' | b'E')) {
        is_float = true;
        cursor.bump();
        let exponent_negative = match cursor.peek() {
            Some(b'-') => {
                cursor.bump();
                true
            }
            Some(b'+') => {
                cursor.bump();
                false
            }
            _ => false,
        };
        if next_digit(cursor).is_none() {
            return Err(cursor.error("There must be digits in exponent part (after e or E)"));
        }
        while let Some(digit) = next_digit(cursor) {
            if exponent < EXPONENT_CAP {
                exponent = exponent * 10 + digit as i64;
            }
            cursor.bump();
        }
        if exponent_negative {
            exponent = -exponent;
        }
    }

    if is_float {
        return scale(significand, exponent + correction, negative).map(Value::Float);
    }

    let integer = if correction != 0 {
        None
    } else if negative {
        0i64.checked_sub_unsigned(significand)
    } else {
        i64::try_from(significand).ok()
    };
    integer
        .map(Value::Int)
        .ok_or_else(|| JsonError::syntax_at("Integer can't be saved as 64-bit signed int", start))
}

fn next_digit(cursor: &Cursor<'_>) -> Option<u64> {
    cursor
        .peek()
        .filter(u8::is_ascii_digit)
        .map(|byte| u64::from(byte - b'0'))
}

/// Computes `±significand × 10^exp10` as the nearest double.
///
/// Small cases are exact products of two exactly representable doubles. The
/// rest go through the standard library's correctly rounded conversion of the
/// reduced literal, which is at most twenty digits plus an exponent.
fn scale(significand: u64, exp10: i64, negative: bool) -> Result<f64> {
    let magnitude = if significand == 0 {
        0.0
    } else if significand <= MAX_EXACT_SIGNIFICAND && exp10.abs() <= MAX_EXACT_POWER {
        let value = significand as f64;
        let power = EXACT_POWERS[exp10.unsigned_abs() as usize];
        if exp10 >= 0 { value * power } else { value / power }
    } else {
        format!("{}e{}", significand, exp10)
            .parse::<f64>()
            .map_err(|err| JsonError::syntax(format!("Invalid number: {}", err)))?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<Value> {
        let mut cursor = Cursor::new(text);
        decode_number(&mut cursor)
    }

    fn decode_float(text: &str) -> f64 {
        decode(text).unwrap().as_f64().unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(decode("0").unwrap(), Value::Int(0));
        assert_eq!(decode("123").unwrap(), Value::Int(123));
        assert_eq!(decode("-100200").unwrap(), Value::Int(-100_200));
        assert_eq!(decode("-0").unwrap(), Value::Int(0));
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(decode("9223372036854775807").unwrap(), Value::Int(i64::MAX));
        assert_eq!(decode("-9223372036854775808").unwrap(), Value::Int(i64::MIN));
        assert!(decode("9223372036854775808").unwrap_err().is_syntax());
        assert!(decode("-9223372036854775809").unwrap_err().is_syntax());
        assert!(decode("18446744073709551616").unwrap_err().is_syntax());
        assert!(decode("123456789012345678901234567890").unwrap_err().is_syntax());
    }

    #[test]
    fn test_floats_stay_floats() {
        assert_eq!(decode("1.0").unwrap(), Value::Float(1.0));
        assert_eq!(decode("2E2").unwrap(), Value::Float(200.0));
        assert_eq!(decode("2e+2").unwrap(), Value::Float(200.0));
        assert_eq!(decode("-3E+3").unwrap(), Value::Float(-3000.0));
        assert_eq!(decode("-0.0").unwrap(), Value::Float(-0.0));
    }

    #[test]
    fn test_float_values() {
        assert_eq!(decode_float("123.321"), 123.321);
        assert_eq!(decode_float("1.5e-3"), 1.5e-3);
        assert_eq!(decode_float("-1e-3"), -1e-3);
        assert_eq!(decode_float("123.321E3"), 123.321e3);
        assert_eq!(decode_float("11.11e11"), 11.11e11);
        assert_eq!(decode_float("1.3e11"), 1.3e11);
        assert_eq!(decode_float("1e25"), 1e25);
        assert_eq!(decode_float("10000000000000000000000000e0"), 1e25);
        assert_eq!(decode_float("10000000000000000000000000.0"), 1e25);
    }

    #[test]
    fn test_exponent_balanced_by_digits() {
        assert_eq!(decode_float("0.00000000000000000000000000000000001e35"), 1.0);
        assert_eq!(decode_float("1000000000000000000000000000000000000e-35"), 10.0);
    }

    #[test]
    fn test_extreme_exponents() {
        assert_eq!(decode_float("1e1000"), f64::INFINITY);
        assert_eq!(decode_float("-1e1000"), f64::NEG_INFINITY);
        assert_eq!(decode_float("1e-1000"), 0.0);
        assert_eq!(decode_float("0e999999999999"), 0.0);
        assert_eq!(decode_float("2.7182818284591e-120"), 2.7182818284591e-120);
        assert_eq!(decode_float("1.7976931348623157e308"), f64::MAX);
        assert_eq!(decode_float("5e-324"), 5e-324);
    }

    #[test]
    fn test_consumes_only_the_number() {
        let mut cursor = Cursor::new("12.5e1,true");
        assert_eq!(decode_number(&mut cursor).unwrap(), Value::Float(125.0));
        assert_eq!(cursor.peek(), Some(b','));
    }

    #[test]
    fn test_malformed_numbers() {
        for text in ["-", "-1.", "-1..e", "1e-", "3.0E", ".34", "-a", "01", "00.5", "-012"] {
            assert!(decode(text).unwrap_err().is_syntax(), "accepted {}", text);
        }
    }

    #[test]
    fn test_megabyte_long_literals() {
        let mut ones = "1".repeat(1024 * 1024 - 10);
        ones.push_str("e-1048565");
        let value = decode_float(&ones);
        assert!((value - 1.111_111_111_111_111).abs() < 1e-12);

        let mut twos = "2".repeat(1024 * 1024);
        twos.replace_range(1..2, ".");
        let value = decode_float(&twos);
        assert!((value - 2.222_222_222_222_222).abs() < 1e-12);

        let mut fours = "4".repeat(1024 * 1024);
        fours.replace_range(1..2, "e");
        assert_eq!(decode_float(&fours), f64::INFINITY);
    }
}
