//! Conversions between Rust types and [`Value`].

use std::collections::HashMap;

use crate::error::{JsonError, Result};
use crate::parser::parse;
use crate::value::{Map, Value};

/// Types that can be turned into a JSON value.
pub trait ToValue {
    fn to_value(&self) -> Value;

    /// Serializes to compact JSON text.
    fn to_json_string(&self) -> Result<String> {
        self.to_value().to_json()
    }
}

/// Types that can be read back from a JSON value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;

    /// Parses JSON text and converts the result.
    fn from_json_str(s: &str) -> Result<Self> {
        Self::from_value(&parse(s)?)
    }
}

/// Parses JSON text into any [`FromValue`] type.
///
/// # Examples
///
/// ```
/// let numbers: Vec<i64> = json_value::from_str("[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
pub fn from_str<T: FromValue>(s: &str) -> Result<T> {
    T::from_json_str(s)
}

/// Serializes any [`ToValue`] type to compact JSON text.
pub fn to_string<T: ToValue + ?Sized>(value: &T) -> Result<String> {
    value.to_json_string()
}

/// Converts any [`ToValue`] type to a [`Value`].
pub fn to_value<T: ToValue + ?Sized>(value: &T) -> Value {
    value.to_value()
}

fn expected(what: &str, value: &Value) -> JsonError {
    JsonError::type_error(format!("Expected {}, found {}", what, value.type_name()))
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| expected("string", value))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| expected("boolean", value))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

/// Doubles accept both number kinds.
impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(d) => Ok(*d),
            other => Err(expected("number", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        f64::from_value(value).map(|d| d as f32)
    }
}

/// Reads an integer. A `Float` is accepted only when it holds a whole number
/// within `i64` range.
fn integer_of(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(d) if d.fract() == 0.0 && *d >= i64::MIN as f64 && *d < i64::MAX as f64 => {
            Ok(*d as i64)
        }
        Value::Float(d) => Err(JsonError::type_error(format!(
            "Expected integer, found double {}",
            d
        ))),
        other => Err(expected("integer", other)),
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    let integer = integer_of(value)?;
                    <$ty>::try_from(integer).map_err(|_| {
                        JsonError::value_error(format!(
                            "{} is out of range for {}",
                            integer,
                            stringify!($ty)
                        ))
                    })
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! wide_unsigned_conversions {
    ($($ty:ty),*) => {
        $(
            /// Values above `i64::MAX` become doubles.
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::try_from(*self).unwrap_or(Value::Float(*self as f64))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    let integer = integer_of(value)?;
                    <$ty>::try_from(integer).map_err(|_| {
                        JsonError::value_error(format!(
                            "{} is out of range for {}",
                            integer,
                            stringify!($ty)
                        ))
                    })
                }
            }
        )*
    };
}

wide_unsigned_conversions!(u64, usize);

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_array()
            .ok_or_else(|| expected("array", value))?
            .iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<V: ToValue> ToValue for HashMap<String, V> {
    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<Map>(),
        )
    }
}

impl<V: FromValue> FromValue for HashMap<String, V> {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_object()
            .ok_or_else(|| expected("object", value))?
            .iter()
            .map(|(k, v)| Ok((k.clone(), V::from_value(v)?)))
            .collect()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_to_value() {
        assert_eq!("hi".to_value(), Value::String("hi".to_string()));
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!(7u8.to_value(), Value::Int(7));
        assert_eq!(2.5f64.to_value(), Value::Float(2.5));
        assert_eq!(u64::MAX.to_value(), Value::Float(u64::MAX as f64));
        assert_eq!(Some(1i32).to_value(), Value::Int(1));
        assert_eq!(None::<i32>.to_value(), Value::Null);
    }

    #[test]
    fn test_integer_extraction() {
        assert_eq!(i32::from_value(&Value::Int(42)).unwrap(), 42);
        assert_eq!(u16::from_value(&Value::Float(8.0)).unwrap(), 8);
        assert!(i32::from_value(&Value::Float(1.5)).unwrap_err().is_type());
        assert!(u8::from_value(&Value::Int(256)).unwrap_err().is_value());
        assert!(u64::from_value(&Value::Int(-1)).unwrap_err().is_value());
        assert!(i64::from_value(&Value::from("1")).unwrap_err().is_type());
        assert!(i64::from_value(&Value::Float(1e300)).unwrap_err().is_type());
    }

    #[test]
    fn test_float_extraction_accepts_ints() {
        assert_eq!(f64::from_value(&Value::Int(3)).unwrap(), 3.0);
        assert_eq!(f64::from_value(&Value::Float(0.5)).unwrap(), 0.5);
        assert!(f64::from_value(&Value::Bool(true)).unwrap_err().is_type());
    }

    #[test]
    fn test_collections() {
        let numbers: Vec<u32> = from_str("[1, 2, 3]").unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);

        let maybe: Vec<Option<String>> = from_str(r#"["a", null]"#).unwrap();
        assert_eq!(maybe, vec![Some("a".to_string()), None]);

        let map: HashMap<String, bool> = from_str(r#"{"on": true, "off": false}"#).unwrap();
        assert_eq!(map.get("on"), Some(&true));
        assert_eq!(map.get("off"), Some(&false));
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&vec![1i64, 2]).unwrap(), "[1,2]");
        assert_eq!(to_string("a\"b").unwrap(), r#""a\"b""#);
        assert!(to_string(&f64::NAN).unwrap_err().is_value());
    }

    #[test]
    fn test_type_mismatch_reports_kind() {
        let err = String::from_value(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "Type error: Expected string, found int");
    }
}
