//! JSON value representation and manipulation.

use crate::error::{JsonError, Result};
use std::collections::HashMap;
use std::fmt;
use std::mem;

/// Mapping used for JSON objects. Iteration order is unspecified.
pub type Map = HashMap<String, Value>;

/// Start/end byte markers into an original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Tag of the active variant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    Unparsed,
}

impl Kind {
    /// Returns the lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Unparsed => "unparsed",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a JSON value: null, boolean, 64-bit integer, double, string,
/// array or object.
///
/// Integers and doubles are distinct kinds and are never converted into one
/// another implicitly. Containers own their elements; cloning performs a deep
/// copy and [`Value::take`] moves the payload out leaving `Null` behind.
///
/// The derived `PartialEq` is exact structural identity (`Int(1)` differs
/// from `Float(1.0)`). The loose, kind-coercing comparison lives in
/// [`Value::equals`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null: `null`
    #[default]
    Null,
    /// JSON boolean: `true` or `false`
    Bool(bool),
    /// JSON number without fraction or exponent: `42`
    Int(i64),
    /// JSON number with fraction or exponent: `3.14`, `1e3`
    Float(f64),
    /// JSON string: `"hello"`
    String(String),
    /// JSON array: `["item1", "item2"]`
    Array(Vec<Value>),
    /// JSON object: `{"key": "value"}`
    Object(Map),
    /// Span of input left unparsed. Reserved; no parser produces it.
    Unparsed(Span),
}

// Releases nested containers with an explicit worklist so that arbitrarily
// deep trees never recurse through the native stack.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match self {
            Value::Array(items) if !items.is_empty() => mem::take(items),
            Value::Object(map) if !map.is_empty() => map.drain().map(|(_, v)| v).collect(),
            _ => return,
        };
        while let Some(mut child) = pending.pop() {
            match &mut child {
                Value::Array(items) => pending.append(items),
                Value::Object(map) => pending.extend(map.drain().map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(text) => f.write_str(&text),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}

impl Value {
    /// Creates an empty value of the given kind.
    ///
    /// Scalars get their zero value (`false`, `0`, `0.0`); containers are empty.
    ///
    /// # Errors
    ///
    /// Returns a type error for [`Kind::Unparsed`], which cannot be built empty.
    pub fn with_kind(kind: Kind) -> Result<Self> {
        Ok(match kind {
            Kind::Null => Value::Null,
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::Float => Value::Float(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Array => Value::Array(Vec::new()),
            Kind::Object => Value::Object(Map::new()),
            Kind::Unparsed => {
                return Err(JsonError::type_error("Unparsed values can't be constructed empty"));
            }
        })
    }

    /// Returns the tag of the active variant.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Unparsed(_) => Kind::Unparsed,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns true if this is JSON null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Moves the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    /// Returns the boolean value if this is a JSON boolean, otherwise None.
    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self { Some(*b) } else { None }
    }

    /// Returns the integer value if this is an Int, otherwise None.
    pub fn as_i64(&self) -> Option<i64> {
        if let Value::Int(i) = self { Some(*i) } else { None }
    }

    /// Returns the double value if this is a Float, otherwise None.
    pub fn as_f64(&self) -> Option<f64> {
        if let Value::Float(d) = self { Some(*d) } else { None }
    }

    /// Returns the string value if this is a JSON string, otherwise None.
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self { Some(s.as_str()) } else { None }
    }

    /// Returns the array value if this is a JSON array, otherwise None.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if let Value::Array(items) = self { Some(items) } else { None }
    }

    /// Returns the object value if this is a JSON object, otherwise None.
    pub fn as_object(&self) -> Option<&Map> {
        if let Value::Object(map) = self { Some(map) } else { None }
    }

    pub fn bool_mut(&mut self) -> Result<&mut bool> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(JsonError::type_error("Value is not bool")),
        }
    }

    pub fn int_mut(&mut self) -> Result<&mut i64> {
        match self {
            Value::Int(i) => Ok(i),
            _ => Err(JsonError::type_error("Value is not integer")),
        }
    }

    pub fn float_mut(&mut self) -> Result<&mut f64> {
        match self {
            Value::Float(d) => Ok(d),
            _ => Err(JsonError::type_error("Value is not float")),
        }
    }

    pub fn string_mut(&mut self) -> Result<&mut String> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(JsonError::type_error("Value is not string")),
        }
    }

    pub fn array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(JsonError::type_error("Value is not array")),
        }
    }

    pub fn object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(JsonError::type_error("Value is not object")),
        }
    }

    /// Mutable access to an array element.
    ///
    /// # Errors
    ///
    /// Type error if this is not an array, value error if `index` is out of range.
    pub fn at(&mut self, index: usize) -> Result<&mut Value> {
        let items = match self {
            Value::Array(items) => items,
            _ => return Err(JsonError::type_error("Integer indexing can be used only on array")),
        };
        let len = items.len();
        items.get_mut(index).ok_or_else(|| {
            JsonError::value_error(format!("Index {} out of range for array of length {}", index, len))
        })
    }

    /// Mutable access to an object member, inserting `Null` when the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_value::{Kind, Value};
    ///
    /// let mut config = Value::with_kind(Kind::Object).unwrap();
    /// *config.key("port").unwrap() = Value::from(8080);
    /// assert_eq!(config.key("port").unwrap().as_i64(), Some(8080));
    /// assert!(config.key("missing").unwrap().is_null());
    /// ```
    pub fn key(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Object(map) => Ok(map.entry(key.to_string()).or_default()),
            _ => Err(JsonError::type_error("String indexing can be used only on object")),
        }
    }

    /// Truthiness in the Python sense: zero, empty and null are false.
    pub fn cast_bool(&self) -> Result<bool> {
        match self {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i != 0),
            Value::Float(d) => Ok(*d != 0.0),
            Value::String(s) => Ok(!s.is_empty()),
            Value::Array(items) => Ok(!items.is_empty()),
            Value::Object(map) => Ok(!map.is_empty()),
            Value::Unparsed(_) => Err(JsonError::type_error("Can't convert to bool")),
        }
    }

    /// Numeric cast to integer. Doubles are truncated toward zero and saturate.
    pub fn cast_int(&self) -> Result<i64> {
        match self {
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Int(i) => Ok(*i),
            Value::Float(d) => Ok(*d as i64),
            _ => Err(JsonError::type_error("Can't convert to int")),
        }
    }

    pub fn cast_double(&self) -> Result<f64> {
        match self {
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Ok(*i as f64),
            Value::Float(d) => Ok(*d),
            _ => Err(JsonError::type_error("Can't convert to double")),
        }
    }

    /// Renders the value as text. Containers become their JSON text, doubles
    /// use six fractional digits and strings are returned unchanged.
    pub fn cast_string(&self) -> Result<String> {
        match self {
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(d) => Ok(format!("{:.6}", d)),
            Value::String(s) => Ok(s.clone()),
            Value::Array(_) | Value::Object(_) => self.to_json(),
            Value::Unparsed(_) => Err(JsonError::type_error("Can't convert to string")),
        }
    }

    /// Loose equality following the kind-coercion table.
    ///
    /// `Int`, `Float` and `Bool` compare by numeric value (`true` is 1).
    /// Strings, arrays and objects compare structurally with their own kind
    /// and are never equal to `Null`. Other pairings are a type error.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_value::Value;
    ///
    /// assert!(Value::from(0).equals(&Value::from(0.0)).unwrap());
    /// assert!(Value::from(0.0).equals(&Value::from(false)).unwrap());
    /// assert!(Value::from("x").equals(&Value::from(1)).is_err());
    /// ```
    pub fn equals(&self, other: &Value) -> Result<bool> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Null, Value::String(_) | Value::Array(_) | Value::Object(_)) => Ok(false),
            (Value::Null, _) => Err(JsonError::type_error("Can't compare null to int, float or bool")),

            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            (Value::Int(a), Value::Float(b)) => Ok(*a as f64 == *b),
            (Value::Int(a), Value::Bool(b)) => Ok(*a == i64::from(*b)),
            (Value::Int(_), _) => Err(JsonError::type_error(
                "Can't compare int to anything but int, float or bool",
            )),

            (Value::Float(a), Value::Float(b)) => Ok(a == b),
            (Value::Float(a), Value::Int(b)) => Ok(*a == *b as f64),
            (Value::Float(a), Value::Bool(b)) => Ok(*a == if *b { 1.0 } else { 0.0 }),
            (Value::Float(_), _) => Err(JsonError::type_error(
                "Can't compare float to anything but int, float or bool",
            )),

            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Bool(a), Value::Int(b)) => Ok(i64::from(*a) == *b),
            (Value::Bool(a), Value::Float(b)) => Ok(*b == if *a { 1.0 } else { 0.0 }),
            (Value::Bool(_), _) => Err(JsonError::type_error(
                "Can't compare bool to anything but int, float or bool",
            )),

            (Value::String(_), Value::Null) => Ok(false),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::String(_), _) => {
                Err(JsonError::type_error("Can't compare string to anything but string"))
            }

            (Value::Array(_), Value::Null) => Ok(false),
            (Value::Array(a), Value::Array(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (left, right) in a.iter().zip(b) {
                    if !left.equals(right)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::Array(_), _) => Err(JsonError::type_error(
                "Can't compare array to anything but array or null",
            )),

            (Value::Object(_), Value::Null) => Ok(false),
            (Value::Object(a), Value::Object(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (key, left) in a {
                    match b.get(key) {
                        Some(right) if left.equals(right)? => {}
                        _ => return Ok(false),
                    }
                }
                Ok(true)
            }
            (Value::Object(_), _) => Err(JsonError::type_error(
                "Can't compare object to anything but object or null",
            )),

            (Value::Unparsed(_), _) => Err(JsonError::type_error("Invalid type in comparison")),
        }
    }

    /// Negation of [`Value::equals`], except that it is `false` whenever
    /// either side is a NaN double. `equals` has no matching special case, so
    /// for NaN both `equals` and `not_equals` report `false`.
    pub fn not_equals(&self, other: &Value) -> Result<bool> {
        if self.is_nan() || other.is_nan() {
            return Ok(false);
        }
        Ok(!self.equals(other)?)
    }

    pub fn equals_i64(&self, other: i64) -> Result<bool> {
        match self {
            Value::Int(i) => Ok(*i == other),
            Value::Float(d) => Ok(*d == other as f64),
            Value::Bool(b) => Ok(i64::from(*b) == other),
            _ => Err(JsonError::type_error(
                "Integer comparison can be used only on int, double or bool",
            )),
        }
    }

    pub fn equals_u64(&self, other: u64) -> Result<bool> {
        match self {
            Value::Int(i) => Ok(u64::try_from(*i).is_ok_and(|i| i == other)),
            Value::Float(d) => Ok(*d == other as f64),
            Value::Bool(b) => Ok(u64::from(*b) == other),
            _ => Err(JsonError::type_error(
                "Integer comparison can be used only on int, double or bool",
            )),
        }
    }

    pub fn equals_f64(&self, other: f64) -> Result<bool> {
        match self {
            Value::Int(i) => Ok(*i as f64 == other),
            Value::Float(d) => Ok(*d == other),
            Value::Bool(b) => Ok(other == if *b { 1.0 } else { 0.0 }),
            _ => Err(JsonError::type_error(
                "Double comparison can be used only on int, double or bool",
            )),
        }
    }

    fn is_nan(&self) -> bool {
        matches!(self, Value::Float(d) if d.is_nan())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    fn from(i: isize) -> Self {
        Value::Int(i as i64)
    }
}

impl TryFrom<u64> for Value {
    type Error = JsonError;

    fn try_from(u: u64) -> Result<Self> {
        i64::try_from(u)
            .map(Value::Int)
            .map_err(|_| JsonError::value_error(format!("{} does not fit into 64-bit signed int", u)))
    }
}

impl TryFrom<usize> for Value {
    type Error = JsonError;

    fn try_from(u: usize) -> Result<Self> {
        Value::try_from(u as u64)
    }
}

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::Float(f64::from(d))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Float(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}
