//! JSON values, parsing and serialization.
//!
//! [`Value`] is a tagged union over the JSON kinds, keeping integers (`i64`)
//! and doubles (`f64`) apart. Text is read by the recursive [`parse`] or by
//! [`parse_nonrecursive`], which accepts the same language without using the
//! call stack for nesting. Values are written back with [`Value::to_json`] or
//! the buffer-based [`Value::to_json_buffered`]. Plain Rust types convert
//! through [`ToValue`] / [`FromValue`] and the [`impl_json!`] macros.
//!
//! # Example
//!
//! ```
//! use json_value::{Value, parse, parse_nonrecursive};
//!
//! let text = r#"{"name": "Alice", "scores": [1, 2.5, true]}"#;
//! let value = parse(text).unwrap();
//! assert_eq!(value, parse_nonrecursive(text).unwrap());
//!
//! let scores = value.as_object().unwrap()["scores"].as_array().unwrap();
//! assert_eq!(scores[0], Value::Int(1));
//! assert_eq!(scores[1], Value::Float(2.5));
//! assert!(scores[2].equals(&Value::Int(1)).unwrap());
//!
//! assert_eq!(parse(&value.to_json().unwrap()).unwrap(), value);
//! ```

mod buffer;
pub mod convert;
mod cursor;
pub mod error;
mod iterative;
pub mod macros;
mod number;
mod ops;
mod parser;
mod serializer;
mod string;
mod value;

pub use buffer::JsonBuffer;
pub use convert::{FromValue, ToValue, from_str, to_string, to_value};
pub use error::{JsonError, Result};
pub use iterative::parse_nonrecursive;
pub use parser::{parse, parse_object};
pub use value::{Kind, Map, Span, Value};
