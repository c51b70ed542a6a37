//! Stack-based JSON parser for arbitrarily deep input.
//!
//! Accepts exactly the same language as [`parse`](crate::parse), but keeps
//! the open containers on a heap-allocated stack instead of the call stack,
//! so each nesting level costs one [`Frame`] rather than one native frame.

use std::mem;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::parser::{expect_end, parse_key_and_colon, parse_scalar};
use crate::string::decode_string;
use crate::value::{Map, Value};

/// A container that has been opened but not yet closed.
enum Frame {
    Array(Vec<Value>),
    /// `key` is the member whose value is currently being parsed.
    Object { map: Map, key: String },
}

#[derive(Clone, Copy)]
enum State {
    /// Scanning for the next value.
    Value,
    /// Inside an array after an element: expect `,` or `]`.
    ArrayAfterValue,
    /// Inside an object after a member value: expect `,` or `}`.
    ObjectAfterValue,
    /// Inside an object after a key: expect `:`.
    ObjectAfterKey,
}

/// Parses JSON text into a [`Value`] without native recursion.
///
/// # Errors
///
/// Same failure modes as [`parse`](crate::parse).
///
/// # Examples
///
/// ```
/// use json_value::parse_nonrecursive;
///
/// let depth = 100_000;
/// let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
/// assert!(parse_nonrecursive(&text).is_ok());
/// ```
pub fn parse_nonrecursive(input: &str) -> Result<Value> {
    let mut cursor = Cursor::new(input);
    let mut stack: Vec<Frame> = Vec::new();
    let mut state = State::Value;

    loop {
        let completed = match state {
            State::Value => match cursor.skip_whitespace() {
                Some(b'[') => {
                    cursor.bump();
                    if cursor.skip_whitespace() == Some(b']') {
                        cursor.bump();
                        Value::Array(Vec::new())
                    } else {
                        stack.push(Frame::Array(Vec::new()));
                        continue;
                    }
                }
                Some(b'{') => {
                    cursor.bump();
                    match cursor.skip_whitespace() {
                        Some(b'}') => {
                            cursor.bump();
                            Value::Object(Map::new())
                        }
                        Some(b'"') => {
                            let key = decode_string(&mut cursor)?;
                            stack.push(Frame::Object {
                                map: Map::new(),
                                key,
                            });
                            state = State::ObjectAfterKey;
                            continue;
                        }
                        _ => return Err(cursor.error("Object key must be a string")),
                    }
                }
                _ => parse_scalar(&mut cursor)?,
            },
            State::ObjectAfterKey => {
                cursor.expect_byte(b':', "Expected ':' after object key")?;
                state = State::Value;
                continue;
            }
            State::ArrayAfterValue => match cursor.skip_whitespace() {
                Some(b',') => {
                    cursor.bump();
                    state = State::Value;
                    continue;
                }
                Some(b']') => {
                    cursor.bump();
                    match stack.pop() {
                        Some(Frame::Array(items)) => Value::Array(items),
                        _ => return Err(cursor.error("Mismatched ']'")),
                    }
                }
                _ => return Err(cursor.error("Expected ',' or ']' in array")),
            },
            State::ObjectAfterValue => match cursor.skip_whitespace() {
                Some(b',') => {
                    cursor.bump();
                    let next_key = parse_key_and_colon(&mut cursor)?;
                    if let Some(Frame::Object { key, .. }) = stack.last_mut() {
                        *key = next_key;
                    }
                    state = State::Value;
                    continue;
                }
                Some(b'}') => {
                    cursor.bump();
                    match stack.pop() {
                        Some(Frame::Object { map, .. }) => Value::Object(map),
                        _ => return Err(cursor.error("Mismatched '}'")),
                    }
                }
                _ => return Err(cursor.error("Expected ',' or '}' in object")),
            },
        };

        match stack.last_mut() {
            None => {
                expect_end(&mut cursor)?;
                return Ok(completed);
            }
            Some(Frame::Array(items)) => {
                items.push(completed);
                state = State::ArrayAfterValue;
            }
            Some(Frame::Object { map, key }) => {
                map.insert(mem::take(key), completed);
                state = State::ObjectAfterValue;
            }
        }
    }
}
