//! Buffer-mode serializer for bulk encoding.
//!
//! Produces the same text as [`Value::to_json`] but manages its byte buffer
//! explicitly: capacity starts at [`INITIAL_CAPACITY`] and doubles whenever
//! fewer than [`SLACK`] bytes would remain after a write.

use std::fmt;

use crate::error::{JsonError, Result};
use crate::serializer::{unparsed_error, write_escaped, write_float};
use crate::value::Value;

pub const INITIAL_CAPACITY: usize = 4096;
pub const SLACK: usize = 32;

/// Growable output buffer with doubling growth.
#[derive(Debug)]
pub struct JsonBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl Default for JsonBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(SLACK);
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current managed capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Makes room for `additional` more bytes while keeping `SLACK` spare.
    pub fn ensure(&mut self, additional: usize) {
        let needed = self.bytes.len() + additional + SLACK;
        if needed <= self.capacity {
            return;
        }
        let mut capacity = self.capacity;
        while capacity < needed {
            capacity *= 2;
        }
        self.bytes.reserve_exact(capacity - self.bytes.len());
        self.capacity = capacity;
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.ensure(bytes.len());
        self.bytes.extend_from_slice(bytes);
    }

    pub fn push_byte(&mut self, byte: u8) {
        self.ensure(1);
        self.bytes.push(byte);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Converts the buffer into a `String`.
    ///
    /// # Errors
    ///
    /// Returns a value error if the bytes are not UTF-8, which cannot happen
    /// for buffers filled only by [`Value::write_buffered`].
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.bytes)
            .map_err(|err| JsonError::value_error(format!("Buffer is not valid UTF-8: {}", err)))
    }
}

impl fmt::Write for JsonBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

impl Value {
    /// Serializes the value through a fresh [`JsonBuffer`].
    ///
    /// # Errors
    ///
    /// Same as [`Value::to_json`].
    pub fn to_json_buffered(&self) -> Result<String> {
        let mut buffer = JsonBuffer::new();
        self.write_buffered(&mut buffer)?;
        buffer.into_string()
    }

    /// Appends the JSON text of the value to `buffer`.
    pub fn write_buffered(&self, buffer: &mut JsonBuffer) -> Result<()> {
        match self {
            Value::Null => buffer.push_bytes(b"null"),
            Value::Bool(true) => buffer.push_bytes(b"true"),
            Value::Bool(false) => buffer.push_bytes(b"false"),
            Value::Int(i) => {
                let mut digits = itoa::Buffer::new();
                buffer.push_bytes(digits.format(*i).as_bytes());
            }
            Value::Float(d) => write_float(buffer, *d)?,
            Value::String(s) => write_escaped(buffer, s)?,
            Value::Array(items) => {
                buffer.push_byte(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        buffer.push_byte(b',');
                    }
                    item.write_buffered(buffer)?;
                }
                buffer.push_byte(b']');
            }
            Value::Object(map) => {
                buffer.push_byte(b'{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        buffer.push_byte(b',');
                    }
                    write_escaped(buffer, key)?;
                    buffer.push_byte(b':');
                    value.write_buffered(buffer)?;
                }
                buffer.push_byte(b'}');
            }
            Value::Unparsed(_) => return Err(unparsed_error()),
        }
        Ok(())
    }
}
