//! Byte cursor over JSON input text.

use crate::error::{JsonError, Result};

/// Forward-only cursor shared by the decoders and both parsers.
///
/// Positions are byte offsets into the original `&str`; every structural
/// character JSON cares about is ASCII, so slicing at positions the cursor
/// stops on always lands on a char boundary.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Byte at the current position, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    /// Consumes and returns the current byte.
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    /// Skips JSON whitespace and peeks at the next significant byte.
    pub fn skip_whitespace(&mut self) -> Option<u8> {
        while let Some(byte) = self.peek() {
            if !is_whitespace(byte) {
                return Some(byte);
            }
            self.position += 1;
        }
        None
    }

    /// Consumes `literal` exactly, failing with `message` on the first mismatch.
    pub fn expect_literal(&mut self, literal: &str, message: &str) -> Result<()> {
        let start = self.position;
        for expected in literal.bytes() {
            if self.bump() != Some(expected) {
                return Err(JsonError::syntax_at(message, start));
            }
        }
        Ok(())
    }

    /// Consumes `expected` after optional whitespace.
    pub fn expect_byte(&mut self, expected: u8, message: &str) -> Result<()> {
        match self.skip_whitespace() {
            Some(byte) if byte == expected => {
                self.position += 1;
                Ok(())
            }
            _ => Err(self.error(message)),
        }
    }

    /// Text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.position]
    }

    /// Syntax error located at the current position.
    pub fn error(&self, message: &str) -> JsonError {
        JsonError::syntax_at(message, self.position)
    }
}

/// ASCII space, tab, line feed, carriage return, vertical tab and form feed.
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}
