//! Seeded generator of random JSON documents.
//!
//! Documents are produced as text, not as values, so that the parsers see
//! the full surface of the grammar: insignificant whitespace, every escape
//! form, surrogate pairs, exponents in either case and integers at the edges
//! of the 64-bit range.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

const SHORT_ESCAPES: [&str; 8] = [
    "\\\"", "\\\\", "\\/", "\\b", "\\f", "\\n", "\\r", "\\t",
];

const INTEGER_EDGES: [i64; 5] = [i64::MIN, i64::MIN + 1, -1, 0, i64::MAX];

/// Produces random JSON text from a fixed seed.
pub struct DocumentGenerator {
    rng: StdRng,
    max_depth: usize,
    max_width: usize,
}

impl DocumentGenerator {
    pub fn new(seed: u64, max_depth: usize, max_width: usize) -> Self {
        DocumentGenerator {
            rng: StdRng::seed_from_u64(seed),
            max_depth,
            max_width,
        }
    }

    /// Generates one complete document, optionally surrounded by whitespace.
    pub fn document(&mut self) -> String {
        let mut out = String::new();
        self.whitespace(&mut out);
        self.value(&mut out, 0);
        self.whitespace(&mut out);
        out
    }

    /// Generates `count` documents.
    pub fn documents(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.document()).collect()
    }

    fn value(&mut self, out: &mut String, depth: usize) {
        let kinds = if depth < self.max_depth { 7 } else { 5 };
        match self.rng.gen_range(0..kinds) {
            0 => out.push_str("null"),
            1 => out.push_str(if self.rng.gen_bool(0.5) { "true" } else { "false" }),
            2 => self.integer(out),
            3 => self.float(out),
            4 => self.string(out),
            5 => self.array(out, depth + 1),
            _ => self.object(out, depth + 1),
        }
    }

    fn whitespace(&mut self, out: &mut String) {
        for _ in 0..self.rng.gen_range(0..3) {
            out.push(WHITESPACE[self.rng.gen_range(0..WHITESPACE.len())]);
        }
    }

    fn array(&mut self, out: &mut String, depth: usize) {
        out.push('[');
        self.whitespace(out);
        for i in 0..self.rng.gen_range(0..=self.max_width) {
            if i > 0 {
                out.push(',');
                self.whitespace(out);
            }
            self.value(out, depth);
            self.whitespace(out);
        }
        out.push(']');
    }

    fn object(&mut self, out: &mut String, depth: usize) {
        out.push('{');
        self.whitespace(out);
        for i in 0..self.rng.gen_range(0..=self.max_width) {
            if i > 0 {
                out.push(',');
                self.whitespace(out);
            }
            // Suffix keeps keys unique so the document has one reading.
            self.string_with_suffix(out, &format!("#{}", i));
            self.whitespace(out);
            out.push(':');
            self.whitespace(out);
            self.value(out, depth);
            self.whitespace(out);
        }
        out.push('}');
    }

    fn integer(&mut self, out: &mut String) {
        let value: i64 = match self.rng.gen_range(0..4) {
            0 => INTEGER_EDGES[self.rng.gen_range(0..INTEGER_EDGES.len())],
            1 => self.rng.r#gen(),
            _ => self.rng.gen_range(-100_000..100_000),
        };
        out.push_str(&value.to_string());
    }

    fn float(&mut self, out: &mut String) {
        if self.rng.gen_bool(0.5) {
            out.push('-');
        }

        if self.rng.gen_bool(0.2) {
            out.push('0');
        } else {
            out.push(self.digit(1));
            for _ in 0..self.rng.gen_range(0..8) {
                out.push(self.digit(0));
            }
        }

        let has_fraction = self.rng.gen_bool(0.7);
        if has_fraction {
            out.push('.');
            for _ in 0..self.rng.gen_range(1..12) {
                out.push(self.digit(0));
            }
        }

        if !has_fraction || self.rng.gen_bool(0.5) {
            out.push(if self.rng.gen_bool(0.5) { 'e' } else { 'E' });
            match self.rng.gen_range(0..3) {
                0 => out.push('+'),
                1 => out.push('-'),
                _ => {}
            }
            out.push_str(&self.rng.gen_range(0..300).to_string());
        }
    }

    fn digit(&mut self, lowest: u8) -> char {
        char::from(b'0' + self.rng.gen_range(lowest..10))
    }

    fn string(&mut self, out: &mut String) {
        self.string_with_suffix(out, "");
    }

    fn string_with_suffix(&mut self, out: &mut String, suffix: &str) {
        out.push('"');
        for _ in 0..self.rng.gen_range(0..16) {
            match self.rng.gen_range(0..10) {
                0 => out.push_str(SHORT_ESCAPES[self.rng.gen_range(0..SHORT_ESCAPES.len())]),
                1 => self.bmp_escape(out),
                2 => self.surrogate_pair_escape(out),
                3 => self.raw_multibyte(out),
                _ => out.push(self.printable_ascii()),
            }
        }
        out.push_str(suffix);
        out.push('"');
    }

    fn printable_ascii(&mut self) -> char {
        loop {
            let c = char::from(self.rng.gen_range(0x20u8..0x7f));
            if c != '"' && c != '\\' {
                return c;
            }
        }
    }

    fn bmp_escape(&mut self, out: &mut String) {
        let code = if self.rng.gen_bool(0.5) {
            self.rng.gen_range(0x0000..0xD800u32)
        } else {
            self.rng.gen_range(0xE000..=0xFFFFu32)
        };
        self.push_escape(out, code);
    }

    fn surrogate_pair_escape(&mut self, out: &mut String) {
        let offset = self.rng.gen_range(0x10000..=0x10FFFFu32) - 0x10000;
        self.push_escape(out, 0xD800 + (offset >> 10));
        self.push_escape(out, 0xDC00 + (offset & 0x3FF));
    }

    fn push_escape(&mut self, out: &mut String, unit: u32) {
        if self.rng.gen_bool(0.5) {
            out.push_str(&format!("\\u{:04x}", unit));
        } else {
            out.push_str(&format!("\\u{:04X}", unit));
        }
    }

    fn raw_multibyte(&mut self, out: &mut String) {
        let code = self.rng.gen_range(0x80..0x2FFFFu32);
        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
    }
}

/// `depth` nested empty arrays: `[[[...]]]`.
pub fn nested_arrays(depth: usize) -> String {
    let mut out = String::with_capacity(depth * 2);
    out.extend(std::iter::repeat_n('[', depth));
    out.extend(std::iter::repeat_n(']', depth));
    out
}

/// A float literal of `len` bytes whose digits spell out one third: `0.333...3`.
pub fn long_float_literal(len: usize) -> String {
    let digits = len.saturating_sub(2).max(1);
    let mut out = String::with_capacity(digits + 2);
    out.push_str("0.");
    out.extend(std::iter::repeat_n('3', digits));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_documents() {
        let first = DocumentGenerator::new(7, 4, 5).documents(20);
        let second = DocumentGenerator::new(7, 4, 5).documents(20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_documents_parse() {
        let mut generator = DocumentGenerator::new(42, 5, 6);
        for doc in generator.documents(200) {
            assert!(json_value::parse(&doc).is_ok(), "failed on {}", doc);
        }
    }

    #[test]
    fn test_depth_cap() {
        fn depth(value: &json_value::Value) -> usize {
            match value {
                json_value::Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
                json_value::Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
                _ => 0,
            }
        }

        let mut generator = DocumentGenerator::new(3, 2, 4);
        for doc in generator.documents(100) {
            assert!(depth(&json_value::parse(&doc).unwrap()) <= 2);
        }
    }

    #[test]
    fn test_nested_arrays() {
        assert_eq!(nested_arrays(3), "[[[]]]");
        assert_eq!(nested_arrays(0), "");
    }

    #[test]
    fn test_long_float_literal() {
        let literal = long_float_literal(1000);
        assert_eq!(literal.len(), 1000);
        assert!(literal.starts_with("0.333"));
    }
}
