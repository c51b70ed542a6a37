//! Scenario runner: correctness checks over generated documents and
//! decode/encode throughput measurements.

use crate::config::RunConfig;
use crate::generator::{DocumentGenerator, long_float_literal, nested_arrays};
use json_value::{Value, parse, parse_nonrecursive};
use logging::Logger;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Failures reported per check are capped in the log.
const MAX_LOGGED_FAILURES: usize = 10;

/// Result of one correctness check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub failures: Vec<String>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bytes processed by one mode over the measured interval.
#[derive(Debug, Clone, Copy)]
pub struct Throughput {
    pub name: &'static str,
    pub bytes: usize,
    pub elapsed: Duration,
}

impl Throughput {
    pub fn megabytes_per_second(&self) -> f64 {
        self.bytes as f64 / 1e6 / self.elapsed.as_secs_f64().max(1e-9)
    }
}

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct Report {
    pub checks: Vec<CheckOutcome>,
    pub throughput: Vec<Throughput>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(CheckOutcome::passed)
    }

    pub fn failed_checks(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed()).count()
    }
}

/// Parse, serialize, parse again: both values must be identical.
pub fn check_round_trip(doc: &str) -> Result<(), String> {
    let value = parse(doc).map_err(|e| format!("parse failed: {}", e))?;
    let text = value
        .to_json()
        .map_err(|e| format!("serialize failed: {}", e))?;
    let again = parse(&text).map_err(|e| format!("re-parse of {} failed: {}", text, e))?;
    if again != value {
        return Err(format!("re-parsed value differs: {}", text));
    }
    Ok(())
}

/// The recursive and iterative parsers must agree on the document and on a
/// truncated prefix of it.
pub fn check_parser_equivalence(doc: &str) -> Result<(), String> {
    let mut cut = doc.len() / 2;
    while !doc.is_char_boundary(cut) {
        cut -= 1;
    }

    for input in [doc, &doc[..cut]] {
        match (parse(input), parse_nonrecursive(input)) {
            (Ok(a), Ok(b)) if a == b => {}
            (Err(a), Err(b)) if a.kind_name() == b.kind_name() => {}
            (a, b) => {
                return Err(format!(
                    "parsers disagree on {:?}: recursive {:?}, iterative {:?}",
                    input,
                    a.map(|v| v.kind()),
                    b.map(|v| v.kind())
                ));
            }
        }
    }
    Ok(())
}

/// Text and buffer serialization must produce the same bytes.
pub fn check_encode_modes(doc: &str) -> Result<(), String> {
    let value = parse(doc).map_err(|e| format!("parse failed: {}", e))?;
    let text = value.to_json().map_err(|e| format!("text mode failed: {}", e))?;
    let buffered = value
        .to_json_buffered()
        .map_err(|e| format!("buffer mode failed: {}", e))?;
    if text != buffered {
        return Err(format!("encode modes differ: {} vs {}", text, buffered));
    }
    Ok(())
}

/// The iterative parser must accept `depth` nested arrays.
pub fn check_deep_nesting(depth: usize) -> Result<(), String> {
    let depth = depth.max(1);
    let value = parse_nonrecursive(&nested_arrays(depth))
        .map_err(|e| format!("depth {} rejected: {}", depth, e))?;

    let mut found = 0;
    let mut current = Some(&value);
    while let Some(node) = current {
        let Some(items) = node.as_array() else { break };
        found += 1;
        current = items.first();
    }

    if found != depth {
        return Err(format!("expected depth {}, found {}", depth, found));
    }
    Ok(())
}

/// A float literal of `len` bytes must decode, in linear time, to one third.
pub fn check_long_float(len: usize) -> Result<(), String> {
    let literal = long_float_literal(len);
    for (name, result) in [
        ("recursive", parse(&literal)),
        ("iterative", parse_nonrecursive(&literal)),
    ] {
        let value = result.map_err(|e| format!("{} parser failed: {}", name, e))?;
        match &value {
            Value::Float(x) if (x - 1.0 / 3.0).abs() < 1e-15 => {}
            other => {
                return Err(format!(
                    "{} parser decoded {} bytes to {}",
                    name,
                    literal.len(),
                    other
                ));
            }
        }
    }
    Ok(())
}

/// Runs every check and measurement described by a [`RunConfig`].
pub struct Runner {
    config: RunConfig,
    logger: Logger,
}

impl Runner {
    pub fn new(config: RunConfig, logger: Logger) -> Self {
        Runner { config, logger }
    }

    pub fn run(&self) -> Report {
        let docs = DocumentGenerator::new(
            self.config.seed,
            self.config.max_depth,
            self.config.max_width,
        )
        .documents(self.config.documents);
        let total: usize = docs.iter().map(String::len).sum();
        self.logger.info(&format!(
            "Generated {} documents ({} bytes, seed {})",
            docs.len(),
            total,
            self.config.seed
        ));

        let checks = vec![
            self.per_document("round-trip", &docs, check_round_trip),
            self.per_document("parser-equivalence", &docs, check_parser_equivalence),
            self.per_document("encode-modes", &docs, check_encode_modes),
            self.single("deep-nesting", check_deep_nesting(self.config.nesting_depth)),
            self.single("long-float", check_long_float(self.config.float_literal_bytes)),
        ];

        Report {
            checks,
            throughput: self.measure(&docs),
        }
    }

    fn per_document(
        &self,
        name: &'static str,
        docs: &[String],
        check: fn(&str) -> Result<(), String>,
    ) -> CheckOutcome {
        let failures = docs
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| check(doc).err().map(|e| format!("document {}: {}", i, e)))
            .collect();
        self.record(CheckOutcome { name, failures })
    }

    fn single(&self, name: &'static str, result: Result<(), String>) -> CheckOutcome {
        self.record(CheckOutcome {
            name,
            failures: result.err().into_iter().collect(),
        })
    }

    fn record(&self, outcome: CheckOutcome) -> CheckOutcome {
        if outcome.passed() {
            self.logger.info(&format!("Check '{}' passed", outcome.name));
        } else {
            for failure in outcome.failures.iter().take(MAX_LOGGED_FAILURES) {
                self.logger.error(&format!("{}: {}", outcome.name, failure));
            }
            self.logger.error(&format!(
                "Check '{}' failed ({} failures)",
                outcome.name,
                outcome.failures.len()
            ));
        }
        outcome
    }

    fn measure(&self, docs: &[String]) -> Vec<Throughput> {
        let rounds = self.config.throughput_rounds.max(1);
        let values: Vec<Value> = docs.iter().filter_map(|doc| parse(doc).ok()).collect();

        let results = vec![
            timed("decode", rounds, || {
                docs.iter()
                    .filter(|doc| black_box(parse(doc)).is_ok())
                    .map(|doc| doc.len())
                    .sum()
            }),
            timed("encode-text", rounds, || {
                values
                    .iter()
                    .filter_map(|value| black_box(value.to_json()).ok())
                    .map(|text| text.len())
                    .sum()
            }),
            timed("encode-buffered", rounds, || {
                values
                    .iter()
                    .filter_map(|value| black_box(value.to_json_buffered()).ok())
                    .map(|text| text.len())
                    .sum()
            }),
        ];

        for result in &results {
            self.logger.info(&format!(
                "Throughput {}: {:.2} MB/s ({} bytes in {:?})",
                result.name,
                result.megabytes_per_second(),
                result.bytes,
                result.elapsed
            ));
        }
        results
    }
}

fn timed(name: &'static str, rounds: usize, mut pass: impl FnMut() -> usize) -> Throughput {
    let start = Instant::now();
    let bytes = (0..rounds).map(|_| pass()).sum();
    Throughput {
        name,
        bytes,
        elapsed: start.elapsed(),
    }
}
