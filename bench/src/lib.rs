//! # json-bench
//!
//! Harness for the `json_value` crate. Generates seeded random JSON, checks
//! that parsing and serialization agree with each other, and measures decode
//! and encode throughput. Results are reported through `logging`.

pub mod config;
pub mod generator;
pub mod runner;
