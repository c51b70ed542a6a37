//! Harness configuration

pub mod bench_config;
pub mod logging_config;
pub mod run_config;

pub use bench_config::BenchConfig;
pub use logging_config::LoggingConfig;
pub use run_config::RunConfig;
