use json_value::impl_json;
use std::path::Path;

use crate::config::{LoggingConfig, RunConfig};

/// Default config file name, searched by `config_loader`.
pub const CONFIG_FILE_NAME: &str = "bench.json";

/// Harness configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchConfig {
    pub run: RunConfig,
    pub logging: LoggingConfig,
}

impl_json! {
    BenchConfig {
        run: RunConfig,
        logging: LoggingConfig,
    }
}

impl BenchConfig {
    /// Load configuration from a JSON file at an explicit path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> config_loader::Result<Self> {
        let value = config_loader::load_value(path)?;
        Ok(json_value::FromValue::from_value(&value)?)
    }

    /// Load `bench.json` from the standard locations, or defaults if absent
    pub fn discover() -> config_loader::Result<Self> {
        config_loader::load_typed_or_default(CONFIG_FILE_NAME)
    }
}
