//! # Config Loader
//!
//! Locates a JSON configuration file, reads it and decodes it with
//! `json_value`.
//!
//! ```no_run
//! use config_loader::{find_and_load, load_typed_or_default};
//! use std::collections::HashMap;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Raw JSON object
//!     let value = find_and_load("bench.json")?;
//!     println!("{}", value);
//!
//!     // Typed, falling back to defaults when no file exists
//!     let limits: HashMap<String, i64> = load_typed_or_default("limits.json")?;
//!     println!("{} limits", limits.len());
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ConfigError, Result};

use json_value::{FromValue, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "JSON_BENCH_CONFIG";

/// Reads the file at `path` into a string.
///
/// # Errors
///
/// `NotFound` if the file does not exist, `Read` for any other I/O failure.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    Ok(fs::read_to_string(path)?)
}

/// Reads the file at `path` and parses it as a single JSON object.
pub fn load_value<P: AsRef<Path>>(path: P) -> Result<Value> {
    let content = load_config_file(path)?;
    Ok(json_value::parse_object(&content)?)
}

/// Looks for a config file, in order:
/// 1. the path in the `JSON_BENCH_CONFIG` environment variable (if it exists)
/// 2. `./config/{filename}`
/// 3. `./{filename}`
pub fn find_config_file(filename: &str) -> Result<PathBuf> {
    let from_env = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    search(filename, from_env, Path::new("."))
}

fn search(filename: &str, from_env: Option<PathBuf>, base: &Path) -> Result<PathBuf> {
    let candidates = from_env
        .into_iter()
        .chain([base.join("config").join(filename), base.join(filename)]);

    for candidate in candidates {
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(ConfigError::NotFound(format!(
        "'{}' (searched: ${}, ./config/{}, ./{})",
        filename, CONFIG_ENV_VAR, filename, filename
    )))
}

/// Finds, reads and parses a config file in one step.
pub fn find_and_load(filename: &str) -> Result<Value> {
    let path = find_config_file(filename)?;
    load_value(path)
}

/// Finds a config file and converts it into `T`.
pub fn load_typed<T: FromValue>(filename: &str) -> Result<T> {
    let value = find_and_load(filename)?;
    Ok(T::from_value(&value)?)
}

/// Like [`load_typed`], but returns `T::default()` when no file is found.
///
/// A file that exists but cannot be read or decoded is still an error.
pub fn load_typed_or_default<T: FromValue + Default>(filename: &str) -> Result<T> {
    match load_typed(filename) {
        Err(ConfigError::NotFound(_)) => Ok(T::default()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config_file("/path/that/does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_find_nonexistent_file() {
        let dir = tempdir().unwrap();
        let result = search("missing.json", None, dir.path());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_search_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("bench.json"), "{}").unwrap();
        assert_eq!(
            search("bench.json", None, dir.path()).unwrap(),
            dir.path().join("bench.json")
        );

        fs::write(dir.path().join("config").join("bench.json"), "{}").unwrap();
        assert_eq!(
            search("bench.json", None, dir.path()).unwrap(),
            dir.path().join("config").join("bench.json")
        );

        let explicit = dir.path().join("explicit.json");
        fs::write(&explicit, "{}").unwrap();
        assert_eq!(
            search("bench.json", Some(explicit.clone()), dir.path()).unwrap(),
            explicit
        );

        let missing = dir.path().join("missing.json");
        assert_eq!(
            search("bench.json", Some(missing), dir.path()).unwrap(),
            dir.path().join("config").join("bench.json")
        );
    }

    #[test]
    fn test_load_value_parses_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, r#"{"iterations": 5, "log_level": "debug"}"#).unwrap();

        let value = load_value(&path).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["iterations"], Value::Int(5));

        let typed: HashMap<String, Value> = HashMap::from_value(&value).unwrap();
        assert_eq!(typed.len(), 2);
    }

    #[test]
    fn test_load_value_rejects_non_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(load_value(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_typed_or_default_when_missing() {
        let value: HashMap<String, i64> =
            load_typed_or_default("file_that_definitely_does_not_exist_12345.json").unwrap();
        assert!(value.is_empty());
    }
}
