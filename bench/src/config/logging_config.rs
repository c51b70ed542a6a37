use json_value::impl_json;

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_file_path: String,
    pub log_level: String,
    pub enable_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_file_path: "json-bench.log".to_string(),
            log_level: "info".to_string(),
            enable_console: true,
        }
    }
}

impl_json! {
    LoggingConfig {
        log_file_path: String,
        log_level: String,
        enable_console: bool,
    }
}
