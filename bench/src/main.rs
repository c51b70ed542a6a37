use std::path::Path;
use std::process::ExitCode;

use json_bench::config::BenchConfig;
use json_bench::runner::{Report, Runner};
use logging::{LogLevel, Logger};

fn main() -> ExitCode {
    println!("json-bench - Starting...");

    // Load configuration
    let config = load_config();

    // Initialize logger
    let logger = initialize_logger(&config);

    logger.info(&format!(
        "Run started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    let report = Runner::new(config.run.clone(), logger.for_component("Runner")).run();
    summarize(&report, &logger);

    if let Err(e) = logger.flush() {
        eprintln!("Failed to flush log: {}", e);
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initializes the main logger from configuration
fn initialize_logger(config: &BenchConfig) -> Logger {
    let log_level = config.logging.log_level.parse::<LogLevel>().unwrap_or_else(|e| {
        eprintln!("{}, using info", e);
        LogLevel::Info
    });
    let log_path = Path::new(&config.logging.log_file_path);

    match Logger::with_console(log_path, log_level, config.logging.enable_console) {
        Ok(logger) => {
            println!(
                "Logging initialized: {} (level: {})",
                config.logging.log_file_path, log_level
            );
            logger.for_component("Main")
        }
        Err(e) => {
            eprintln!("Failed to create logger: {}", e);
            eprintln!("Cannot continue without logging system.");
            std::process::exit(1);
        }
    }
}

/// Loads configuration from file or returns default values
fn load_config() -> BenchConfig {
    // Determine the configuration file in this order:
    // 1. First command-line argument
    // 2. bench.json via config_loader ($JSON_BENCH_CONFIG, ./config/, ./)
    // 3. Default values
    let loaded = match std::env::args().nth(1) {
        Some(path) => BenchConfig::load_from_file(&path).map(|c| (c, path)),
        None => BenchConfig::discover().map(|c| (c, "standard locations".to_string())),
    };

    match loaded {
        Ok((config, source)) => {
            println!("Configuration loaded from: {}", source);
            config
        }
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            eprintln!("Using default values...");
            BenchConfig::default()
        }
    }
}

fn summarize(report: &Report, logger: &Logger) {
    let failed = report.failed_checks();
    if failed == 0 {
        logger.info(&format!("All {} checks passed", report.checks.len()));
    } else {
        logger.error(&format!(
            "{} of {} checks failed",
            failed,
            report.checks.len()
        ));
    }
}
