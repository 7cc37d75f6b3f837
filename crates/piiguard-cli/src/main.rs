//! PiiGuard CLI
//!
//! Scans a CSV of records for PII and writes a redacted copy.
//!
//! Usage:
//! ```bash
//! piiguard records.csv
//!
//! # With a config file and verbose logging
//! piiguard --config piiguard.yaml --log-level debug records.csv
//! ```

use anyhow::Context;
use clap::Parser;
use piiguard_cli::{AppConfig, LoggingConfig, RecordProcessor, process_file};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Output table, written to the working directory
const OUTPUT_FILE: &str = "redacted_output.csv";

#[derive(Parser)]
#[command(name = "piiguard")]
#[command(about = "Detect and redact PII in CSV records", long_about = None)]
struct Cli {
    /// Input CSV with `record_id` and `Data_json` columns
    input: Option<PathBuf>,

    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "PIIGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Log level or filter directive (e.g. `debug`, `piiguard_cli=trace`)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|e| {
        eprintln!("Warning: Invalid log level '{}' ({}), using info", logging.level, e);
        EnvFilter::new("info")
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(input) = cli.input else {
        println!("Please provide input CSV file");
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.merge_env();

    // CLI flag has the highest precedence
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging)?;

    let processor = RecordProcessor::from_config(&config.classifier);
    process_file(&processor, &input, Path::new(OUTPUT_FILE))
        .with_context(|| format!("failed to process {}", input.display()))?;

    println!("Done! Output saved to {}", OUTPUT_FILE);

    Ok(())
}
