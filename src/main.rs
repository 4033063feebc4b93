//! wellstream - per-well production telemetry query engine
//!
//! Reads a sectioned stream (`QUERIES` ... `DATA` ... `END`) and prints one
//! answer line per query on stdout.
//!
//! # Usage
//!
//! ```bash
//! wellstream < case.in > case.out
//! wellstream --input field_export.txt --decimals 3
//! ```
//!
//! # Environment Variables
//!
//! - `WELLSTREAM_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging filter (default: `logging.filter`, then `warn`)

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::debug;

use wellstream::config::defaults::DEFAULT_LOG_FILTER;
use wellstream::config::AppConfig;
use wellstream::pipeline::{run, LineSource};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellstream")]
#[command(about = "Streaming per-well production telemetry aggregation")]
#[command(version)]
struct CliArgs {
    /// Read the input stream from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// TOML config file; a broken file here is a fatal error
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Digits after the decimal point (overrides output.decimals)
    #[arg(long)]
    decimals: Option<usize>,
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(decimals) = args.decimals {
        config.output.decimals = decimals;
        config.validate().context("invalid --decimals")?;
    }
    Ok(config)
}

fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.filter))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Config warnings are emitted before the configured filter is known
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || load_config(&args))?;
    init_tracing(&config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let mut source = LineSource::new(BufReader::new(file), path.display().to_string());
            run(&mut source, &mut out, &config)?
        }
        None => {
            let stdin = io::stdin();
            let mut source = LineSource::new(stdin.lock(), "stdin");
            run(&mut source, &mut out, &config)?
        }
    };

    debug!(
        queries = summary.queries,
        wells = summary.wells,
        trackers = summary.trackers,
        "Run complete"
    );
    Ok(())
}
