//! Tremor stabilizer command-line replay tool.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
};
use tremor_stabilizer::{
    app::{AppConfig, StabilizerApp},
    config::{Config, OutputFormat},
    parameters::Parameters,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Event file to read (defaults to stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// File to write stabilized positions to (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Filter type (stabilizer, none)
    #[arg(short, long, default_value = "stabilizer")]
    filter: String,

    /// Smoothing strength / history capacity (1-20)
    #[arg(short, long)]
    smoothing: Option<usize>,

    /// Tremor threshold in hundredths of px/ms (1-20)
    #[arg(short, long)]
    threshold: Option<u32>,

    /// Start with stabilization disabled
    #[arg(long)]
    disabled: bool,

    /// Output format (plain, csv)
    #[arg(long)]
    format: Option<String>,

    /// Prefix each output line with the raw sample
    #[arg(long)]
    include_raw: bool,

    /// Fail on unparsable input lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Tremor Stabilizer");

    // Load configuration if provided
    let mut config_file = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(smoothing) = args.smoothing {
        config_file.stabilizer.history_capacity = smoothing;
    }
    if let Some(threshold) = args.threshold {
        config_file.stabilizer.tremor_threshold = threshold;
    }
    if args.disabled {
        config_file.stabilizer.enabled = false;
    }
    if let Some(format) = &args.format {
        config_file.output.format = match format.as_str() {
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Plain,
        };
    }
    if args.include_raw {
        config_file.output.include_raw = true;
    }

    let parameters: Parameters = config_file.parameters().context("Invalid stabilizer parameters")?;

    let config = AppConfig {
        filter_type: args.filter,
        parameters,
        enabled: config_file.stabilizer.enabled,
        output: config_file.output,
        strict: args.strict,
    };

    let mut app = StabilizerApp::new(config)?;

    let stats = match (&args.input, &args.output) {
        (Some(input), Some(output)) => {
            let reader = BufReader::new(File::open(input).with_context(|| format!("Failed to open {input}"))?);
            let writer = BufWriter::new(File::create(output).with_context(|| format!("Failed to create {output}"))?);
            app.run(reader, writer)?
        }
        (Some(input), None) => {
            let reader = BufReader::new(File::open(input).with_context(|| format!("Failed to open {input}"))?);
            app.run(reader, BufWriter::new(io::stdout().lock()))?
        }
        (None, Some(output)) => {
            let writer = BufWriter::new(File::create(output).with_context(|| format!("Failed to create {output}"))?);
            app.run(io::stdin().lock(), writer)?
        }
        (None, None) => app.run(io::stdin().lock(), BufWriter::new(io::stdout().lock()))?,
    };

    info!("Done: {} moves, {} skipped", stats.moves, stats.skipped);

    Ok(())
}
