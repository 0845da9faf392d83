//! Insightboard - customer-account dashboard insights
//!
//! A CLI tool that loads a customer-account dataset, runs the dashboard's
//! aggregations over it, and writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable dataset, bad config, write failure, etc.)

use anyhow::{Context, Result};
use insightboard::cli::{self, Args, OutputFormat};
use insightboard::config::{Config, CONFIG_FILE_NAME};
use insightboard::report::{self, ReportOptions};
use insightboard::{dataset, InsightKind};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load config first so `[general] verbose` can set the log level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("Insightboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    if let Err(e) = run(&args, &config) {
        error!("Report generation failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .insightboard.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to change the dataset, reference size, and report sections.");
    Ok(())
}

/// Initialize logging at `level`, unless `RUST_LOG` says otherwise.
///
/// Logs go to stderr so `--output -` keeps stdout clean.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(cli::log_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the dataset, build the report, and write it out.
fn run(args: &Args, config: &Config) -> Result<()> {
    let start_time = Instant::now();

    let dataset_path = PathBuf::from(&config.dataset.path);
    let records = dataset::load_records(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;

    if records.is_empty() {
        warn!("Dataset {} contains no records", dataset_path.display());
    }

    let requested = args.requested_insights();
    for id in &requested {
        if InsightKind::from_identifier(id).is_none() {
            warn!("Unknown insight '{}' will be reported as empty", id);
        }
    }

    let options = ReportOptions {
        insights: requested,
        ..ReportOptions::from(config)
    };

    let dashboard = report::build_report(&config.dataset.path, &records, &options);

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&dashboard)?,
        OutputFormat::Markdown => report::generate_markdown_report(&dashboard),
    };

    let output_path = PathBuf::from(&config.general.output);
    report::write_report(&output, &output_path)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    let duration = start_time.elapsed().as_secs_f64();
    info!(
        "Report with {} insights over {} records generated in {:.3}s",
        dashboard.insights.len(),
        records.len(),
        duration
    );

    if !cli::is_stdout(&config.general.output) && !args.quiet {
        println!(
            "✅ Report saved to: {} ({} records, {} insights)",
            output_path.display(),
            records.len(),
            dashboard.insights.len()
        );
    }

    Ok(())
}

/// Where the configuration came from, logged once logging is up.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Defaults,
    Fallback(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Fallback(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::Fallback(e))),
    }
}
