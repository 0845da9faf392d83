//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::InsightKind;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Insightboard - customer-account dashboard insights
///
/// Aggregate a customer-account dataset into the dashboard's insights
/// (product mix, average ages, API usage, regional spread) and render
/// them as a Markdown or JSON report.
///
/// Examples:
///   insightboard --data data/mock-data.json
///   insightboard --data accounts.csv --insight productDistribution,sizeVsApiCalls
///   insightboard --data accounts.json --format json --output -
///   insightboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Dataset to load (.json array or .csv with a header row)
    ///
    /// Falls back to the config file, then data/mock-data.json.
    #[arg(short, long, value_name = "FILE", env = "INSIGHTBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Insights to report (comma-separated identifiers)
    ///
    /// One of: productDistribution, ageByProduct, apiCallsByCompany,
    /// stateDistribution, sizeVsApiCalls. Defaults to all five.
    /// Unknown identifiers produce an empty section.
    #[arg(short, long, value_name = "ID", value_delimiter = ',')]
    pub insight: Vec<String>,

    /// Include the age by product heatmap
    #[arg(long, conflicts_with = "no_heatmap")]
    pub heatmap: bool,

    /// Leave out the age by product heatmap
    #[arg(long, conflicts_with = "heatmap")]
    pub no_heatmap: bool,

    /// Leave out the key takeaways
    #[arg(long)]
    pub no_takeaways: bool,

    /// Size category quoted in the company-size takeaway
    #[arg(long, value_name = "NAME")]
    pub reference_size: Option<String>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Output file path for the report ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .insightboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .insightboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref reference) = self.reference_size {
            if reference.trim().is_empty() {
                return Err("Reference size must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file; the
    /// `--quiet` flag wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Identifiers to report, all insights when none were given.
    ///
    /// Blank entries (e.g. from a trailing comma) are skipped.
    pub fn requested_insights(&self) -> Vec<String> {
        let requested: Vec<String> = self
            .insight
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        if requested.is_empty() {
            InsightKind::ALL
                .iter()
                .map(|kind| kind.identifier().to_string())
                .collect()
        } else {
            requested
        }
    }
}

/// Log filter from `RUST_LOG`, falling back to `level`.
pub fn log_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_log_filter(level))
}

/// Log filter admitting `level` and above.
pub fn default_log_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::new(level.as_str().to_ascii_lowercase())
}

/// Whether an output path means "write to stdout".
pub fn is_stdout(output: &str) -> bool {
    output == "-"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: Some(PathBuf::from("data.json")),
            insight: Vec::new(),
            heatmap: false,
            no_heatmap: false,
            no_takeaways: false,
            reference_size: None,
            format: OutputFormat::Markdown,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_requested_insights_default_to_all() {
        let args = make_args();
        assert_eq!(
            args.requested_insights(),
            vec![
                "productDistribution",
                "ageByProduct",
                "apiCallsByCompany",
                "stateDistribution",
                "sizeVsApiCalls"
            ]
        );
    }

    #[test]
    fn test_insight_list_parsing() {
        let args = Args::parse_from([
            "insightboard",
            "--insight",
            "ageByProduct,bogusInsight",
            "-i",
            "stateDistribution",
        ]);
        assert_eq!(
            args.requested_insights(),
            vec!["ageByProduct", "bogusInsight", "stateDistribution"]
        );
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_reference_size() {
        let mut args = make_args();
        args.reference_size = Some("  ".to_string());
        assert!(args.validate().is_err());

        args.reference_size = Some("Medium".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_heatmap_flags_conflict() {
        let result = Args::try_parse_from(["insightboard", "--heatmap", "--no-heatmap"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_comma_in_insight_list() {
        let args = Args::parse_from(["insightboard", "--insight", "productDistribution,"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.requested_insights(), vec!["productDistribution"]);

        let args = Args::parse_from(["insightboard", "--insight", ","]);
        assert!(args.validate().is_ok());
        assert_eq!(args.requested_insights().len(), 5);
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_log_level_from_config_verbose() {
        let mut args = make_args();
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }

    #[test]
    fn test_default_log_filter() {
        use tracing_subscriber::filter::LevelFilter;

        assert_eq!(
            default_log_filter(tracing::Level::DEBUG).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            default_log_filter(tracing::Level::ERROR).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }

    #[test]
    fn test_is_stdout() {
        assert!(is_stdout("-"));
        assert!(!is_stdout("report.md"));
    }
}
