//! Error types for the I/O edges of the crate.
//!
//! The aggregation engine itself never fails; only loading datasets and
//! writing reports can.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON dataset error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV dataset error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported dataset format for {}: expected .json or .csv", path.display())]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, InsightError>;
