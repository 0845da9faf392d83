//! Insightboard - aggregation engine for customer-account dashboards.
//!
//! Turns a flat collection of account records into labeled series, the
//! age by product heatmap matrix, and short takeaways, then renders them
//! as Markdown or JSON reports.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod report;

pub use analysis::{cross_tabulate, resolve, resolve_identifier, summarize};
pub use error::{InsightError, Result};
pub use models::{InsightKind, Matrix, Record, Series};
