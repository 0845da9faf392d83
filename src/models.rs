//! Data models for the dashboard engine.
//!
//! This module contains the input record shape, the insight selector, the
//! two result shapes (series and matrix) handed to the presentation layer,
//! and the report assembled from them.

use crate::analysis::Takeaway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One customer-account observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique account identifier (e.g. "ACC-00123"). Not aggregated.
    pub account_number: String,
    /// Customer age in years.
    pub age: u32,
    /// Company that owns the account.
    pub company_name: String,
    /// Product line category (SaaS, Hardware, AI/ML, ...).
    pub product_type: String,
    /// Two-letter region code.
    pub states: String,
    /// Size category of the company (Small, Medium, Large).
    pub size_of_company: String,
    /// Number of API calls generated by the account.
    pub number_of_api_calls: u64,
}

/// The named insights the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    /// Record count per product type.
    ProductDistribution,
    /// Mean customer age per product type.
    AgeByProduct,
    /// Total API calls per company.
    ApiCallsByCompany,
    /// Record count per state.
    StateDistribution,
    /// Mean API calls per company size.
    SizeVsApiCalls,
}

impl InsightKind {
    /// All insights, in dashboard order.
    pub const ALL: [InsightKind; 5] = [
        InsightKind::ProductDistribution,
        InsightKind::AgeByProduct,
        InsightKind::ApiCallsByCompany,
        InsightKind::StateDistribution,
        InsightKind::SizeVsApiCalls,
    ];

    /// The selector string used by callers and configuration.
    pub fn identifier(&self) -> &'static str {
        match self {
            InsightKind::ProductDistribution => "productDistribution",
            InsightKind::AgeByProduct => "ageByProduct",
            InsightKind::ApiCallsByCompany => "apiCallsByCompany",
            InsightKind::StateDistribution => "stateDistribution",
            InsightKind::SizeVsApiCalls => "sizeVsApiCalls",
        }
    }

    /// Human-readable chart title.
    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::ProductDistribution => "Product Type Distribution",
            InsightKind::AgeByProduct => "Average Age per Product",
            InsightKind::ApiCallsByCompany => "API Calls per Company",
            InsightKind::StateDistribution => "Customers per State",
            InsightKind::SizeVsApiCalls => "Company Size vs API Calls",
        }
    }

    /// Parse a selector string. Matching is exact; anything else is `None`.
    pub fn from_identifier(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.identifier() == id)
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Labeled values for one chart, aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Distinct labels in first-seen order.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<f64>,
}

impl Series {
    /// The empty series returned for empty input or unknown insights.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Value for an exact label match, if present.
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// Iterate `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Age by product count table for the heatmap view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    /// Distinct ages, ascending.
    pub ages: Vec<u32>,
    /// Distinct product types, first-seen order.
    pub products: Vec<String>,
    /// `counts[i][j]` is the number of records with `ages[i]` and `products[j]`.
    pub counts: Vec<Vec<u64>>,
}

impl Matrix {
    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Largest cell value, or 0 for an empty matrix.
    pub fn max_count(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().flat_map(|row| row.iter()).sum()
    }
}

/// One insight as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSection {
    /// Identifier as requested by the caller.
    pub identifier: String,
    /// Parsed insight, `None` for unknown identifiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<InsightKind>,
    /// Chart title.
    pub title: String,
    /// Resolved series.
    pub series: Series,
    /// Key takeaways shown beside the chart.
    pub takeaways: Vec<Takeaway>,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Dataset the records were loaded from.
    pub dataset: String,
    /// Number of records aggregated.
    pub record_count: usize,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
}

/// The complete dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// One section per requested insight, in request order.
    pub insights: Vec<InsightSection>,
    /// Age by product heatmap, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Matrix>,
}
