//! Insight resolvers.
//!
//! Each resolver turns the full record collection into one chart series.
//! Labels appear in the order their key is first met while scanning the
//! records front to back.

use super::grouping::{count_by, round_to_tenth, sum_and_count_by, sum_by};
use crate::models::{InsightKind, Record, Series};
use tracing::{debug, warn};

/// Resolve one insight over `records`.
pub fn resolve(kind: InsightKind, records: &[Record]) -> Series {
    let series = match kind {
        InsightKind::ProductDistribution => product_distribution(records),
        InsightKind::AgeByProduct => age_by_product(records),
        InsightKind::ApiCallsByCompany => api_calls_by_company(records),
        InsightKind::StateDistribution => state_distribution(records),
        InsightKind::SizeVsApiCalls => size_vs_api_calls(records),
    };

    debug!(
        "Resolved {} over {} records into {} labels",
        kind,
        records.len(),
        series.len()
    );

    series
}

/// Resolve an insight by its selector string.
///
/// Unknown identifiers resolve to an empty series.
pub fn resolve_identifier(id: &str, records: &[Record]) -> Series {
    match InsightKind::from_identifier(id) {
        Some(kind) => resolve(kind, records),
        None => {
            warn!("Unknown insight identifier '{}', returning empty series", id);
            Series::empty()
        }
    }
}

/// Number of records per product type.
pub fn product_distribution(records: &[Record]) -> Series {
    count_by(records, |r| r.product_type.as_str()).into_series(|count| *count as f64)
}

/// Mean customer age per product type, rounded to one decimal.
pub fn age_by_product(records: &[Record]) -> Series {
    sum_and_count_by(records, |r| r.product_type.as_str(), |r| u64::from(r.age))
        .into_series(|acc| round_to_tenth(acc.mean()))
}

/// Total API calls per company.
pub fn api_calls_by_company(records: &[Record]) -> Series {
    sum_by(
        records,
        |r| r.company_name.as_str(),
        |r| r.number_of_api_calls,
    )
    .into_series(|sum| *sum as f64)
}

/// Number of records per state.
pub fn state_distribution(records: &[Record]) -> Series {
    count_by(records, |r| r.states.as_str()).into_series(|count| *count as f64)
}

/// Mean API calls per company size, rounded to one decimal.
pub fn size_vs_api_calls(records: &[Record]) -> Series {
    sum_and_count_by(
        records,
        |r| r.size_of_company.as_str(),
        |r| r.number_of_api_calls,
    )
    .into_series(|acc| round_to_tenth(acc.mean()))
}
