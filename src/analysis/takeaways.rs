//! Key takeaways derived from a resolved series.
//!
//! Takeaways are short sentences shown next to a chart. Any figure that
//! cannot be computed (zero totals, missing categories, empty series)
//! becomes a `NoData` entry instead of a fault.

use crate::models::{InsightKind, Series};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One derived fact about an insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Takeaway {
    /// A computed, human-readable fact.
    Fact(String),
    /// The figure for this topic could not be derived.
    NoData(String),
}

impl Takeaway {
    pub fn has_data(&self) -> bool {
        matches!(self, Takeaway::Fact(_))
    }
}

impl fmt::Display for Takeaway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Takeaway::Fact(text) => write!(f, "{}", text),
            Takeaway::NoData(topic) => write!(f, "{}: no data", topic),
        }
    }
}

/// Settings for takeaway generation.
#[derive(Debug, Clone)]
pub struct TakeawayConfig {
    /// Size category whose average is quoted for `sizeVsApiCalls`.
    pub reference_size: String,
}

impl Default for TakeawayConfig {
    fn default() -> Self {
        Self {
            reference_size: "Large".to_string(),
        }
    }
}

impl From<&crate::config::TakeawaysConfig> for TakeawayConfig {
    fn from(config: &crate::config::TakeawaysConfig) -> Self {
        Self {
            reference_size: config.reference_size.clone(),
        }
    }
}

/// Derive the takeaways for `kind` from its resolved series.
pub fn summarize(kind: InsightKind, series: &Series, config: &TakeawayConfig) -> Vec<Takeaway> {
    match kind {
        InsightKind::ProductDistribution => vec![leading_share(series)],
        InsightKind::AgeByProduct => vec![age_extremes(series)],
        InsightKind::ApiCallsByCompany => vec![first_company_calls(series)],
        InsightKind::StateDistribution => vec![top_states_share(series)],
        InsightKind::SizeVsApiCalls => vec![reference_size_average(series, &config.reference_size)],
    }
}

fn leading_share(series: &Series) -> Takeaway {
    let total = series.total();
    match series.iter().next() {
        Some((label, value)) if total > 0.0 => Takeaway::Fact(format!(
            "{} accounts for {}% of the portfolio.",
            label,
            percent(value, total)
        )),
        _ => Takeaway::NoData("Portfolio share".to_string()),
    }
}

fn age_extremes(series: &Series) -> Takeaway {
    let mut pairs = series.iter();
    let Some(first) = pairs.next() else {
        return Takeaway::NoData("Average age".to_string());
    };

    // Strict comparisons keep the first-seen label on ties.
    let (youngest, oldest) = pairs.fold((first, first), |(lo, hi), pair| {
        (
            if pair.1 < lo.1 { pair } else { lo },
            if pair.1 > hi.1 { pair } else { hi },
        )
    });

    if youngest.0 == oldest.0 {
        return Takeaway::Fact(format!(
            "{} customers average {} years of age.",
            youngest.0,
            format_number(youngest.1)
        ));
    }

    Takeaway::Fact(format!(
        "Youngest customers favor {} (avg {}); oldest lean toward {} (avg {}).",
        youngest.0,
        format_number(youngest.1),
        oldest.0,
        format_number(oldest.1)
    ))
}

fn first_company_calls(series: &Series) -> Takeaway {
    match series.iter().next() {
        Some((label, value)) => Takeaway::Fact(format!(
            "{} generates {} API calls.",
            label,
            format_number(value)
        )),
        None => Takeaway::NoData("API calls".to_string()),
    }
}

fn top_states_share(series: &Series) -> Takeaway {
    let total = series.total();
    if series.is_empty() || total <= 0.0 {
        return Takeaway::NoData("State share".to_string());
    }

    let mut ranked: Vec<(&str, f64)> = series.iter().collect();
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(2);

    let combined: f64 = ranked.iter().map(|(_, v)| v).sum();
    let names: Vec<&str> = ranked.iter().map(|(label, _)| *label).collect();

    Takeaway::Fact(format!(
        "{} together host {}% of users.",
        names.join(" and "),
        percent(combined, total)
    ))
}

fn reference_size_average(series: &Series, reference: &str) -> Takeaway {
    match series.value_of(reference) {
        Some(value) => Takeaway::Fact(format!(
            "{} companies perform on average {} API calls.",
            reference,
            format_number(value)
        )),
        None => Takeaway::NoData(format!("{} companies", reference)),
    }
}

/// Whole-number percentage of `part` in `total`. Callers guarantee `total > 0`.
fn percent(part: f64, total: f64) -> i64 {
    (part / total * 100.0).round() as i64
}

/// Format a number with `,` thousands separators and at most three
/// fractional digits, trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }

    out
}
