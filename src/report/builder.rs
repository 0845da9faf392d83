//! Report assembly.
//!
//! Runs the requested resolvers (and the cross-tabulator) over the record
//! collection and collects the results into a `DashboardReport`.

use crate::analysis::{cross_tabulate, resolve, resolve_identifier, summarize, TakeawayConfig};
use crate::models::{DashboardReport, InsightKind, InsightSection, Record, ReportMetadata};
use chrono::Utc;
use tracing::{debug, info};

/// What to include in a report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Insight identifiers, in the order they should appear.
    pub insights: Vec<String>,
    /// Include the age by product heatmap.
    pub include_heatmap: bool,
    /// Derive key takeaways for each insight.
    pub include_takeaways: bool,
    /// Takeaway settings.
    pub takeaways: TakeawayConfig,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            insights: InsightKind::ALL
                .iter()
                .map(|kind| kind.identifier().to_string())
                .collect(),
            include_heatmap: true,
            include_takeaways: true,
            takeaways: TakeawayConfig::default(),
        }
    }
}

impl From<&crate::config::Config> for ReportOptions {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            include_heatmap: config.report.include_heatmap,
            include_takeaways: config.report.include_takeaways,
            takeaways: TakeawayConfig::from(&config.takeaways),
            ..Self::default()
        }
    }
}

/// Build a report section for one requested identifier.
pub fn build_section(identifier: &str, records: &[Record], options: &ReportOptions) -> InsightSection {
    let Some(kind) = InsightKind::from_identifier(identifier) else {
        return InsightSection {
            identifier: identifier.to_string(),
            kind: None,
            title: identifier.to_string(),
            series: resolve_identifier(identifier, records),
            takeaways: Vec::new(),
        };
    };

    let series = resolve(kind, records);
    let takeaways = if options.include_takeaways {
        summarize(kind, &series, &options.takeaways)
    } else {
        Vec::new()
    };

    InsightSection {
        identifier: identifier.to_string(),
        kind: Some(kind),
        title: kind.title().to_string(),
        series,
        takeaways,
    }
}

/// Build the complete dashboard report.
pub fn build_report(dataset: &str, records: &[Record], options: &ReportOptions) -> DashboardReport {
    let insights: Vec<InsightSection> = options
        .insights
        .iter()
        .map(|id| build_section(id, records, options))
        .collect();

    let heatmap = options.include_heatmap.then(|| cross_tabulate(records));

    if let Some(ref matrix) = heatmap {
        debug!(
            "Heatmap has {} ages and {} products",
            matrix.ages.len(),
            matrix.products.len()
        );
    }

    info!(
        "Built report with {} insights over {} records",
        insights.len(),
        records.len()
    );

    DashboardReport {
        metadata: ReportMetadata {
            dataset: dataset.to_string(),
            record_count: records.len(),
            generated_at: Utc::now(),
        },
        insights,
        heatmap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::record;

    fn sample_records() -> Vec<Record> {
        vec![
            record(30, "Acme", "SaaS", "CA", "Large", 100),
            record(30, "Acme", "SaaS", "TX", "Large", 50),
            record(40, "Globex", "AI/ML", "CA", "Small", 7),
        ]
    }

    #[test]
    fn test_default_report_covers_all_insights() {
        let records = sample_records();
        let report = build_report("test.json", &records, &ReportOptions::default());

        assert_eq!(report.metadata.record_count, 3);
        assert_eq!(report.insights.len(), 5);
        for (section, kind) in report.insights.iter().zip(InsightKind::ALL) {
            assert_eq!(section.kind, Some(kind));
            assert_eq!(section.title, kind.title());
            assert!(!section.takeaways.is_empty());
        }

        let heatmap = report.heatmap.unwrap();
        assert_eq!(heatmap.total(), 3);
    }

    #[test]
    fn test_unknown_insight_section_is_empty() {
        let records = sample_records();
        let section = build_section("churnRate", &records, &ReportOptions::default());

        assert_eq!(section.kind, None);
        assert_eq!(section.title, "churnRate");
        assert!(section.series.is_empty());
        assert!(section.takeaways.is_empty());
    }

    #[test]
    fn test_options_disable_heatmap_and_takeaways() {
        let options = ReportOptions {
            insights: vec!["productDistribution".to_string()],
            include_heatmap: false,
            include_takeaways: false,
            ..ReportOptions::default()
        };

        let report = build_report("test.json", &sample_records(), &options);
        assert_eq!(report.insights.len(), 1);
        assert!(report.insights[0].takeaways.is_empty());
        assert!(report.heatmap.is_none());
    }

    #[test]
    fn test_empty_records() {
        let report = build_report("empty.json", &[], &ReportOptions::default());

        assert_eq!(report.metadata.record_count, 0);
        assert!(report.insights.iter().all(|s| s.series.is_empty()));
        assert!(report.heatmap.unwrap().is_empty());
    }
}
