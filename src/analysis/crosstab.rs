//! Age by product cross-tabulation for the heatmap view.

use crate::models::{Matrix, Record};
use std::collections::HashMap;
use tracing::debug;

/// Count records for every (age, product type) pair.
///
/// Rows are the distinct ages in ascending order, columns the distinct
/// product types in first-seen order.
pub fn cross_tabulate(records: &[Record]) -> Matrix {
    let mut ages: Vec<u32> = records.iter().map(|r| r.age).collect();
    ages.sort_unstable();
    ages.dedup();

    let mut products: Vec<String> = Vec::new();
    let mut product_index: HashMap<&str, usize> = HashMap::new();
    for record in records {
        if !product_index.contains_key(record.product_type.as_str()) {
            product_index.insert(record.product_type.as_str(), products.len());
            products.push(record.product_type.clone());
        }
    }

    let mut counts = vec![vec![0u64; products.len()]; ages.len()];
    for record in records {
        // Both axes were built from this same collection.
        let (Ok(row), Some(&col)) = (
            ages.binary_search(&record.age),
            product_index.get(record.product_type.as_str()),
        ) else {
            continue;
        };
        counts[row][col] += 1;
    }

    debug!(
        "Cross-tabulated {} records into {}x{} matrix",
        records.len(),
        ages.len(),
        products.len()
    );

    Matrix {
        ages,
        products,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::record;

    #[test]
    fn test_concrete_matrix() {
        let records = vec![
            record(30, "Acme", "SaaS", "CA", "Large", 1),
            record(30, "Acme", "SaaS", "CA", "Large", 1),
            record(40, "Acme", "AI/ML", "CA", "Large", 1),
        ];

        let matrix = cross_tabulate(&records);
        assert_eq!(matrix.ages, vec![30, 40]);
        assert_eq!(matrix.products, vec!["SaaS", "AI/ML"]);
        assert_eq!(matrix.counts, vec![vec![2, 0], vec![0, 1]]);
    }

    #[test]
    fn test_ages_sorted_products_first_seen() {
        let records = vec![
            record(52, "A", "Gaming", "CA", "Small", 0),
            record(19, "B", "FinTech", "CA", "Small", 0),
            record(33, "C", "Gaming", "CA", "Small", 0),
            record(19, "D", "HealthTech", "CA", "Small", 0),
            record(52, "E", "FinTech", "CA", "Small", 0),
        ];

        let matrix = cross_tabulate(&records);
        assert_eq!(matrix.ages, vec![19, 33, 52]);
        assert!(matrix.ages.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(matrix.products, vec!["Gaming", "FinTech", "HealthTech"]);
        assert_eq!(
            matrix.counts,
            vec![vec![0, 1, 1], vec![1, 0, 0], vec![1, 1, 0]]
        );
    }

    #[test]
    fn test_cell_total_matches_record_count() {
        let records: Vec<Record> = (0..60)
            .map(|i| {
                let product = ["SaaS", "AI/ML", "Hardware", "Gaming"][i % 4];
                record(20 + (i % 7) as u32, "Co", product, "CA", "Small", 0)
            })
            .collect();

        let matrix = cross_tabulate(&records);
        assert_eq!(matrix.total(), records.len() as u64);
        assert_eq!(matrix.counts.len(), matrix.ages.len());
        assert!(matrix
            .counts
            .iter()
            .all(|row| row.len() == matrix.products.len()));
    }

    #[test]
    fn test_empty_records() {
        let matrix = cross_tabulate(&[]);
        assert!(matrix.ages.is_empty());
        assert!(matrix.products.is_empty());
        assert!(matrix.counts.is_empty());
    }
}
