//! Aggregation engine.
//!
//! Pure functions from a record collection to chart-ready series, the
//! heatmap matrix, and the takeaways shown beside each chart.

pub mod crosstab;
pub mod grouping;
pub mod resolvers;
pub mod takeaways;

pub use crosstab::cross_tabulate;
pub use resolvers::{resolve, resolve_identifier};
pub use takeaways::{format_number, summarize, Takeaway, TakeawayConfig};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Record;

    pub fn record(
        age: u32,
        company: &str,
        product: &str,
        state: &str,
        size: &str,
        api_calls: u64,
    ) -> Record {
        Record {
            account_number: format!("ACC-{:05}", age as u64 * 1000 + api_calls % 1000),
            age,
            company_name: company.to_string(),
            product_type: product.to_string(),
            states: state.to_string(),
            size_of_company: size.to_string(),
            number_of_api_calls: api_calls,
        }
    }
}
