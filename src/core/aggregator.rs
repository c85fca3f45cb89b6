//! Aggregation over the record sequence
//!
//! Every function here is a pure function of the full record sequence. Nothing
//! is retained between calls, so repeated calls never double count. The
//! stock-code index of the store is not an input: under the overwrite policy it
//! no longer holds every occurrence.

use crate::config::AggregateSelection;
use crate::types::TransactionRecord;
use log::debug;
use std::collections::BTreeMap;

/// Total quantity per stock code over every record
///
/// Returns reduce the total, so a stock code can sum to a negative number.
pub fn total_sold_by_stock_code(records: &[TransactionRecord]) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.stock_code.clone()).or_insert(0) += i64::from(record.quantity);
    }
    debug!(
        "Summed quantities of {} records into {} stock codes",
        records.len(),
        totals.len()
    );
    totals
}

/// Total revenue (quantity × unit price) per country over every record
///
/// Accumulated as `f64` in record order.
pub fn total_revenue_by_country(records: &[TransactionRecord]) -> BTreeMap<String, f64> {
    let mut revenue = BTreeMap::new();
    for record in records {
        *revenue.entry(record.country.clone()).or_insert(0.0) += record.revenue();
    }
    debug!(
        "Summed revenue of {} records into {} countries",
        records.len(),
        revenue.len()
    );
    revenue
}

/// The aggregates of a business report
///
/// A section that was not selected is `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessReport {
    pub sold_by_stock_code: Option<BTreeMap<String, i64>>,
    pub revenue_by_country: Option<BTreeMap<String, f64>>,
}

impl BusinessReport {
    /// Compute the selected aggregates
    pub fn compute(records: &[TransactionRecord], selection: AggregateSelection) -> Self {
        BusinessReport {
            sold_by_stock_code: selection
                .sold_by_stock_code
                .then(|| total_sold_by_stock_code(records)),
            revenue_by_country: selection
                .revenue_by_country
                .then(|| total_revenue_by_country(records)),
        }
    }
}
