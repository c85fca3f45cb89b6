//! Per-stock-code aggregates
//!
//! A `ProductAggregate` keeps the history of one stock code as a sequence of
//! `Occurrence`s in arrival order. A stock code may span several invoices,
//! customers and countries.

use super::transaction::{CustomerId, TransactionRecord};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// The per-transaction part of a record, as kept by an aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub invoice_no: String,
    pub quantity: i32,
    pub invoice_date: NaiveDateTime,
    pub unit_price: Decimal,
    pub customer_id: CustomerId,
    pub country: String,
}

impl From<&TransactionRecord> for Occurrence {
    fn from(record: &TransactionRecord) -> Self {
        Occurrence {
            invoice_no: record.invoice_no.clone(),
            quantity: record.quantity,
            invoice_date: record.invoice_date,
            unit_price: record.unit_price,
            customer_id: record.customer_id,
            country: record.country.clone(),
        }
    }
}

/// Occurrence history for one stock code
#[derive(Debug, Clone, PartialEq)]
pub struct ProductAggregate {
    /// The stock code all occurrences share
    pub stock_code: String,

    /// Description taken from the record the aggregate was started from
    pub description: String,

    /// Occurrences in arrival order, never empty
    occurrences: Vec<Occurrence>,
}

impl ProductAggregate {
    /// Start an aggregate from its first record
    pub fn new(record: &TransactionRecord) -> Self {
        ProductAggregate {
            stock_code: record.stock_code.clone(),
            description: record.description.clone(),
            occurrences: vec![Occurrence::from(record)],
        }
    }

    /// Append a later occurrence of the same stock code
    ///
    /// Prior occurrences are kept; the description stays the first one seen.
    pub fn merge(&mut self, record: &TransactionRecord) {
        debug_assert_eq!(self.stock_code, record.stock_code);
        self.occurrences.push(Occurrence::from(record));
    }

    /// All occurrences in arrival order
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// The most recently ingested occurrence
    pub fn latest(&self) -> &Occurrence {
        // `new` always seeds one occurrence and nothing removes them
        &self.occurrences[self.occurrences.len() - 1]
    }

    /// Sum of quantities over this aggregate's occurrences
    pub fn total_quantity(&self) -> i64 {
        self.occurrences
            .iter()
            .map(|occurrence| i64::from(occurrence.quantity))
            .sum()
    }
}
