//! Transaction-related types for the retail report
//!
//! This module defines the record produced for every data line of the
//! online retail CSV file.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Customer identifier
///
/// Zero stands for "no customer" (the CSV column was empty).
pub type CustomerId = u32;

/// Pattern of the InvoiceDate column (`yyyy-MM-dd HH:mm:ss`)
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One parsed transaction line
///
/// Columns in source order: InvoiceNo, StockCode, Description, Quantity,
/// InvoiceDate, UnitPrice, CustomerID, Country.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Invoice number, kept as text (cancellations are prefixed with `C`)
    pub invoice_no: String,

    /// Stock code, the product key
    pub stock_code: String,

    /// Free-text product description
    pub description: String,

    /// Units sold; negative for returns
    pub quantity: i32,

    /// Date and time the invoice was issued
    pub invoice_date: NaiveDateTime,

    /// Price per unit
    pub unit_price: Decimal,

    /// Customer identifier, 0 if absent
    pub customer_id: CustomerId,

    /// Country of the customer
    pub country: String,
}

impl TransactionRecord {
    /// Revenue of this line as a float (quantity × unit price)
    ///
    /// Returns are negative, so they reduce the revenue of their country.
    pub fn revenue(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;

        f64::from(self.quantity) * self.unit_price.to_f64().unwrap_or_default()
    }
}
