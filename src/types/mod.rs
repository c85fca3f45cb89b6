//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction records and identifiers
//! - `product`: Per-stock-code aggregates built during ingestion
//! - `error`: Error types for the retail report

pub mod error;
pub mod product;
pub mod transaction;

pub use error::RetailError;
pub use product::{Occurrence, ProductAggregate};
pub use transaction::{CustomerId, TransactionRecord, INVOICE_DATE_FORMAT};
