//! Core business logic module
//!
//! This module contains the ingestion and aggregation components:
//! - `record_store` - Record storage, ingestion and stock-code lookup
//! - `aggregator` - Totals per stock code and per country

pub mod aggregator;
pub mod record_store;

pub use aggregator::BusinessReport;
pub use record_store::{IngestSummary, RecordStore};
