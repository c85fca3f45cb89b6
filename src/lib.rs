//! Online Retail Report Library
//! # Overview
//!
//! This library loads a CSV file of retail transactions into memory and
//! reports on it: product listings, distinct customer countries, total
//! quantity sold per stock code, total revenue per country, and lookup of a
//! product's history by stock code.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TransactionRecord, ProductAggregate, errors)
//! - [`config`] - Ingestion policies
//! - [`cli`] - CLI arguments parsing, command dispatch and the console menu
//! - [`core`] - Business logic components:
//!   - [`core::record_store`] - Record storage, ingestion and stock-code lookup
//!   - [`core::aggregator`] - Totals per stock code and per country
//! - [`io`] - CSV parsing and table/CSV output
//!
//! # Input Format
//!
//! A header line (always discarded) followed by lines of 8 columns:
//! InvoiceNo, StockCode, Description, Quantity, InvoiceDate
//! (`yyyy-MM-dd HH:mm:ss`), UnitPrice, CustomerID, Country. A field wrapped in
//! double quotes may contain commas.
//!
//! # Ingestion Policies
//!
//! - Malformed lines are skipped (default) or stop ingestion (`strict`)
//! - A repeated stock code merges into the existing history (default) or
//!   overwrites it with the latest line
//!
//! ```no_run
//! use retail_report::{IngestConfig, RecordStore};
//! use std::path::Path;
//!
//! let store = RecordStore::from_path(Path::new("online_retail.csv"), &IngestConfig::default()).unwrap();
//! for (country, revenue) in store.total_revenue_by_country() {
//!     println!("{}: {:.2}", country, revenue);
//! }
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use config::{AggregateSelection, DuplicatePolicy, IngestConfig, MalformedLinePolicy};
pub use crate::core::{BusinessReport, IngestSummary, RecordStore};
pub use io::{parse_line, OutputFormat, Presenter};
pub use types::{CustomerId, Occurrence, ProductAggregate, RetailError, TransactionRecord};
