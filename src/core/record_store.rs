//! Record storage and ingestion
//!
//! This module provides the RecordStore that holds every parsed transaction in
//! arrival order together with the structures derived while appending:
//! - the set of distinct countries
//! - the stock-code index of `ProductAggregate`s
//!
//! # Duplicate Handling
//!
//! A stock code seen before is handled per `DuplicatePolicy`: `Merge` appends
//! the occurrence to the existing history, `Overwrite` replaces the history
//! with the latest record. The record sequence itself always keeps every line.
//!
//! # Aggregate Selection
//!
//! Each ingestion pass records the `AggregateSelection` of its `IngestConfig`;
//! `report()` computes exactly those aggregates.
//!
//! # Failure Handling
//!
//! Ingestion never rolls back. When it stops on an error, the records appended
//! before the error stay in the store.

use crate::config::{AggregateSelection, DuplicatePolicy, IngestConfig, MalformedLinePolicy};
use crate::core::aggregator::{self, BusinessReport};
use crate::io::sync_reader::SyncReader;
use crate::types::{ProductAggregate, RetailError, TransactionRecord};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

/// Counters of one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Non-blank data lines read, header excluded
    pub lines_read: usize,
    /// Records appended to the store
    pub records_appended: usize,
    /// Malformed lines skipped (always 0 under the strict policy)
    pub lines_skipped: usize,
}

/// In-memory store of retail transactions
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Every record in arrival order
    records: Vec<TransactionRecord>,

    /// Distinct countries, ordered
    countries: BTreeSet<String>,

    /// Stock code to occurrence history
    products: HashMap<String, ProductAggregate>,

    /// Aggregates requested by the last ingestion pass
    selection: AggregateSelection,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a file and ingest it into a new store
    ///
    /// Use `ingest_path` on an existing store to keep the partial result when
    /// ingestion fails.
    pub fn from_path(path: &Path, config: &IngestConfig) -> Result<Self, RetailError> {
        let mut store = Self::new();
        store.ingest_path(path, config)?;
        Ok(store)
    }

    /// Replace the store contents with the records of a CSV file
    pub fn ingest_path(
        &mut self,
        path: &Path,
        config: &IngestConfig,
    ) -> Result<IngestSummary, RetailError> {
        self.clear();
        let reader = SyncReader::from_path(path)?;
        self.ingest(reader, config)
    }

    /// Replace the store contents with the records of any readable source
    pub fn ingest_reader<R: Read>(
        &mut self,
        source: R,
        config: &IngestConfig,
    ) -> Result<IngestSummary, RetailError> {
        self.clear();
        self.ingest(SyncReader::from_reader(source), config)
    }

    /// Drain a reader into the store
    ///
    /// `SourceUnreadable` always stops ingestion. `MalformedLine` stops it under
    /// the strict policy and is logged and counted under the skip policy.
    fn ingest<R: Read>(
        &mut self,
        reader: SyncReader<R>,
        config: &IngestConfig,
    ) -> Result<IngestSummary, RetailError> {
        let source_name = reader.source_name().to_string();
        let mut summary = IngestSummary::default();
        self.selection = config.aggregates;

        for result in reader {
            match result {
                Ok(record) => {
                    summary.lines_read += 1;
                    self.append(record, config.duplicates);
                    summary.records_appended += 1;
                }
                Err(e @ RetailError::MalformedLine { .. })
                    if config.malformed == MalformedLinePolicy::Skip =>
                {
                    summary.lines_read += 1;
                    warn!("Skipping line in {}: {}", source_name, e);
                    summary.lines_skipped += 1;
                }
                Err(e) => {
                    warn!(
                        "Ingestion of {} stopped after {} records",
                        source_name, summary.records_appended
                    );
                    return Err(e);
                }
            }
        }

        info!(
            "Ingested {} records from {} ({} skipped, {} distinct stock codes, {} countries)",
            summary.records_appended,
            source_name,
            summary.lines_skipped,
            self.products.len(),
            self.countries.len()
        );

        Ok(summary)
    }

    /// Append one record and update the derived structures
    pub fn append(&mut self, record: TransactionRecord, duplicates: DuplicatePolicy) {
        if !self.countries.contains(&record.country) {
            self.countries.insert(record.country.clone());
        }

        match self.products.get_mut(&record.stock_code) {
            Some(product) => match duplicates {
                DuplicatePolicy::Merge => product.merge(&record),
                DuplicatePolicy::Overwrite => {
                    debug!("Overwriting history of stock code {}", record.stock_code);
                    *product = ProductAggregate::new(&record);
                }
            },
            None => {
                self.products
                    .insert(record.stock_code.clone(), ProductAggregate::new(&record));
            }
        }

        self.records.push(record);
    }

    /// Remove every record and derived entry
    pub fn clear(&mut self) {
        self.records.clear();
        self.countries.clear();
        self.products.clear();
    }

    /// All records in arrival order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries, ordered
    pub fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    /// Number of distinct stock codes
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Exact, case-sensitive lookup by stock code
    ///
    /// `None` means the stock code was never ingested.
    pub fn find_by_stock_code(&self, stock_code: &str) -> Option<&ProductAggregate> {
        self.products.get(stock_code)
    }

    /// Total quantity per stock code, computed from the record sequence
    pub fn total_sold_by_stock_code(&self) -> BTreeMap<String, i64> {
        aggregator::total_sold_by_stock_code(&self.records)
    }

    /// Total revenue per country, computed from the record sequence
    pub fn total_revenue_by_country(&self) -> BTreeMap<String, f64> {
        aggregator::total_revenue_by_country(&self.records)
    }

    /// Aggregates requested by the last ingestion pass
    pub fn aggregate_selection(&self) -> AggregateSelection {
        self.selection
    }

    /// Compute the aggregates requested at ingestion
    pub fn report(&self) -> BusinessReport {
        self.business_report(self.selection)
    }

    /// Compute the selected aggregates
    pub fn business_report(&self, selection: AggregateSelection) -> BusinessReport {
        BusinessReport::compute(&self.records, selection)
    }
}
