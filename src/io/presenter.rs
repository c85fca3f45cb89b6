//! Output dispatch
//!
//! The Presenter renders store contents and reports either as console tables
//! (`table` module) or as CSV (`csv_format` module).

use crate::core::{BusinessReport, RecordStore};
use crate::io::{csv_format, table};
use crate::types::{ProductAggregate, RetailError};
use clap::ValueEnum;
use std::io::Write;

/// Rows shown by listings when no limit is given
pub const DEFAULT_LIMIT: usize = 10;

/// Output format of the presenter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width console tables
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
}

/// Renders listings and reports to a writer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presenter {
    format: OutputFormat,
    limit: Option<usize>,
}

impl Default for Presenter {
    fn default() -> Self {
        Presenter::new(OutputFormat::Table, Some(DEFAULT_LIMIT))
    }
}

impl Presenter {
    /// Create a presenter
    ///
    /// # Arguments
    ///
    /// * `format` - Table or CSV output
    /// * `limit` - Row cap of the products and total-sold listings, `None` for all rows
    pub fn new(format: OutputFormat, limit: Option<usize>) -> Self {
        Presenter { format, limit }
    }

    /// Output format in use
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Row cap of the limited listings, `None` when unlimited
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Records in arrival order
    pub fn products(&self, store: &RecordStore, out: &mut dyn Write) -> Result<(), RetailError> {
        match self.format {
            OutputFormat::Table => table::write_products_table(store.records(), self.limit, out)
                .map_err(RetailError::output),
            OutputFormat::Csv => csv_format::write_records_csv(store.records(), self.limit, out),
        }
    }

    /// Distinct countries
    pub fn countries(&self, store: &RecordStore, out: &mut dyn Write) -> Result<(), RetailError> {
        match self.format {
            OutputFormat::Table => {
                table::write_countries(store.countries(), out).map_err(RetailError::output)
            }
            OutputFormat::Csv => csv_format::write_countries_csv(store.countries(), out),
        }
    }

    /// The selected sections of a business report
    ///
    /// In CSV, two sections are separated by an empty line.
    pub fn report(&self, report: &BusinessReport, out: &mut dyn Write) -> Result<(), RetailError> {
        match self.format {
            OutputFormat::Table => {
                table::write_business_report(report, self.limit, out).map_err(RetailError::output)
            }
            OutputFormat::Csv => {
                if let Some(totals) = &report.sold_by_stock_code {
                    csv_format::write_stock_totals_csv(totals, self.limit, out)?;
                }
                if let Some(revenue) = &report.revenue_by_country {
                    if report.sold_by_stock_code.is_some() {
                        writeln!(out).map_err(RetailError::output)?;
                    }
                    csv_format::write_revenue_csv(revenue, out)?;
                }
                Ok(())
            }
        }
    }

    /// Result of a stock-code lookup
    ///
    /// A miss is a normal outcome: a message in table format, a header-only
    /// CSV otherwise.
    ///
    /// # Arguments
    ///
    /// * `stock_code` - The code that was looked up
    /// * `product` - The lookup result
    /// * `out` - Destination writer
    ///
    /// # Returns
    ///
    /// * `Ok(())` for a hit or a miss
    /// * `Err(RetailError::Output)` if writing failed
    pub fn lookup(
        &self,
        stock_code: &str,
        product: Option<&ProductAggregate>,
        out: &mut dyn Write,
    ) -> Result<(), RetailError> {
        match (self.format, product) {
            (OutputFormat::Table, Some(product)) => {
                table::write_product_table(product, out).map_err(RetailError::output)
            }
            (OutputFormat::Table, None) => {
                table::write_not_found(stock_code, out).map_err(RetailError::output)
            }
            (OutputFormat::Csv, Some(product)) => csv_format::write_product_csv(product, out),
            (OutputFormat::Csv, None) => csv_format::write_records_csv(&[], None, out),
        }
    }
}
