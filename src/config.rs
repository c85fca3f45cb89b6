//! Ingestion configuration
//!
//! The policies that decide how ingestion reacts to malformed lines and to
//! repeated stock codes, and which aggregates a business report computes.
//! A single `IngestConfig` value is passed to the ingestion entry point.

use clap::ValueEnum;

/// What to do with a data line that cannot be parsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MalformedLinePolicy {
    /// Log the line at warn level, count it and continue
    #[default]
    Skip,
    /// Stop ingestion at the first malformed line
    Strict,
}

/// How the stock-code index treats a stock code seen before
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Append the new occurrence to the existing history
    #[default]
    Merge,
    /// Replace the history with the latest record only
    Overwrite,
}

/// One section of the business report
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportSection {
    /// Total quantity sold per stock code
    Sold,
    /// Total revenue per country
    Revenue,
}

/// Which aggregates a business report computes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggregateSelection {
    pub sold_by_stock_code: bool,
    pub revenue_by_country: bool,
}

impl AggregateSelection {
    /// Both aggregates
    pub fn all() -> Self {
        AggregateSelection {
            sold_by_stock_code: true,
            revenue_by_country: true,
        }
    }

    /// A single section
    pub fn only(section: ReportSection) -> Self {
        AggregateSelection {
            sold_by_stock_code: section == ReportSection::Sold,
            revenue_by_country: section == ReportSection::Revenue,
        }
    }
}

impl Default for AggregateSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Option<ReportSection>> for AggregateSelection {
    fn from(section: Option<ReportSection>) -> Self {
        section.map_or_else(Self::all, Self::only)
    }
}

/// Policy value for one ingestion pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestConfig {
    pub malformed: MalformedLinePolicy,
    pub duplicates: DuplicatePolicy,
    /// Recorded by the store at ingestion and used by `RecordStore::report`
    pub aggregates: AggregateSelection,
}

impl IngestConfig {
    /// Create a config from explicit policies
    pub fn new(
        malformed: MalformedLinePolicy,
        duplicates: DuplicatePolicy,
        aggregates: AggregateSelection,
    ) -> Self {
        IngestConfig {
            malformed,
            duplicates,
            aggregates,
        }
    }

    /// Strict parsing, merged history
    pub fn strict() -> Self {
        IngestConfig {
            malformed: MalformedLinePolicy::Strict,
            ..Self::default()
        }
    }
}
