//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (line splitting, record conversion, CSV output)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `table` - Fixed-width console tables
//! - `presenter` - Chooses between table and CSV output

pub mod csv_format;
pub mod presenter;
pub mod sync_reader;
pub mod table;

pub use csv_format::{convert_csv_record, parse_line, split_line, CsvRecord};
pub use presenter::{OutputFormat, Presenter};
pub use sync_reader::SyncReader;
