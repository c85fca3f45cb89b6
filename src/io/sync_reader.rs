//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transaction records from any readable
//! source. Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader splits the source into lines with a `BufReader` and hands
//! each line to `csv_format::split_line`. Quoting is therefore resolved inside
//! a single line: an unclosed quote makes only its own line malformed. The
//! first line is the header and is always discarded; blank lines are ignored.
//!
//! ```no_run
//! use retail_report::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::from_path(Path::new("online_retail.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("{} x {}", record.stock_code, record.quantity),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Opening errors are returned from `from_path()` as `SourceUnreadable`
//! - Read failures part-way are yielded as `SourceUnreadable`, after which the
//!   iterator ends
//! - Line errors are yielded as `MalformedLine` carrying the 1-based line number

use crate::io::csv_format::{convert_csv_record, split_line};
use crate::types::error::UNNAMED_SOURCE;
use crate::types::{RetailError, TransactionRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

const BUFFER_CAPACITY: usize = 8 * 1024;

/// Synchronous line reader
///
/// Yields one `Result<TransactionRecord, RetailError>` per non-blank data line.
#[derive(Debug)]
pub struct SyncReader<R: Read = File> {
    lines: Lines<BufReader<R>>,
    /// 1-based number of the last line taken from `lines`
    line_number: u64,
    failed: bool,
    source_name: String,
}

impl SyncReader<File> {
    /// Open a CSV file for streaming iteration
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(RetailError::SourceUnreadable)` if it could not be opened
    pub fn from_path(path: &Path) -> Result<Self, RetailError> {
        let file = File::open(path)
            .map_err(|e| RetailError::source_unreadable(&path.display().to_string(), e))?;

        let mut reader = Self::from_reader(file);
        reader.source_name = path.display().to_string();
        Ok(reader)
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap an already open source
    pub fn from_reader(source: R) -> Self {
        Self {
            lines: BufReader::with_capacity(BUFFER_CAPACITY, source).lines(),
            line_number: 0,
            failed: false,
            source_name: UNNAMED_SOURCE.to_string(),
        }
    }

    /// Path of the source, or `<input>` for unnamed readers
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// 1-based number of the last line read, header included
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<TransactionRecord, RetailError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(RetailError::from(e).with_path(&self.source_name)));
                }
            };
            self.line_number += 1;

            if self.line_number == 1 || line.trim().is_empty() {
                continue;
            }

            let parsed = split_line(&line)
                .and_then(convert_csv_record)
                .map_err(|e| e.at_line(self.line_number));
            return Some(parsed);
        }
    }
}
