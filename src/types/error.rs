//! Error types for the retail report
//!
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Source Errors**: the input cannot be opened or streamed; ingestion stops
//! - **Line Errors**: wrong field count, non-numeric quantity or price, bad date
//! - **Output Errors**: the report cannot be written
//!
//! An unknown stock code is not an error; lookups return `Option`.

use thiserror::Error;

/// Name used for sources that have no path (stdin, in-memory readers)
pub const UNNAMED_SOURCE: &str = "<input>";

/// Main error type for the retail report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetailError {
    /// The source could not be opened or a read failed part-way
    ///
    /// This is a fatal error: ingestion stops with the records read so far.
    #[error("Cannot read '{path}': {message}")]
    SourceUnreadable {
        /// Path of the source, or `<input>` for unnamed readers
        path: String,
        /// Description of the I/O failure
        message: String,
    },

    /// A data line could not be turned into a transaction record
    ///
    /// Fatal under the strict policy, skipped and logged otherwise.
    #[error("Malformed line{}: {message}", line.map(|l| format!(" {}", l)).unwrap_or_default())]
    MalformedLine {
        /// 1-based line number in the source (header is line 1), if known
        line: Option<u64>,
        /// What was wrong with the line
        message: String,
    },

    /// Writing a table or CSV report failed
    #[error("Output error: {message}")]
    Output {
        /// Description of the write failure
        message: String,
    },
}

impl From<std::io::Error> for RetailError {
    fn from(error: std::io::Error) -> Self {
        RetailError::SourceUnreadable {
            path: UNNAMED_SOURCE.to_string(),
            message: error.to_string(),
        }
    }
}

// I/O failures inside the csv reader are source failures, everything else is
// a problem with the line being read. The csv reader only ever sees one line,
// so its position is dropped and the caller attaches the real line number.
impl From<csv::Error> for RetailError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io_error) = error.kind() {
            return RetailError::SourceUnreadable {
                path: UNNAMED_SOURCE.to_string(),
                message: io_error.to_string(),
            };
        }

        RetailError::MalformedLine {
            line: None,
            message: error.to_string(),
        }
    }
}

impl RetailError {
    /// Create a SourceUnreadable error
    pub fn source_unreadable(path: &str, message: impl ToString) -> Self {
        RetailError::SourceUnreadable {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a MalformedLine error
    pub fn malformed_line(line: Option<u64>, message: impl ToString) -> Self {
        RetailError::MalformedLine {
            line,
            message: message.to_string(),
        }
    }

    /// Create an Output error
    pub fn output(message: impl ToString) -> Self {
        RetailError::Output {
            message: message.to_string(),
        }
    }

    /// Attach a line number to a MalformedLine that has none
    pub fn at_line(self, line: u64) -> Self {
        match self {
            RetailError::MalformedLine { line: None, message } => RetailError::MalformedLine {
                line: Some(line),
                message,
            },
            other => other,
        }
    }

    /// Attach the source path to a SourceUnreadable raised by an unnamed reader
    pub fn with_path(self, path: &str) -> Self {
        match self {
            RetailError::SourceUnreadable { path: old, message } if old == UNNAMED_SOURCE => {
                RetailError::SourceUnreadable {
                    path: path.to_string(),
                    message,
                }
            }
            other => other,
        }
    }
}
