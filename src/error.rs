//! Error taxonomy shared by the sorters and their collaborators.

use std::fmt;

use thiserror::Error;

/// Which piece of input was absent or empty after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// The delimited name list produced no names.
    Names,
    /// The key specification produced no column names.
    Columns,
    /// No file (or an unnamed file) was supplied.
    File,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Names => write!(f, "No names provided to sort."),
            Self::Columns => write!(f, "Please specify at least one column name."),
            Self::File => write!(f, "Please select a file."),
        }
    }
}

/// Errors surfaced to the caller of a sort operation.
///
/// Every variant is terminal for the invocation that produced it: nothing is
/// retried and no partially sorted data is handed back.
#[derive(Debug, Error)]
pub enum SortError {
    /// Nothing usable to sort. Callers usually render this as a no-op message.
    #[error("{0}")]
    MissingInput(MissingInput),

    /// One or more requested key columns are not part of the table.
    #[error("Columns {missing:?} not found in the sheet. Available columns: {available:?}")]
    UnknownColumn {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// The tabular source could not be decoded at all.
    #[error("Could not decode tabular data: {0}")]
    MalformedSource(String),

    /// The uploaded file does not carry a supported extension.
    #[error("Invalid file format for {0:?}. Must be .csv, .xlsx or .xls.")]
    UnsupportedFormat(String),

    /// The sorted table could not be written back out.
    #[error("Could not encode sorted data: {0}")]
    EncodeFailed(String),

    /// A row does not have one cell per column.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The same column name appears twice in a header.
    #[error("Duplicate column name {0:?}")]
    DuplicateColumn(String),

    /// The requested artifact was never stored, was already downloaded, or expired.
    #[error("File not found or session expired.")]
    ArtifactNotFound,
}

impl SortError {
    /// Returns `true` for the soft "nothing to do" failures.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput(_))
    }
}

impl From<csv::Error> for SortError {
    fn from(err: csv::Error) -> Self {
        Self::MalformedSource(err.to_string())
    }
}

impl From<calamine::XlsxError> for SortError {
    fn from(err: calamine::XlsxError) -> Self {
        Self::MalformedSource(err.to_string())
    }
}

impl From<calamine::XlsError> for SortError {
    fn from(err: calamine::XlsError) -> Self {
        Self::MalformedSource(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SortError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::EncodeFailed(err.to_string())
    }
}

/// Result alias used across the crate.
pub type SortResult<T> = Result<T, SortError>;
