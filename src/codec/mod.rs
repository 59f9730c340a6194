//! Encoding and decoding of [`Table`]s in the uploaded file formats.
//!
//! The format is picked from the file extension: `.csv` goes through the csv
//! reader and writer, `.xlsx` and `.xls` through the workbook codec. Legacy `.xls`
//! files can be read but not written, so their sorted copy is an `.xlsx`.

mod delimited;
mod workbook;

use std::fmt;
use std::path::Path;

use crate::error::{SortError, SortResult};
use crate::table::{Row, Table};

pub use delimited::{decode_csv, encode_csv};
pub use workbook::{SHEET_NAME, decode_workbook, encode_xlsx};

/// MIME type of CSV artifacts.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// MIME type of xlsx artifacts.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A tabular file format, identified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Xlsx,
    Xls,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Csv, Format::Xlsx, Format::Xls];

    /// Picks the format from `filename`'s extension, ignoring case.
    ///
    /// ```
    /// use casesort::codec::Format;
    ///
    /// assert_eq!(Format::from_filename("Q3 Report.XLSX"), Some(Format::Xlsx));
    /// assert_eq!(Format::from_filename("notes.txt"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }

    /// The format a sorted copy is written in.
    pub fn output(self) -> Self {
        match self {
            Self::Xls => Self::Xlsx,
            other => other,
        }
    }

    /// MIME type of the sorted copy.
    pub fn content_type(self) -> &'static str {
        match self.output() {
            Self::Csv => CSV_CONTENT_TYPE,
            _ => XLSX_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Checks that `filename` carries a supported extension and returns its format.
pub fn check_extension(filename: &str) -> SortResult<Format> {
    Format::from_filename(filename).ok_or_else(|| SortError::UnsupportedFormat(filename.to_string()))
}

/// Decodes `bytes` as `format`.
pub fn decode(format: Format, bytes: &[u8]) -> SortResult<Table> {
    match format {
        Format::Csv => decode_csv(bytes),
        Format::Xlsx | Format::Xls => decode_workbook(format, bytes),
    }
}

/// Encodes `table` in `format`'s output format, see [`Format::output`].
pub fn encode(format: Format, table: &Table) -> SortResult<Vec<u8>> {
    match format.output() {
        Format::Csv => encode_csv(table),
        _ => encode_xlsx(table),
    }
}

/// Builds a decoded table. A repeated header is a decoding failure here,
/// not a [`SortError::DuplicateColumn`].
fn header_table<I, S>(headers: I, rows: Vec<Row>) -> SortResult<Table>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Table::new(headers, rows).map_err(|err| match err {
        SortError::DuplicateColumn(name) => {
            SortError::MalformedSource(format!("duplicate column name {name:?}"))
        }
        other => other,
    })
}
