//! CSV encoding and decoding of [`Table`]s.
//!
//! The first record is the header. Every following record becomes a row whose
//! cells are classified with [`Value::infer`], which keeps each cell's text
//! intact: decoding and re-encoding a table writes back the same cell values.

use std::io::Read;

use crate::core::Value;
use crate::error::{SortError, SortResult};
use crate::table::{Row, Table};

use super::header_table;

/// Decodes CSV data into a table.
///
/// Fails with [`SortError::MalformedSource`] on empty input, invalid UTF-8,
/// repeated header names, or records whose length differs from the header's.
///
/// ```
/// use casesort::codec::decode_csv;
/// use casesort::Value;
///
/// let table = decode_csv("name,age\nBob,30\n".as_bytes()).unwrap();
/// assert_eq!(table.get(0, "age"), Some(&Value::Int(30)));
/// ```
pub fn decode_csv<R: Read>(source: R) -> SortResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(SortError::MalformedSource("missing header row".into()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::infer).collect::<Row>());
    }

    header_table(headers.iter(), rows)
}

/// Encodes a table as CSV, header first.
pub fn encode_csv(table: &Table) -> SortResult<Vec<u8>> {
    let encode_err = |e: csv::Error| SortError::EncodeFailed(e.to_string());
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.columns()).map_err(encode_err)?;
    for row in table.rows() {
        writer
            .write_record(row.cells().iter().map(Value::to_string))
            .map_err(encode_err)?;
    }

    writer
        .into_inner()
        .map_err(|e| SortError::EncodeFailed(e.to_string()))
}
