//! Spreadsheet workbooks: reads `.xlsx`/`.xls` with calamine, writes `.xlsx`
//! with rust_xlsxwriter.
//!
//! Only the first worksheet is read and its first row is the header. Sorted
//! tables are written to a single sheet named [`SHEET_NAME`].

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xls, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::core::Value;
use crate::error::{SortError, SortResult};
use crate::table::{Row, Table};

use super::{Format, header_table};

/// Name of the worksheet holding a sorted table.
pub const SHEET_NAME: &str = "Sorted Data";

/// Largest integer an xlsx number cell stores exactly.
const MAX_EXACT_INT: u64 = 1 << 53;

/// Decodes the first worksheet of an `.xlsx` or `.xls` file.
///
/// Whole numbers come back as [`Value::Int`] since workbooks store every
/// number as a float. A workbook without sheets or without a header row fails
/// with [`SortError::MalformedSource`].
pub fn decode_workbook(format: Format, bytes: &[u8]) -> SortResult<Table> {
    let range = match format {
        Format::Xls => first_sheet(Xls::new(Cursor::new(bytes))?)?,
        _ => first_sheet(Xlsx::new(Cursor::new(bytes))?)?,
    };

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| SortError::MalformedSource("missing header row".into()))?
        .iter()
        .map(Data::to_string)
        .collect();

    let rows = rows
        .map(|cells| cells.iter().map(cell_value).collect::<Row>())
        .collect();

    header_table(headers, rows)
}

fn first_sheet<RS, R>(mut workbook: R) -> SortResult<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    SortError: From<R::Error>,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SortError::MalformedSource("workbook has no worksheets".into()))??;
    Ok(range)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(n) => Value::Int(*n),
        Data::Float(x) if x.fract() == 0.0 && x.abs() < MAX_EXACT_INT as f64 => {
            Value::Int(*x as i64)
        }
        Data::Float(x) => Value::Float(*x),
        Data::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

/// Encodes a table as a single-sheet `.xlsx` workbook, header first.
///
/// Empty cells are left unwritten. Integers too large for an exact float are
/// written as text so no digits are lost.
pub fn encode_xlsx(table: &Table) -> SortResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string(0, column_number(col)?, name)?;
    }
    for (i, row) in table.rows().iter().enumerate() {
        let row_number = u32::try_from(i + 1)
            .map_err(|_| SortError::EncodeFailed(format!("row {} is out of range", i + 1)))?;
        for (col, cell) in row.cells().iter().enumerate() {
            write_cell(sheet, row_number, column_number(col)?, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column_number(col: usize) -> SortResult<u16> {
    u16::try_from(col).map_err(|_| SortError::EncodeFailed(format!("column {col} is out of range")))
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Value) -> SortResult<()> {
    match cell {
        Value::Empty => return Ok(()),
        Value::Bool(b) => sheet.write_boolean(row, col, *b)?,
        Value::Int(n) if n.unsigned_abs() < MAX_EXACT_INT => sheet.write_number(row, col, *n as f64)?,
        Value::Int(n) => sheet.write_string(row, col, n.to_string())?,
        Value::Float(x) => sheet.write_number(row, col, *x)?,
        Value::Text(s) => sheet.write_string(row, col, s)?,
    };
    Ok(())
}
