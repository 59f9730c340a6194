//! Tabular data and stable multi-key ordering.
//!
//! A [`Table`] is a header of column names plus rows of [`Value`] cells, one
//! cell per column. Sorting only ever permutes rows: no cell is rewritten and
//! no column is added or dropped.
//!
//! Unlike the sequence sorter in [`crate::algo`], row ordering is **stable**.
//! Rows with equal composite keys keep their original relative order, which is
//! what makes multi-key ordering reproducible.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::algo::apply_permutation;
use crate::core::{FoldKey, Value};
use crate::error::{MissingInput, SortError, SortResult};

/// An ordered list of key column names, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    columns: Vec<String>,
}

impl KeySpec {
    /// Parses a comma-separated column list.
    ///
    /// Entries are trimmed and empty entries are dropped. A spec that ends up
    /// with no columns is reported as [`MissingInput::Columns`].
    ///
    /// ```
    /// use casesort::KeySpec;
    ///
    /// let spec = KeySpec::parse(" city , ,name ").unwrap();
    /// assert_eq!(spec.columns(), ["city", "name"]);
    /// assert!(KeySpec::parse(" , ").is_err());
    /// ```
    pub fn parse(spec: &str) -> SortResult<Self> {
        Self::new(spec.split(','))
    }

    /// Builds a spec from individual column names, trimming and dropping empties.
    pub fn new<I, S>(columns: I) -> SortResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if columns.is_empty() {
            return Err(SortError::MissingInput(MissingInput::Columns));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`: a spec holds at least one column.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Human-readable confirmation for a finished sort.
    pub fn summary(&self) -> String {
        match self.columns.as_slice() {
            [single] => format!("File sorted successfully by column: \"{single}\"."),
            many => format!("File sorted successfully by columns: {}.", many.join(", ")),
        }
    }
}

impl FromStr for KeySpec {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.columns.join(","))
    }
}

/// One table row. Cells are positional and line up with [`Table::columns`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Value] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_cells(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(cells: Vec<Value>) -> Self {
        Self(cells)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Composite sort key for a single row, borrowed from the row's cells.
struct RowKey<'a> {
    index: usize,
    key: Vec<Cow<'a, str>>,
}

/// An ordered collection of rows sharing one set of named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table, checking that column names are unique and every row
    /// has exactly one cell per column.
    pub fn new<I, S>(columns: I, rows: Vec<Row>) -> SortResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(SortError::DuplicateColumn(dup.clone()));
        }

        let mut table = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Builds a table from mapping-style records of `(column, value)` pairs.
    ///
    /// Columns are ordered by first appearance. A record that lacks a column
    /// gets [`Value::Empty`] in that position. If a record names the same
    /// column twice, the last value wins.
    ///
    /// ```
    /// use casesort::{Table, Value};
    ///
    /// let table = Table::from_records(vec![
    ///     vec![("name", Value::from("Bob")), ("age", Value::from(30))],
    ///     vec![("name", Value::from("alice"))],
    /// ]);
    ///
    /// assert_eq!(table.columns(), ["name", "age"]);
    /// assert_eq!(table.get(1, "age"), Some(&Value::Empty));
    /// ```
    pub fn from_records<I, R, K>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<Value>> = Vec::new();

        for record in records {
            let mut cells = vec![Value::Empty; columns.len()];
            for (name, value) in record {
                let name = name.into();
                let idx = match columns.iter().position(|c| *c == name) {
                    Some(idx) => idx,
                    None => {
                        columns.push(name);
                        columns.len() - 1
                    }
                };
                if idx >= cells.len() {
                    cells.resize(idx + 1, Value::Empty);
                }
                cells[idx] = value;
            }
            rows.push(cells);
        }

        // Rows built before a late column appeared are padded.
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, Value::Empty);
                Row(cells)
            })
            .collect();

        Self { columns, rows }
    }

    /// Appends a row, rejecting it if its width does not match the header.
    pub fn push_row(&mut self, row: Row) -> SortResult<()> {
        if row.len() != self.columns.len() {
            return Err(SortError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the cell at `row` in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Iterates over a row as `(column, value)` pairs.
    pub fn record(&self, row: usize) -> Option<impl Iterator<Item = (&str, &Value)>> {
        let row = self.rows.get(row)?;
        Some(self.columns.iter().map(String::as_str).zip(row.cells()))
    }

    /// Resolves every key column to its position.
    ///
    /// Fails with [`SortError::UnknownColumn`] listing all missing names and
    /// the full header when any key is absent.
    pub fn check_columns(&self, spec: &KeySpec) -> SortResult<Vec<usize>> {
        let mut positions = Vec::with_capacity(spec.len());
        let mut missing = Vec::new();

        for name in spec.columns() {
            match self.column_index(name) {
                Some(idx) => positions.push(idx),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(SortError::UnknownColumn {
                missing,
                available: self.columns.clone(),
            });
        }
        Ok(positions)
    }

    /// Returns the row order that sorts this table by `spec`, without moving anything.
    ///
    /// Each row gets a composite key of its folded key cells, in spec order.
    /// Row indices are then stable-sorted by that key, so equal keys keep
    /// their original order.
    pub fn sorted_indices(&self, spec: &KeySpec) -> SortResult<Vec<usize>> {
        let positions = self.check_columns(spec)?;

        let mut keys: Vec<RowKey<'_>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowKey {
                index,
                key: positions.iter().map(|&p| row.0[p].fold_key()).collect(),
            })
            .collect();

        // `sort_by` is stable.
        keys.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(keys.into_iter().map(|k| k.index).collect())
    }

    /// Sorts rows in place by `spec`.
    ///
    /// Key columns are validated first. On error the table is left untouched.
    ///
    /// ```
    /// use casesort::{KeySpec, Table, Value};
    ///
    /// let mut table = Table::from_records(vec![
    ///     vec![("name", Value::from("Bob"))],
    ///     vec![("name", Value::from("alice"))],
    /// ]);
    /// table.sort_by_columns(&KeySpec::parse("name").unwrap()).unwrap();
    ///
    /// assert_eq!(table.get(0, "name"), Some(&Value::from("alice")));
    /// ```
    pub fn sort_by_columns(&mut self, spec: &KeySpec) -> SortResult<()> {
        let order = self.sorted_indices(spec)?;
        debug!(rows = self.rows.len(), keys = %spec, "sorting table rows");
        apply_permutation(&mut self.rows, order);
        Ok(())
    }

    /// Returns a sorted copy, leaving `self` as it is.
    pub fn sorted_by(&self, spec: &KeySpec) -> SortResult<Self> {
        let order = self.sorted_indices(spec)?;
        let rows = order.into_iter().map(|i| self.rows[i].clone()).collect();
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }
}
