//! Table, Row, and Cell data structures

use std::borrow::Cow;

use indexmap::IndexSet;

use super::schema::{CellType, Column};
use crate::error::{Error, Result};

/// A cell value as read from a delimited file
///
/// Text is kept exactly as read so that projections and splits never
/// alter values. Types are inferred on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    Null,
    Text(String),
}

impl CellValue {
    /// Build a cell from a raw field; an empty field is missing
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(field.to_string())
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Borrow the text, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s),
        }
    }

    /// Field written to a delimited file; missing cells become empty fields
    pub fn as_field(&self) -> &str {
        self.as_str().unwrap_or("")
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Infer the type of this cell from its text
    pub fn cell_type(&self) -> CellType {
        let Some(text) = self.as_str() else {
            return CellType::Null;
        };
        let trimmed = text.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
            return CellType::Null;
        }

        if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
            return CellType::Bool;
        }

        if trimmed.parse::<i64>().is_ok() {
            return CellType::Int;
        }

        if trimmed.parse::<f64>().is_ok() {
            return CellType::Float;
        }

        if chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
            return CellType::Date;
        }

        if chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").is_ok()
            || chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").is_ok()
        {
            return CellType::DateTime;
        }

        CellType::String
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table containing columns and rows
///
/// Column names are unique and every row holds one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create an empty table from column names
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Column::new(name.as_ref(), i))
                .collect(),
        )
    }

    /// Add a row, padding short rows with nulls
    pub fn add_row(&mut self, mut cells: Vec<CellValue>, source_line: usize) {
        cells.resize(self.column_count(), CellValue::Null);
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Check whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over the cells of one column
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Project the named columns in the given order
    ///
    /// Names that do not exist and repeated names are dropped.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let indices: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name.as_ref()))
            .collect::<IndexSet<usize>>()
            .into_iter()
            .collect();

        if indices.is_empty() {
            return Err(Error::EmptyProjection {
                requested: names.iter().map(|n| n.as_ref().to_string()).collect(),
            });
        }

        Ok(self.select_indices(&indices))
    }

    /// Project columns by position; indices must be in bounds
    pub(crate) fn select_indices(&self, indices: &[usize]) -> Table {
        let columns = indices
            .iter()
            .enumerate()
            .map(|(new_idx, &old_idx)| Column::new(self.columns[old_idx].name.clone(), new_idx))
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells = indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(CellValue::Null))
                    .collect();
                Row::new(cells, row.source_line)
            })
            .collect();

        Table { columns, rows }
    }

    /// Copy of this table restricted to a contiguous row range
    pub(crate) fn slice_rows(&self, range: std::ops::Range<usize>) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows[range].to_vec(),
        }
    }

    /// Replace column names in place; `names` must match the column count
    pub(crate) fn rename_columns(&mut self, names: Vec<String>) {
        debug_assert_eq!(names.len(), self.columns.len());
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
    }
}
