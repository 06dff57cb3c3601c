//! Header mapping loader
//!
//! A mapping file declares which source columns belong to which output
//! table, one `(table, column)` pair per row.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Table;
use crate::parser;

/// Table name -> ordered, de-duplicated column names, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMapping {
    tables: IndexMap<String, IndexSet<String>>,
}

impl TableMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `(table, column)` entry; repeated entries are ignored
    pub fn insert(&mut self, table: impl Into<String>, column: impl Into<String>) {
        self.tables
            .entry(table.into())
            .or_default()
            .insert(column.into());
    }

    /// Columns declared for a table
    pub fn columns(&self, table: &str) -> Option<Vec<&str>> {
        self.tables
            .get(table)
            .map(|cols| cols.iter().map(String::as_str).collect())
    }

    /// Table names in first-seen order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterate over `(table, columns)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.tables
            .iter()
            .map(|(table, cols)| (table.as_str(), cols.iter().map(String::as_str).collect()))
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the mapping declares no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<T, C> FromIterator<(T, C)> for TableMapping
where
    T: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, C)>>(iter: I) -> Self {
        let mut mapping = TableMapping::new();
        for (table, column) in iter {
            mapping.insert(table, column);
        }
        mapping
    }
}

/// Resolve the first column of `preference` present in `table`
pub fn resolve_column<'a>(table: &Table, preference: &'a [String], context: &str) -> Result<&'a str> {
    preference
        .iter()
        .find(|name| table.has_column(name))
        .map(String::as_str)
        .ok_or_else(|| Error::missing_column(preference.join("' or '"), context))
}

/// Group an already loaded mapping table
pub fn mapping_from_table(
    table: &Table,
    table_column: &str,
    column_preference: &[String],
    context: &str,
) -> Result<TableMapping> {
    let table_idx = table
        .column_index(table_column)
        .ok_or_else(|| Error::missing_column(table_column, context))?;
    let column_name = resolve_column(table, column_preference, context)?;
    let column_idx = table
        .column_index(column_name)
        .ok_or_else(|| Error::missing_column(column_name, context))?;

    debug!(table_column, column = column_name, "resolved mapping columns");

    let mut mapping = TableMapping::new();
    for row in &table.rows {
        let target = row.get(table_idx).and_then(|c| c.as_str());
        let column = row.get(column_idx).and_then(|c| c.as_str());
        match (target, column) {
            (Some(target), Some(column)) => mapping.insert(target, column),
            _ => debug!(line = row.source_line, "skipping incomplete mapping row"),
        }
    }

    Ok(mapping)
}

/// Load and group a mapping file
///
/// The table column defaults to `nombre_tabla`; the column holding source
/// column names is the first of `columna_normalizada`, `columna` present.
pub fn load_mapping(path: &Path, config: &Config) -> Result<TableMapping> {
    let table = parser::load(path, config)?;
    let context = format!("mapping file {}", path.display());
    mapping_from_table(&table, &config.table_column, &config.column_preference, &context)
}
