//! Header suggestion files and projection by header list

use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mapping::resolve_column;
use crate::model::{CellValue, Table};
use crate::normalize::normalize_identifier;
use crate::parser;

/// Default destination for a header suggestion file
pub const DEFAULT_SUGGESTION_FILE: &str = "sugerencia_columnas.csv";

/// Column of a suggestion file holding the original header
pub const ORIGINAL_COLUMN: &str = "columna_original";

/// Column of a suggestion file holding the proposed header
pub const NORMALIZED_COLUMN: &str = "columna_normalizada";

/// Build an editable `columna_original, columna_normalizada` table
pub fn suggest_headers(source: &Table) -> Table {
    let mut suggestion = Table::from_names(&[ORIGINAL_COLUMN, NORMALIZED_COLUMN]);
    for (i, column) in source.columns.iter().enumerate() {
        suggestion.add_row(
            vec![
                CellValue::from_field(&column.name),
                CellValue::from_field(&normalize_identifier(&column.name)),
            ],
            i + 2,
        );
    }
    suggestion
}

/// Read the header list of a header file
///
/// The list comes from the first of the configured preference columns
/// present (`columna_normalizada`, then `columna`).
pub fn load_header_list(path: &Path, config: &Config) -> Result<Vec<String>> {
    let table = parser::load(path, config)?;
    header_list_from_table(&table, &config.column_preference, &format!("header file {}", path.display()))
}

/// Read the header list held in `preference` order from a loaded table
pub fn header_list_from_table(table: &Table, preference: &[String], context: &str) -> Result<Vec<String>> {
    let column = resolve_column(table, preference, context)?;
    let idx = table
        .column_index(column)
        .ok_or_else(|| Error::missing_column(column, context))?;

    Ok(table
        .column_values(idx)
        .filter_map(|c| c.as_str())
        .map(str::to_string)
        .collect())
}

/// Keep the listed columns that exist in `source`, in list order
pub fn project_with_headers(source: &Table, headers: &[String]) -> Result<Table> {
    source.select(headers)
}
