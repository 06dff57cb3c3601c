//! Header normalization pipeline
//!
//! Renames every column to its normalized identifier, then rewrites the
//! cells of recognized timestamp columns as `YYYY-MM-DD HH:MM:SS`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::{Config, DuplicatePolicy, TimestampPolicy};
use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

use super::datetime::canonicalize_timestamp;
use super::identifier::normalize_identifier;

/// Suffix appended to the source file stem for the default output path
pub const OUTPUT_SUFFIX: &str = "_normalizado";

/// Result of normalizing a table's headers
#[derive(Debug)]
pub struct NormalizeOutcome {
    /// Table with normalized names and canonical timestamps
    pub table: Table,
    /// `(original, normalized)` pairs for every column whose name changed
    pub renamed: Vec<(String, String)>,
    /// Timestamp columns that were reformatted
    pub timestamp_columns: Vec<String>,
    /// Non-empty timestamp cells that could not be parsed and became missing
    pub coerced_cells: usize,
}

/// Compute normalized names for a header row
///
/// Collisions are rejected or disambiguated according to `policy`.
pub fn normalized_names<S: AsRef<str>>(raw: &[S], policy: DuplicatePolicy) -> Result<Vec<String>> {
    // normalized name -> original header that claimed it
    let mut seen: IndexMap<String, String> = IndexMap::new();
    let mut names = Vec::with_capacity(raw.len());

    for original in raw {
        let original = original.as_ref();
        let base = normalize_identifier(original);
        let mut name = base.clone();

        if let Some(first) = seen.get(&name) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateColumn {
                        first: first.clone(),
                        second: original.to_string(),
                        normalized: base,
                    });
                }
                DuplicatePolicy::Disambiguate => {
                    let mut n = 2;
                    while seen.contains_key(&name) {
                        name = format!("{}_{}", base, n);
                        n += 1;
                    }
                    debug!(original, name = %name, "disambiguated duplicate header");
                }
            }
        }

        seen.insert(name.clone(), original.to_string());
        names.push(name);
    }

    Ok(names)
}

/// Normalize headers and timestamp columns of `source`
pub fn normalize_headers(source: &Table, config: &Config) -> Result<NormalizeOutcome> {
    let original: Vec<String> = source.columns.iter().map(|c| c.name.clone()).collect();
    let names = normalized_names(&original, config.duplicate_policy)?;

    let renamed = original
        .iter()
        .zip(&names)
        .filter(|(old, new)| old != new)
        .map(|(old, new)| (old.clone(), new.clone()))
        .collect();

    let mut table = source.clone();
    table.rename_columns(names);

    let wanted: Vec<String> = config
        .timestamp_columns
        .iter()
        .map(|c| normalize_identifier(c))
        .collect();
    let targets: Vec<usize> = table
        .columns
        .iter()
        .filter(|c| wanted.contains(&c.name))
        .map(|c| c.index)
        .collect();

    let mut coerced_cells = 0;
    for &col_idx in &targets {
        let column = table.columns[col_idx].name.clone();
        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            let Some(cell) = row.cells.get_mut(col_idx) else {
                continue;
            };
            let Some(raw) = cell.as_str() else {
                continue;
            };

            match canonicalize_timestamp(raw) {
                Some(canonical) => *cell = CellValue::Text(canonical),
                None if config.timestamp_policy == TimestampPolicy::Strict => {
                    return Err(Error::InvalidTimestamp {
                        column,
                        row: row_idx,
                        value: raw.to_string(),
                    });
                }
                None => {
                    debug!(column = %column, row = row_idx, value = raw, "unparsable timestamp");
                    *cell = CellValue::Null;
                    coerced_cells += 1;
                }
            }
        }
    }

    if coerced_cells > 0 {
        warn!(coerced_cells, "timestamp cells could not be parsed and were left empty");
    }

    let timestamp_columns = targets
        .iter()
        .map(|&i| table.columns[i].name.clone())
        .collect();

    Ok(NormalizeOutcome {
        table,
        renamed,
        timestamp_columns,
        coerced_cells,
    })
}

/// `<dir>/<stem>_normalizado.csv` next to the source file
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("salida");
    source.with_file_name(format!("{}{}.csv", stem, OUTPUT_SUFFIX))
}
