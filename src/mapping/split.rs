//! Table splitter
//!
//! Projects one wide source table into one narrower table per mapping
//! entry. Splitting is pure; writing is a separate step in which each
//! table succeeds or fails on its own.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::Table;
use crate::output::write_table;

use super::loader::TableMapping;

/// Reason attached to a table that produced no output
pub const NO_MATCHING_COLUMNS: &str = "no matching columns";

/// Non-fatal problem with one mapped table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitWarning {
    pub table_name: String,
    pub reason: String,
}

/// Output of [`split`]
#[derive(Debug, Default)]
pub struct SplitResult {
    /// Projected tables in mapping order
    pub tables: IndexMap<String, Table>,
    /// Tables skipped because none of their columns exist
    pub warnings: Vec<SplitWarning>,
}

/// Split `source` into one table per mapping entry
///
/// Each output keeps the mapped columns that exist in `source`, in mapping
/// order, with every source row unchanged.
pub fn split(source: &Table, mapping: &TableMapping) -> SplitResult {
    let mut result = SplitResult::default();

    for (table_name, declared) in mapping.iter() {
        let existing: Vec<&str> = declared
            .into_iter()
            .filter(|c| source.has_column(c))
            .collect();

        if existing.is_empty() {
            warn!(table = table_name, "no matching columns, skipping table");
            result.warnings.push(SplitWarning {
                table_name: table_name.to_string(),
                reason: NO_MATCHING_COLUMNS.to_string(),
            });
            continue;
        }

        match source.select(&existing) {
            Ok(projected) => {
                result.tables.insert(table_name.to_string(), projected);
            }
            Err(e) => result.warnings.push(SplitWarning {
                table_name: table_name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    result
}

/// Outcome of writing a split to disk
#[derive(Debug, Default)]
pub struct WriteReport {
    /// `(table, path)` for every file written
    pub written: Vec<(String, PathBuf)>,
    /// `(table, error)` for every table that could not be written
    pub failed: Vec<(String, Error)>,
}

impl WriteReport {
    /// Whether every table was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Output file for a table: `<output_dir>/<table_name>.<ext>`
///
/// Table names must be plain file names.
pub fn table_output_path(output_dir: &Path, table_name: &str, ext: &str) -> Result<PathBuf> {
    let plain = !table_name.is_empty()
        && table_name != "."
        && table_name != ".."
        && !table_name.contains(['/', '\\']);
    if !plain {
        return Err(Error::InvalidSelection(format!(
            "'{}' cannot be used as a file name",
            table_name
        )));
    }
    Ok(output_dir.join(format!("{}.{}", table_name, ext)))
}

/// Write every split table to `output_dir`, isolating failures per table
///
/// Fails as a whole only when the output directory cannot be created.
/// Without an explicit `delimiter` it follows `ext`.
pub fn write_split(
    result: &SplitResult,
    output_dir: &Path,
    ext: &str,
    delimiter: Option<u8>,
) -> Result<WriteReport> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut report = WriteReport::default();
    for (table_name, table) in &result.tables {
        let written = table_output_path(output_dir, table_name, ext)
            .and_then(|path| write_table(table, &path, delimiter).map(|()| path));

        match written {
            Ok(path) => {
                info!(
                    table = %table_name,
                    path = %path.display(),
                    columns = table.column_count(),
                    "table written"
                );
                report.written.push((table_name.clone(), path));
            }
            Err(e) => {
                warn!(table = %table_name, error = %e, "failed to write table");
                report.failed.push((table_name.clone(), e));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn source() -> Table {
        let mut table = Table::from_names(&["id", "fecha_de_entrega", "nombre", "extra"]);
        for i in 0..3 {
            table.add_row(
                vec![
                    format!("{i}").into(),
                    format!("2024-03-0{}", i + 1).into(),
                    CellValue::Null,
                    "x".into(),
                ],
                i + 2,
            );
        }
        table
    }

    #[test]
    fn test_split_end_to_end_scenario() {
        let mapping: TableMapping = [
            ("pedidos", "id"),
            ("pedidos", "fecha_de_entrega"),
            ("clientes", "id"),
            ("clientes", "nombre"),
        ]
        .into_iter()
        .collect();

        let result = split(&source(), &mapping);
        assert!(result.warnings.is_empty());
        assert_eq!(result.tables.keys().collect::<Vec<_>>(), vec!["pedidos", "clientes"]);

        let pedidos = &result.tables["pedidos"];
        assert_eq!(pedidos.column_names(), vec!["id", "fecha_de_entrega"]);
        assert_eq!(pedidos.row_count(), 3);

        let clientes = &result.tables["clientes"];
        assert_eq!(clientes.column_names(), vec!["id", "nombre"]);
        assert_eq!(clientes.row_count(), 3);
        assert!(clientes.rows[0].cells[1].is_null());
    }

    #[test]
    fn test_split_drops_unknown_columns() {
        let mut table = Table::from_names(&["id", "nombre", "telefono"]);
        table.add_row(vec!["1".into(), "Ana".into(), "555".into()], 2);
        let mapping: TableMapping = [("clientes", "id"), ("clientes", "nombre"), ("clientes", "no_existe")]
            .into_iter()
            .collect();

        let result = split(&table, &mapping);
        assert_eq!(result.tables["clientes"].column_names(), vec!["id", "nombre"]);
    }

    #[test]
    fn test_split_warns_on_empty_intersection() {
        let mapping: TableMapping = [("fantasma", "nada"), ("pedidos", "id")].into_iter().collect();

        let result = split(&source(), &mapping);
        assert_eq!(
            result.warnings,
            vec![SplitWarning {
                table_name: "fantasma".to_string(),
                reason: NO_MATCHING_COLUMNS.to_string(),
            }]
        );
        assert_eq!(result.tables.len(), 1);
        assert_eq!(result.tables["pedidos"].row_count(), 3);
    }

    #[test]
    fn test_row_counts_preserved() {
        let src = source();
        let mapping: TableMapping = [("a", "extra"), ("b", "nombre"), ("b", "id")].into_iter().collect();
        for table in split(&src, &mapping).tables.values() {
            assert_eq!(table.row_count(), src.row_count());
        }
    }

    #[test]
    fn test_write_split_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let mapping: TableMapping = [("../escape", "id"), ("pedidos", "id")].into_iter().collect();
        let result = split(&source(), &mapping);

        let report = write_split(&result, dir.path(), "csv", None).unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "../escape");
        assert_eq!(report.written.len(), 1);
        assert!(dir.path().join("pedidos.csv").is_file());
    }

    #[test]
    fn test_write_split_uses_given_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let mapping: TableMapping = [("pedidos", "id"), ("pedidos", "nombre")].into_iter().collect();
        let result = split(&source(), &mapping);

        write_split(&result, dir.path(), "csv", Some(b';')).unwrap();
        let written = std::fs::read_to_string(dir.path().join("pedidos.csv")).unwrap();
        assert!(written.starts_with("id;nombre\n"));
    }

    #[test]
    fn test_table_output_path() {
        let dir = Path::new("out");
        assert_eq!(
            table_output_path(dir, "clientes", "csv").unwrap(),
            PathBuf::from("out/clientes.csv")
        );
        assert!(table_output_path(dir, "", "csv").is_err());
        assert!(table_output_path(dir, "a/b", "csv").is_err());
    }
}
