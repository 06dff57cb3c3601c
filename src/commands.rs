//! File-level operations shared by the CLI and the interactive menu
//!
//! Each function loads its inputs, runs one transformation and writes the
//! result, returning what the caller needs to report back to the operator.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::inspect::{self, ColumnStats, Edge};
use crate::mapping::{self, SkeletonReport, SplitResult, WriteReport};
use crate::model::Table;
use crate::normalize::{self, NormalizeOutcome};
use crate::output::write_table;
use crate::parser;

/// A table written to disk
#[derive(Debug)]
pub struct Written {
    pub table: Table,
    pub path: PathBuf,
    /// The requested count exceeded the table and everything was taken
    pub clamped: bool,
}

fn write(table: Table, path: &Path, clamped: bool, config: &Config) -> Result<Written> {
    write_table(&table, path, config.delimiter)?;
    info!(path = %path.display(), rows = table.row_count(), columns = table.column_count(), "file written");
    Ok(Written {
        table,
        path: path.to_path_buf(),
        clamped,
    })
}

/// Write the first or last `count` columns of `input` to `output`
pub fn slice_columns_file(input: &Path, count: usize, edge: Edge, output: &Path, config: &Config) -> Result<Written> {
    let table = parser::load(input, config)?;
    let sliced = inspect::slice_columns(&table, count, edge)?;
    write(sliced.table, output, sliced.clamped, config)
}

/// Write the first or last `count` rows of `input` to `output`
pub fn slice_rows_file(input: &Path, count: usize, edge: Edge, output: &Path, config: &Config) -> Result<Written> {
    let table = parser::load(input, config)?;
    let sliced = inspect::slice_rows(&table, count, edge)?;
    write(sliced.table, output, sliced.clamped, config)
}

/// Write the columns at 1-based `positions` of `input` to `output`
pub fn select_positions_file(input: &Path, positions: &[usize], output: &Path, config: &Config) -> Result<Written> {
    let table = parser::load(input, config)?;
    let selected = inspect::select_by_positions(&table, positions)?;
    write(selected, output, false, config)
}

/// Compute column statistics, optionally saving them as a table
pub fn stats_file(input: &Path, output: Option<&Path>, config: &Config) -> Result<Vec<ColumnStats>> {
    let table = parser::load(input, config)?;
    let stats = inspect::column_stats(&table);
    if let Some(output) = output {
        write(inspect::stats_table(&stats), output, false, config)?;
    }
    Ok(stats)
}

/// Normalize headers and timestamps of `input`
///
/// Without an explicit output the result goes next to the source as
/// `<stem>_normalizado.csv`.
pub fn normalize_file(input: &Path, output: Option<&Path>, config: &Config) -> Result<(NormalizeOutcome, PathBuf)> {
    let table = parser::load(input, config)?;
    let outcome = normalize::normalize_headers(&table, config)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| normalize::default_output_path(input));
    write_table(&outcome.table, &path, config.delimiter)?;
    info!(path = %path.display(), renamed = outcome.renamed.len(), "normalized file written");
    Ok((outcome, path))
}

/// Save a header suggestion file for `input`
pub fn suggest_headers_file(input: &Path, output: &Path, config: &Config) -> Result<Written> {
    let table = parser::load(input, config)?;
    write(inspect::suggest_headers(&table), output, false, config)
}

/// Keep the columns named in `headers` that exist in `input`
pub fn project_file(input: &Path, headers: &[String], output: &Path, config: &Config) -> Result<Written> {
    let table = parser::load(input, config)?;
    let projected = inspect::project_with_headers(&table, headers)?;
    write(projected, output, false, config)
}

/// Split `data` by `mapping_path` into `<output_dir>/<table>.<ext>` files
///
/// Both inputs are loaded and checked before anything is written.
pub fn split_file(data: &Path, mapping_path: &Path, output_dir: &Path, config: &Config) -> Result<(SplitResult, WriteReport)> {
    let source = parser::load(data, config)?;
    let table_mapping = mapping::load_mapping(mapping_path, config)?;

    let result = mapping::split(&source, &table_mapping);
    let ext = match data.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => "tsv",
        _ => "csv",
    };
    let report = mapping::write_split(&result, output_dir, ext, config.delimiter)?;
    Ok((result, report))
}

/// Generate header-only files for mapped tables
pub fn skeleton_files(
    mapping_path: &Path,
    table_list: Option<&Path>,
    output_dir: &Path,
    config: &Config,
) -> Result<SkeletonReport> {
    let tables = table_list
        .map(|path| mapping::load_table_list(path, config))
        .transpose()?;
    let table_mapping = mapping::load_mapping(mapping_path, config)?;
    Ok(mapping::write_skeletons(
        tables.as_deref(),
        &table_mapping,
        output_dir,
        config.delimiter,
    ))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_split_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("datos.csv");
        let mapping_path = dir.path().join("mapeo.csv");
        fs::write(
            &data,
            "id,fecha_de_entrega,nombre,extra\n1,2024-01-01,Ana,a\n2,2024-01-02,Luis,b\n3,,Eva,c\n",
        )
        .unwrap();
        fs::write(
            &mapping_path,
            "nombre_tabla,columna\npedidos,id\npedidos,fecha_de_entrega\nclientes,id\nclientes,nombre\n",
        )
        .unwrap();

        let out = dir.path().join("tablas");
        let (result, report) = split_file(&data, &mapping_path, &out, &Config::default()).unwrap();

        assert!(report.is_complete());
        assert_eq!(result.tables.len(), 2);
        assert_eq!(
            fs::read_to_string(out.join("pedidos.csv")).unwrap(),
            "id,fecha_de_entrega\n1,2024-01-01\n2,2024-01-02\n3,\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("clientes.csv")).unwrap(),
            "id,nombre\n1,Ana\n2,Luis\n3,Eva\n"
        );
    }

    #[test]
    fn test_split_file_missing_mapping_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("datos.csv");
        fs::write(&data, "id\n1\n").unwrap();

        let out = dir.path().join("tablas");
        let err = split_file(&data, &dir.path().join("nope.csv"), &out, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_normalize_file_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tickets.csv");
        fs::write(&input, "Fecha De Entrega,Cliente Nombre\n05/03/2024 10:00,Ana\nnot-a-date,Luis\n").unwrap();

        let (outcome, path) = normalize_file(&input, None, &Config::default()).unwrap();
        assert_eq!(path, dir.path().join("tickets_normalizado.csv"));
        assert_eq!(outcome.coerced_cells, 1);
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "fecha_de_entrega,cliente_nombre\n2024-03-05 10:00:00,Ana\n,Luis\n"
        );
    }

    #[test]
    fn test_slice_columns_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "a,b,c\n1,2,3\n").unwrap();

        let written = slice_columns_file(&input, 2, Edge::End, &output, &Config::default()).unwrap();
        assert!(!written.clamped);
        assert_eq!(fs::read_to_string(output).unwrap(), "b,c\n2,3\n");
    }
}
