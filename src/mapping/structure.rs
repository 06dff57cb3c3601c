//! Header-only table skeletons generated from a mapping

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Table;
use crate::output::write_table;
use crate::parser;

use super::loader::TableMapping;
use super::split::table_output_path;

/// Default destination for generated skeletons
pub const DEFAULT_SKELETON_DIR: &str = "csv/tablas";

/// Outcome of generating skeletons
#[derive(Debug, Default)]
pub struct SkeletonReport {
    /// `(table, columns, path)` for every file written
    pub written: Vec<(String, Vec<String>, PathBuf)>,
    /// Requested tables without mapped columns
    pub skipped: Vec<String>,
    /// Tables whose file could not be written
    pub failed: Vec<(String, Error)>,
}

/// Read the table names listed in a table-list file
pub fn load_table_list(path: &Path, config: &Config) -> Result<Vec<String>> {
    let table = parser::load(path, config)?;
    let idx = table.column_index(&config.table_column).ok_or_else(|| {
        Error::missing_column(&config.table_column, format!("table list {}", path.display()))
    })?;

    Ok(table
        .column_values(idx)
        .filter_map(|c| c.as_str())
        .map(str::to_string)
        .collect())
}

/// Write a header-only CSV for each requested table
///
/// With no explicit list every table of the mapping is generated.
pub fn write_skeletons(
    tables: Option<&[String]>,
    mapping: &TableMapping,
    output_dir: &Path,
    delimiter: Option<u8>,
) -> SkeletonReport {
    let requested: Vec<String> = match tables {
        Some(list) => list.to_vec(),
        None => mapping.table_names().map(str::to_string).collect(),
    };

    let mut report = SkeletonReport::default();
    for name in requested {
        let Some(columns) = mapping.columns(&name).filter(|c| !c.is_empty()) else {
            warn!(table = %name, "no columns defined for table");
            report.skipped.push(name);
            continue;
        };

        let skeleton = Table::from_names(&columns);
        let columns: Vec<String> = columns.into_iter().map(str::to_string).collect();
        let written = table_output_path(output_dir, &name, "csv")
            .and_then(|path| write_table(&skeleton, &path, delimiter).map(|()| path));

        match written {
            Ok(path) => {
                info!(table = %name, path = %path.display(), "skeleton written");
                report.written.push((name, columns, path));
            }
            Err(e) => report.failed.push((name, e)),
        }
    }

    report
}
