//! Atomic delimited-file writer

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Table;

/// Pick the delimiter for an output path: tab for `.tsv`, comma otherwise
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Temporary file that ends up with the same mode as a plainly created one
///
/// `NamedTempFile` defaults to 0600; asking for 0666 lets the umask decide.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write a table with a header row and no index column
///
/// Missing cells become empty fields. The table is written to a temporary
/// file beside `path` and renamed into place, so a failed write leaves
/// no partial file behind.
pub fn write_table(table: &Table, path: &Path, delimiter: Option<u8>) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let tmp = temp_file_in(dir).map_err(|e| Error::io(dir, e))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.unwrap_or_else(|| delimiter_for(path)))
        .from_writer(tmp);

    let write_err = |e: csv::Error| Error::io(path, e.into());

    writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(write_err)?;
    for row in &table.rows {
        writer
            .write_record(row.cells.iter().map(|c| c.as_field()))
            .map_err(write_err)?;
    }

    let tmp = writer
        .into_inner()
        .map_err(|e| Error::io(path, e.into_error()))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    debug!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_write_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = Table::from_names(&["id", "nota"]);
        table.add_row(vec!["1".into(), CellValue::Null], 2);
        table.add_row(vec!["2".into(), "con, coma".into()], 3);

        write_table(&table, &path, None).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "id,nota\n1,\n2,\"con, coma\"\n");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.tsv");

        let mut table = Table::from_names(&["x", "y"]);
        table.add_row(vec!["1".into(), "2".into()], 2);

        write_table(&table, &path, None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\ty\n1\t2\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let plain = dir.path().join("plain.csv");

        let mut table = Table::from_names(&["id"]);
        table.add_row(vec!["1".into()], 2);
        write_table(&table, &path, None).unwrap();
        fs::write(&plain, "id\n1\n").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }
}
