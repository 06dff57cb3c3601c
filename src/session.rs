//! State shared between interactive menu actions
//!
//! A session starts empty when the menu opens, is updated by the actions
//! that load or produce header files, and is dropped when the menu exits.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::inspect::{header_list_from_table, NORMALIZED_COLUMN};
use crate::parser;

/// Headers loaded from a custom header file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedHeaders {
    /// File the headers were read from
    pub source: PathBuf,
    /// Header names in file order
    pub columns: Vec<String>,
}

/// Interactive session context
#[derive(Debug, Default)]
pub struct Session {
    loaded_headers: Option<LoadedHeaders>,
    last_suggestion: Option<PathBuf>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Load custom headers from a file with a `columna_normalizada` column
    ///
    /// Replaces any previously loaded headers.
    pub fn load_headers(&mut self, path: &Path, config: &Config) -> Result<&LoadedHeaders> {
        let table = parser::load(path, config)?;
        let context = format!("header file {}", path.display());
        if !table.has_column(NORMALIZED_COLUMN) {
            return Err(Error::missing_column(NORMALIZED_COLUMN, context));
        }
        let columns = header_list_from_table(&table, &[NORMALIZED_COLUMN.to_string()], &context)?;

        info!(path = %path.display(), columns = columns.len(), "custom headers loaded");
        Ok(self.loaded_headers.insert(LoadedHeaders {
            source: path.to_path_buf(),
            columns,
        }))
    }

    /// Headers loaded so far, if any
    pub fn loaded_headers(&self) -> Option<&LoadedHeaders> {
        self.loaded_headers.as_ref()
    }

    /// Remember where the last header suggestion was saved
    pub fn record_suggestion(&mut self, path: PathBuf) {
        self.last_suggestion = Some(path);
    }

    /// Where the last header suggestion was saved
    pub fn last_suggestion(&self) -> Option<&Path> {
        self.last_suggestion.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headers.csv");
        fs::write(&path, "columna_original,columna_normalizada\nID,id\nNombre,nombre\n").unwrap();

        let mut session = Session::new();
        assert!(session.loaded_headers().is_none());

        let loaded = session.load_headers(&path, &Config::default()).unwrap();
        assert_eq!(loaded.columns, vec!["id", "nombre"]);
        assert_eq!(session.loaded_headers().unwrap().source, path);
    }

    #[test]
    fn test_load_headers_requires_normalized_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headers.csv");
        fs::write(&path, "columna\nid\n").unwrap();

        let mut session = Session::new();
        let err = session.load_headers(&path, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { .. }));
        assert!(session.loaded_headers().is_none());
    }

    #[test]
    fn test_record_suggestion() {
        let mut session = Session::new();
        session.record_suggestion(PathBuf::from("sugerencia_columnas.csv"));
        assert_eq!(session.last_suggestion(), Some(Path::new("sugerencia_columnas.csv")));
    }
}
