//! Error types shared by every csvtools operation

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Failures an operation can report back to the menu or CLI
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not exist or is not a regular file
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file is not well-formed delimited text
    #[error("failed to parse {} (line {line}): {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// A required column is absent
    #[error("missing column '{column}' in {context}")]
    MissingColumn { column: String, context: String },

    /// A projection kept no columns
    #[error("none of the requested columns exist: {}", requested.join(", "))]
    EmptyProjection { requested: Vec<String> },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two distinct headers normalize to the same identifier
    #[error("columns '{first}' and '{second}' both normalize to '{normalized}'")]
    DuplicateColumn {
        first: String,
        second: String,
        normalized: String,
    },

    /// A timestamp cell could not be parsed under the strict policy
    #[error("column '{column}', row {row}: '{value}' is not a recognizable date")]
    InvalidTimestamp {
        column: String,
        row: usize,
        value: String,
    },

    /// A row range falls outside the table
    #[error("row range {start}..={end} is out of bounds for {row_count} rows")]
    InvalidRange {
        start: usize,
        end: usize,
        row_count: usize,
    },

    /// Operator input could not be turned into a selection
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_column(column: impl Into<String>, context: impl Into<String>) -> Self {
        Error::MissingColumn {
            column: column.into(),
            context: context.into(),
        }
    }
}
