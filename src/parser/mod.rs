//! Parser layer for reading delimited files into tables

mod csv;

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Table;

pub use self::csv::CsvParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for picking a parser based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
    fallback: CsvParser,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser::tsv()), Box::new(CsvParser::csv())],
            fallback: CsvParser::csv(),
        }
    }

    /// Get a parser for the given file path
    ///
    /// Unknown extensions are read as comma-separated text.
    pub fn get_parser(&self, path: &Path) -> &dyn Parser {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.parsers
            .iter()
            .find(|p| p.supports_extension(&ext))
            .map(|p| p.as_ref())
            .unwrap_or_else(|| {
                debug!(path = %path.display(), "unknown extension, reading as CSV");
                &self.fallback as &dyn Parser
            })
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        self.get_parser(path).parse(path, config)
    }
}

/// Load a delimited file with the default parsers
pub fn load(path: &Path, config: &Config) -> Result<Table> {
    ParserFactory::new().parse(path, config)
}
