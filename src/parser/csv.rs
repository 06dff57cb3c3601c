//! Delimited text parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

use super::Parser;

/// Parser for comma- or tab-separated files
pub struct CsvParser {
    delimiter: u8,
    extensions: &'static [&'static str],
}

impl CsvParser {
    /// Comma-separated parser for `.csv` and `.txt`
    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            extensions: &["csv", "txt"],
        }
    }

    /// Tab-separated parser for `.tsv` and `.tab`
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            extensions: &["tsv", "tab"],
        }
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter.unwrap_or(self.delimiter))
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| parse_error(path, &e))?
            .clone();

        if headers.is_empty() {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                line: 1,
                message: "no header row".to_string(),
            });
        }

        let names = dedup_headers(headers.iter());
        let mut table = Table::from_names(&names);

        for result in csv_reader.records() {
            let record = result.map_err(|e| parse_error(path, &e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() > table.column_count() {
                return Err(Error::Parse {
                    path: path.to_path_buf(),
                    line,
                    message: format!(
                        "expected {} fields, saw {}",
                        table.column_count(),
                        record.len()
                    ),
                });
            }

            let cells: Vec<CellValue> = record.iter().map(CellValue::from_field).collect();
            table.add_row(cells, line as usize);
        }

        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        self.extensions.contains(&ext.to_lowercase().as_str())
    }
}

fn parse_error(path: &Path, err: &csv::Error) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

/// Make repeated headers unique: `a, a, a` becomes `a, a.1, a.2`
fn dedup_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    let mut names = Vec::new();

    for header in headers {
        let mut name = header.to_string();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", header, n);
            n += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}
