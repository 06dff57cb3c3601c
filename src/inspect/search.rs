//! Case-insensitive value search within one column

use crate::error::{Error, Result};
use crate::model::Table;

/// A column addressed by name or by 0-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

impl ColumnRef {
    /// Interpret operator input: a bare number is a position, anything else a name
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(i) => ColumnRef::Index(i),
            Err(_) => ColumnRef::Name(input.to_string()),
        }
    }

    /// Resolve to a column index in `table`
    ///
    /// A position whose digits are also a column name (`"2024"`) picks
    /// that column.
    pub fn resolve(&self, table: &Table) -> Result<usize> {
        match self {
            ColumnRef::Name(name) => table
                .column_index(name)
                .ok_or_else(|| Error::missing_column(name, "source table")),
            ColumnRef::Index(i) => match table.column_index(&i.to_string()) {
                Some(named) => Ok(named),
                None if *i < table.column_count() => Ok(*i),
                None => Err(Error::InvalidSelection(format!(
                    "column {} is out of range 0..{}",
                    i,
                    table.column_count()
                ))),
            },
        }
    }
}

/// Rows whose cell in `column` contains `needle`, ignoring case
///
/// Missing cells never match.
pub fn search(table: &Table, column: &ColumnRef, needle: &str) -> Result<Table> {
    let idx = column.resolve(table)?;
    let needle = needle.to_lowercase();

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row.get(idx)
                .and_then(|c| c.as_str())
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    Ok(Table {
        columns: table.columns.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn tickets() -> Table {
        let mut table = Table::from_names(&["id", "equipo"]);
        table.add_row(vec!["1".into(), "Notebook Lenovo".into()], 2);
        table.add_row(vec!["2".into(), CellValue::Null], 3);
        table.add_row(vec!["3".into(), "Impresora".into()], 4);
        table.add_row(vec!["4".into(), "NOTEBOOK HP".into()], 5);
        table
    }

    #[test]
    fn test_search_ignores_case() {
        let found = search(&tickets(), &ColumnRef::Name("equipo".into()), "notebook").unwrap();
        assert_eq!(found.row_count(), 2);
        assert_eq!(found.rows[1].cells[0].as_str(), Some("4"));
    }

    #[test]
    fn test_search_by_index() {
        let found = search(&tickets(), &ColumnRef::parse("1"), "impre").unwrap();
        assert_eq!(found.row_count(), 1);
    }

    #[test]
    fn test_numeric_column_name_wins_over_position() {
        let mut table = Table::from_names(&["equipo", "2024", "2023"]);
        table.add_row(vec!["Notebook".into(), "alta".into(), "baja".into()], 2);
        table.add_row(vec!["Impresora".into(), "baja".into(), "alta".into()], 3);

        let found = search(&table, &ColumnRef::parse("2024"), "alta").unwrap();
        assert_eq!(found.row_count(), 1);
        assert_eq!(found.rows[0].cells[0].as_str(), Some("Notebook"));

        let by_position = search(&table, &ColumnRef::parse("2"), "alta").unwrap();
        assert_eq!(by_position.rows[0].cells[0].as_str(), Some("Impresora"));
    }

    #[test]
    fn test_search_no_match() {
        let found = search(&tickets(), &ColumnRef::parse("equipo"), "tablet").unwrap();
        assert_eq!(found.row_count(), 0);
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            search(&tickets(), &ColumnRef::parse("marca"), "x"),
            Err(Error::MissingColumn { .. })
        ));
        assert!(matches!(
            search(&tickets(), &ColumnRef::Index(7), "x"),
            Err(Error::InvalidSelection(_))
        ));
    }
}
