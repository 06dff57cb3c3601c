//! Row and column slicing

use crate::error::{Error, Result};
use crate::model::Table;

/// Which end of the table to slice from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Edge {
    #[default]
    Start,
    End,
}

/// A slice together with whether the request had to be clamped
#[derive(Debug)]
pub struct Sliced {
    pub table: Table,
    /// The requested count exceeded what the table holds
    pub clamped: bool,
}

fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidSelection("count must be greater than zero".to_string()));
    }
    Ok(())
}

fn bounds(total: usize, count: usize, from: Edge) -> std::ops::Range<usize> {
    let count = count.min(total);
    match from {
        Edge::Start => 0..count,
        Edge::End => total - count..total,
    }
}

/// First or last `count` columns
pub fn slice_columns(table: &Table, count: usize, from: Edge) -> Result<Sliced> {
    check_count(count)?;
    let range = bounds(table.column_count(), count, from);
    let indices: Vec<usize> = range.collect();
    Ok(Sliced {
        table: table.select_indices(&indices),
        clamped: count > table.column_count(),
    })
}

/// First or last `count` rows
pub fn slice_rows(table: &Table, count: usize, from: Edge) -> Result<Sliced> {
    check_count(count)?;
    let range = bounds(table.row_count(), count, from);
    Ok(Sliced {
        table: table.slice_rows(range),
        clamped: count > table.row_count(),
    })
}

/// Rows `start..=end` (0-based)
pub fn row_range(table: &Table, start: usize, end: usize) -> Result<Table> {
    if start > end || end >= table.row_count() {
        return Err(Error::InvalidRange {
            start,
            end,
            row_count: table.row_count(),
        });
    }
    Ok(table.slice_rows(start..end + 1))
}

/// Parse an operator list of 1-based positions such as `1, 3,5`
pub fn parse_positions(input: &str) -> Result<Vec<usize>> {
    let positions: Vec<usize> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| Error::InvalidSelection(format!("'{}' is not a column number", s)))
        })
        .collect::<Result<_>>()?;

    if positions.is_empty() {
        return Err(Error::InvalidSelection("no columns selected".to_string()));
    }
    Ok(positions)
}

/// Project columns by 1-based position, keeping the given order
pub fn select_by_positions(table: &Table, positions: &[usize]) -> Result<Table> {
    let indices = positions
        .iter()
        .map(|&p| {
            p.checked_sub(1)
                .filter(|&i| i < table.column_count())
                .ok_or_else(|| {
                    Error::InvalidSelection(format!(
                        "column {} is out of range 1..={}",
                        p,
                        table.column_count()
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let names: Vec<&str> = indices.iter().map(|&i| table.columns[i].name.as_str()).collect();
    table.select(&names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, rows: usize) -> Table {
        let names: Vec<String> = (0..columns).map(|i| format!("c{i}")).collect();
        let mut table = Table::from_names(&names);
        for r in 0..rows {
            table.add_row((0..columns).map(|c| format!("{r}:{c}").into()).collect(), r + 2);
        }
        table
    }

    #[test]
    fn test_slice_columns() {
        let table = grid(5, 2);
        let first = slice_columns(&table, 2, Edge::Start).unwrap();
        assert_eq!(first.table.column_names(), vec!["c0", "c1"]);
        assert!(!first.clamped);

        let last = slice_columns(&table, 2, Edge::End).unwrap();
        assert_eq!(last.table.column_names(), vec!["c3", "c4"]);
        assert_eq!(last.table.rows[1].cells[0].as_str(), Some("1:3"));
    }

    #[test]
    fn test_slice_clamps() {
        let table = grid(3, 4);
        let all = slice_columns(&table, 10, Edge::End).unwrap();
        assert_eq!(all.table.column_count(), 3);
        assert!(all.clamped);

        let rows = slice_rows(&table, 9, Edge::Start).unwrap();
        assert_eq!(rows.table.row_count(), 4);
        assert!(rows.clamped);
    }

    #[test]
    fn test_slice_rows_from_end() {
        let table = grid(2, 5);
        let last = slice_rows(&table, 2, Edge::End).unwrap();
        assert_eq!(last.table.row_count(), 2);
        assert_eq!(last.table.rows[0].source_line, 5);
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(slice_rows(&grid(1, 1), 0, Edge::Start).is_err());
    }

    #[test]
    fn test_row_range() {
        let table = grid(1, 5);
        let range = row_range(&table, 1, 3).unwrap();
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.rows[0].cells[0].as_str(), Some("1:0"));

        assert!(matches!(row_range(&table, 3, 5), Err(Error::InvalidRange { .. })));
        assert!(matches!(row_range(&table, 3, 2), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_positions() {
        assert_eq!(parse_positions("1, 3,5").unwrap(), vec![1, 3, 5]);
        assert!(parse_positions("1,a").is_err());
        assert!(parse_positions(" , ").is_err());

        let table = grid(4, 1);
        let picked = select_by_positions(&table, &[3, 1]).unwrap();
        assert_eq!(picked.column_names(), vec!["c2", "c0"]);
        assert!(select_by_positions(&table, &[0]).is_err());
        assert!(select_by_positions(&table, &[5]).is_err());
    }
}
