//! Per-column summary statistics

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::model::{CellType, CellValue, Table};

/// Default destination for the statistics file
pub const DEFAULT_STATS_FILE: &str = "analisis_basico.csv";

const EXAMPLE_COUNT: usize = 3;

/// Summary of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub inferred_type: CellType,
    pub rows: usize,
    pub nulls: usize,
    pub null_pct: f64,
    pub unique: usize,
    pub examples: Vec<String>,
}

/// Compute statistics for every column of `table`
pub fn column_stats(table: &Table) -> Vec<ColumnStats> {
    let rows = table.row_count();

    table
        .columns
        .iter()
        .map(|column| {
            let mut inferred_type = CellType::Null;
            let mut nulls = 0;
            let mut distinct: FxHashSet<&str> = FxHashSet::default();
            let mut examples = Vec::new();

            for cell in table.column_values(column.index) {
                inferred_type = inferred_type.widen(cell.cell_type());
                match cell {
                    CellValue::Null => nulls += 1,
                    CellValue::Text(text) => {
                        if distinct.insert(text.as_str()) && examples.len() < EXAMPLE_COUNT {
                            examples.push(text.clone());
                        }
                    }
                }
            }

            let null_pct = if rows == 0 {
                0.0
            } else {
                100.0 * nulls as f64 / rows as f64
            };

            ColumnStats {
                column: column.name.clone(),
                inferred_type,
                rows,
                nulls,
                null_pct,
                unique: distinct.len(),
                examples,
            }
        })
        .collect()
}

/// Render statistics as a table ready to be written or previewed
pub fn stats_table(stats: &[ColumnStats]) -> Table {
    let mut table = Table::from_names(&["column", "type", "rows", "nulls", "null_pct", "unique", "examples"]);
    for (i, s) in stats.iter().enumerate() {
        table.add_row(
            vec![
                s.column.clone().into(),
                s.inferred_type.to_string().into(),
                s.rows.to_string().into(),
                s.nulls.to_string().into(),
                format!("{:.2}%", s.null_pct).into(),
                s.unique.to_string().into(),
                s.examples.join(" | ").into(),
            ],
            i + 2,
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_stats() {
        let mut table = Table::from_names(&["a", "b"]);
        table.add_row(vec!["1".into(), "x".into()], 2);
        table.add_row(vec![CellValue::Null, "y".into()], 3);
        table.add_row(vec!["1".into(), "z".into()], 4);
        table.add_row(vec!["2".into(), "w".into()], 5);

        let stats = column_stats(&table);
        let a = &stats[0];
        assert_eq!(a.inferred_type, CellType::Int);
        assert_eq!(a.rows, 4);
        assert_eq!(a.nulls, 1);
        assert_eq!(a.null_pct, 25.0);
        assert_eq!(a.unique, 2);
        assert_eq!(a.examples, vec!["1", "2"]);

        let b = &stats[1];
        assert_eq!(b.inferred_type, CellType::String);
        assert_eq!(b.examples.len(), 3);
        assert_eq!(b.unique, 4);
    }

    #[test]
    fn test_empty_table_has_zero_pct() {
        let table = Table::from_names(&["a"]);
        let stats = column_stats(&table);
        assert_eq!(stats[0].null_pct, 0.0);
        assert_eq!(stats[0].inferred_type, CellType::Null);
    }

    #[test]
    fn test_stats_table() {
        let mut table = Table::from_names(&["a"]);
        table.add_row(vec!["1".into()], 2);
        table.add_row(vec![CellValue::Null], 3);
        table.add_row(vec!["1".into()], 4);

        let rendered = stats_table(&column_stats(&table));
        assert_eq!(rendered.row_count(), 1);
        assert_eq!(rendered.rows[0].cells[4].as_str(), Some("33.33%"));
        assert_eq!(rendered.rows[0].cells[6].as_str(), Some("1"));
    }
}
