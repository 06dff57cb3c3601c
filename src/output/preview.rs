//! Table previews for the terminal

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

/// Render at most `max_rows` x `max_columns` of a table as a markdown grid
///
/// Hidden rows and columns are reported below the grid.
pub fn render_preview(table: &Table, max_rows: usize, max_columns: usize) -> String {
    let shown_columns = table.column_count().min(max_columns);
    if shown_columns == 0 {
        return "(no columns)\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().take(shown_columns).map(|c| c.name.clone()));
    for row in table.rows.iter().take(max_rows) {
        builder.push_record(
            row.cells
                .iter()
                .take(shown_columns)
                .map(|c| c.display().into_owned()),
        );
    }

    let mut grid = builder.build();
    grid.with(Style::markdown());

    let mut output = grid.to_string();
    output.push('\n');

    let hidden_columns = table.column_count() - shown_columns;
    if hidden_columns > 0 {
        output.push_str(&format!("\n... ({} more columns not shown)", hidden_columns));
    }
    let hidden_rows = table.row_count().saturating_sub(max_rows);
    if hidden_rows > 0 {
        output.push_str(&format!("\n... ({} more rows not shown)", hidden_rows));
    }
    if hidden_columns > 0 || hidden_rows > 0 {
        output.push('\n');
    }

    output
}

/// One-line shape summary, e.g. `Rows: 3, Columns: 2`
pub fn shape_line(table: &Table) -> String {
    format!("Rows: {}, Columns: {}", table.row_count(), table.column_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates() {
        let names: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
        let mut table = Table::from_names(&names);
        for r in 0..7 {
            table.add_row(names.iter().map(|n| format!("{n}r{r}").into()).collect(), r + 2);
        }

        let out = render_preview(&table, 5, 8);
        assert!(out.contains("c7"));
        assert!(!out.contains("c8"));
        assert!(out.contains("c0r4"));
        assert!(!out.contains("c0r5"));
        assert!(out.contains("2 more columns not shown"));
        assert!(out.contains("2 more rows not shown"));
    }

    #[test]
    fn test_preview_shows_nulls() {
        let mut table = Table::from_names(&["a"]);
        table.add_row(vec![crate::model::CellValue::Null], 2);
        assert!(render_preview(&table, 5, 8).contains("NULL"));
    }
}
