//! Menu actions: collect input, run one operation, report the outcome

use std::path::Path;

use anyhow::Result;

use crate::commands;
use crate::config::Config;
use crate::inspect::{self, ColumnRef, DEFAULT_STATS_FILE, DEFAULT_SUGGESTION_FILE};
use crate::mapping::DEFAULT_SKELETON_DIR;
use crate::model::Table;
use crate::output::{print_status, render_preview, shape_line, write_table, StatusKind};
use crate::parser;
use crate::session::Session;

use super::prompt;

fn preview(table: &Table, config: &Config) {
    println!("{}", render_preview(table, config.preview_rows, config.preview_columns));
    println!("{}", shape_line(table));
}

fn print_columns(table: &Table, first: usize) {
    for (i, column) in table.columns.iter().enumerate() {
        println!("{:3}. {}", i + first, column.name);
    }
}

pub(crate) fn slice_columns(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;
    let count = prompt::positive("How many columns do you want to extract?")?;
    let edge = prompt::edge("columns")?;
    let output = prompt::path_or_default("Output file name", "salida.csv")?;

    let sliced = inspect::slice_columns(&table, count, edge)?;
    if sliced.clamped {
        print_status(StatusKind::Warning, "The count exceeds the available columns; taking all of them.");
    }
    save_after_preview(&sliced.table, &output, config)
}

pub(crate) fn slice_rows(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;
    let count = prompt::positive("How many rows do you want to extract?")?;
    let edge = prompt::edge("rows")?;
    let output = prompt::path_or_default("Output file name", "salida.csv")?;

    let sliced = inspect::slice_rows(&table, count, edge)?;
    if sliced.clamped {
        print_status(StatusKind::Warning, "The count exceeds the available rows; taking all of them.");
    }
    save_after_preview(&sliced.table, &output, config)
}

fn save_after_preview(table: &Table, output: &Path, config: &Config) -> Result<()> {
    prompt::clear();
    println!("\nPreview of the extracted data:\n");
    preview(table, config);

    if prompt::confirm("Save the file?")? {
        write_table(table, output, config.delimiter)?;
        print_status(
            StatusKind::Success,
            &format!("Saved {} ({})", output.display(), shape_line(table)),
        );
    }
    Ok(())
}

pub(crate) fn statistics(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file to analyze")?;
    let output = Path::new(DEFAULT_STATS_FILE);
    let stats = commands::stats_file(&input, Some(output), config)?;

    let table = inspect::stats_table(&stats);
    println!("{}", render_preview(&table, table.row_count(), table.column_count()));
    print_status(StatusKind::Success, &format!("Summary saved to {}", output.display()));
    Ok(())
}

pub(crate) fn list_columns(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;

    println!("\nColumns found:\n{}", "=".repeat(40));
    print_columns(&table, 1);
    println!("{}", "=".repeat(40));
    println!("Total columns: {}", table.column_count());
    Ok(())
}

pub(crate) fn row_range(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;
    println!("\nThe file has {} rows.", table.row_count());

    loop {
        let start = prompt::number("First row (0 is the first)")?;
        let end = prompt::number(&format!(
            "Last row (at most {})",
            table.row_count().saturating_sub(1)
        ))?;

        match inspect::row_range(&table, start, end) {
            Ok(rows) => {
                prompt::clear();
                println!("\nRows {} to {}:\n", start, end);
                println!("{}", render_preview(&rows, rows.row_count(), config.preview_columns));
                println!("{}", shape_line(&rows));
                return Ok(());
            }
            Err(e) if table.row_count() > 0 => print_status(StatusKind::Warning, &e.to_string()),
            Err(e) => return Err(e.into()),
        }
    }
}

pub(crate) fn search(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;

    println!("\nAvailable columns:");
    print_columns(&table, 0);
    let column = ColumnRef::parse(&prompt::text("Column number (or name) to search")?);
    let needle = prompt::text("Value to search for")?;

    let found = inspect::search(&table, &column, &needle)?;
    if found.row_count() == 0 {
        print_status(StatusKind::Info, "No matches found.");
    } else {
        println!("\nRows containing '{}':\n", needle);
        preview(&found, config);
        print_status(StatusKind::Success, &format!("{} matches", found.row_count()));
    }
    Ok(())
}

pub(crate) fn normalize_headers(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file to normalize")?;
    let output = prompt::optional_path("Output path (ENTER for <name>_normalizado.csv)")?;

    let (outcome, path) = commands::normalize_file(&input, output.as_deref(), config)?;
    for (old, new) in &outcome.renamed {
        println!("  {} -> {}", old, new);
    }
    if !outcome.timestamp_columns.is_empty() {
        println!("Timestamp columns: {}", outcome.timestamp_columns.join(", "));
    }
    if outcome.coerced_cells > 0 {
        print_status(
            StatusKind::Warning,
            &format!("{} unparsable dates were left empty", outcome.coerced_cells),
        );
    }
    print_status(StatusKind::Success, &format!("Saved as {}", path.display()));
    Ok(())
}

pub(crate) fn cut_columns(config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;

    println!("\nAvailable columns:");
    print_columns(&table, 1);
    let name = prompt::text("Name of the file to create (without .csv)")?;
    let positions = inspect::parse_positions(&prompt::text(
        "Column NUMBERS to keep, comma separated (e.g. 1,3,5)",
    )?)?;

    let output = format!("{}.csv", if name.is_empty() { "salida" } else { &name });
    let written = commands::select_positions_file(&input, &positions, Path::new(&output), config)?;
    print_status(
        StatusKind::Success,
        &format!(
            "Created {} with columns: {}",
            written.path.display(),
            written.table.column_names().join(", ")
        ),
    );
    Ok(())
}

pub(crate) fn suggest_headers(session: &mut Session, config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the CSV file")?;
    let table = parser::load(&input, config)?;
    let suggestion = inspect::suggest_headers(&table);

    println!("\nDetected headers:\n");
    println!("{}", render_preview(&suggestion, suggestion.row_count(), 2));

    let output = prompt::path_or_default("Where should the suggestion be saved?", DEFAULT_SUGGESTION_FILE)?;
    write_table(&suggestion, &output, config.delimiter)?;
    print_status(StatusKind::Success, &format!("Headers saved to {}", output.display()));
    session.record_suggestion(output);
    Ok(())
}

pub(crate) fn view_header_file(session: &Session, config: &Config) -> Result<()> {
    if let Some(last) = session.last_suggestion() {
        println!("Last suggestion saved to {}", last.display());
    }
    let input = prompt::existing_file("Path of the header file to view")?;
    let table = parser::load(&input, config)?;
    println!("{}", render_preview(&table, table.row_count(), table.column_count()));
    Ok(())
}

pub(crate) fn load_headers(session: &mut Session, config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the custom header file")?;
    let loaded = session.load_headers(&input, config)?;

    println!("\nHeaders loaded ({} columns):", loaded.columns.len());
    for column in &loaded.columns {
        println!("- {}", column);
    }
    Ok(())
}

pub(crate) fn view_loaded_headers(session: &Session) -> Result<()> {
    match session.loaded_headers() {
        Some(loaded) => {
            println!("Headers loaded from {}:", loaded.source.display());
            for column in &loaded.columns {
                println!("- {}", column);
            }
        }
        None => print_status(
            StatusKind::Info,
            "No headers loaded yet. Use the load option first.",
        ),
    }
    Ok(())
}

pub(crate) fn project_columns(session: &Session, config: &Config) -> Result<()> {
    let input = prompt::existing_file("Path of the original data file")?;

    let headers = match session.loaded_headers() {
        Some(loaded)
            if prompt::choose(
                "Which headers should be kept?",
                &["Headers loaded in this session", "Headers from a file"],
            )? == 0 =>
        {
            loaded.columns.clone()
        }
        _ => {
            let header_file =
                prompt::existing_file("Path of the header file (columna_normalizada or columna)")?;
            inspect::load_header_list(&header_file, config)?
        }
    };

    let output = prompt::path_or_default("Path for the filtered file", "salida.csv")?;
    let written = commands::project_file(&input, &headers, &output, config)?;
    print_status(
        StatusKind::Success,
        &format!("Saved {} ({})", written.path.display(), shape_line(&written.table)),
    );
    Ok(())
}

pub(crate) fn skeletons(config: &Config) -> Result<()> {
    let mapping = prompt::existing_file("Path of the column mapping (nombre_tabla,columna)")?;
    let tables = prompt::optional_path("Path of the table list (ENTER for every mapped table)")?;
    let output_dir = prompt::path_or_default("Output folder", DEFAULT_SKELETON_DIR)?;

    let report = commands::skeleton_files(&mapping, tables.as_deref(), &output_dir, config)?;
    for (table, columns, path) in &report.written {
        print_status(
            StatusKind::Success,
            &format!("Table '{}': {} -> {}", table, columns.join(", "), path.display()),
        );
    }
    for table in &report.skipped {
        print_status(StatusKind::Warning, &format!("No columns defined for table '{}'", table));
    }
    for (table, e) in &report.failed {
        print_status(StatusKind::Failure, &format!("Table '{}': {}", table, e));
    }
    Ok(())
}

pub(crate) fn split_tables(config: &Config) -> Result<()> {
    let data = prompt::existing_file("Path of the original data file")?;
    let output_dir = prompt::path_or_default("Folder for the per-table files", "tablas")?;
    let mapping = prompt::existing_file("Path of the mapping file (nombre_tabla,columna)")?;

    let (result, report) = commands::split_file(&data, &mapping, &output_dir, config)?;
    for warning in &result.warnings {
        print_status(
            StatusKind::Warning,
            &format!("Table '{}': {}", warning.table_name, warning.reason),
        );
    }
    for (table, path) in &report.written {
        let columns = result
            .tables
            .get(table.as_str())
            .map(|t| t.column_names().join(", "))
            .unwrap_or_default();
        print_status(
            StatusKind::Success,
            &format!("Table '{}' saved to {} with columns: {}", table, path.display(), columns),
        );
    }
    for (table, e) in &report.failed {
        print_status(StatusKind::Failure, &format!("Table '{}': {}", table, e));
    }
    println!("\nProcess complete.");
    Ok(())
}
