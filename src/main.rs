//! csvtools - console toolkit for inspecting, normalizing and splitting CSV files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use csvtools::commands;
use csvtools::config::{Config, DuplicatePolicy, TimestampPolicy, DEFAULT_TABLE_COLUMN};
use csvtools::inspect::{self, ColumnRef, Edge, DEFAULT_STATS_FILE, DEFAULT_SUGGESTION_FILE};
use csvtools::logging::init_logging;
use csvtools::mapping::DEFAULT_SKELETON_DIR;
use csvtools::output::{print_status, render_preview, shape_line, StatusKind};
use csvtools::{menu, parser};

/// Inspect, normalize and split CSV files
#[derive(Parser, Debug)]
#[command(name = "csvtools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Field delimiter (a single character, or "tab")
    #[arg(long, global = true, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Mapping and table-list column naming the table
    #[arg(long, global = true, default_value = DEFAULT_TABLE_COLUMN)]
    table_column: String,

    /// Mapping and header-file columns naming the source column, most
    /// preferred first (default: columna_normalizada,columna)
    #[arg(long, global = true, value_delimiter = ',')]
    column_preference: Vec<String>,

    /// Rows shown in previews
    #[arg(long, global = true, default_value_t = 5)]
    preview_rows: usize,

    /// Columns shown in previews
    #[arg(long, global = true, default_value_t = 8)]
    preview_columns: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive menu (default)
    Menu,

    /// List the columns of a file
    Columns { input: PathBuf },

    /// Keep the first or last N columns
    SliceColumns {
        input: PathBuf,
        /// Number of columns to keep
        #[arg(short = 'n', long)]
        count: usize,
        /// Take columns from the end instead of the start
        #[arg(long)]
        from_end: bool,
        #[arg(short, long, default_value = "salida.csv")]
        output: PathBuf,
    },

    /// Keep the first or last N rows
    SliceRows {
        input: PathBuf,
        /// Number of rows to keep
        #[arg(short = 'n', long)]
        count: usize,
        /// Take rows from the end instead of the start
        #[arg(long)]
        from_end: bool,
        #[arg(short, long, default_value = "salida.csv")]
        output: PathBuf,
    },

    /// Show an inclusive range of rows (0-based)
    Rows {
        input: PathBuf,
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
    },

    /// Show the rows whose column contains a value (case-insensitive)
    Search {
        input: PathBuf,
        /// Column name or 0-based position
        #[arg(short, long)]
        column: String,
        value: String,
    },

    /// Per-column statistics
    Stats {
        input: PathBuf,
        #[arg(short, long, default_value = DEFAULT_STATS_FILE)]
        output: PathBuf,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize headers and canonicalize timestamp columns
    Normalize {
        input: PathBuf,
        /// Output path (default: <name>_normalizado.csv next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Unparsable timestamps: "coerce" leaves them empty, "strict" fails
        #[arg(long, default_value = "coerce")]
        timestamp_policy: TimestampPolicy,
        /// Colliding headers: "reject" fails, "disambiguate" adds _2, _3, ...
        #[arg(long, default_value = "reject")]
        duplicate_policy: DuplicatePolicy,
        /// Timestamp columns, replacing the built-in list (comma-separated)
        #[arg(long, value_delimiter = ',')]
        timestamp_column: Vec<String>,
    },

    /// Write a header file pairing each column with its normalized name
    SuggestHeaders {
        input: PathBuf,
        #[arg(short, long, default_value = DEFAULT_SUGGESTION_FILE)]
        output: PathBuf,
    },

    /// Keep only the columns listed in a header file
    Project {
        input: PathBuf,
        /// Header file with a columna_normalizada or columna column
        #[arg(long)]
        headers: PathBuf,
        #[arg(short, long, default_value = "salida.csv")]
        output: PathBuf,
    },

    /// Split a file into one file per mapped table
    Split {
        input: PathBuf,
        /// Mapping file (nombre_tabla, columna_normalizada or columna)
        #[arg(short, long)]
        mapping: PathBuf,
        #[arg(short, long, default_value = "tablas")]
        output_dir: PathBuf,
    },

    /// Write header-only files for mapped tables
    Skeleton {
        /// Mapping file (nombre_tabla, columna_normalizada or columna)
        #[arg(short, long)]
        mapping: PathBuf,
        /// File listing the tables to generate (default: every mapped table)
        #[arg(long)]
        tables: Option<PathBuf>,
        #[arg(short, long, default_value = DEFAULT_SKELETON_DIR)]
        output_dir: PathBuf,
    },
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("expected a single ASCII character, got '{}'", s)),
    }
}

fn edge(from_end: bool) -> Edge {
    if from_end {
        Edge::End
    } else {
        Edge::Start
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(complete) => {
            if complete {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Some tables failed
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut config = Config::default()
        .with_table_column(cli.table_column)
        .with_preview(cli.preview_rows, cli.preview_columns);
    if !cli.column_preference.is_empty() {
        config = config.with_column_preference(cli.column_preference);
    }
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter);
    }

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            menu::run(&config)?;
        }

        Command::Columns { input } => {
            let table = parser::load(&input, &config)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            for (i, name) in table.column_names().iter().enumerate() {
                println!("{:3}. {}", i + 1, name);
            }
            println!("Total columns: {}", table.column_count());
        }

        Command::SliceColumns { input, count, from_end, output } => {
            let written = commands::slice_columns_file(&input, count, edge(from_end), &output, &config)
                .with_context(|| format!("Failed to slice columns of {}", input.display()))?;
            report_written(&written);
        }

        Command::SliceRows { input, count, from_end, output } => {
            let written = commands::slice_rows_file(&input, count, edge(from_end), &output, &config)
                .with_context(|| format!("Failed to slice rows of {}", input.display()))?;
            report_written(&written);
        }

        Command::Rows { input, start, end } => {
            let table = parser::load(&input, &config)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let rows = inspect::row_range(&table, start, end)?;
            println!("{}", render_preview(&rows, rows.row_count(), config.preview_columns));
        }

        Command::Search { input, column, value } => {
            let table = parser::load(&input, &config)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let found = inspect::search(&table, &ColumnRef::parse(&column), &value)?;
            if found.row_count() == 0 {
                print_status(StatusKind::Info, "No matches found.");
            } else {
                println!("{}", render_preview(&found, config.preview_rows, config.preview_columns));
                println!("{} matches", found.row_count());
            }
        }

        Command::Stats { input, output, json } => {
            let stats = commands::stats_file(&input, Some(&output), &config)
                .with_context(|| format!("Failed to analyze {}", input.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let table = inspect::stats_table(&stats);
                println!("{}", render_preview(&table, table.row_count(), table.column_count()));
                print_status(StatusKind::Success, &format!("Summary saved to {}", output.display()));
            }
        }

        Command::Normalize {
            input,
            output,
            timestamp_policy,
            duplicate_policy,
            timestamp_column,
        } => {
            config = config
                .with_timestamp_policy(timestamp_policy)
                .with_duplicate_policy(duplicate_policy);
            if !timestamp_column.is_empty() {
                config = config.with_timestamp_columns(timestamp_column);
            }

            let (outcome, path) = commands::normalize_file(&input, output.as_deref(), &config)
                .with_context(|| format!("Failed to normalize {}", input.display()))?;
            for (old, new) in &outcome.renamed {
                println!("  {} -> {}", old, new);
            }
            if outcome.coerced_cells > 0 {
                print_status(
                    StatusKind::Warning,
                    &format!("{} unparsable dates were left empty", outcome.coerced_cells),
                );
            }
            print_status(StatusKind::Success, &format!("Saved as {}", path.display()));
        }

        Command::SuggestHeaders { input, output } => {
            let written = commands::suggest_headers_file(&input, &output, &config)
                .with_context(|| format!("Failed to suggest headers for {}", input.display()))?;
            report_written(&written);
        }

        Command::Project { input, headers, output } => {
            let header_list = inspect::load_header_list(&headers, &config)
                .with_context(|| format!("Failed to read header file {}", headers.display()))?;
            let written = commands::project_file(&input, &header_list, &output, &config)
                .with_context(|| format!("Failed to project {}", input.display()))?;
            report_written(&written);
        }

        Command::Split { input, mapping, output_dir } => {
            let (result, report) = commands::split_file(&input, &mapping, &output_dir, &config)
                .with_context(|| format!("Failed to split {}", input.display()))?;
            for warning in &result.warnings {
                print_status(
                    StatusKind::Warning,
                    &format!("Table '{}': {}", warning.table_name, warning.reason),
                );
            }
            for (table, path) in &report.written {
                print_status(StatusKind::Success, &format!("Table '{}' -> {}", table, path.display()));
            }
            for (table, e) in &report.failed {
                print_status(StatusKind::Failure, &format!("Table '{}': {}", table, e));
            }
            return Ok(report.is_complete());
        }

        Command::Skeleton { mapping, tables, output_dir } => {
            let report = commands::skeleton_files(&mapping, tables.as_deref(), &output_dir, &config)
                .with_context(|| format!("Failed to generate skeletons from {}", mapping.display()))?;
            for (table, _, path) in &report.written {
                print_status(StatusKind::Success, &format!("Table '{}' -> {}", table, path.display()));
            }
            for table in &report.skipped {
                print_status(StatusKind::Warning, &format!("No columns defined for table '{}'", table));
            }
            for (table, e) in &report.failed {
                print_status(StatusKind::Failure, &format!("Table '{}': {}", table, e));
            }
            return Ok(report.failed.is_empty());
        }
    }

    Ok(true)
}

fn report_written(written: &commands::Written) {
    if written.clamped {
        print_status(StatusKind::Warning, "The count exceeds the table; everything was taken.");
    }
    print_status(
        StatusKind::Success,
        &format!("Saved {} ({})", written.path.display(), shape_line(&written.table)),
    );
}
