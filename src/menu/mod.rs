//! Interactive console menu
//!
//! Every action runs to completion or reports its error; either way the
//! operator lands back on the menu it was started from.

mod actions;
mod prompt;

use anyhow::Result;
use console::style;
use tracing::debug;

use crate::config::Config;
use crate::output::{print_status, StatusKind};
use crate::session::Session;

const MAIN_MENU: [&str; 5] = [
    "Get data",
    "View data",
    "Normalize",
    "Headers & tables",
    "Exit",
];

const GET_MENU: [&str; 4] = [
    "Extract columns",
    "Extract rows",
    "Basic statistics",
    "Back",
];

const VIEW_MENU: [&str; 4] = [
    "List columns",
    "Show a range of rows",
    "Search a value in a column",
    "Back",
];

const NORMALIZE_MENU: [&str; 3] = ["Normalize headers", "Cut columns by position", "Back"];

const HEADERS_MENU: [&str; 8] = [
    "Suggest headers from a file",
    "View a header file",
    "Load custom headers",
    "View loaded headers",
    "Keep only the chosen headers",
    "Generate table skeletons",
    "Split data by tables",
    "Back",
];

fn banner() {
    println!("{}", style("=".repeat(50)).cyan());
    println!("{}", style("CSV console toolkit").bold());
    println!("{}", style("=".repeat(50)).cyan());
}

/// Run one action, report its failure and wait for the operator
fn perform(action: impl FnOnce() -> Result<()>) -> Result<()> {
    if let Err(e) = action() {
        debug!(error = ?e, "menu action failed");
        print_status(StatusKind::Failure, &format!("{:#}", e));
    }
    prompt::pause()
}

/// Show a submenu until the operator picks its last entry
fn submenu(title: &str, items: &[&str], mut dispatch: impl FnMut(usize) -> Result<()>) -> Result<()> {
    loop {
        prompt::clear();
        banner();
        let choice = prompt::choose(title, items)?;
        if choice + 1 == items.len() {
            return Ok(());
        }
        perform(|| dispatch(choice))?;
    }
}

/// Run the menu until the operator exits
///
/// Returns an error only when the terminal itself fails.
pub fn run(config: &Config) -> Result<()> {
    let mut session = Session::new();

    loop {
        prompt::clear();
        banner();
        match prompt::choose("Main menu", &MAIN_MENU)? {
            0 => submenu("Get data", &GET_MENU, |choice| match choice {
                0 => actions::slice_columns(config),
                1 => actions::slice_rows(config),
                _ => actions::statistics(config),
            })?,
            1 => submenu("View data", &VIEW_MENU, |choice| match choice {
                0 => actions::list_columns(config),
                1 => actions::row_range(config),
                _ => actions::search(config),
            })?,
            2 => submenu("Normalize", &NORMALIZE_MENU, |choice| match choice {
                0 => actions::normalize_headers(config),
                _ => actions::cut_columns(config),
            })?,
            3 => submenu("Headers & tables", &HEADERS_MENU, |choice| match choice {
                0 => actions::suggest_headers(&mut session, config),
                1 => actions::view_header_file(&session, config),
                2 => actions::load_headers(&mut session, config),
                3 => actions::view_loaded_headers(&session),
                4 => actions::project_columns(&session, config),
                5 => actions::skeletons(config),
                _ => actions::split_tables(config),
            })?,
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}
