//! Blocking prompts used by the menu actions

use std::path::PathBuf;

use anyhow::Result;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::inspect::Edge;

pub(crate) fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Ask for a path to an existing file, re-prompting until one is given
pub(crate) fn existing_file(prompt: &str) -> Result<PathBuf> {
    let raw: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if PathBuf::from(input.trim()).is_file() {
                Ok(())
            } else {
                Err("the file does not exist, try again")
            }
        })
        .interact_text()?;
    Ok(PathBuf::from(raw.trim()))
}

/// Ask for a path, falling back to `default` on an empty answer
pub(crate) fn path_or_default(prompt: &str, default: &str) -> Result<PathBuf> {
    let raw: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(PathBuf::from(raw.trim()))
}

/// Ask for an optional path; empty means none
pub(crate) fn optional_path(prompt: &str) -> Result<Option<PathBuf>> {
    let raw: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| PathBuf::from(raw)))
}

/// Ask for free text
pub(crate) fn text(prompt: &str) -> Result<String> {
    let raw: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(raw.trim().to_string())
}

/// Ask for a number greater than zero
pub(crate) fn positive(prompt: &str) -> Result<usize> {
    let n: usize = Input::with_theme(&theme())
        .with_prompt(prompt)
        .validate_with(|n: &usize| -> Result<(), &str> {
            if *n > 0 {
                Ok(())
            } else {
                Err("enter a number greater than zero")
            }
        })
        .interact_text()?;
    Ok(n)
}

/// Ask for any non-negative number
pub(crate) fn number(prompt: &str) -> Result<usize> {
    Ok(Input::with_theme(&theme()).with_prompt(prompt).interact_text()?)
}

/// Ask which end of the table to take from
pub(crate) fn edge(what: &str) -> Result<Edge> {
    let items = [
        format!("From the start (first N {})", what),
        format!("From the end (last N {})", what),
    ];
    let choice = Select::with_theme(&theme())
        .with_prompt("Where should the slice start?")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(if choice == 0 { Edge::Start } else { Edge::End })
}

/// Pick one entry of a menu
pub(crate) fn choose(prompt: &str, items: &[&str]) -> Result<usize> {
    Ok(Select::with_theme(&theme())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// Yes/no question
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .default(true)
        .interact()?)
}

/// Wait for ENTER before returning to the menu
pub(crate) fn pause() -> Result<()> {
    let term = Term::stdout();
    term.write_line("\nPress ENTER to return to the menu...")?;
    term.read_line()?;
    Ok(())
}

/// Clear the terminal, ignoring terminals that cannot be cleared
pub(crate) fn clear() {
    let _ = Term::stdout().clear_screen();
}
