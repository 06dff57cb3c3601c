//! csvtools - console toolkit for CSV files
//!
//! Slices rows and columns, computes per-column statistics, searches
//! values, normalizes headers and splits one wide CSV into several
//! narrower ones according to a table-to-column mapping.

pub mod commands;
pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod mapping;
pub mod menu;
pub mod model;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use mapping::{split, TableMapping};
pub use model::Table;
pub use normalize::{normalize_headers, normalize_identifier};
