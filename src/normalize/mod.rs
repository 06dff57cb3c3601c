//! Header normalization: identifiers, timestamps, and the table pipeline

pub mod datetime;
mod headers;
mod identifier;

pub use headers::{default_output_path, normalize_headers, normalized_names, NormalizeOutcome};
pub use identifier::normalize_identifier;
