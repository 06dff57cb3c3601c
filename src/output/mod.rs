//! Output: file writing, previews and status lines

mod preview;
mod status;
mod writer;

pub use preview::{render_preview, shape_line};
pub use status::{print_status, write_status, StatusKind};
pub use writer::{delimiter_for, write_table};
