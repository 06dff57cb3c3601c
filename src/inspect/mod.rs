//! Inspection operations: slicing, search, statistics and header files

mod headers;
mod search;
mod slice;
mod stats;

pub use headers::{
    header_list_from_table, load_header_list, project_with_headers, suggest_headers,
    DEFAULT_SUGGESTION_FILE, NORMALIZED_COLUMN, ORIGINAL_COLUMN,
};
pub use search::{search, ColumnRef};
pub use slice::{parse_positions, row_range, select_by_positions, slice_columns, slice_rows, Edge, Sliced};
pub use stats::{column_stats, stats_table, ColumnStats, DEFAULT_STATS_FILE};
