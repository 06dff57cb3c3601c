//! Column-to-table mappings: loading, splitting and skeleton generation

mod loader;
mod split;
mod structure;

pub use loader::{load_mapping, mapping_from_table, resolve_column, TableMapping};
pub use split::{
    split, table_output_path, write_split, SplitResult, SplitWarning, WriteReport,
    NO_MATCHING_COLUMNS,
};
pub use structure::{load_table_list, write_skeletons, SkeletonReport, DEFAULT_SKELETON_DIR};
