//! Configuration handling for csvtools

/// Timestamp columns recognized by default, already in normalized form
pub const DEFAULT_TIMESTAMP_COLUMNS: [&str; 5] = [
    "marca_temporal",
    "fecha_de_reparacion",
    "fecha_de_entrega",
    "timestampreparacion",
    "timestamplista",
];

/// Column holding the table name in a mapping file
pub const DEFAULT_TABLE_COLUMN: &str = "nombre_tabla";

/// Columns holding the source column name in a mapping or header file,
/// most preferred first
pub const DEFAULT_COLUMN_PREFERENCE: [&str; 2] = ["columna_normalizada", "columna"];

/// What to do with a timestamp cell that cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampPolicy {
    /// Replace the cell with a missing value
    #[default]
    Coerce,
    /// Fail the whole operation
    Strict,
}

/// What to do when two headers normalize to the same identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with a duplicate column error
    #[default]
    Reject,
    /// Suffix later duplicates with `_2`, `_3`, ...
    Disambiguate,
}

impl std::str::FromStr for TimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coerce" => Ok(TimestampPolicy::Coerce),
            "strict" => Ok(TimestampPolicy::Strict),
            _ => Err(format!("Unknown timestamp policy: {}", s)),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "disambiguate" => Ok(DuplicatePolicy::Disambiguate),
            _ => Err(format!("Unknown duplicate policy: {}", s)),
        }
    }
}

/// Configuration shared by all operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Field delimiter; `None` picks one from the file extension
    pub delimiter: Option<u8>,
    /// Normalized names of columns holding timestamps
    pub timestamp_columns: Vec<String>,
    /// Handling of unparsable timestamp cells
    pub timestamp_policy: TimestampPolicy,
    /// Handling of colliding normalized headers
    pub duplicate_policy: DuplicatePolicy,
    /// Mapping file column naming the target table
    pub table_column: String,
    /// Mapping file columns naming the source column, most preferred first
    pub column_preference: Vec<String>,
    /// Rows shown in a preview
    pub preview_rows: usize,
    /// Columns shown in a preview
    pub preview_columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: None,
            timestamp_columns: DEFAULT_TIMESTAMP_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timestamp_policy: TimestampPolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
            table_column: DEFAULT_TABLE_COLUMN.to_string(),
            column_preference: DEFAULT_COLUMN_PREFERENCE
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preview_rows: 5,
            preview_columns: 8,
        }
    }
}

impl Config {
    /// Force a field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Replace the set of timestamp columns
    pub fn with_timestamp_columns(mut self, columns: Vec<String>) -> Self {
        self.timestamp_columns = columns;
        self
    }

    /// Set the timestamp policy
    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_policy = policy;
        self
    }

    /// Set the duplicate header policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the mapping table column
    pub fn with_table_column(mut self, column: impl Into<String>) -> Self {
        self.table_column = column.into();
        self
    }

    /// Set the column preference list
    pub fn with_column_preference(mut self, preference: Vec<String>) -> Self {
        self.column_preference = preference;
        self
    }

    /// Set preview limits
    pub fn with_preview(mut self, rows: usize, columns: usize) -> Self {
        self.preview_rows = rows;
        self.preview_columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timestamp_columns.len(), 5);
        assert_eq!(config.table_column, "nombre_tabla");
        assert_eq!(config.column_preference, vec!["columna_normalizada", "columna"]);
        assert_eq!(config.timestamp_policy, TimestampPolicy::Coerce);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("STRICT".parse::<TimestampPolicy>(), Ok(TimestampPolicy::Strict));
        assert_eq!(
            "disambiguate".parse::<DuplicatePolicy>(),
            Ok(DuplicatePolicy::Disambiguate)
        );
        assert!("sometimes".parse::<TimestampPolicy>().is_err());
    }
}
