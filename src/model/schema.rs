//! Column metadata and inferred cell types

use serde::Serialize;

/// Type of a cell as inferred from its text
///
/// `Mixed` only arises when a column combines incompatible types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
    Mixed,
}

impl CellType {
    /// Lowercase name used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Null => "null",
            CellType::Bool => "bool",
            CellType::Int => "int",
            CellType::Float => "float",
            CellType::String => "string",
            CellType::Date => "date",
            CellType::DateTime => "datetime",
            CellType::Mixed => "mixed",
        }
    }

    /// Smallest type covering both `self` and `other`
    ///
    /// Nulls never change a column's type; ints widen to floats and dates
    /// to date-times.
    pub fn widen(self, other: CellType) -> CellType {
        use CellType::*;

        match (self, other) {
            (a, b) if a == b => a,
            (Null, t) | (t, Null) => t,
            (Int | Float, Int | Float) => Float,
            (Date | DateTime, Date | DateTime) => DateTime,
            _ => Mixed,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named column at a fixed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// 0-based position in the table
    pub index: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen() {
        assert_eq!(CellType::Null.widen(CellType::Int), CellType::Int);
        assert_eq!(CellType::Bool.widen(CellType::Null), CellType::Bool);
        assert_eq!(CellType::Float.widen(CellType::Int), CellType::Float);
        assert_eq!(CellType::Date.widen(CellType::DateTime), CellType::DateTime);
        assert_eq!(CellType::Int.widen(CellType::String), CellType::Mixed);
        assert_eq!(CellType::Mixed.widen(CellType::Int), CellType::Mixed);
    }

    #[test]
    fn test_report_names() {
        assert_eq!(CellType::DateTime.to_string(), "datetime");
        assert_eq!(
            serde_json::to_value(CellType::DateTime).unwrap(),
            serde_json::json!("datetime")
        );
    }
}
