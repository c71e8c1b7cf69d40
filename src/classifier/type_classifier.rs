use serde::Serialize;
use std::fmt;

const NUMERIC_TYPES: &[&str] = &["INT4", "INT8", "INTEGER", "INT"];
const TEXTUAL_TYPES: &[&str] = &["VARCHAR", "BPCHAR", "TEXT"];
const BOOLEAN_TYPES: &[&str] = &["BOOL", "BOOLEAN"];
const TEMPORAL_TYPES: &[&str] = &["DATE", "TIMESTAMP"];

/// Coarse semantic bucket of a SQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    /// `INT4`, `INT8`, `INTEGER`, `INT`
    Numeric,
    /// `VARCHAR`, `BPCHAR`, `TEXT`
    Textual,
    /// `BOOL`, `BOOLEAN`
    Boolean,
    /// `DATE`, `TIMESTAMP`
    Temporal,
    /// Anything else. Emitters render it as text.
    Unknown,
}

impl TypeCategory {
    /// TypeScript type used for generated properties.
    pub fn ts_type(self) -> &'static str {
        match self {
            TypeCategory::Numeric => "number",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Textual | TypeCategory::Temporal | TypeCategory::Unknown => "string",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Numeric => write!(f, "numeric"),
            TypeCategory::Textual => write!(f, "textual"),
            TypeCategory::Boolean => write!(f, "boolean"),
            TypeCategory::Temporal => write!(f, "temporal"),
            TypeCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a raw SQL type token, case-insensitively.
pub fn classify(raw_type: &str) -> TypeCategory {
    let upper = raw_type.to_uppercase();
    let upper = upper.as_str();
    if NUMERIC_TYPES.contains(&upper) {
        TypeCategory::Numeric
    } else if TEXTUAL_TYPES.contains(&upper) {
        TypeCategory::Textual
    } else if BOOLEAN_TYPES.contains(&upper) {
        TypeCategory::Boolean
    } else if TEMPORAL_TYPES.contains(&upper) {
        TypeCategory::Temporal
    } else {
        TypeCategory::Unknown
    }
}
