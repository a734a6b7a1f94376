//! The single error type raised while loading `tags.json`

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::config::FILENAME;

/// Raised when the configuration is missing, has JSON syntax errors, has the wrong
/// shape, is missing required keys, or has values of the wrong type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {} in {}.", FILENAME, .dir.display())]
    Missing { dir: PathBuf },

    #[error("Cannot open {} in {}: {}", FILENAME, .dir.display(), .source)]
    Unreadable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {} in {}.", FILENAME, .dir.display())]
    Malformed {
        dir: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected structure in {}: {}", FILENAME, .0)]
    Shape(#[source] serde_json::Error),

    /// A `tags` entry (0-based) has a shortcut but no name
    #[error("All tags require a '{}'. Entry {} has none.", crate::constants::keys::NAME, .index + 1)]
    MissingName { index: usize },

    #[error("Invalid type for '{field}'. Expected {expected}, found {found}.")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// JSON type name used in `InvalidType` messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
