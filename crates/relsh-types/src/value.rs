//! Typed values for the relsh interpreter.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The closed set of type tags attached to every interpreter value.
///
/// The serde string tags (`"number"`, `"string"`, ...) are the on-disk
/// representation used by the persistent variable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    String,
    Directory,
    File,
    Null,
}

impl DataType {
    /// The string tag used in the persistent variable file.
    pub fn tag(&self) -> &'static str {
        match self {
            DataType::Number => "number",
            DataType::String => "string",
            DataType::Directory => "directory",
            DataType::File => "file",
            DataType::Null => "null",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A value paired with its type tag.
///
/// `Null` means "no value / failure" and is the only variant a failed
/// operation may produce. Directory and file values hold absolute,
/// on-disk-case-normalized paths.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Number(f64),
    Str(String),
    Directory(PathBuf),
    File(PathBuf),
    Null,
}

impl TypedValue {
    /// The type tag of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            TypedValue::Number(_) => DataType::Number,
            TypedValue::Str(_) => DataType::String,
            TypedValue::Directory(_) => DataType::Directory,
            TypedValue::File(_) => DataType::File,
            TypedValue::Null => DataType::Null,
        }
    }

    /// True if this is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Format a number the way the shell displays it: integral values
    /// always show one decimal place (`5` renders as `5.0`).
    pub fn format_number(n: f64) -> String {
        if n.is_finite() && n == n.trunc() {
            format!("{:.1}", n)
        } else {
            n.to_string()
        }
    }

    /// User-facing rendering, used when a result is announced.
    pub fn display(&self) -> String {
        match self {
            TypedValue::Number(n) => Self::format_number(*n),
            TypedValue::Str(s) => s.clone(),
            TypedValue::Directory(p) | TypedValue::File(p) => p.display().to_string(),
            TypedValue::Null => "NULL".to_string(),
        }
    }

    /// Convert to the persistent-file record.
    pub fn to_stored(&self) -> StoredValue {
        let value = match self {
            TypedValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TypedValue::Str(s) => serde_json::Value::String(s.clone()),
            TypedValue::Directory(p) | TypedValue::File(p) => {
                serde_json::Value::String(p.display().to_string())
            }
            TypedValue::Null => serde_json::Value::Null,
        };
        StoredValue {
            value,
            data_type: self.data_type(),
        }
    }

    /// Rebuild a value from a persistent-file record.
    ///
    /// Returns `None` if the payload does not match the recorded tag,
    /// which callers treat as a corrupt entry.
    pub fn from_stored(stored: &StoredValue) -> Option<TypedValue> {
        match stored.data_type {
            DataType::Number => stored.value.as_f64().map(TypedValue::Number),
            DataType::String => stored
                .value
                .as_str()
                .map(|s| TypedValue::Str(s.to_string())),
            DataType::Directory => stored
                .value
                .as_str()
                .map(|s| TypedValue::Directory(PathBuf::from(s))),
            DataType::File => stored
                .value
                .as_str()
                .map(|s| TypedValue::File(PathBuf::from(s))),
            DataType::Null => Some(TypedValue::Null),
        }
    }
}

impl Default for TypedValue {
    fn default() -> Self {
        TypedValue::Null
    }
}

/// One entry of the persistent variable file:
/// `{"value": ..., "type": "number" | "string" | ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub data_type: DataType,
}
