use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::schema::FieldType;

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::String(_) => FieldType::String,
            Value::Integer(_) => FieldType::Integer,
            Value::Boolean(_) => FieldType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a TOML literal: strings quoted and escaped.
    pub fn to_toml_literal(&self) -> String {
        toml_edit::Value::from(self).to_string()
    }
}

/// Plain text, as shown in a form field. Strings are not quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&Value> for toml_edit::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => toml_edit::Value::from(s.as_str()),
            Value::Integer(i) => toml_edit::Value::from(*i),
            Value::Boolean(b) => toml_edit::Value::from(*b),
        }
    }
}

/// Where the config file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Current working directory.
    Cwd,
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// An explicit directory.
    Path(PathBuf),
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Grouped form view of every field.
    Show,
    /// Flat listing of effective values.
    List,
    Get {
        key: String,
    },
    /// Apply `(key, raw text)` edits and save.
    Set {
        assignments: Vec<(String, String)>,
    },
    /// Put one key, or all keys when `None`, back to the default and save.
    Reset {
        key: Option<String>,
    },
    /// Print the file exactly as stored.
    Raw,
    Gen {
        output: Option<PathBuf>,
    },
}
