use std::path::PathBuf;
use thiserror::Error;

use crate::schema::FieldType;

/// Coarse classification of a [`NavicfgError`], for callers that present
/// errors differently depending on where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stored document could not be decoded.
    Decode,
    /// A form value could not be coerced to its key's type.
    Validation,
    /// A filesystem or terminal read/write failed.
    Io,
    /// The caller asked for something that does not exist.
    Usage,
}

#[derive(Debug, Error)]
pub enum NavicfgError {
    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Wrong type for '{key}' in {path}: expected {expected}, found {found}")]
    MistypedValue {
        key: String,
        path: PathBuf,
        expected: FieldType,
        found: &'static str,
    },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file: {}", list_keys(.0))]
    UnknownKeys(Vec<NavicfgError>),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Terminal I/O failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Could not determine the platform config directory")]
    NoConfigLocation,
}

impl NavicfgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavicfgError::ParseError { .. }
            | NavicfgError::MistypedValue { .. }
            | NavicfgError::UnknownKey { .. }
            | NavicfgError::UnknownKeys(_) => ErrorKind::Decode,
            NavicfgError::InvalidValue { .. } => ErrorKind::Validation,
            NavicfgError::IoError { .. }
            | NavicfgError::WriteError { .. }
            | NavicfgError::Prompt(_) => ErrorKind::Io,
            NavicfgError::KeyNotFound(_) | NavicfgError::NoConfigLocation => ErrorKind::Usage,
        }
    }
}

fn list_keys(errors: &[NavicfgError]) -> String {
    errors
        .iter()
        .map(|e| match e {
            NavicfgError::UnknownKey { key, line, .. } => format!("'{key}' (line {line})"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_formats_correctly() {
        let err = NavicfgError::UnknownKey {
            key: "Scanner.Extractor".into(),
            path: "/srv/navidrome/navidrome.toml".into(),
            line: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("Scanner.Extractor"));
        assert!(msg.contains("navidrome.toml"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn unknown_keys_lists_every_key() {
        let err = NavicfgError::UnknownKeys(vec![
            NavicfgError::UnknownKey {
                key: "Foo".into(),
                path: "a.toml".into(),
                line: 1,
            },
            NavicfgError::UnknownKey {
                key: "Bar".into(),
                path: "a.toml".into(),
                line: 3,
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("'Foo' (line 1)"));
        assert!(msg.contains("'Bar' (line 3)"));
    }

    #[test]
    fn mistyped_value_names_both_types() {
        let err = NavicfgError::MistypedValue {
            key: "Port".into(),
            path: "navidrome.toml".into(),
            expected: FieldType::Integer,
            found: "string",
        };
        let msg = err.to_string();
        assert!(msg.contains("Port"));
        assert!(msg.contains("integer"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn kinds_follow_the_error_families() {
        let invalid = NavicfgError::InvalidValue {
            key: "Port".into(),
            reason: "not a number".into(),
        };
        assert_eq!(invalid.kind(), ErrorKind::Validation);
        assert_eq!(
            NavicfgError::KeyNotFound("Nope".into()).kind(),
            ErrorKind::Usage
        );
        let io = NavicfgError::WriteError {
            path: "x".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(io.kind(), ErrorKind::Io);
    }
}
