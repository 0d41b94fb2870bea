//! The in-memory configuration document.
//!
//! A [`ConfigDocument`] is a sparse map from schema [`Key`] to typed
//! [`Value`]. Absent keys read as their declared default. The document is
//! never edited in place: a new one is decoded from a file or built from a
//! complete set of form values with [`ConfigDocument::replace_all`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use toml::Table;

use crate::coerce::{self, FormValue};
use crate::error::NavicfgError;
use crate::file;
use crate::persist;
use crate::schema::Key;
use crate::types::Value;
use crate::validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    entries: BTreeMap<Key, Value>,
}

impl ConfigDocument {
    /// A document with every key absent; every `get` returns the default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the document at `path`, dropping unknown keys with a warning.
    ///
    /// A missing file yields an empty document. Malformed content is an error.
    pub fn load(path: &Path) -> Result<Self, NavicfgError> {
        Self::load_with(path, false)
    }

    /// Like [`load`](Self::load), but in strict mode unknown keys are an error.
    pub fn load_with(path: &Path, strict: bool) -> Result<Self, NavicfgError> {
        match file::read_optional(path)? {
            Some(content) => Self::decode(&content, path, strict),
            None => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::empty())
            }
        }
    }

    /// Decode TOML text. `path` is only used in error messages.
    pub fn decode(content: &str, path: &Path, strict: bool) -> Result<Self, NavicfgError> {
        let table: Table = toml::from_str(content).map_err(|e| NavicfgError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let unknown = validate::unknown_keys(&table, content, path);
        if !unknown.is_empty() {
            if strict {
                return Err(NavicfgError::UnknownKeys(unknown));
            }
            for err in &unknown {
                tracing::warn!("{err}; it will not be kept on save");
            }
        }

        let mut entries = BTreeMap::new();
        for (name, raw) in &table {
            let Some(key) = Key::from_name(name) else {
                continue;
            };
            if let Some(value) = typed_value(key, raw, path, strict)? {
                entries.insert(key, value);
            }
        }

        tracing::debug!(path = %path.display(), keys = entries.len(), "decoded config");
        Ok(Self { entries })
    }

    /// Encode as TOML text, grouped by form section.
    pub fn encode(&self) -> String {
        persist::encode(self)
    }

    /// Write the document to `path`, replacing whatever is there.
    pub fn save(&self, path: &Path) -> Result<(), NavicfgError> {
        persist::save(self, path)
    }

    /// The stored value for `key`, or its declared default.
    ///
    /// `None` only for optional keys that are unset.
    pub fn get(&self, key: Key) -> Option<Value> {
        self.entries
            .get(&key)
            .cloned()
            .or_else(|| key.default_value())
    }

    /// The stored value, without falling back to the default.
    pub fn stored(&self, key: Key) -> Option<&Value> {
        self.entries.get(&key)
    }

    pub fn is_set(&self, key: Key) -> bool {
        self.entries.contains_key(&key)
    }

    /// Stored entries in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (Key, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a new document from form values.
    ///
    /// Every pair is coerced to its key's type. Blank optional paths are left
    /// out. If any value fails to coerce the whole call fails and nothing is
    /// produced. Later pairs for the same key win.
    pub fn replace_all<I, V>(pairs: I) -> Result<Self, NavicfgError>
    where
        I: IntoIterator<Item = (Key, V)>,
        V: Into<FormValue>,
    {
        let mut entries = BTreeMap::new();
        for (key, value) in pairs {
            match coerce::coerce(key, value.into())? {
                Some(v) => {
                    entries.insert(key, v);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
        tracing::debug!(keys = entries.len(), "built config from form values");
        Ok(Self { entries })
    }
}

/// Coerce a stored scalar the way a form value is coerced, so `Port = "4600"`
/// reads as an integer and `MusicFolder = 1` as text.
///
/// Arrays, tables and datetimes are always an error. A scalar that does not
/// coerce (`SessionTimeout = "24h"`) is an error in strict mode; otherwise the
/// key is dropped with a warning and reads as its default.
fn typed_value(
    key: Key,
    raw: &toml::Value,
    path: &Path,
    strict: bool,
) -> Result<Option<Value>, NavicfgError> {
    let mistyped = || NavicfgError::MistypedValue {
        key: key.name().to_string(),
        path: path.to_path_buf(),
        expected: key.field_type(),
        found: raw.type_str(),
    };

    let form = match raw {
        toml::Value::String(s) => FormValue::Text(s.clone()),
        toml::Value::Integer(i) => FormValue::Integer(*i),
        toml::Value::Boolean(b) => FormValue::Flag(*b),
        toml::Value::Float(f) => FormValue::Text(f.to_string()),
        toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => {
            return Err(mistyped());
        }
    };

    match coerce::coerce(key, form) {
        Ok(value) => Ok(value),
        Err(_) if strict => Err(mistyped()),
        Err(e) => {
            tracing::warn!(path = %path.display(), key = key.name(), "{e}; using the default");
            Ok(None)
        }
    }
}
