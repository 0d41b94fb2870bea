//! Config operations: template generation, key lookup, listing, the grouped
//! form view, and the result types callers display.
//!
//! Everything here is pure: it reads a [`ConfigDocument`] and the schema and
//! returns a [`ConfigResult`]. File access lives in the session.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::document::ConfigDocument;
use crate::schema::{FieldType, Key, Section};

/// One field as displayed: its effective value and whether that is the default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub key: String,
    pub label: String,
    /// Effective value; `None` for unset optional keys.
    pub value: Option<String>,
    pub is_default: bool,
    pub checkbox: bool,
}

impl Entry {
    fn for_key(doc: &ConfigDocument, key: Key) -> Self {
        let spec = key.spec();
        Entry {
            key: key.name().to_string(),
            label: spec.label.to_string(),
            value: doc.get(key).map(|v| v.to_string()),
            is_default: !doc.is_set(key) || doc.get(key) == key.default_value(),
            checkbox: spec.field_type == FieldType::Boolean,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub entries: Vec<Entry>,
}

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigResult {
    /// A generated TOML template string.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
    /// A key's effective value with its documentation.
    KeyValue {
        key: String,
        value: Option<String>,
        default: Option<String>,
        doc: String,
        choices: Vec<String>,
    },
    /// All effective key-value pairs, flat.
    Listing { entries: Vec<Entry> },
    /// All fields grouped the way the form shows them.
    Form { sections: Vec<SectionView> },
    /// Confirmation that the document was written.
    Saved { path: PathBuf, changed: Vec<String> },
    /// The stored file text.
    Raw(String),
}

const NOT_SET: &str = "<not set>";

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                writeln!(f, "Config template written to {}", path.display())
            }
            ConfigResult::KeyValue {
                key,
                value,
                default,
                doc,
                choices,
            } => {
                writeln!(f, "# {doc}")?;
                if !choices.is_empty() {
                    writeln!(f, "# Choices: {}", choices.join(", "))?;
                }
                writeln!(f, "# Default: {}", default.as_deref().unwrap_or(NOT_SET))?;
                writeln!(f, "{key} = {}", value.as_deref().unwrap_or(NOT_SET))
            }
            ConfigResult::Listing { entries } => {
                for e in entries {
                    writeln!(f, "{} = {}", e.key, e.value.as_deref().unwrap_or(NOT_SET))?;
                }
                Ok(())
            }
            ConfigResult::Form { sections } => {
                for (i, section) in sections.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{}", section.title)?;
                    for e in &section.entries {
                        write_form_line(f, e)?;
                    }
                }
                Ok(())
            }
            ConfigResult::Saved { path, changed } => {
                writeln!(f, "Configuration saved to {}", path.display())?;
                if !changed.is_empty() {
                    writeln!(f, "Updated: {}", changed.join(", "))?;
                }
                Ok(())
            }
            ConfigResult::Raw(text) => {
                if text.ends_with('\n') {
                    write!(f, "{text}")
                } else {
                    writeln!(f, "{text}")
                }
            }
        }
    }
}

fn write_form_line(f: &mut fmt::Formatter<'_>, e: &Entry) -> fmt::Result {
    let marker = if e.is_default { "  (default)" } else { "" };
    if e.checkbox {
        let tick = if e.value.as_deref() == Some("true") { 'x' } else { ' ' };
        writeln!(f, "  [{tick}] {}{marker}", e.label)
    } else {
        let value = e.value.as_deref().unwrap_or(NOT_SET);
        writeln!(f, "  {}: {value}{marker}", e.label)
    }
}

/// Generate a commented TOML template from the schema.
///
/// Every setting appears commented out at its default, so the template parses
/// to an empty document and uncommenting a line opts into that setting.
pub fn generate_template() -> String {
    let mut out = String::from(
        "# Navidrome configuration\n#\n# Uncomment a setting to change it from its default.\n",
    );
    for section in Section::ALL {
        out.push_str(&format!("\n# ---- {} ----\n", section.title()));
        for key in section.keys() {
            let spec = key.spec();
            out.push_str(&format!("\n# {}\n", spec.doc));
            if !spec.choices.is_empty() {
                out.push_str(&format!("# Choices: {}\n", spec.choices.join(", ")));
            }
            match key.default_value() {
                Some(v) => out.push_str(&format!("#{} = {}\n", spec.name, v.to_toml_literal())),
                None => {
                    out.push_str("# Optional, unset by default.\n");
                    out.push_str(&format!("#{} = \"\"\n", spec.name));
                }
            }
        }
    }
    out
}

/// Look up one key's effective value and documentation.
pub fn get_value(doc: &ConfigDocument, key: Key) -> ConfigResult {
    let spec = key.spec();
    ConfigResult::KeyValue {
        key: spec.name.to_string(),
        value: doc.get(key).map(|v| v.to_string()),
        default: key.default_value().map(|v| v.to_string()),
        doc: spec.doc.to_string(),
        choices: spec.choices.iter().map(|c| c.to_string()).collect(),
    }
}

/// Every key's effective value, flat, in schema order.
pub fn list_values(doc: &ConfigDocument) -> ConfigResult {
    ConfigResult::Listing {
        entries: Key::ALL
            .into_iter()
            .map(|k| Entry::for_key(doc, k))
            .collect(),
    }
}

/// Every key grouped by form section.
pub fn show_form(doc: &ConfigDocument) -> ConfigResult {
    ConfigResult::Form {
        sections: Section::ALL
            .into_iter()
            .map(|s| SectionView {
                title: s.title().to_string(),
                entries: s.keys().map(|k| Entry::for_key(doc, k)).collect(),
            })
            .collect(),
    }
}
