//! Config persistence: encode documents as TOML and write them out.
//!
//! Uses `toml_edit` so strings are quoted and escaped the TOML way and each
//! form section can carry a `# Title` comment. Writes go straight to the
//! destination: no temp file, no backup, and no parent directories are
//! created on the caller's behalf.

use std::path::Path;

use toml_edit::DocumentMut;

use crate::document::ConfigDocument;
use crate::error::NavicfgError;
use crate::file;
use crate::schema::Section;

/// Shown by [`render_raw`] when there is no file to show.
pub const NO_FILE_PLACEHOLDER: &str = "# No configuration file found";

/// Pure function: encode `doc` as TOML text.
///
/// Keys appear flat in schema order. The first key of each section gets the
/// section title as a comment; sections with no stored keys are skipped.
pub fn encode(doc: &ConfigDocument) -> String {
    let mut out = DocumentMut::new();
    let mut first_section = true;

    for section in Section::ALL {
        let mut needs_header = true;
        for key in section.keys() {
            let Some(value) = doc.stored(key) else {
                continue;
            };
            out.insert(key.name(), toml_edit::value(toml_edit::Value::from(value)));

            if needs_header {
                let prefix = if first_section {
                    format!("# {}\n", section.title())
                } else {
                    format!("\n# {}\n", section.title())
                };
                if let Some(mut k) = out.key_mut(key.name()) {
                    k.leaf_decor_mut().set_prefix(prefix);
                }
                needs_header = false;
                first_section = false;
            }
        }
    }

    out.to_string()
}

/// I/O wrapper: encode and overwrite `path`.
pub fn save(doc: &ConfigDocument, path: &Path) -> Result<(), NavicfgError> {
    let content = encode(doc);
    std::fs::write(path, &content).map_err(|e| NavicfgError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), keys = doc.len(), "saved config");
    Ok(())
}

/// The file at `path` exactly as stored, or [`NO_FILE_PLACEHOLDER`].
pub fn render_raw(path: &Path) -> Result<String, NavicfgError> {
    Ok(file::read_optional(path)?.unwrap_or_else(|| NO_FILE_PLACEHOLDER.to_string()))
}
