//! An editing session: one active file location and one active document.
//!
//! The session is what a form front end talks to. It applies the load and
//! save policies around the pure document model:
//!
//! - Opening the default location at startup never fails on a malformed
//!   file. The file is reported and the session starts from an empty
//!   document, so the form stays usable.
//! - Loading a file the user picked does fail on a malformed file, and the
//!   document and location that were active before stay active.
//! - Submitting a form either replaces the whole document or changes nothing.

use std::path::{Path, PathBuf};

use crate::document::ConfigDocument;
use crate::error::{ErrorKind, NavicfgError};
use crate::form::FormState;
use crate::ops::{self, ConfigResult};
use crate::persist;
use crate::schema::Key;
use crate::types::{ConfigAction, Value};

#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    document: ConfigDocument,
    strict: bool,
}

impl Session {
    /// Open the implicit startup location. Decode failures degrade to an
    /// empty document; I/O failures are still returned.
    pub fn open(path: PathBuf, strict: bool) -> Result<Self, NavicfgError> {
        let document = match ConfigDocument::load_with(&path, strict) {
            Ok(doc) => doc,
            Err(e) if e.kind() == ErrorKind::Decode => {
                tracing::warn!(
                    path = %path.display(),
                    "{e}; starting from defaults"
                );
                ConfigDocument::empty()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            document,
            strict,
        })
    }

    /// Open a location the user chose. Every failure is returned.
    pub fn open_explicit(path: PathBuf, strict: bool) -> Result<Self, NavicfgError> {
        let document = ConfigDocument::load_with(&path, strict)?;
        Ok(Self {
            path,
            document,
            strict,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        self.document.get(key)
    }

    /// A form populated from the active document.
    pub fn form(&self) -> FormState {
        FormState::from_document(&self.document)
    }

    /// Switch to the document at `path`. On failure nothing changes.
    pub fn load_from(&mut self, path: impl Into<PathBuf>) -> Result<(), NavicfgError> {
        let path = path.into();
        let document = ConfigDocument::load_with(&path, self.strict)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        self.path = path;
        self.document = document;
        Ok(())
    }

    /// Replace the active document with the form's contents, without saving.
    pub fn submit(&mut self, form: &FormState) -> Result<(), NavicfgError> {
        self.document = form.to_document()?;
        Ok(())
    }

    /// Write the active document to the active location.
    pub fn save(&self) -> Result<(), NavicfgError> {
        self.document.save(&self.path)
    }

    /// Replace and save. The in-memory document only changes once the
    /// file has been written.
    pub fn commit(&mut self, form: &FormState) -> Result<(), NavicfgError> {
        let document = form.to_document()?;
        document.save(&self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        self.document = document;
        Ok(())
    }

    /// Drop every stored value. Nothing is written.
    pub fn reset_to_defaults(&mut self) {
        self.document = ConfigDocument::empty();
    }

    /// The active file exactly as stored, or a placeholder.
    pub fn raw(&self) -> Result<String, NavicfgError> {
        persist::render_raw(&self.path)
    }

    /// Handle a [`ConfigAction`] (show / list / get / set / reset / raw / gen).
    pub fn handle(&mut self, action: &ConfigAction) -> Result<ConfigResult, NavicfgError> {
        match action {
            ConfigAction::Show => Ok(ops::show_form(&self.document)),
            ConfigAction::List => Ok(ops::list_values(&self.document)),
            ConfigAction::Get { key } => Ok(ops::get_value(&self.document, key.parse()?)),
            ConfigAction::Set { assignments } => {
                let mut form = self.form();
                let mut changed = Vec::new();
                for (name, raw) in assignments {
                    let key: Key = name.parse()?;
                    form.assign(key, raw)?;
                    changed.push(key.name().to_string());
                }
                self.commit(&form)?;
                Ok(self.saved(changed))
            }
            ConfigAction::Reset { key } => {
                let (form, changed) = match key {
                    Some(name) => {
                        let key: Key = name.parse()?;
                        let mut form = self.form();
                        form.reset(key);
                        (form, vec![key.name().to_string()])
                    }
                    None => (FormState::default(), Vec::new()),
                };
                self.commit(&form)?;
                Ok(self.saved(changed))
            }
            ConfigAction::Raw => Ok(ConfigResult::Raw(self.raw()?)),
            ConfigAction::Gen { output } => {
                let template = ops::generate_template();
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent()
                            && !parent.as_os_str().is_empty()
                        {
                            std::fs::create_dir_all(parent).map_err(|e| {
                                NavicfgError::WriteError {
                                    path: parent.to_path_buf(),
                                    source: e,
                                }
                            })?;
                        }
                        std::fs::write(path, &template).map_err(|e| NavicfgError::WriteError {
                            path: path.clone(),
                            source: e,
                        })?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
        }
    }

    fn saved(&self, changed: Vec<String>) -> ConfigResult {
        ConfigResult::Saved {
            path: self.path.clone(),
            changed,
        }
    }
}
