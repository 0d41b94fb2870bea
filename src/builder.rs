use std::path::PathBuf;

use crate::error::NavicfgError;
use crate::file::{self, DEFAULT_FILE_NAME};
use crate::session::Session;
use crate::types::SearchPath;

/// Entry point for opening a configuration session.
pub struct Navicfg;

impl Navicfg {
    pub fn builder() -> NavicfgBuilder {
        NavicfgBuilder::new()
    }
}

/// Builder for locating the config file and opening a [`Session`] on it.
///
/// Defaults: `navidrome.toml` in the current working directory, lenient
/// about keys outside the schema.
#[derive(Debug, Clone)]
pub struct NavicfgBuilder {
    file_name: Option<String>,
    search_path: SearchPath,
    strict: bool,
}

impl NavicfgBuilder {
    fn new() -> Self {
        Self {
            file_name: None,
            search_path: SearchPath::Cwd,
            strict: false,
        }
    }

    /// Override the config file name (default: `"navidrome.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Set the directory the file lives in (default: [`SearchPath::Cwd`]).
    pub fn search_path(mut self, path: SearchPath) -> Self {
        self.search_path = path;
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, keys outside the schema make a file fail to load.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    /// The file the session will read and write.
    pub fn location(&self) -> Result<PathBuf, NavicfgError> {
        file::resolve_location(&self.search_path, self.effective_file_name())
    }

    /// Open the default location the way the form does at startup: a file
    /// that fails to decode is reported and replaced by an empty document.
    pub fn open(self) -> Result<Session, NavicfgError> {
        let path = self.location()?;
        tracing::debug!(path = %path.display(), strict = self.strict, "opening config");
        Session::open(path, self.strict)
    }

    /// Open a file the user picked. Decode failures are returned.
    pub fn open_file(self, path: impl Into<PathBuf>) -> Result<Session, NavicfgError> {
        Session::open_explicit(path.into(), self.strict)
    }
}
