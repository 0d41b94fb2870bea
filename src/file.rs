//! Config file location and raw reads.
//!
//! A [`SearchPath`] names a directory; joined with the file name it gives the
//! one location a session reads from and writes to. Reads treat a missing
//! file as "no document" rather than an error. Only real I/O failures
//! (permissions, a directory where the file should be) are propagated.

use std::path::{Path, PathBuf};

use crate::error::NavicfgError;
use crate::types::SearchPath;

/// File name used when the caller does not pick one.
pub const DEFAULT_FILE_NAME: &str = "navidrome.toml";

/// Name used for the platform config directory.
pub const APP_NAME: &str = "navidrome";

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// Returns `None` if the directory cannot be determined (e.g. no home
/// directory for `Platform`).
pub fn resolve_search_path(sp: &SearchPath) -> Option<PathBuf> {
    match sp {
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", APP_NAME)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Resolve the config file location for `sp` and `file_name`.
pub fn resolve_location(sp: &SearchPath, file_name: &str) -> Result<PathBuf, NavicfgError> {
    resolve_search_path(sp)
        .map(|dir| dir.join(file_name))
        .ok_or(NavicfgError::NoConfigLocation)
}

/// Read a file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>, NavicfgError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(NavicfgError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
