//! View and edit a Navidrome server configuration file through a fixed,
//! typed schema.
//!
//! Navidrome reads a flat TOML file (`navidrome.toml`) with PascalCase keys
//! such as `MusicFolder`, `Port` and `EnableTranscodingConfig`. Navicfg knows
//! the 21 keys an operator usually touches, what type each one has and what
//! Navidrome uses when it is missing. It loads the file, presents the values
//! as a form, and writes the form back as a whole.
//!
//! ```ignore
//! let mut session = Navicfg::builder().open()?;
//! let mut form = session.form();
//! form.assign(Key::Port, "4600")?;
//! session.commit(&form)?;
//! ```
//!
//! # The document is sparse
//!
//! A [`ConfigDocument`] holds only the keys the file actually sets. Reading a
//! key that is not stored falls back to its compiled default
//! ([`ConfigDocument::get`]); the default is never written back unless the
//! user sets it. The optional paths (`MusicFolder`, `FFmpegPath`, `LogFile`)
//! have no default at all: a form field left empty removes the key from the
//! file.
//!
//! # Loading
//!
//! There are two ways into a file, and they differ only in what happens when
//! the file cannot be decoded:
//!
//! - [`NavicfgBuilder::open()`] opens the default location the way a tool
//!   does at startup. A syntax error or a table where a setting belongs is
//!   logged and the session starts from an empty document, so the form still
//!   comes up.
//! - [`NavicfgBuilder::open_file()`] and [`Session::load_from()`] open a file
//!   the user picked. Decode errors are returned and the previous state is
//!   left alone.
//!
//! Stored scalars are coerced like form input: `Port = "4600"` reads as an
//! integer. A scalar that cannot be coerced (`SessionTimeout = "24h"`) is
//! dropped with a warning and reads as its default.
//!
//! A missing file is never an error: it is an empty document. Keys outside
//! the schema are dropped with a warning, unless
//! [`strict`](NavicfgBuilder::strict) mode is on, in which case the load
//! fails and names every unknown key with its line.
//!
//! # Saving
//!
//! Saving re-encodes the whole document as flat `Key = value` lines in
//! schema order, with a `# Section` comment before each group. Strings are
//! quoted and escaped, integers and booleans are bare. Comments and
//! formatting from the previous file are not kept. A form is validated in
//! full before anything is written, and the in-memory document only changes
//! once the file write succeeded ([`Session::commit`]).
//!
//! # Core library, optional CLI
//!
//! The core has no dependency on a CLI framework: the operations are
//! expressed as [`ConfigAction`] values answered by [`Session::handle()`]
//! with a [`ConfigResult`]. The `clap` feature (on by default) adds the
//! [`Cli`] parser and the `navicfg` binary:
//!
//! ```text
//! navicfg [--file PATH | --platform] [--strict] [--json] [-v]
//!         <show|list|get|set|reset|raw|gen|edit>
//! ```

pub mod error;
pub mod schema;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod document;
mod file;
mod form;
mod ops;
mod persist;
pub mod prompt;
mod session;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Navicfg, NavicfgBuilder};
#[cfg(feature = "clap")]
pub use cli::{Cli, Command};
pub use coerce::FormValue;
pub use document::ConfigDocument;
pub use error::{ErrorKind, NavicfgError};
pub use file::DEFAULT_FILE_NAME;
pub use form::FormState;
pub use ops::{ConfigResult, Entry, SectionView, generate_template};
pub use persist::NO_FILE_PLACEHOLDER;
pub use schema::{FieldType, Key, Section};
pub use session::Session;
pub use types::{ConfigAction, SearchPath, Value};
