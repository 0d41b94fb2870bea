//! The form record: one typed field per schema key.
//!
//! Text entries are `String`s and checkboxes are `bool`s, exactly as a form
//! front end holds them. A [`FormState`] is always built whole from a
//! document, so every field has a value before anything reads it. On submit
//! [`FormState::pairs`] hands every field to
//! [`ConfigDocument::replace_all`](crate::ConfigDocument::replace_all).

use serde::Serialize;

use crate::coerce::{self, FormValue};
use crate::document::ConfigDocument;
use crate::error::NavicfgError;
use crate::schema::{FieldType, Key};
use crate::types::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormState {
    pub log_level: String,
    pub port: String,
    pub address: String,
    pub data_folder: String,
    pub music_folder: String,
    #[serde(rename = "FFmpegPath")]
    pub ffmpeg_path: String,
    pub scan_schedule: String,
    pub auto_scan: bool,
    pub scan_at_startup: bool,
    pub transcoding_cache_size: String,
    pub enable_transcoding: bool,
    pub transcoding_format: String,
    pub enable_web_interface: bool,
    pub theme: String,
    pub enable_downloads: bool,
    pub enable_authentication: bool,
    pub session_timeout: String,
    pub enable_registration: bool,
    pub db_path: String,
    pub log_file: String,
    pub verbose_logging: bool,
}

impl Default for FormState {
    /// Every field at its declared default.
    fn default() -> Self {
        Self::from_document(&ConfigDocument::empty())
    }
}

impl FormState {
    /// Populate every field from `doc`, falling back to defaults.
    /// Unset optional paths become empty text.
    pub fn from_document(doc: &ConfigDocument) -> Self {
        let text = |key: Key| doc.get(key).map(|v| v.to_string()).unwrap_or_default();
        // Decoding guarantees boolean keys hold booleans.
        let flag = |key: Key| doc.get(key).and_then(|v| v.as_bool()).unwrap_or_default();

        Self {
            log_level: text(Key::LogLevel),
            port: text(Key::Port),
            address: text(Key::Address),
            data_folder: text(Key::DataFolder),
            music_folder: text(Key::MusicFolder),
            ffmpeg_path: text(Key::FfmpegPath),
            scan_schedule: text(Key::ScanSchedule),
            auto_scan: flag(Key::AutoScan),
            scan_at_startup: flag(Key::ScanAtStartup),
            transcoding_cache_size: text(Key::TranscodingCacheSize),
            enable_transcoding: flag(Key::EnableTranscoding),
            transcoding_format: text(Key::TranscodingFormat),
            enable_web_interface: flag(Key::EnableWebInterface),
            theme: text(Key::Theme),
            enable_downloads: flag(Key::EnableDownloads),
            enable_authentication: flag(Key::EnableAuthentication),
            session_timeout: text(Key::SessionTimeout),
            enable_registration: flag(Key::EnableRegistration),
            db_path: text(Key::DbPath),
            log_file: text(Key::LogFile),
            verbose_logging: flag(Key::VerboseLogging),
        }
    }

    /// The current value of the field bound to `key`.
    pub fn field(&self, key: Key) -> FormValue {
        match key {
            Key::LogLevel => FormValue::Text(self.log_level.clone()),
            Key::Port => FormValue::Text(self.port.clone()),
            Key::Address => FormValue::Text(self.address.clone()),
            Key::DataFolder => FormValue::Text(self.data_folder.clone()),
            Key::MusicFolder => FormValue::Text(self.music_folder.clone()),
            Key::FfmpegPath => FormValue::Text(self.ffmpeg_path.clone()),
            Key::ScanSchedule => FormValue::Text(self.scan_schedule.clone()),
            Key::AutoScan => FormValue::Flag(self.auto_scan),
            Key::ScanAtStartup => FormValue::Flag(self.scan_at_startup),
            Key::TranscodingCacheSize => FormValue::Text(self.transcoding_cache_size.clone()),
            Key::EnableTranscoding => FormValue::Flag(self.enable_transcoding),
            Key::TranscodingFormat => FormValue::Text(self.transcoding_format.clone()),
            Key::EnableWebInterface => FormValue::Flag(self.enable_web_interface),
            Key::Theme => FormValue::Text(self.theme.clone()),
            Key::EnableDownloads => FormValue::Flag(self.enable_downloads),
            Key::EnableAuthentication => FormValue::Flag(self.enable_authentication),
            Key::SessionTimeout => FormValue::Text(self.session_timeout.clone()),
            Key::EnableRegistration => FormValue::Flag(self.enable_registration),
            Key::DbPath => FormValue::Text(self.db_path.clone()),
            Key::LogFile => FormValue::Text(self.log_file.clone()),
            Key::VerboseLogging => FormValue::Flag(self.verbose_logging),
        }
    }

    fn text_mut(&mut self, key: Key) -> Option<&mut String> {
        Some(match key {
            Key::LogLevel => &mut self.log_level,
            Key::Port => &mut self.port,
            Key::Address => &mut self.address,
            Key::DataFolder => &mut self.data_folder,
            Key::MusicFolder => &mut self.music_folder,
            Key::FfmpegPath => &mut self.ffmpeg_path,
            Key::ScanSchedule => &mut self.scan_schedule,
            Key::TranscodingCacheSize => &mut self.transcoding_cache_size,
            Key::TranscodingFormat => &mut self.transcoding_format,
            Key::Theme => &mut self.theme,
            Key::SessionTimeout => &mut self.session_timeout,
            Key::DbPath => &mut self.db_path,
            Key::LogFile => &mut self.log_file,
            _ => return None,
        })
    }

    fn flag_mut(&mut self, key: Key) -> Option<&mut bool> {
        Some(match key {
            Key::AutoScan => &mut self.auto_scan,
            Key::ScanAtStartup => &mut self.scan_at_startup,
            Key::EnableTranscoding => &mut self.enable_transcoding,
            Key::EnableWebInterface => &mut self.enable_web_interface,
            Key::EnableDownloads => &mut self.enable_downloads,
            Key::EnableAuthentication => &mut self.enable_authentication,
            Key::EnableRegistration => &mut self.enable_registration,
            Key::VerboseLogging => &mut self.verbose_logging,
            _ => return None,
        })
    }

    /// Whether `key` is shown as a checkbox rather than a text entry.
    pub fn is_checkbox(key: Key) -> bool {
        key.field_type() == FieldType::Boolean
    }

    /// Assign a field from text typed by a person.
    ///
    /// Text fields take the text as-is; integer fields are only checked on
    /// submit, like a text entry. Checkboxes accept `true/false/yes/no/on/off/1/0`.
    pub fn assign(&mut self, key: Key, raw: &str) -> Result<(), NavicfgError> {
        if let Some(flag) = self.flag_mut(key) {
            *flag = coerce::parse_flag(raw).ok_or_else(|| NavicfgError::InvalidValue {
                key: key.name().to_string(),
                reason: format!("expected yes or no, got '{raw}'"),
            })?;
            return Ok(());
        }
        if let Some(text) = self.text_mut(key) {
            *text = raw.to_string();
        }
        Ok(())
    }

    /// Put the field for `key` back to its declared default.
    pub fn reset(&mut self, key: Key) {
        match key.default_value() {
            Some(Value::Boolean(b)) => {
                if let Some(flag) = self.flag_mut(key) {
                    *flag = b;
                }
            }
            Some(v) => {
                if let Some(text) = self.text_mut(key) {
                    *text = v.to_string();
                }
            }
            None => {
                if let Some(text) = self.text_mut(key) {
                    text.clear();
                }
            }
        }
    }

    /// Every field, in schema order, ready for `replace_all`.
    pub fn pairs(&self) -> Vec<(Key, FormValue)> {
        Key::ALL.into_iter().map(|k| (k, self.field(k))).collect()
    }

    /// Coerce the whole form into a new document.
    pub fn to_document(&self) -> Result<ConfigDocument, NavicfgError> {
        ConfigDocument::replace_all(self.pairs())
    }
}
