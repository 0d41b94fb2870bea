//! The closed set of Navidrome settings this crate edits.
//!
//! Every key has exactly one [`KeySpec`] in a static table. The table is the
//! single source of truth: decoding, encoding, defaults, form layout, template
//! generation and `get` output all read from it. Add a row here and every
//! other part of the crate picks the key up.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::NavicfgError;
use crate::types::Value;

/// The declared type of a key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Boolean => write!(f, "boolean"),
        }
    }
}

/// A compiled-in default. `Absent` marks optional keys that are simply not
/// written when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
    Absent,
}

impl DefaultValue {
    pub fn to_value(self) -> Option<Value> {
        match self {
            DefaultValue::Str(s) => Some(Value::String(s.to_string())),
            DefaultValue::Int(i) => Some(Value::Integer(i)),
            DefaultValue::Bool(b) => Some(Value::Boolean(b)),
            DefaultValue::Absent => None,
        }
    }
}

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    General,
    Paths,
    Scanning,
    Transcoding,
    WebInterface,
    Security,
    Advanced,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::General,
        Section::Paths,
        Section::Scanning,
        Section::Transcoding,
        Section::WebInterface,
        Section::Security,
        Section::Advanced,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::General => "General Settings",
            Section::Paths => "Music & Media Paths",
            Section::Scanning => "Library Scanning",
            Section::Transcoding => "Audio Transcoding",
            Section::WebInterface => "Web Interface",
            Section::Security => "Security & Authentication",
            Section::Advanced => "Advanced Options",
        }
    }

    /// Keys shown in this section, in schema order.
    pub fn keys(self) -> impl Iterator<Item = Key> {
        Key::ALL.into_iter().filter(move |k| k.spec().section == self)
    }
}

/// A recognized configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    LogLevel,
    Port,
    Address,
    DataFolder,
    MusicFolder,
    FfmpegPath,
    ScanSchedule,
    AutoScan,
    ScanAtStartup,
    TranscodingCacheSize,
    EnableTranscoding,
    TranscodingFormat,
    EnableWebInterface,
    Theme,
    EnableDownloads,
    EnableAuthentication,
    SessionTimeout,
    EnableRegistration,
    DbPath,
    LogFile,
    VerboseLogging,
}

/// Everything the crate knows about one key.
#[derive(Debug, PartialEq, Eq)]
pub struct KeySpec {
    pub key: Key,
    /// Name as written in the TOML file.
    pub name: &'static str,
    pub field_type: FieldType,
    pub default: DefaultValue,
    /// Omitted from the document when the form text is blank.
    pub optional: bool,
    pub section: Section,
    pub label: &'static str,
    pub doc: &'static str,
    /// Values offered by the form. Empty for free-form fields.
    pub choices: &'static [&'static str],
}

const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARN", "ERROR"];
const SCAN_SCHEDULES: &[&str] = &[
    "@every 1h",
    "@every 6h",
    "@every 12h",
    "@every 24h",
    "@every 48h",
    "@weekly",
    "@monthly",
    "manual",
];
const CACHE_SIZES: &[&str] = &["50MiB", "100MiB", "150MiB", "200MiB", "500MiB", "1GiB"];
const FORMATS: &[&str] = &["mp3", "aac", "ogg", "opus"];
const THEMES: &[&str] = &["default", "dark", "light"];

// Indexed by `Key as usize`; `spec_table_matches_key_order` keeps it honest.
static SCHEMA: [KeySpec; 21] = [
    KeySpec {
        key: Key::LogLevel,
        name: "LogLevel",
        field_type: FieldType::String,
        default: DefaultValue::Str("INFO"),
        optional: false,
        section: Section::General,
        label: "Log Level",
        doc: "Server log verbosity.",
        choices: LOG_LEVELS,
    },
    KeySpec {
        key: Key::Port,
        name: "Port",
        field_type: FieldType::Integer,
        default: DefaultValue::Int(4533),
        optional: false,
        section: Section::General,
        label: "Port",
        doc: "HTTP port the server listens on.",
        choices: &[],
    },
    KeySpec {
        key: Key::Address,
        name: "Address",
        field_type: FieldType::String,
        default: DefaultValue::Str("0.0.0.0"),
        optional: false,
        section: Section::General,
        label: "Address",
        doc: "IP address the server binds to.",
        choices: &[],
    },
    KeySpec {
        key: Key::DataFolder,
        name: "DataFolder",
        field_type: FieldType::String,
        default: DefaultValue::Str("./data"),
        optional: false,
        section: Section::General,
        label: "Data Folder",
        doc: "Folder for the database, cache and other server data.",
        choices: &[],
    },
    KeySpec {
        key: Key::MusicFolder,
        name: "MusicFolder",
        field_type: FieldType::String,
        default: DefaultValue::Absent,
        optional: true,
        section: Section::Paths,
        label: "Music Folder",
        doc: "Root of the music library.",
        choices: &[],
    },
    KeySpec {
        key: Key::FfmpegPath,
        name: "FFmpegPath",
        field_type: FieldType::String,
        default: DefaultValue::Absent,
        optional: true,
        section: Section::Paths,
        label: "FFmpeg Path",
        doc: "Path to the ffmpeg binary. Looked up on PATH when unset.",
        choices: &[],
    },
    KeySpec {
        key: Key::ScanSchedule,
        name: "ScanSchedule",
        field_type: FieldType::String,
        default: DefaultValue::Str("@every 24h"),
        optional: false,
        section: Section::Scanning,
        label: "Scan Schedule",
        doc: "How often the library is rescanned.",
        choices: SCAN_SCHEDULES,
    },
    KeySpec {
        key: Key::AutoScan,
        name: "AutoScan",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(true),
        optional: false,
        section: Section::Scanning,
        label: "Auto Scan",
        doc: "Rescan automatically when the music folder changes.",
        choices: &[],
    },
    KeySpec {
        key: Key::ScanAtStartup,
        name: "ScanAtStartup",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(true),
        optional: false,
        section: Section::Scanning,
        label: "Scan at Startup",
        doc: "Run a scan when the server starts.",
        choices: &[],
    },
    KeySpec {
        key: Key::TranscodingCacheSize,
        name: "TranscodingCacheSize",
        field_type: FieldType::String,
        default: DefaultValue::Str("150MiB"),
        optional: false,
        section: Section::Transcoding,
        label: "Cache Size",
        doc: "Size of the transcoding cache.",
        choices: CACHE_SIZES,
    },
    KeySpec {
        key: Key::EnableTranscoding,
        name: "EnableTranscoding",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(true),
        optional: false,
        section: Section::Transcoding,
        label: "Enable Transcoding",
        doc: "Allow on-the-fly transcoding of streamed files.",
        choices: &[],
    },
    KeySpec {
        key: Key::TranscodingFormat,
        name: "TranscodingFormat",
        field_type: FieldType::String,
        default: DefaultValue::Str("mp3"),
        optional: false,
        section: Section::Transcoding,
        label: "Default Format",
        doc: "Default target format for transcoding.",
        choices: FORMATS,
    },
    KeySpec {
        key: Key::EnableWebInterface,
        name: "EnableWebInterface",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(true),
        optional: false,
        section: Section::WebInterface,
        label: "Enable Web Interface",
        doc: "Serve the web UI.",
        choices: &[],
    },
    KeySpec {
        key: Key::Theme,
        name: "Theme",
        field_type: FieldType::String,
        default: DefaultValue::Str("default"),
        optional: false,
        section: Section::WebInterface,
        label: "Theme",
        doc: "Default web UI theme.",
        choices: THEMES,
    },
    KeySpec {
        key: Key::EnableDownloads,
        name: "EnableDownloads",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(true),
        optional: false,
        section: Section::WebInterface,
        label: "Enable Downloads",
        doc: "Let users download tracks and albums.",
        choices: &[],
    },
    KeySpec {
        key: Key::EnableAuthentication,
        name: "EnableAuthentication",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(true),
        optional: false,
        section: Section::Security,
        label: "Enable Authentication",
        doc: "Require users to log in.",
        choices: &[],
    },
    KeySpec {
        key: Key::SessionTimeout,
        name: "SessionTimeout",
        field_type: FieldType::Integer,
        default: DefaultValue::Int(24),
        optional: false,
        section: Section::Security,
        label: "Session Timeout (hours)",
        doc: "Hours before an idle session expires.",
        choices: &[],
    },
    KeySpec {
        key: Key::EnableRegistration,
        name: "EnableRegistration",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        optional: false,
        section: Section::Security,
        label: "Enable User Registration",
        doc: "Allow new users to sign up themselves.",
        choices: &[],
    },
    KeySpec {
        key: Key::DbPath,
        name: "DbPath",
        field_type: FieldType::String,
        default: DefaultValue::Str("./navidrome.db"),
        optional: false,
        section: Section::Advanced,
        label: "Database Path",
        doc: "Location of the SQLite database.",
        choices: &[],
    },
    KeySpec {
        key: Key::LogFile,
        name: "LogFile",
        field_type: FieldType::String,
        default: DefaultValue::Absent,
        optional: true,
        section: Section::Advanced,
        label: "Log File",
        doc: "Write logs to this file instead of stderr.",
        choices: &[],
    },
    KeySpec {
        key: Key::VerboseLogging,
        name: "VerboseLogging",
        field_type: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        optional: false,
        section: Section::Advanced,
        label: "Verbose Logging",
        doc: "Log extra detail about every request.",
        choices: &[],
    },
];

impl Key {
    pub const ALL: [Key; 21] = [
        Key::LogLevel,
        Key::Port,
        Key::Address,
        Key::DataFolder,
        Key::MusicFolder,
        Key::FfmpegPath,
        Key::ScanSchedule,
        Key::AutoScan,
        Key::ScanAtStartup,
        Key::TranscodingCacheSize,
        Key::EnableTranscoding,
        Key::TranscodingFormat,
        Key::EnableWebInterface,
        Key::Theme,
        Key::EnableDownloads,
        Key::EnableAuthentication,
        Key::SessionTimeout,
        Key::EnableRegistration,
        Key::DbPath,
        Key::LogFile,
        Key::VerboseLogging,
    ];

    pub fn spec(self) -> &'static KeySpec {
        &SCHEMA[self as usize]
    }

    /// The key's name in the config file.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn field_type(self) -> FieldType {
        self.spec().field_type
    }

    pub fn default_value(self) -> Option<Value> {
        self.spec().default.to_value()
    }

    pub fn is_optional(self) -> bool {
        self.spec().optional
    }

    /// Exact lookup by file name, as used when decoding.
    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive lookup, for names typed on the command line.
impl FromStr for Key {
    type Err = NavicfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| NavicfgError::KeyNotFound(s.to_string()))
    }
}

impl Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_table_matches_key_order() {
        for key in Key::ALL {
            assert_eq!(key.spec().key, key);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = Key::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Key::ALL.len());
    }

    #[test]
    fn declared_defaults() {
        assert_eq!(
            Key::LogLevel.default_value(),
            Some(Value::String("INFO".into()))
        );
        assert_eq!(Key::Port.default_value(), Some(Value::Integer(4533)));
        assert_eq!(Key::SessionTimeout.default_value(), Some(Value::Integer(24)));
        assert_eq!(Key::AutoScan.default_value(), Some(Value::Boolean(true)));
        assert_eq!(
            Key::EnableRegistration.default_value(),
            Some(Value::Boolean(false))
        );
        assert_eq!(Key::MusicFolder.default_value(), None);
        assert_eq!(Key::FfmpegPath.default_value(), None);
        assert_eq!(Key::LogFile.default_value(), None);
    }

    #[test]
    fn only_path_keys_are_optional() {
        let optional: Vec<Key> = Key::ALL.into_iter().filter(|k| k.is_optional()).collect();
        assert_eq!(optional, vec![Key::MusicFolder, Key::FfmpegPath, Key::LogFile]);
    }

    #[test]
    fn defaults_match_declared_types() {
        for key in Key::ALL {
            if let Some(v) = key.default_value() {
                assert_eq!(v.field_type(), key.field_type(), "{key}");
            }
        }
    }

    #[test]
    fn defaults_are_among_choices() {
        for key in Key::ALL {
            let spec = key.spec();
            if let (false, DefaultValue::Str(d)) = (spec.choices.is_empty(), spec.default) {
                assert!(spec.choices.contains(&d), "{key}");
            }
        }
    }

    #[test]
    fn ffmpeg_wire_name() {
        assert_eq!(Key::FfmpegPath.name(), "FFmpegPath");
        assert_eq!(Key::from_name("FFmpegPath"), Some(Key::FfmpegPath));
        assert_eq!(Key::from_name("ffmpegpath"), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("port".parse::<Key>().unwrap(), Key::Port);
        assert_eq!("ffmpegPATH".parse::<Key>().unwrap(), Key::FfmpegPath);
        assert!(matches!(
            "Nope".parse::<Key>(),
            Err(NavicfgError::KeyNotFound(_))
        ));
    }

    #[test]
    fn every_key_belongs_to_one_section() {
        let total: usize = Section::ALL.iter().map(|s| s.keys().count()).sum();
        assert_eq!(total, Key::ALL.len());
        let general: Vec<Key> = Section::General.keys().collect();
        assert_eq!(
            general,
            vec![Key::LogLevel, Key::Port, Key::Address, Key::DataFolder]
        );
    }
}
