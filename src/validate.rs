//! Unknown-key detection for config files.
//!
//! Navidrome understands many more settings than this crate edits, so a real
//! file often carries keys (and whole `[Section]` tables) outside the schema.
//! This module finds them and reports each one with its file path and a
//! best-effort line number. Whether that is fatal is the caller's decision.

use std::path::Path;

use toml::Table;

use crate::error::NavicfgError;
use crate::schema::Key;

/// Collect every key in `table` that the schema does not recognize.
///
/// Nested tables are walked so each unknown leaf is reported by its dotted
/// path (`"LastFM.ApiKey"`), which is also what the line finder searches for.
pub fn unknown_keys(table: &Table, content: &str, path: &Path) -> Vec<NavicfgError> {
    let mut dotted = Vec::new();
    for (name, value) in table {
        if Key::from_name(name).is_some() {
            continue;
        }
        collect_leaves(name, value, &mut dotted);
    }

    dotted
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            NavicfgError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect()
}

fn collect_leaves(prefix: &str, value: &toml::Value, out: &mut Vec<String>) {
    match value {
        toml::Value::Table(t) if !t.is_empty() => {
            for (k, v) in t {
                collect_leaves(&format!("{prefix}.{k}"), v, out);
            }
        }
        _ => out.push(prefix.to_string()),
    }
}

/// Find the 1-indexed line number for a key in TOML content.
///
/// Tracks the current `[section]` or `[[section]]` header while scanning and
/// joins it with the dotted key on each assignment line, so `"LastFM.ApiKey"`
/// is found both as `ApiKey = ...` under `[LastFM]` and as a top-level
/// `LastFM.ApiKey = ...`. A key naming a whole table (an empty table or an
/// array of tables) resolves to its header line.
///
/// Handles bare keys but not quoted keys or inline tables. Returns 0 if the
/// key cannot be located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let segments: Vec<&str> = dotted_key.split('.').collect();

    let mut current_section: Vec<&str> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(header) = table_header(trimmed) {
            current_section = split_key(header);
            if current_section == segments {
                return i + 1;
            }
            continue;
        }

        if trimmed.starts_with('#') {
            continue;
        }
        let Some((lhs, _)) = trimmed.split_once('=') else {
            continue;
        };
        let mut full = current_section.clone();
        full.extend(split_key(lhs));
        if full == segments {
            return i + 1;
        }
    }
    0
}

/// The name inside `[name]` or `[[name]]`, ignoring a trailing comment.
fn table_header(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("[[") {
        return rest.split_once("]]").map(|(name, _)| name);
    }
    line.strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map(|(name, _)| name)
}

fn split_key(key: &str) -> Vec<&str> {
    key.split('.').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("/srv/navidrome/navidrome.toml")
    }

    fn check(content: &str) -> Vec<NavicfgError> {
        let table: Table = toml::from_str(content).unwrap();
        unknown_keys(&table, content, &path())
    }

    fn key_and_line(err: &NavicfgError) -> (&str, usize) {
        match err {
            NavicfgError::UnknownKey { key, line, .. } => (key.as_str(), *line),
            other => panic!("Expected UnknownKey, got: {other:?}"),
        }
    }

    #[test]
    fn known_keys_pass() {
        let content = "LogLevel = \"DEBUG\"\nPort = 4600\nAutoScan = false\n";
        assert!(check(content).is_empty());
    }

    #[test]
    fn empty_content_ok() {
        assert!(check("").is_empty());
    }

    #[test]
    fn unknown_top_level_key() {
        let content = "Port = 4533\nUILoginBackgroundUrl = \"x\"\n";
        let errors = check(content);
        assert_eq!(errors.len(), 1);
        assert_eq!(key_and_line(&errors[0]), ("UILoginBackgroundUrl", 2));
    }

    #[test]
    fn names_are_case_sensitive() {
        let errors = check("port = 4533\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(key_and_line(&errors[0]), ("port", 1));
    }

    #[test]
    fn unknown_section_reports_leaves() {
        let content = "Port = 4533\n\n[LastFM]\nEnabled = true\nApiKey = \"k\"\n";
        let errors = check(content);
        let found: Vec<(&str, usize)> = errors.iter().map(key_and_line).collect();
        assert!(found.contains(&("LastFM.Enabled", 4)));
        assert!(found.contains(&("LastFM.ApiKey", 5)));
    }

    #[test]
    fn leaf_in_section_not_confused_with_top_level() {
        // `Enabled` at top level is unknown too, and must resolve to line 1.
        let content = "Enabled = 1\n[Spotify]\nEnabled = true\n";
        let errors = check(content);
        let found: Vec<(&str, usize)> = errors.iter().map(key_and_line).collect();
        assert!(found.contains(&("Enabled", 1)));
        assert!(found.contains(&("Spotify.Enabled", 3)));
    }

    #[test]
    fn empty_unknown_table_reported_by_name() {
        let errors = check("Port = 4533\n[Jukebox]\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(key_and_line(&errors[0]), ("Jukebox", 2));
    }

    #[test]
    fn top_level_dotted_key_is_located() {
        let content = "Port = 4533\nLastFM.ApiKey = \"k\"\nLastFM . Secret = \"s\"\n";
        let errors = check(content);
        let found: Vec<(&str, usize)> = errors.iter().map(key_and_line).collect();
        assert!(found.contains(&("LastFM.ApiKey", 2)));
        assert!(found.contains(&("LastFM.Secret", 3)));
    }

    #[test]
    fn dotted_key_inside_section_is_located() {
        let content = "[Scanner]\nExtractor.Mode = \"fast\"\n";
        let errors = check(content);
        assert_eq!(key_and_line(&errors[0]), ("Scanner.Extractor.Mode", 2));
    }

    #[test]
    fn array_of_tables_header_switches_section() {
        let content =
            "[Jukebox]\nEnabled = true\n\n[[Shares]]\nName = \"a\"\n\n[Spotify]\nEnabled = false\n";
        let errors = check(content);
        let found: Vec<(&str, usize)> = errors.iter().map(key_and_line).collect();
        assert!(found.contains(&("Jukebox.Enabled", 2)));
        assert!(found.contains(&("Shares", 4)));
        assert!(found.contains(&("Spotify.Enabled", 8)));
    }

    #[test]
    fn key_after_array_of_tables_not_attributed_to_earlier_section() {
        assert_eq!(
            find_key_line("[A]\nX = 1\n[[B]]\nX = 2\n", "A.X"),
            2
        );
        assert_eq!(find_key_line("[A]\n[[B]]\nX = 2\n", "A.X"), 0);
    }

    #[test]
    fn header_with_trailing_comment() {
        assert_eq!(find_key_line("[LastFM] # scrobbling\nApiKey = 1\n", "LastFM.ApiKey"), 2);
    }

    #[test]
    fn error_includes_file_path() {
        let errors = check("Typo = 1\n");
        assert!(errors[0].to_string().contains("navidrome.toml"));
    }
}
