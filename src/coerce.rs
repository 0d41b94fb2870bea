//! Type coercion between form values and typed config values.
//!
//! Text fields arrive as strings and checkboxes as booleans. Each is coerced
//! to the declared [`FieldType`] of its key; only malformed text for a typed
//! key can fail.

use crate::error::NavicfgError;
use crate::schema::{FieldType, Key};
use crate::types::Value;

/// A value as held by a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Flag(bool),
    Integer(i64),
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Flag(b)
    }
}

impl From<i64> for FormValue {
    fn from(i: i64) -> Self {
        FormValue::Integer(i)
    }
}

/// Coerce a form value to the type declared for `key`.
///
/// Returns `Ok(None)` when the key is optional and its text is empty: such
/// keys are left out of the document rather than stored as `""`.
pub fn coerce(key: Key, value: FormValue) -> Result<Option<Value>, NavicfgError> {
    match (key.field_type(), value) {
        (FieldType::Integer, FormValue::Integer(i)) => Ok(Some(Value::Integer(i))),
        (FieldType::Integer, FormValue::Text(s)) => parse_integer(key, &s).map(Some),
        (FieldType::Integer, FormValue::Flag(b)) => Err(invalid(
            key,
            format!("expected an integer, got boolean {b}"),
        )),

        (FieldType::Boolean, FormValue::Flag(b)) => Ok(Some(Value::Boolean(b))),
        (FieldType::Boolean, FormValue::Text(s)) => match parse_bool_literal(&s) {
            Some(b) => Ok(Some(Value::Boolean(b))),
            None => Err(invalid(key, format!("expected true or false, got '{s}'"))),
        },
        (FieldType::Boolean, FormValue::Integer(i)) => Err(invalid(
            key,
            format!("expected true or false, got integer {i}"),
        )),

        (FieldType::String, FormValue::Text(s)) => {
            if s.is_empty() && key.is_optional() {
                Ok(None)
            } else {
                Ok(Some(Value::String(s)))
            }
        }
        (FieldType::String, FormValue::Flag(b)) => Ok(Some(Value::String(b.to_string()))),
        (FieldType::String, FormValue::Integer(i)) => Ok(Some(Value::String(i.to_string()))),
    }
}

/// Parse base-10 integer text. Surrounding whitespace is ignored.
pub fn parse_integer(key: Key, text: &str) -> Result<Value, NavicfgError> {
    text.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|e| invalid(key, format!("'{text}' is not a whole number ({e})")))
}

/// `true`/`false`, any case.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("true") {
        Some(true)
    } else if t.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Looser spelling accepted for checkbox answers typed by a person.
pub fn parse_flag(text: &str) -> Option<bool> {
    if let Some(b) = parse_bool_literal(text) {
        return Some(b);
    }
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "1" => Some(true),
        "n" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn invalid(key: Key, reason: String) -> NavicfgError {
    NavicfgError::InvalidValue {
        key: key.name().to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_is_parsed() {
        let v = coerce(Key::Port, "4600".into()).unwrap();
        assert_eq!(v, Some(Value::Integer(4600)));
    }

    #[test]
    fn integer_text_tolerates_padding_and_leading_zeros() {
        assert_eq!(
            coerce(Key::SessionTimeout, " 048 ".into()).unwrap(),
            Some(Value::Integer(48))
        );
        assert_eq!(
            coerce(Key::Port, "+80".into()).unwrap(),
            Some(Value::Integer(80))
        );
    }

    #[test]
    fn zero_is_stored_not_omitted() {
        assert_eq!(
            coerce(Key::Port, "0".into()).unwrap(),
            Some(Value::Integer(0))
        );
    }

    #[test]
    fn bad_integer_text_is_invalid() {
        for bad in ["abc", "", "1.5", "4533abc"] {
            let err = coerce(Key::Port, bad.into()).unwrap_err();
            match err {
                NavicfgError::InvalidValue { key, .. } => assert_eq!(key, "Port"),
                other => panic!("Expected InvalidValue for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn typed_integer_passes_through() {
        assert_eq!(
            coerce(Key::Port, 4533i64.into()).unwrap(),
            Some(Value::Integer(4533))
        );
    }

    #[test]
    fn flag_for_integer_key_is_invalid() {
        assert!(coerce(Key::SessionTimeout, true.into()).is_err());
    }

    #[test]
    fn boolean_flag_passes_through() {
        assert_eq!(
            coerce(Key::AutoScan, false.into()).unwrap(),
            Some(Value::Boolean(false))
        );
    }

    #[test]
    fn boolean_text_literals() {
        assert_eq!(
            coerce(Key::AutoScan, "TRUE".into()).unwrap(),
            Some(Value::Boolean(true))
        );
        assert!(coerce(Key::AutoScan, "maybe".into()).is_err());
    }

    #[test]
    fn empty_optional_text_is_omitted() {
        for key in [Key::MusicFolder, Key::FfmpegPath, Key::LogFile] {
            assert_eq!(coerce(key, "".into()).unwrap(), None, "{key}");
        }
    }

    #[test]
    fn empty_required_text_is_kept() {
        assert_eq!(
            coerce(Key::Address, "".into()).unwrap(),
            Some(Value::String(String::new()))
        );
    }

    #[test]
    fn string_text_is_verbatim() {
        assert_eq!(
            coerce(Key::MusicFolder, " /music ".into()).unwrap(),
            Some(Value::String(" /music ".into()))
        );
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("Off"), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("sure"), None);
    }
}
