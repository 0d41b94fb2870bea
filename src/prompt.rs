//! Line-oriented form editing for the terminal.
//!
//! Walks the form section by section and asks for each field. Pressing Enter
//! keeps the current value. Choice fields only take one of their choices,
//! integer fields only take whole numbers, and optional paths can be cleared
//! with `-`. Generic over the reader and writer so it runs against
//! in-memory buffers in tests.

use std::io::{BufRead, Write};

use crate::coerce::{self, FormValue};
use crate::error::NavicfgError;
use crate::form::FormState;
use crate::schema::{FieldType, Key, Section};

const CLEAR: &str = "-";

/// Edit `form` in place. Stops early, keeping the rest, at end of input.
pub fn edit_form<R: BufRead, W: Write>(
    form: &mut FormState,
    input: &mut R,
    output: &mut W,
) -> Result<(), NavicfgError> {
    for section in Section::ALL {
        writeln!(output, "\n== {} ==", section.title()).map_err(NavicfgError::Prompt)?;
        for key in section.keys() {
            if !edit_field(form, key, input, output)? {
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Ask a yes/no question. Enter gives `default`; end of input is always no.
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    default: bool,
    input: &mut R,
    output: &mut W,
) -> Result<bool, NavicfgError> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let Some(answer) = ask(&format!("{question} [{hint}]: "), input, output)? else {
            return Ok(false);
        };
        if answer.is_empty() {
            return Ok(default);
        }
        match coerce::parse_flag(&answer) {
            Some(b) => return Ok(b),
            None => writeln!(output, "Please answer yes or no.").map_err(NavicfgError::Prompt)?,
        }
    }
}

/// Returns `false` at end of input.
fn edit_field<R: BufRead, W: Write>(
    form: &mut FormState,
    key: Key,
    input: &mut R,
    output: &mut W,
) -> Result<bool, NavicfgError> {
    let spec = key.spec();
    let question = match form.field(key) {
        FormValue::Flag(current) => {
            let hint = if current { "Y/n" } else { "y/N" };
            format!("{}? [{hint}]: ", spec.label)
        }
        other => {
            let current = match other {
                FormValue::Text(t) if t.is_empty() => "<not set>".to_string(),
                other => display_text(other),
            };
            if !spec.choices.is_empty() {
                writeln!(output, "  ({})", spec.choices.join(", ")).map_err(NavicfgError::Prompt)?;
            }
            if spec.optional {
                format!("{} [{current}] ({CLEAR} to clear): ", spec.label)
            } else {
                format!("{} [{current}]: ", spec.label)
            }
        }
    };

    loop {
        let Some(answer) = ask(&question, input, output)? else {
            return Ok(false);
        };
        if answer.is_empty() {
            return Ok(true);
        }
        match accept(key, &answer) {
            Ok(value) => {
                form.assign(key, &value)?;
                return Ok(true);
            }
            Err(message) => writeln!(output, "{message}").map_err(NavicfgError::Prompt)?,
        }
    }
}

fn display_text(value: FormValue) -> String {
    match value {
        FormValue::Text(t) => t,
        FormValue::Integer(i) => i.to_string(),
        FormValue::Flag(b) => b.to_string(),
    }
}

/// Check one typed answer. Returns the text to store or a message to show.
fn accept(key: Key, answer: &str) -> Result<String, String> {
    let spec = key.spec();
    match spec.field_type {
        FieldType::Boolean => coerce::parse_flag(answer)
            .map(|b| b.to_string())
            .ok_or_else(|| "Please answer yes or no.".to_string()),
        FieldType::Integer => coerce::parse_integer(key, answer)
            .map(|v| v.to_string())
            .map_err(|_| format!("'{answer}' is not a whole number.")),
        FieldType::String if spec.optional && answer == CLEAR => Ok(String::new()),
        FieldType::String if !spec.choices.is_empty() => spec
            .choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(answer))
            .map(|c| c.to_string())
            .ok_or_else(|| format!("Please pick one of: {}", spec.choices.join(", "))),
        FieldType::String => Ok(answer.to_string()),
    }
}

/// Print `question`, read one line. `None` at end of input.
fn ask<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>, NavicfgError> {
    write!(output, "{question}").map_err(NavicfgError::Prompt)?;
    output.flush().map_err(NavicfgError::Prompt)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(NavicfgError::Prompt)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).trim().to_string()))
}
