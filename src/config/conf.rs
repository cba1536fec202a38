//! Configuration-file text parsing.
//!
//! The format is one `key = value` assignment per line. `#` starts an
//! inline comment unless escaped as `\#`; lines without `=` or with an
//! empty key contribute nothing (deliberate leniency, not an error).
//! `[name]` headers open a named section; assignments before the first
//! header belong to `default`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::DEFAULT_SECTION;

use super::cli::{canonical_key, FlagSpec, ValueKind};
use super::coerce::{parse_bool, parse_int, split_list};
use super::types::{Origin, Section, Setting, Value};

/// Failure to load a configuration file. Fatal for the resolution run.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse the configuration file at `path`.
///
/// `origin` tags every produced setting (built-in defaults vs. user file).
pub fn parse_file<'d>(
    path: &Path,
    origin: Origin,
) -> Result<BTreeMap<String, Section<'d>>, ConfError> {
    let text = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConfError::FileNotFound(path.to_path_buf())
        } else {
            ConfError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;
    Ok(parse_str(&text, origin))
}

/// Parse configuration text into sections. Never fails: malformed lines
/// are discarded silently.
pub fn parse_str<'d>(text: &str, origin: Origin) -> BTreeMap<String, Section<'d>> {
    let mut sections: BTreeMap<String, Section<'d>> = BTreeMap::new();
    sections.insert(
        DEFAULT_SECTION.to_string(),
        Section::new(DEFAULT_SECTION),
    );

    let mut current = DEFAULT_SECTION.to_string();
    for raw_line in text.lines() {
        let line = strip_comment(raw_line);
        let trimmed = line.trim();

        if let Some(name) = header_name(trimmed) {
            current = name.to_string();
            sections
                .entry(current.clone())
                .or_insert_with(|| Section::new(current.clone()));
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            continue;
        };
        let key = raw_key.trim();
        if key.is_empty() {
            continue;
        }

        let spec = canonical_key(key);
        let stored_key = match spec {
            Some(spec) => spec.key.to_string(),
            None => key.to_string(),
        };
        let Some(value) = convert_value(spec, raw_value) else {
            continue;
        };

        sections
            .entry(current.clone())
            .or_insert_with(|| Section::new(current.clone()))
            .insert(Setting::new(stored_key, value, origin));
    }
    sections
}

/// Convert a raw value string using the configuration-file rules.
///
/// Whole-value boolean coercion is tried first; known scalar keys keep the
/// value as a bare string, the known integer key attempts integer
/// coercion (falling back to a list), and everything else becomes a
/// comma-split list. An overall-empty value yields `None`.
pub(crate) fn convert_value(spec: Option<&'static FlagSpec>, raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(b) = parse_bool(trimmed) {
        return Some(Value::Bool(b));
    }
    match spec.map(|s| s.kind) {
        Some(ValueKind::Path) | Some(ValueKind::FlagOrPath) => {
            Some(Value::Str(trimmed.to_string()))
        }
        Some(ValueKind::Integer) => match parse_int(trimmed) {
            Ok(n) => Some(Value::Int(n)),
            Err(_) => split_list(trimmed).map(Value::List),
        },
        _ => split_list(trimmed).map(Value::List),
    }
}

/// Remove the first unescaped `#` and everything after it. `\#` sequences
/// are unescaped to a literal `#`.
fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('#') => out.push('#'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '#' => break,
            _ => out.push(c),
        }
    }
    out
}

/// Recognize a `[name]` section header. Empty names are not headers.
fn header_name(trimmed: &str) -> Option<&str> {
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}
