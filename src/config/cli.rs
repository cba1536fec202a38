//! Command-line argument parsing against the fixed flag table.
//!
//! The grammar is deliberately not clap-shaped: short flags may be several
//! characters long (`-id`, `-rf`), a short flag fuses with its first value
//! (`-dHallo`), and multi-value flags consume tokens greedily until the
//! next recognized flag. Every violation is a [`CliError`]; the binary
//! turns those into an exit status of 2.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::constants::DEFAULT_SECTION;

use super::coerce::parse_int;
use super::types::{normalize_key, Origin, Section, Setting, Value};

/// Legal values for `LogType`.
pub const LOG_TYPES: &[&str] = &["TXT", "CONSOLE"];

/// Legal values for `Verbosity`.
pub const VERBOSITY_LEVELS: &[&str] = &["DEBUG", "INFO", "WARN", "ERR"];

/// How many value tokens a flag consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one value.
    One,
    /// One or more values, consumed greedily.
    OneOrMore,
    /// Zero or one value (presence alone is meaningful).
    ZeroOrOne,
}

/// The shape of the stored value once the tokens are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A list of string tokens (also used for single-value domain flags).
    List,
    /// A bare scalar path.
    Path,
    /// `true` when the flag appears bare, otherwise the given path.
    FlagOrPath,
    /// A signed decimal integer.
    Integer,
}

/// One row of the recognized-flag table.
#[derive(Debug)]
pub struct FlagSpec {
    /// Canonical setting key, e.g. `TargetDirectories`.
    pub key: &'static str,
    pub short: &'static str,
    pub long: Option<&'static str>,
    pub arity: Arity,
    pub domain: Option<&'static [&'static str]>,
    pub kind: ValueKind,
}

/// The fixed table of recognized flags.
pub const FLAG_TABLE: &[FlagSpec] = &[
    FlagSpec {
        key: "TargetDirectories",
        short: "-d",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "IgnoredDirectories",
        short: "-id",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "FlatDirectories",
        short: "-fd",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "TargetFileTypes",
        short: "-t",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "IgnoredFileTypes",
        short: "-it",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "Filters",
        short: "-f",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "IgnoredFilters",
        short: "-if",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "RegexFilters",
        short: "-rf",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "LogType",
        short: "-l",
        long: Some("--log"),
        arity: Arity::One,
        domain: Some(LOG_TYPES),
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "LogOutput",
        short: "-o",
        long: None,
        arity: Arity::OneOrMore,
        domain: None,
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "Verbosity",
        short: "-v",
        long: Some("--verbose"),
        arity: Arity::One,
        domain: Some(VERBOSITY_LEVELS),
        kind: ValueKind::List,
    },
    FlagSpec {
        key: "ConfigFile",
        short: "-c",
        long: None,
        arity: Arity::One,
        domain: None,
        kind: ValueKind::Path,
    },
    FlagSpec {
        key: "Save",
        short: "-s",
        long: None,
        arity: Arity::ZeroOrOne,
        domain: None,
        kind: ValueKind::FlagOrPath,
    },
    FlagSpec {
        key: "JobCount",
        short: "-j",
        long: None,
        arity: Arity::One,
        domain: None,
        kind: ValueKind::Integer,
    },
];

/// A command-line validation failure. The binary reports these and exits
/// with status 2; nothing here is recoverable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("no arguments given")]
    NoArguments,
    #[error("unrecognized argument: {0}")]
    UnrecognizedToken(String),
    #[error("flag {flag} requires a value")]
    MissingValue { flag: String },
    #[error("invalid choice {value:?} for {flag} (choose from {allowed:?})")]
    InvalidChoice {
        flag: String,
        value: String,
        allowed: &'static [&'static str],
    },
    #[error("invalid number {value:?} for {flag}")]
    InvalidNumber { flag: String, value: String },
}

/// Match a (possibly whitespace/case-mangled) key against the canonical
/// flag keys. Returns the matching table row.
pub fn canonical_key(raw: &str) -> Option<&'static FlagSpec> {
    let normalized = normalize_key(raw);
    FLAG_TABLE
        .iter()
        .find(|spec| spec.key.eq_ignore_ascii_case(&normalized))
}

/// Recognize a token as a flag. Returns the table row plus the fused value
/// when the token is a short flag with its first value attached.
///
/// Fused matching picks the longest short form that prefixes the token,
/// so `-fdx` is `FlatDirectories x`, not `Filters dx`.
fn lookup_flag(token: &str) -> Option<(&'static FlagSpec, Option<String>)> {
    if let Some(spec) = FLAG_TABLE
        .iter()
        .find(|s| s.long == Some(token) || s.short == token)
    {
        return Some((spec, None));
    }
    if token.starts_with('-') && !token.starts_with("--") {
        let fused = FLAG_TABLE
            .iter()
            .filter(|s| token.starts_with(s.short) && token.len() > s.short.len())
            .max_by_key(|s| s.short.len())?;
        let rest = token[fused.short.len()..].to_string();
        return Some((fused, Some(rest)));
    }
    None
}

/// Parse a token list into sections.
///
/// The command line always produces a single `default` section; the result
/// is still a mapping so the merge treats all three sources uniformly.
/// Keys not supplied are absent, never defaulted here.
pub fn parse<'d>(tokens: &[String]) -> Result<BTreeMap<String, Section<'d>>, CliError> {
    if tokens.is_empty() {
        return Err(CliError::NoArguments);
    }

    let mut section = Section::new(DEFAULT_SECTION);
    let mut i = 0;
    while i < tokens.len() {
        let flag_token = tokens[i].clone();
        let (spec, fused) = lookup_flag(&flag_token)
            .ok_or_else(|| CliError::UnrecognizedToken(flag_token.clone()))?;
        i += 1;

        let mut values: Vec<String> = Vec::new();
        if let Some(v) = fused {
            values.push(v);
        }
        let max = match spec.arity {
            Arity::OneOrMore => usize::MAX,
            Arity::One | Arity::ZeroOrOne => 1,
        };
        while i < tokens.len() && values.len() < max && lookup_flag(&tokens[i]).is_none() {
            values.push(tokens[i].clone());
            i += 1;
        }

        if values.is_empty() && spec.arity != Arity::ZeroOrOne {
            return Err(CliError::MissingValue { flag: flag_token });
        }
        if let Some(domain) = spec.domain {
            for value in &values {
                if !domain.contains(&value.as_str()) {
                    return Err(CliError::InvalidChoice {
                        flag: flag_token.clone(),
                        value: value.clone(),
                        allowed: domain,
                    });
                }
            }
        }

        let value = match spec.kind {
            ValueKind::List => Value::List(values),
            ValueKind::Path => Value::Str(values.remove(0)),
            ValueKind::FlagOrPath => match values.pop() {
                Some(path) => Value::Str(path),
                None => Value::Bool(true),
            },
            ValueKind::Integer => {
                let raw = values.remove(0);
                let parsed = parse_int(&raw).map_err(|_| CliError::InvalidNumber {
                    flag: flag_token.clone(),
                    value: raw,
                })?;
                Value::Int(parsed)
            }
        };
        // Re-setting the same key replaces the previous value: last wins.
        section.insert(Setting::new(spec.key, value, Origin::Cli));
    }

    let mut sections = BTreeMap::new();
    sections.insert(DEFAULT_SECTION.to_string(), section);
    Ok(sections)
}

/// One-line usage summary printed alongside CLI errors.
pub fn usage() -> String {
    let flags: Vec<&str> = FLAG_TABLE
        .iter()
        .map(|spec| spec.long.unwrap_or(spec.short))
        .collect();
    format!("usage: {} [{}] ...", crate::constants::APP_NAME, flags.join("|"))
}
