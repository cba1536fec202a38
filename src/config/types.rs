//! Core data model for resolved configuration: values, settings, sections.
//!
//! A [`Section`] is a named, insertion-ordered bundle of [`Setting`]s with
//! an optional non-owning fallback reference to the default section. The
//! fallback is consulted exactly once on lookup misses; the default section
//! itself never has a fallback, so chains cannot form.

use indexmap::IndexMap;
use std::fmt;

use super::cli;

/// A typed setting value.
///
/// Configuration-file values default to comma-split string lists; booleans,
/// integers, and bare paths are produced where the key's semantics or the
/// whole-value coercion rules demand them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    Str(String),
}

impl Value {
    /// View the value as a list of strings, regardless of its shape.
    ///
    /// Scalars become single-element lists. Useful for consumers that
    /// treat every setting as a token list (filters, directories).
    pub fn as_list(&self) -> Vec<String> {
        match self {
            Value::List(items) => items.clone(),
            Value::Str(s) => vec![s.clone()],
            Value::Bool(b) => vec![b.to_string()],
            Value::Int(n) => vec![n.to_string()],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

/// Which parse pass produced a setting. Diagnostics only; the merge never
/// consults provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Built-in defaults file.
    Default,
    /// Command-line arguments.
    Cli,
    /// User configuration file.
    ConfFile,
    /// Entered interactively while filling missing required settings.
    Interactive,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Origin::Default => "default",
            Origin::Cli => "cli",
            Origin::ConfFile => "file",
            Origin::Interactive => "interactive",
        };
        write!(f, "{}", label)
    }
}

/// A single key/value pair with provenance.
///
/// Known keys are stored under their canonical name (original casing of
/// unknown keys is preserved verbatim).
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: Value,
    pub origin: Origin,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: Value, origin: Origin) -> Self {
        Self {
            key: key.into(),
            value,
            origin,
        }
    }
}

/// Normalized form used when matching a key against the known canonical
/// keys: lowercased, all whitespace removed.
pub(crate) fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// A named collection of settings.
///
/// Lookup checks local storage first, then follows the fallback reference
/// exactly once. Sections are built fresh per resolution run and mutated
/// only during the merge/fill phases.
#[derive(Debug, Clone)]
pub struct Section<'d> {
    name: String,
    settings: IndexMap<String, Setting>,
    fallback: Option<&'d Section<'d>>,
}

impl<'d> Section<'d> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: IndexMap::new(),
            fallback: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a setting, replacing any prior setting stored under the same
    /// key (last write wins, insertion position preserved).
    ///
    /// Callers are expected to canonicalize known keys before insertion;
    /// unknown keys are stored verbatim.
    pub fn insert(&mut self, setting: Setting) {
        self.settings.insert(setting.key.clone(), setting);
    }

    /// Point this section's fallback at the default section.
    pub fn set_fallback(&mut self, defaults: &'d Section<'d>) {
        self.fallback = Some(defaults);
    }

    /// Look up a setting locally, without consulting the fallback.
    ///
    /// Exact key match first; failing that, a case/whitespace-insensitive
    /// match is attempted for known canonical keys only.
    pub fn local_get(&self, key: &str) -> Option<&Setting> {
        if let Some(setting) = self.settings.get(key) {
            return Some(setting);
        }
        let canonical = cli::canonical_key(key)?;
        self.settings.get(canonical.key)
    }

    /// Look up a setting, following the fallback reference exactly once on
    /// a local miss.
    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.local_get(key)
            .or_else(|| self.fallback.and_then(|d| d.local_get(key)))
    }

    /// Overlay every setting from `other` onto this section. Keys present
    /// in both are replaced by `other`'s setting.
    pub fn update_from(&mut self, other: &Section<'d>) {
        for setting in other.settings.values() {
            self.insert(setting.clone());
        }
    }

    /// Iterate settings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
