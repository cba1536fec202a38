//! Write-back of merged sections to configuration-file text.
//!
//! The `default` section is written first without a header, remaining
//! sections follow under `[name]` headers. `#` in values and `,` inside
//! list items are escaped so the output re-parses to the same values.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use crate::constants::DEFAULT_SECTION;

use super::types::{Section, Value};

/// Writes sections to one target file.
pub struct ConfWriter {
    path: PathBuf,
}

impl ConfWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Render all sections and write them to the target path.
    pub fn write_sections(&self, sections: &BTreeMap<String, Section<'_>>) -> Result<()> {
        fs::write(&self.path, render(sections))
            .with_context(|| format!("Failed to write configuration to {:?}", self.path))
    }
}

/// Render sections to configuration-file text.
pub fn render(sections: &BTreeMap<String, Section<'_>>) -> String {
    let mut out = String::new();
    if let Some(default) = sections.get(DEFAULT_SECTION) {
        render_section(&mut out, default);
    }
    for (name, section) in sections {
        if name == DEFAULT_SECTION {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}]", name);
        render_section(&mut out, section);
    }
    out
}

fn render_section(out: &mut String, section: &Section<'_>) {
    for setting in section.iter() {
        let _ = writeln!(out, "{} = {}", setting.key, escape(&setting.value));
    }
}

fn escape(value: &Value) -> String {
    // A comma inside a list item (legal from the CLI, where values are
    // never comma-split) must not read back as a separator.
    let text = match value {
        Value::List(items) => items
            .iter()
            .map(|item| item.replace(',', "\\,"))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    text.replace('#', "\\#")
}
