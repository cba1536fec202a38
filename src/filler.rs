//! Interactive completion of missing required settings.
//!
//! After analyzers are collected for a section, every required setting
//! that neither the section nor its fallback provides is asked for on the
//! terminal. Blocking and synchronous; the caller decides when (and
//! whether) to invoke this.

use anyhow::Result;
use rustyline::DefaultEditor;
use std::sync::Arc;

use crate::analyzers::Analyzer;
use crate::config::cli::canonical_key;
use crate::config::conf::convert_value;
use crate::config::{Origin, Section, Setting};

/// Which required settings the section cannot resolve, as
/// `(analyzer name, setting key)` pairs in analyzer order.
pub fn missing_settings<'r>(
    section: &Section<'_>,
    analyzers: &'r [Arc<dyn Analyzer>],
) -> Vec<(&'r str, &'r str)> {
    let mut missing = Vec::new();
    for analyzer in analyzers {
        for key in analyzer.required_settings() {
            if section.get(key).is_none() {
                missing.push((analyzer.name(), *key));
            }
        }
    }
    missing
}

/// Prompts the user for missing required settings.
pub struct SectionFiller {
    editor: DefaultEditor,
}

impl SectionFiller {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Ask for every missing required setting and insert the answers into
    /// the section. Empty answers re-prompt. Returns how many settings
    /// were added.
    pub fn fill_section(
        &mut self,
        section: &mut Section<'_>,
        analyzers: &[Arc<dyn Analyzer>],
    ) -> Result<usize> {
        let missing = missing_settings(section, analyzers);
        let mut added = 0;
        for (analyzer_name, key) in missing {
            // A previous answer may already have satisfied this key.
            if section.get(key).is_some() {
                continue;
            }
            let spec = canonical_key(key);
            let value = loop {
                let prompt = format!("{} needs a value for '{}': ", analyzer_name, key);
                let line = self.editor.readline(&prompt)?;
                match convert_value(spec, &line) {
                    Some(value) => break value,
                    None => continue,
                }
            };
            let stored_key = match spec {
                Some(spec) => spec.key.to_string(),
                None => key.to_string(),
            };
            section.insert(Setting::new(stored_key, value, Origin::Interactive));
            added += 1;
        }
        Ok(added)
    }
}
