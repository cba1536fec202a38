//! Pluggable analysis units and their discovery.
//!
//! Analyzers are descriptors: they declare a name, a kind (local = per
//! file, global = whole project) and the settings they require. Which
//! analyzers a section enables is decided by its `Filters`,
//! `RegexFilters` and `IgnoredFilters` settings. Execution is out of
//! scope here.

pub mod builtin;

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Section;

/// Whether an analyzer inspects single files or the whole project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyzerKind {
    Local,
    Global,
}

/// Every analysis unit implements this trait.
pub trait Analyzer {
    /// Unique name used by `Filters` / `IgnoredFilters`.
    fn name(&self) -> &str;

    fn kind(&self) -> AnalyzerKind;

    /// Human-readable description for summaries.
    fn description(&self) -> &str;

    /// Settings the analyzer cannot run without. Missing ones are
    /// completed interactively before a run.
    fn required_settings(&self) -> &[&str] {
        &[]
    }
}

/// Holds all registered analyzers and selects them per section.
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Register an analyzer. Called during startup.
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(Arc::from(analyzer));
    }

    /// Create a registry with all built-in analyzers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(builtin::LineLength));
        registry.register(Box::new(builtin::TrailingWhitespace));
        registry.register(Box::new(builtin::TodoComments));
        registry.register(Box::new(builtin::DuplicateFiles));
        registry.register(Box::new(builtin::LargeFiles));
        registry
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Select the analyzers of `kind` that `section` enables.
    ///
    /// With neither `Filters` nor `RegexFilters` set, every analyzer of
    /// the kind is a candidate; otherwise an analyzer must be named by a
    /// filter or matched by a regex filter. `IgnoredFilters` removes by
    /// exact name afterwards.
    pub fn collect_for_section(
        &self,
        section: &Section<'_>,
        kind: AnalyzerKind,
    ) -> Result<Vec<Arc<dyn Analyzer>>> {
        let filters: Option<Vec<String>> = section.get("Filters").map(|s| s.value.as_list());
        let regexes: Vec<Regex> = match section.get("RegexFilters") {
            Some(setting) => setting
                .value
                .as_list()
                .iter()
                .map(|pattern| {
                    Regex::new(pattern)
                        .with_context(|| format!("Invalid regex filter: {:?}", pattern))
                })
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };
        let ignored: HashSet<String> = section
            .get("IgnoredFilters")
            .map(|s| s.value.as_list().into_iter().collect())
            .unwrap_or_default();

        let unrestricted = filters.is_none() && regexes.is_empty();
        let selected = self
            .analyzers
            .iter()
            .filter(|a| a.kind() == kind)
            .filter(|a| {
                unrestricted
                    || filters
                        .as_ref()
                        .is_some_and(|names| names.iter().any(|n| n == a.name()))
                    || regexes.iter().any(|re| re.is_match(a.name()))
            })
            .filter(|a| !ignored.contains(a.name()))
            .cloned()
            .collect();
        Ok(selected)
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::conf::parse_str;
    use crate::config::Origin;

    fn section(text: &str) -> Section<'static> {
        parse_str(text, Origin::ConfFile).remove("default").unwrap()
    }

    fn names(analyzers: &[Arc<dyn Analyzer>]) -> Vec<&str> {
        analyzers.iter().map(|a| a.name()).collect()
    }

    #[test]
    fn no_filters_selects_all_of_the_kind() {
        let registry = AnalyzerRegistry::with_builtins();
        let local = registry
            .collect_for_section(&section(""), AnalyzerKind::Local)
            .unwrap();
        let global = registry
            .collect_for_section(&section(""), AnalyzerKind::Global)
            .unwrap();
        assert_eq!(local.len() + global.len(), registry.len());
        assert!(names(&local).contains(&"line_length"));
        assert!(names(&global).contains(&"duplicate_files"));
    }

    #[test]
    fn filters_select_by_name() {
        let registry = AnalyzerRegistry::with_builtins();
        let local = registry
            .collect_for_section(&section("filters = line_length"), AnalyzerKind::Local)
            .unwrap();
        assert_eq!(names(&local), vec!["line_length"]);
    }

    #[test]
    fn regex_filters_are_additive() {
        let registry = AnalyzerRegistry::with_builtins();
        let local = registry
            .collect_for_section(
                &section("filters = line_length\nregexfilters = ^todo"),
                AnalyzerKind::Local,
            )
            .unwrap();
        let mut got = names(&local);
        got.sort();
        assert_eq!(got, vec!["line_length", "todo_comments"]);
    }

    #[test]
    fn ignored_filters_remove_selected_analyzers() {
        let registry = AnalyzerRegistry::with_builtins();
        let local = registry
            .collect_for_section(
                &section("ignoredfilters = trailing_whitespace"),
                AnalyzerKind::Local,
            )
            .unwrap();
        assert!(!names(&local).contains(&"trailing_whitespace"));
    }

    #[test]
    fn invalid_regex_filter_is_an_error() {
        let registry = AnalyzerRegistry::with_builtins();
        let result =
            registry.collect_for_section(&section("regexfilters = [invalid"), AnalyzerKind::Local);
        assert!(result.is_err());
    }
}
