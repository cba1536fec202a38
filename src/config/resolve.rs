//! The resolution engine: defaults, command line, and user configuration
//! file reconciled into one authoritative set of sections.
//!
//! Precedence is CLI over file over built-in defaults. The engine also
//! decides whether (and where) the merged configuration should be written
//! back, from the dual-purpose `Save` setting.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use crate::constants::{DEFAULT_SECTION, DEFAULT_SETTINGS_TEXT};

use super::cli::{self, CliError};
use super::coerce::parse_bool;
use super::conf::{self, ConfError};
use super::paths;
use super::types::{Origin, Section, Value};

/// Fatal resolution failure. CLI validation errors keep their own variant
/// so the binary can map them to exit status 2.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Conf(#[from] ConfError),
}

/// Result of the dual-purpose `Save` coercion: either a recognized
/// boolean, or the raw value to be used as a save-as path.
enum BoolOrRaw {
    Boolean(bool),
    Raw(String),
}

fn coerce_save(value: &Value) -> BoolOrRaw {
    match value {
        Value::Bool(b) => BoolOrRaw::Boolean(*b),
        other => {
            let raw = other.to_string();
            match parse_bool(&raw) {
                Ok(b) => BoolOrRaw::Boolean(b),
                Err(_) => BoolOrRaw::Raw(raw),
            }
        }
    }
}

/// Whether the merged configuration should be persisted, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    Skip,
    Write(PathBuf),
}

/// Owns the parsed built-in default section and resolves runs against it.
///
/// Sections handed out by [`Resolver::resolve`] borrow the default section
/// as their fallback, so the resolver must outlive every resolution.
pub struct Resolver {
    default_section: Section<'static>,
}

/// The resolved configuration for one run.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// Merged sections, each falling back to the built-in default section.
    pub sections: BTreeMap<String, Section<'a>>,
    /// The user configuration file that was read (and the implicit save
    /// target when `Save` is plain `true` and no `ConfigFile` is set).
    pub config_path: PathBuf,
}

impl Resolver {
    /// Load the built-in defaults from the per-user settings directory,
    /// creating the file from the embedded defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::default_settings_path()?;
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, DEFAULT_SETTINGS_TEXT)
                .with_context(|| format!("Failed to write default settings to {:?}", path))?;
        }
        Ok(Self::from_defaults_file(&path)?)
    }

    /// Load the built-in defaults from an explicit path. Missing files are
    /// a fatal [`ConfError::FileNotFound`] here, unlike [`Resolver::load`].
    pub fn from_defaults_file(path: &Path) -> Result<Self, ResolveError> {
        let mut sections = conf::parse_file(path, Origin::Default)?;
        let default_section = sections
            .remove(DEFAULT_SECTION)
            .unwrap_or_else(|| Section::new(DEFAULT_SECTION));
        Ok(Self { default_section })
    }

    /// Resolve one run from an explicit token list.
    ///
    /// Parses the command line, determines and parses the user
    /// configuration file, then overlays CLI sections onto file sections
    /// key-wise (CLI wins). Every resulting section falls back to the
    /// built-in default section.
    pub fn resolve<'a>(&'a self, tokens: &[String]) -> Result<Resolution<'a>, ResolveError> {
        let mut cli_sections: BTreeMap<String, Section<'a>> = cli::parse(tokens)?;
        for section in cli_sections.values_mut() {
            section.set_fallback(&self.default_section);
        }

        let config_path = cli_sections
            .get(DEFAULT_SECTION)
            .and_then(|section| section.get("ConfigFile"))
            .map(|setting| PathBuf::from(setting.value.to_string()))
            .unwrap_or_else(paths::user_conf_default);

        let mut sections: BTreeMap<String, Section<'a>> =
            conf::parse_file(&config_path, Origin::ConfFile)?;

        for (name, cli_section) in cli_sections {
            match sections.get_mut(&name) {
                Some(existing) => existing.update_from(&cli_section),
                None => {
                    sections.insert(name, cli_section);
                }
            }
        }
        for section in sections.values_mut() {
            section.set_fallback(&self.default_section);
        }

        Ok(Resolution {
            sections,
            config_path,
        })
    }
}

impl Resolution<'_> {
    /// Decide persistence from the merged default section's `Save` value.
    ///
    /// `true` writes back to the `ConfigFile` value (or the file just
    /// read); a non-boolean value is itself the save-as target; `false`
    /// or absence means no write.
    pub fn save_plan(&self) -> SavePlan {
        let Some(default) = self.sections.get(DEFAULT_SECTION) else {
            return SavePlan::Skip;
        };
        let Some(setting) = default.get("Save") else {
            return SavePlan::Skip;
        };
        match coerce_save(&setting.value) {
            BoolOrRaw::Boolean(false) => SavePlan::Skip,
            BoolOrRaw::Boolean(true) => {
                let target = default
                    .get("ConfigFile")
                    .map(|s| PathBuf::from(s.value.to_string()))
                    .unwrap_or_else(|| self.config_path.clone());
                SavePlan::Write(target)
            }
            BoolOrRaw::Raw(path) => SavePlan::Write(PathBuf::from(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Fixture {
        _dir: tempfile::TempDir,
        resolver: Resolver,
        conf_path: PathBuf,
    }

    /// Builds a defaults file and a user conf file in a temp dir and a
    /// resolver over them. `extra` tokens are appended after `-c <conf>`.
    fn fixture(defaults: &str, conf: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let defaults_path = dir.path().join("default_scourrc");
        let conf_path = dir.path().join(".scourrc");
        let mut f = fs::File::create(&defaults_path).unwrap();
        f.write_all(defaults.as_bytes()).unwrap();
        let mut f = fs::File::create(&conf_path).unwrap();
        f.write_all(conf.as_bytes()).unwrap();
        let resolver = Resolver::from_defaults_file(&defaults_path).unwrap();
        Fixture {
            _dir: dir,
            resolver,
            conf_path,
        }
    }

    fn tokens(fixture: &Fixture, extra: &str) -> Vec<String> {
        let mut tokens = vec![
            "-c".to_string(),
            fixture.conf_path.to_string_lossy().into_owned(),
        ];
        tokens.extend(extra.split_whitespace().map(str::to_string));
        tokens
    }

    #[test]
    fn cli_overrides_file_overrides_defaults() {
        let fx = fixture(
            "JobCount = 1\nMaxLineLength = 100\n",
            "JobCount = 2\nFilters = from_file\n",
        );
        let resolution = fx.resolver.resolve(&tokens(&fx, "-j 4")).unwrap();
        let default = &resolution.sections[DEFAULT_SECTION];

        // CLI wins.
        let jobs = default.get("JobCount").unwrap();
        assert_eq!(jobs.value, Value::Int(4));
        assert_eq!(jobs.origin, Origin::Cli);
        // File-only key retained.
        let filters = default.get("Filters").unwrap();
        assert_eq!(filters.value, Value::List(vec!["from_file".into()]));
        assert_eq!(filters.origin, Origin::ConfFile);
        // Defaults-only key reachable via fallback.
        let max = default.get("MaxLineLength").unwrap();
        assert_eq!(max.origin, Origin::Default);
    }

    #[test]
    fn file_only_sections_fall_back_to_defaults() {
        let fx = fixture("MaxLineLength = 100\n", "[rust]\nFilters = x\n");
        let resolution = fx.resolver.resolve(&tokens(&fx, "")).unwrap();
        let rust = &resolution.sections["rust"];
        assert!(rust.get("MaxLineLength").is_some());
        assert!(rust.local_get("MaxLineLength").is_none());
    }

    #[test]
    fn missing_user_conf_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let defaults_path = dir.path().join("default_scourrc");
        fs::write(&defaults_path, "JobCount = 1\n").unwrap();
        let resolver = Resolver::from_defaults_file(&defaults_path).unwrap();
        let gone = dir.path().join("nope.scourrc");
        let tokens = vec!["-c".to_string(), gone.to_string_lossy().into_owned()];
        let err = resolver.resolve(&tokens).unwrap_err();
        assert!(matches!(err, ResolveError::Conf(ConfError::FileNotFound(_))));
    }

    #[test]
    fn save_true_targets_the_config_file() {
        let fx = fixture("", "save = true\n");
        let resolution = fx.resolver.resolve(&tokens(&fx, "")).unwrap();
        // ConfigFile came from the CLI, so it is the target.
        assert_eq!(
            resolution.save_plan(),
            SavePlan::Write(fx.conf_path.clone())
        );
    }

    #[test]
    fn save_true_without_config_key_targets_the_file_just_read() {
        use super::super::types::Setting;

        let mut default = Section::new(DEFAULT_SECTION);
        default.insert(Setting::new("Save", Value::Bool(true), Origin::Cli));
        let mut sections = BTreeMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), default);
        let resolution = Resolution {
            sections,
            config_path: PathBuf::from(".scourrc"),
        };
        assert_eq!(
            resolution.save_plan(),
            SavePlan::Write(PathBuf::from(".scourrc"))
        );
    }

    #[test]
    fn non_boolean_save_is_a_save_as_path() {
        let fx = fixture("", "Filters = a\n");
        let resolution = fx.resolver.resolve(&tokens(&fx, "-s elsewhere")).unwrap();
        assert_eq!(
            resolution.save_plan(),
            SavePlan::Write(PathBuf::from("elsewhere"))
        );
    }

    #[test]
    fn absent_or_false_save_skips_the_write() {
        let fx = fixture("", "Filters = a\n");
        let resolution = fx.resolver.resolve(&tokens(&fx, "")).unwrap();
        assert_eq!(resolution.save_plan(), SavePlan::Skip);

        let fx = fixture("", "save = no\n");
        let resolution = fx.resolver.resolve(&tokens(&fx, "")).unwrap();
        assert_eq!(resolution.save_plan(), SavePlan::Skip);
    }
}
