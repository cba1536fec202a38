//! Centralized constants for scour.
//!
//! All magic strings, file names, and token sets live here so they can be
//! changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "scour";

/// User configuration filename, looked up in the current working directory
/// unless overridden via `-c` / the `ConfigFile` key.
pub const USER_CONF_FILENAME: &str = ".scourrc";

/// Built-in default-settings filename under the per-user config directory.
pub const DEFAULT_SETTINGS_FILENAME: &str = "default_scourrc";

/// Exit status for command-line validation failures.
pub const EXIT_USAGE: i32 = 2;

/// Tokens recognized as boolean `true` (matched case-insensitively).
pub const TRUE_TOKENS: &[&str] = &["true", "yes", "yup", "on"];

/// Tokens recognized as boolean `false` (matched case-insensitively).
pub const FALSE_TOKENS: &[&str] = &["false", "no", "nope", "off"];

/// Section name for settings that appear before any `[section]` header and
/// for everything supplied on the command line.
pub const DEFAULT_SECTION: &str = "default";

/// Contents written to the built-in defaults file when it does not exist yet.
pub const DEFAULT_SETTINGS_TEXT: &str = "\
# Built-in defaults for scour. Everything here is overridden by the
# project .scourrc, which in turn is overridden by command-line flags.
TargetDirectories = .
LogType = CONSOLE
Verbosity = WARN
JobCount = 1
MaxLineLength = 100
";
