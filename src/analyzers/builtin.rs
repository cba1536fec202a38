//! Built-in analyzers shipped with scour.

use super::{Analyzer, AnalyzerKind};

/// Flags lines longer than `MaxLineLength` columns.
pub struct LineLength;

impl Analyzer for LineLength {
    fn name(&self) -> &str {
        "line_length"
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Local
    }

    fn description(&self) -> &str {
        "Flags lines longer than MaxLineLength columns"
    }

    fn required_settings(&self) -> &[&str] {
        &["MaxLineLength"]
    }
}

/// Flags trailing whitespace at line ends.
pub struct TrailingWhitespace;

impl Analyzer for TrailingWhitespace {
    fn name(&self) -> &str {
        "trailing_whitespace"
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Local
    }

    fn description(&self) -> &str {
        "Flags trailing whitespace at line ends"
    }
}

/// Flags TODO and FIXME markers left in comments.
pub struct TodoComments;

impl Analyzer for TodoComments {
    fn name(&self) -> &str {
        "todo_comments"
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Local
    }

    fn description(&self) -> &str {
        "Flags TODO and FIXME markers left in comments"
    }
}

/// Reports files with identical contents across the project.
pub struct DuplicateFiles;

impl Analyzer for DuplicateFiles {
    fn name(&self) -> &str {
        "duplicate_files"
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Global
    }

    fn description(&self) -> &str {
        "Reports files with identical contents across the project"
    }
}

/// Reports files exceeding a sane size for review.
pub struct LargeFiles;

impl Analyzer for LargeFiles {
    fn name(&self) -> &str {
        "large_files"
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Global
    }

    fn description(&self) -> &str {
        "Reports files too large for meaningful review"
    }
}
