//! Core types for lint violations and results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Category of a style violation.
///
/// Used both to classify a [`Violation`] and as the grouping key when
/// rendering reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Missing or incomplete file header comment.
    Header,
    /// Function definition without a preceding documentation comment.
    FunctionDoc,
    /// Indentation width that is not a multiple of the file's unit.
    Indentation,
    /// Header file without `#ifndef`/`#define`/`#endif` guards.
    HeaderGuard,
    /// Risky library call whose result is never checked.
    ErrorHandling,
    /// Error message written to stdout instead of stderr.
    ErrorOutput,
    /// Compiler failure, diagnostic, or missing compiler.
    Compilation,
    /// Input file could not be read.
    FileError,
}

impl RuleKind {
    /// Returns the upper-case label used in reports (e.g., `"HEADER_GUARD"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "HEADER",
            Self::FunctionDoc => "FUNCTION_DOC",
            Self::Indentation => "INDENTATION",
            Self::HeaderGuard => "HEADER_GUARD",
            Self::ErrorHandling => "ERROR_HANDLING",
            Self::ErrorOutput => "ERROR_OUTPUT",
            Self::Compilation => "COMPILATION",
            Self::FileError => "FILE_ERROR",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as it was supplied to the analyzer.
    pub file: PathBuf,
    /// Line number (1-indexed), or 0 when the finding has no specific line.
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Creates a location that refers to the whole file.
    #[must_use]
    pub fn file_level(file: impl Into<PathBuf>) -> Self {
        Self::new(file, 0)
    }

    /// Returns true if this location points at a specific line.
    #[must_use]
    pub fn has_line(&self) -> bool {
        self.line > 0
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Category of the violation.
    pub rule: RuleKind,
    /// Where the violation was found.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(rule: RuleKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            rule,
            location,
            message: message.into(),
        }
    }

    /// Formats the violation as a report entry, omitting the line when it is 0.
    #[must_use]
    pub fn format(&self) -> String {
        if self.location.has_line() {
            format!(
                "{}:{} - {}",
                self.location.file.display(),
                self.location.line,
                self.message
            )
        } else {
            format!("{} - {}", self.location.file.display(), self.message)
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location.file.display())?;
        if self.location.has_line() {
            write!(f, ":{}", self.location.line)?;
        }
        write!(f, ": {}: {}", self.rule, self.message)
    }
}

/// Result of running lint analysis.
///
/// Violations keep detection order. `checked_files` only lists files that
/// were read successfully.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Files that were read and checked.
    pub checked_files: Vec<PathBuf>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any violation was recorded.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns violations of the given kind, in detection order.
    #[must_use]
    pub fn by_kind(&self, kind: RuleKind) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == kind).collect()
    }

    /// Groups violations by kind.
    ///
    /// Groups are ordered by the first appearance of each kind; violations
    /// inside a group keep detection order. Only kinds that occur are present.
    #[must_use]
    pub fn grouped(&self) -> IndexMap<RuleKind, Vec<&Violation>> {
        let mut groups: IndexMap<RuleKind, Vec<&Violation>> = IndexMap::new();
        for violation in &self.violations {
            groups.entry(violation.rule).or_default().push(violation);
        }
        groups
    }

    /// Process exit code for this result: 0 when clean, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_violations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(rule: RuleKind, line: usize) -> Violation {
        Violation::new(rule, Location::new("src/list.c", line), "something is off")
    }

    #[test]
    fn format_includes_line_when_present() {
        let v = make_violation(RuleKind::Header, 1);
        assert_eq!(v.format(), "src/list.c:1 - something is off");
    }

    #[test]
    fn format_omits_line_zero() {
        let v = make_violation(RuleKind::Compilation, 0);
        assert_eq!(v.format(), "src/list.c - something is off");
    }

    #[test]
    fn display_uses_rule_label() {
        let v = make_violation(RuleKind::HeaderGuard, 1);
        assert_eq!(
            v.to_string(),
            "src/list.c:1: HEADER_GUARD: something is off"
        );

        let v = make_violation(RuleKind::FileError, 0);
        assert_eq!(v.to_string(), "src/list.c: FILE_ERROR: something is off");
    }

    #[test]
    fn rule_kind_serializes_as_label() {
        for kind in [
            RuleKind::Header,
            RuleKind::FunctionDoc,
            RuleKind::ErrorOutput,
            RuleKind::FileError,
        ] {
            let value = toml::Value::try_from(kind).unwrap();
            assert_eq!(value.as_str(), Some(kind.as_str()));
        }
    }

    // --- LintResult tests ---

    #[test]
    fn grouped_follows_first_appearance() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(RuleKind::Indentation, 4));
        result.violations.push(make_violation(RuleKind::Header, 1));
        result.violations.push(make_violation(RuleKind::Indentation, 9));

        let groups = result.grouped();
        let kinds: Vec<RuleKind> = groups.keys().copied().collect();
        assert_eq!(kinds, vec![RuleKind::Indentation, RuleKind::Header]);

        let lines: Vec<usize> = groups[&RuleKind::Indentation]
            .iter()
            .map(|v| v.location.line)
            .collect();
        assert_eq!(lines, vec![4, 9]);
    }

    #[test]
    fn grouped_has_one_group_per_distinct_kind() {
        let mut result = LintResult::new();
        for (kind, line) in [
            (RuleKind::ErrorHandling, 3),
            (RuleKind::ErrorOutput, 5),
            (RuleKind::ErrorHandling, 8),
            (RuleKind::Compilation, 0),
        ] {
            result.violations.push(make_violation(kind, line));
        }

        let groups = result.grouped();
        assert_eq!(groups.len(), 3);
        assert!(groups.values().all(|g| !g.is_empty()));
    }

    #[test]
    fn exit_code_reflects_violations() {
        let mut result = LintResult::new();
        assert_eq!(result.exit_code(), 0);
        result.violations.push(make_violation(RuleKind::Header, 1));
        assert_eq!(result.exit_code(), 1);
    }
}
