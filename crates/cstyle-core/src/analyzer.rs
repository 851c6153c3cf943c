//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Location, RuleKind, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while analyzing a single file.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The file could not be read.
    #[error("Error reading file: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl AnalyzerError {
    /// Converts the error into the violation recorded for the file.
    #[must_use]
    pub fn into_violation(self) -> Violation {
        let message = self.to_string();
        match self {
            Self::Read { path, .. } => {
                Violation::new(RuleKind::FileError, Location::file_level(path), message)
            }
        }
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        Analyzer {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Every file is read once and all enabled rules run against the same line
/// sequence. Files are independent: no state is carried from one to the next.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes the given files and returns the aggregated result.
    ///
    /// A file that cannot be read is recorded as a single `FILE_ERROR`
    /// violation and does not stop the remaining files from being checked.
    #[must_use]
    pub fn analyze<P: AsRef<Path>>(&self, files: &[P]) -> LintResult {
        info!("Checking {} file(s) with {} rule(s)", files.len(), self.rule_count());

        let mut result = LintResult::new();
        for path in files {
            let path = path.as_ref();
            match self.analyze_file(path) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.checked_files.push(path.to_path_buf());
                }
                Err(e) => {
                    warn!("{}: {}", path.display(), e);
                    result.violations.push(e.into_violation());
                }
            }
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.checked_files.len()
        );

        result
    }

    /// Reads and analyzes a single file.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Read`] if the file cannot be read. Invalid
    /// UTF-8 is replaced rather than treated as an error.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| AnalyzerError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(self.analyze_source(path, &content))
    }

    /// Runs all enabled rules over in-memory content.
    #[must_use]
    pub fn analyze_source(&self, path: &Path, content: &str) -> Vec<Violation> {
        let ctx = FileContext::new(path, content);
        debug!("{}: {} line(s)", path.display(), ctx.line_count());
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name(), rule.code()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            if !rule.applies_to(&ctx) {
                continue;
            }

            violations.extend(rule.check(&ctx));
        }

        violations
    }
}
