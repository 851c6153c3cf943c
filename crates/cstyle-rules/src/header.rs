//! Rule to require a file header comment.
//!
//! # Rationale
//!
//! Every file should open with a block comment naming the file, its author
//! and its purpose, so a reader knows what they are looking at.
//!
//! # Detected Patterns
//!
//! - No `/*` within the first lines of the file
//! - A header comment without `File:`, `Author:` or `Purpose:` (any case)
//!
//! # Good Patterns
//!
//! ```text
//! /*
//!  * File: count.c
//!  * Author: Jane Doe
//!  * Purpose: Counts the words read from stdin.
//!  */
//! ```

use cstyle_core::utils::scan::BLOCK_COMMENT_OPEN;
use cstyle_core::{FileContext, Location, Rule, RuleConfig, RuleKind, Violation};

/// Rule code for header.
pub const CODE: &str = "CS001";

/// Rule name for header.
pub const NAME: &str = "header";

/// Fields every header comment must carry.
pub const REQUIRED_FIELDS: &[&str] = &["File:", "Author:", "Purpose:"];

/// Requires a header comment with the standard fields.
#[derive(Debug, Clone)]
pub struct FileHeader {
    /// How many leading lines are searched for the comment opener.
    pub scan_lines: usize,
    /// How many lines, starting at the opener, are searched for fields.
    pub window: usize,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHeader {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scan_lines: 20,
            window: 15,
        }
    }

    /// Creates the rule from its configuration section.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let defaults = Self::new();
        let scan_lines = config.get_usize("scan_lines", defaults.scan_lines);
        let window = config.get_usize("window", defaults.window);
        defaults.scan_lines(scan_lines).window(window)
    }

    /// Sets how many leading lines are searched for the opener.
    #[must_use]
    pub fn scan_lines(mut self, lines: usize) -> Self {
        self.scan_lines = lines;
        self
    }

    /// Sets the field window size.
    #[must_use]
    pub fn window(mut self, lines: usize) -> Self {
        self.window = lines;
        self
    }
}

impl Rule for FileHeader {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a header comment with File:, Author: and Purpose:"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let location = Location::new(ctx.path, 1);

        let Some(opener) = ctx
            .lines
            .iter()
            .take(self.scan_lines)
            .position(|line| line.contains(BLOCK_COMMENT_OPEN))
        else {
            return vec![Violation::new(
                RuleKind::Header,
                location,
                "Missing file header comment",
            )];
        };

        let block = ctx
            .lines
            .iter()
            .skip(opener)
            .take(self.window)
            .map(|line| line.to_lowercase())
            .collect::<Vec<_>>();

        REQUIRED_FIELDS
            .iter()
            .filter(|field| {
                let needle = field.to_lowercase();
                !block.iter().any(|line| line.contains(&needle))
            })
            .map(|field| {
                Violation::new(
                    RuleKind::Header,
                    location.clone(),
                    format!("Header missing '{field}' field"),
                )
            })
            .collect()
    }
}
