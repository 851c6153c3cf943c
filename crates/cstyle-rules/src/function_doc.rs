//! Rule to require a documentation comment before each function.
//!
//! # Rationale
//!
//! A function's purpose, arguments and return value should be described
//! right above its definition.
//!
//! # Detected Patterns
//!
//! - A definition of the shape `type name(params) {` with no block comment
//!   (`/*` or a `*` continuation line) in the lines just above it
//!
//! `main` is exempt. Definitions are recognized per line with a pattern, so
//! qualified return types (`static int f(...)`, `char *f(...)`) are not seen.
//!
//! Prototypes (`int f(void);`) and calls (`return f(x);`) are not checked:
//! a definition needs its `{` on the same line, or alone on the next
//! non-blank line.
//!
//! # Good Patterns
//!
//! ```text
//! /*
//!  * count_words -- returns the number of words in line.
//!  */
//! int count_words(char *line) {
//! ```

use cstyle_core::utils::scan::{code_lines, CodeLines, BLOCK_COMMENT_OPEN};
use cstyle_core::{FileContext, Location, Rule, RuleConfig, RuleKind, Violation};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for function-doc.
pub const CODE: &str = "CS002";

/// Rule name for function-doc.
pub const NAME: &str = "function-doc";

/// Names the definition pattern matches that are not documented functions.
const EXEMPT_NAMES: &[&str] = &["main", "if", "while", "for", "switch"];

/// Keywords that show a comment describes arguments or the return value.
const INTERFACE_KEYWORDS: &[&str] = &["return", "argument", "param"];

#[allow(clippy::expect_used)]
static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+\s+(\w+)\s*\([^)]*\)\s*(\{)?").expect("definition pattern is valid")
});

/// A function definition found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// Line of the definition (1-indexed).
    pub line: usize,
    /// Function name.
    pub name: String,
}

/// Lazy iterator over the function definitions of a line sequence.
///
/// Skips comment lines. A definition needs its opening brace on the same
/// line, or alone at the start of the next non-blank line.
#[derive(Debug, Clone)]
pub struct FunctionDefinitions<'a> {
    lines: &'a [&'a str],
    code: CodeLines<'a>,
}

impl<'a> FunctionDefinitions<'a> {
    /// Creates an iterator over `lines`.
    #[must_use]
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            code: code_lines(lines),
        }
    }
}

/// Whether the next non-blank line after `index` opens with `{`.
fn brace_follows(lines: &[&str], index: usize) -> bool {
    lines
        .iter()
        .skip(index + 1)
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with('{'))
}

impl Iterator for FunctionDefinitions<'_> {
    type Item = FunctionDefinition;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.code.by_ref() {
            let stripped = line.trim();
            let Some(caps) = DEFINITION.captures(stripped) else {
                continue;
            };

            let name = &caps[1];
            if EXEMPT_NAMES.contains(&name) {
                continue;
            }

            let has_brace = caps.get(2).is_some();
            let rest_is_empty = caps
                .get(0)
                .is_some_and(|m| stripped[m.end()..].trim().is_empty());
            if has_brace || (rest_is_empty && brace_follows(self.lines, index)) {
                return Some(FunctionDefinition {
                    line: index + 1,
                    name: name.to_string(),
                });
            }
        }
        None
    }
}

/// What the comment window above a function contains.
///
/// Only `found` gates a violation today. The other flags are reported for
/// callers that want to grade comment quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocComment {
    /// A comment line was found in the window.
    pub found: bool,
    /// The comment mentions the function's name.
    pub mentions_name: bool,
    /// The comment talks about parameters, arguments or the return value.
    pub mentions_interface: bool,
}

/// Inspects up to `window` lines immediately preceding `definition`.
#[must_use]
pub fn inspect_doc_comment(
    lines: &[&str],
    definition: &FunctionDefinition,
    window: usize,
) -> DocComment {
    let end = definition.line.saturating_sub(1).min(lines.len());
    let start = end.saturating_sub(window);

    let Some(first) = (start..end).find(|&i| {
        let line = lines[i].trim();
        line.contains(BLOCK_COMMENT_OPEN) || line.starts_with('*')
    }) else {
        return DocComment::default();
    };

    let text = lines[first..end]
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    DocComment {
        found: true,
        mentions_name: text.contains(&definition.name.to_lowercase()),
        mentions_interface: INTERFACE_KEYWORDS.iter().any(|k| text.contains(k)),
    }
}

/// Requires a documentation comment above every function definition.
#[derive(Debug, Clone)]
pub struct FunctionDoc {
    /// How many lines above a definition are searched for a comment.
    pub window: usize,
}

impl Default for FunctionDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionDoc {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { window: 10 }
    }

    /// Creates the rule from its configuration section.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let defaults = Self::new();
        let window = config.get_usize("window", defaults.window);
        defaults.window(window)
    }

    /// Sets the search window.
    #[must_use]
    pub fn window(mut self, lines: usize) -> Self {
        self.window = lines;
        self
    }
}

impl Rule for FunctionDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a comment block before every function except main"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        FunctionDefinitions::new(&ctx.lines)
            .filter(|def| !inspect_doc_comment(&ctx.lines, def, self.window).found)
            .map(|def| {
                Violation::new(
                    RuleKind::FunctionDoc,
                    Location::new(ctx.path, def.line),
                    format!("Function '{}' missing documentation comment", def.name),
                )
            })
            .collect()
    }
}
