//! Rule to require include guards in header files.
//!
//! # Detected Patterns
//!
//! A `.h` file missing any of:
//!
//! - `#ifndef` within the first 10 lines
//! - `#define` within the first 15 lines
//! - `#endif` within the last 10 lines
//!
//! # Good Patterns
//!
//! ```text
//! #ifndef GRAPH_H
//! #define GRAPH_H
//! ...
//! #endif
//! ```

use cstyle_core::{FileContext, Location, Rule, RuleKind, Violation};

/// Rule code for header-guard.
pub const CODE: &str = "CS004";

/// Rule name for header-guard.
pub const NAME: &str = "header-guard";

const IFNDEF_LINES: usize = 10;
const DEFINE_LINES: usize = 15;
const ENDIF_LINES: usize = 10;

/// Requires `#ifndef`/`#define`/`#endif` guards in header files.
#[derive(Debug, Clone, Default)]
pub struct HeaderGuard;

impl HeaderGuard {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn any_starts_with<S: AsRef<str>>(lines: impl IntoIterator<Item = S>, directive: &str) -> bool {
    lines
        .into_iter()
        .any(|line| line.as_ref().trim().starts_with(directive))
}

impl Rule for HeaderGuard {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires #ifndef/#define/#endif include guards in .h files"
    }

    fn applies_to(&self, ctx: &FileContext) -> bool {
        ctx.is_header()
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let lines = &ctx.lines;
        let tail = lines.len().saturating_sub(ENDIF_LINES);

        let has_ifndef = any_starts_with(lines.iter().take(IFNDEF_LINES), "#ifndef");
        let has_define = any_starts_with(lines.iter().take(DEFINE_LINES), "#define");
        let has_endif = any_starts_with(&lines[tail..], "#endif");

        if has_ifndef && has_define && has_endif {
            return Vec::new();
        }

        vec![Violation::new(
            RuleKind::HeaderGuard,
            Location::new(ctx.path, 1),
            "Header file missing proper include guards (#ifndef/#define/#endif)",
        )]
    }
}
