//! Rule to require consistent indentation.
//!
//! The first indented line fixes the file's indentation unit. Every later
//! indented line must use a multiple of that width. Blank lines, `//`
//! comments and `*` continuation lines are ignored.

use cstyle_core::utils::scan::{indent_width, is_continuation_comment, is_line_comment};
use cstyle_core::utils::ScanState;
use cstyle_core::{FileContext, Location, Rule, RuleKind, Violation};
use tracing::trace;

/// Rule code for indentation.
pub const CODE: &str = "CS003";

/// Rule name for indentation.
pub const NAME: &str = "indentation";

/// Requires indentation widths to be multiples of the file's unit.
#[derive(Debug, Clone, Default)]
pub struct Indentation;

impl Indentation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Indentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires indentation to be a multiple of the first indent width"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut state = ScanState::new();
        let mut violations = Vec::new();

        for (index, line) in ctx.lines.iter().enumerate() {
            let stripped = line.trim();
            if stripped.is_empty() || is_line_comment(stripped) || is_continuation_comment(stripped)
            {
                continue;
            }

            let width = indent_width(line);
            if let Some(unit) = state.observe_indent(width) {
                if width > 0 && width % unit != 0 {
                    violations.push(Violation::new(
                        RuleKind::Indentation,
                        Location::new(ctx.path, index + 1),
                        format!("Inconsistent indentation (expected multiple of {unit})"),
                    ));
                }
            }

            let depth = state.track_braces(stripped);
            trace!("{}:{} depth {}", ctx.path.display(), index + 1, depth);
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check_code(code: &str) -> Vec<Violation> {
        let ctx = FileContext::new(Path::new("count.c"), code);
        Indentation::new().check(&ctx)
    }

    #[test]
    fn test_consistent_indentation() {
        let violations = check_code(
            r"int main(void) {
    if (x) {
        y();
    }
    return 0;
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_inconsistent_indentation() {
        let violations = check_code(
            r"int main(void) {
    int x;
      int y;
    return 0;
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleKind::Indentation);
        assert_eq!(violations[0].location.line, 3);
        assert_eq!(
            violations[0].message,
            "Inconsistent indentation (expected multiple of 4)"
        );
    }

    #[test]
    fn test_unit_comes_from_first_indented_line() {
        let violations = check_code("void f(void) {\n   a();\n      b();\n    c();\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 4);
        assert!(violations[0].message.contains("multiple of 3"));
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        let violations = check_code(
            "/*\n * File: a.c\n */\nvoid f(void) {\n    a();\n\n   // odd comment\n    b();\n}\n",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_no_indented_lines() {
        let violations = check_code("int x;\nint y;\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_tabs_count_as_one_column() {
        let violations = check_code("void f(void) {\n\ta();\n\t\tb();\n}\n");
        assert!(violations.is_empty());
    }
}
