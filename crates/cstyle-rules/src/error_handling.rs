//! Rule to require error checks on risky library calls.
//!
//! # Rationale
//!
//! Calls such as `malloc` and `fopen` fail at runtime. Their results must be
//! checked, and error messages belong on stderr.
//!
//! # Detected Patterns
//!
//! - An assignment from a risky call with no check in the next few lines
//!   (`ERROR_HANDLING`)
//! - A `printf`-family call mentioning "error" that does not write to
//!   stderr (`ERROR_OUTPUT`)
//!
//! Lines are matched as raw text, so calls inside comments or string
//! literals are matched too.
//!
//! # Good Patterns
//!
//! ```text
//! FILE *f = fopen(path, "r");
//! if (f == NULL) {
//!     perror(path);
//!     return 1;
//! }
//! ```

use cstyle_core::{FileContext, Location, Rule, RuleConfig, RuleKind, Violation};

/// Rule code for error-handling.
pub const CODE: &str = "CS005";

/// Rule name for error-handling.
pub const NAME: &str = "error-handling";

/// Calls whose results must be checked by default.
pub const DEFAULT_RISKY_FUNCTIONS: &[&str] = &["malloc", "fopen", "fprintf", "fscanf", "fclose"];

/// Calls that report an error on stderr.
const ERROR_REPORTERS: &[&str] = &["perror", "fprintf(stderr"];

const OUTPUT_CALL: &str = "printf(";

const STDERR_OUTPUT: &str = "fprintf(stderr";

/// Requires risky calls to be checked and errors to go to stderr.
#[derive(Debug, Clone)]
pub struct ErrorHandling {
    /// Names of calls whose results must be checked.
    pub functions: Vec<String>,
    /// How many following lines may hold the check.
    pub lookahead: usize,
}

impl Default for ErrorHandling {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorHandling {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: DEFAULT_RISKY_FUNCTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            lookahead: 4,
        }
    }

    /// Creates the rule from its configuration section.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        let functions = config.get_str_array("functions");
        if !functions.is_empty() {
            rule = rule.functions(functions);
        }
        let lookahead = config.get_usize("lookahead", rule.lookahead);
        rule.lookahead(lookahead)
    }

    /// Sets the risky call names.
    #[must_use]
    pub fn functions<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets how many following lines may hold the check.
    #[must_use]
    pub fn lookahead(mut self, lines: usize) -> Self {
        self.lookahead = lines;
        self
    }

    fn check_unchecked_calls(&self, ctx: &FileContext, violations: &mut Vec<Violation>) {
        for (index, line) in ctx.lines.iter().enumerate() {
            if !has_assignment(line) {
                continue;
            }

            for function in &self.functions {
                if !line.contains(&format!("{function}(")) {
                    continue;
                }

                let checked = ctx
                    .lines
                    .iter()
                    .skip(index + 1)
                    .take(self.lookahead)
                    .any(|next| is_error_check(next.trim()));

                if !checked {
                    violations.push(Violation::new(
                        RuleKind::ErrorHandling,
                        Location::new(ctx.path, index + 1),
                        format!("Call to {function}() not checked for errors"),
                    ));
                }
            }
        }
    }
}

fn check_error_output(ctx: &FileContext, violations: &mut Vec<Violation>) {
    for (index, line) in ctx.lines.iter().enumerate() {
        if line.contains(OUTPUT_CALL)
            && line.to_lowercase().contains("error")
            && !line.contains(STDERR_OUTPUT)
        {
            violations.push(Violation::new(
                RuleKind::ErrorOutput,
                Location::new(ctx.path, index + 1),
                "Error message should be sent to stderr, not stdout",
            ));
        }
    }
}

/// Returns true if the line contains an assignment operator.
///
/// `=` counts unless it is part of `==`, `!=`, `<=` or `>=`.
fn has_assignment(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        if b != b'=' {
            return false;
        }
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        let next = bytes.get(i + 1).copied();
        next != Some(b'=') && !matches!(prev, Some(b'=' | b'!' | b'<' | b'>'))
    })
}

/// Returns true if a stripped line checks a result or reports an error.
fn is_error_check(stripped: &str) -> bool {
    let conditional = stripped.contains("if")
        && (stripped.contains("NULL") || stripped.contains("==") || stripped.contains("!="));
    conditional || ERROR_REPORTERS.iter().any(|r| stripped.contains(r))
}

impl Rule for ErrorHandling {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires checks on malloc/fopen/... results and error output on stderr"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.check_unchecked_calls(ctx, &mut violations);
        check_error_output(ctx, &mut violations);
        violations
    }
}
