//! Rule trait for defining style detectors.

use crate::context::FileContext;
use crate::types::Violation;

/// A per-file style rule over raw text lines.
///
/// Implement this trait to create detectors that analyze individual source
/// files. Rules receive the file's line sequence through [`FileContext`] and
/// keep any scanning state local to a single `check` call.
///
/// # Example
///
/// ```ignore
/// use cstyle_core::{FileContext, Location, Rule, RuleKind, Violation};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "CS100" }
///
///     fn check(&self, ctx: &FileContext) -> Vec<Violation> {
///         ctx.lines
///             .iter()
///             .enumerate()
///             .filter(|(_, line)| line.contains('\t'))
///             .map(|(i, _)| {
///                 Violation::new(
///                     RuleKind::Indentation,
///                     Location::new(ctx.path, i + 1),
///                     "Tab character in indentation",
///                 )
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "header-guard").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CS004").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether this rule should run on the given file at all.
    ///
    /// Rules limited to headers or sources override this.
    fn applies_to(&self, _ctx: &FileContext) -> bool {
        true
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    ///
    /// # Returns
    ///
    /// A vector of violations found in this file, in detection order.
    fn check(&self, ctx: &FileContext) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
