//! Text report rendering.

use crate::types::LintResult;
use std::fmt::Write;

const RULE: &str = "============================================================";

const TITLE: &str = "CSC 352 Coding Standards Linter Report";

/// Fixed reference block appended to every report.
pub const STANDARDS_REFERENCE: &[&str] = &[
    "- File header: name, author, purpose",
    "- Function comments: purpose, args, return, assumptions",
    "- Consistent indentation",
    "- Header guards for .h files",
    "- Error checking for library calls",
    "- Error messages to stderr",
    "- Compile with gcc -Wall (no warnings)",
];

impl LintResult {
    /// Renders the human-readable report.
    ///
    /// Without violations the report lists every checked file. Otherwise
    /// violations are grouped by kind in order of first appearance. The
    /// standards reference block is always appended.
    #[must_use]
    pub fn render_report(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "{RULE}");
        let _ = writeln!(report, "{TITLE}");
        let _ = writeln!(report, "{RULE}");
        let _ = writeln!(report);

        if self.has_violations() {
            let _ = writeln!(
                report,
                "❌ Found {} style violations:",
                self.violations.len()
            );
            let _ = writeln!(report);

            for (kind, violations) in self.grouped() {
                let _ = writeln!(report, "{kind} ({} violations):", violations.len());
                for violation in violations {
                    let _ = writeln!(report, "  {}", violation.format());
                }
                let _ = writeln!(report);
            }
        } else {
            let _ = writeln!(report, "✅ No style violations found!");
            let _ = writeln!(report);
            let _ = writeln!(report, "Files checked: {}", self.checked_files.len());
            for file in &self.checked_files {
                let _ = writeln!(report, "  - {}", file.display());
            }
        }

        report.push_str("Coding Standards Reference:");
        for line in STANDARDS_REFERENCE {
            report.push('\n');
            report.push_str(line);
        }
        report
    }
}
