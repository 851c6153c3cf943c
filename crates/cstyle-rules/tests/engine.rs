//! Integration test: every built-in rule end-to-end via Analyzer.
//!
//! The compilation rule runs against a fake checker so these tests do not
//! depend on a C compiler being installed.

use cstyle_core::{Analyzer, Config, LintResult, RuleKind};
use cstyle_rules::{
    all_rules, compilation, rules_from_config, CheckOutcome, CheckerError, Compilation,
    SyntaxChecker,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct AlwaysPasses;

impl SyntaxChecker for AlwaysPasses {
    fn check(&self, _path: &Path) -> Result<CheckOutcome, CheckerError> {
        Ok(CheckOutcome::Passed)
    }
}

struct Rejects(&'static str);

impl SyntaxChecker for Rejects {
    fn check(&self, _path: &Path) -> Result<CheckOutcome, CheckerError> {
        Ok(CheckOutcome::Failed {
            diagnostics: self.0.to_string(),
        })
    }
}

fn engine_with<C: SyntaxChecker + 'static>(checker: C) -> Analyzer {
    Analyzer::builder()
        .rules(
            all_rules()
                .into_iter()
                .filter(|rule| rule.name() != compilation::NAME),
        )
        .rule(Compilation::with_checker(checker))
        .build()
}

fn engine() -> Analyzer {
    engine_with(AlwaysPasses)
}

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const MESSY_SOURCE: &str = r#"#include <stdio.h>
#include <stdlib.h>

int load(const char *path) {
    FILE *f = fopen(path, "r");
    char *buf = malloc(64);
      buf[0] = 0;
    printf("Error: nothing loaded\n");
    return 0;
}
"#;

// ── Clean input ──

#[test]
fn clean_fixture_has_no_violations() {
    let root = fixture_root().join("clean");
    let files = [root.join("count.c"), root.join("graph.h")];

    let result = engine().analyze(&files);

    assert!(result.violations.is_empty(), "{:#?}", result.violations);
    assert_eq!(result.checked_files, files);
    assert_eq!(result.exit_code(), 0);
    assert!(result.render_report().contains("Files checked: 2"));
}

// ── Detection across rules ──

#[test]
fn messy_source_reports_every_kind_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "load.c", MESSY_SOURCE);

    let result = engine().analyze(&[&path]);
    let kinds: Vec<RuleKind> = result.grouped().keys().copied().collect();

    assert_eq!(
        kinds,
        vec![
            RuleKind::Header,
            RuleKind::FunctionDoc,
            RuleKind::Indentation,
            RuleKind::ErrorHandling,
            RuleKind::ErrorOutput,
        ]
    );

    let messages: Vec<&str> = result
        .violations
        .iter()
        .map(|v| v.message.as_str())
        .collect();
    assert!(messages.contains(&"Missing file header comment"));
    assert!(messages.contains(&"Function 'load' missing documentation comment"));
    assert!(messages.contains(&"Call to fopen() not checked for errors"));
    assert!(messages.contains(&"Call to malloc() not checked for errors"));
    assert_eq!(result.exit_code(), 1);
}

#[test]
fn compiler_diagnostics_become_file_level_violations() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "a.c", MESSY_SOURCE);

    let result = engine_with(Rejects(
        "a.c:5:11: warning: unused variable 'f'\na.c:6:11: warning: unused variable 'buf'\n",
    ))
    .analyze(&[&path]);

    let compilation = result.by_kind(RuleKind::Compilation);
    assert_eq!(compilation.len(), 2);
    assert!(compilation.iter().all(|v| v.location.line == 0));
    assert_eq!(
        compilation[0].message,
        "Compiler error/warning: a.c:5:11: warning: unused variable 'f'"
    );
}

#[test]
fn compilation_does_not_run_on_headers() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "a.h", "#ifndef A_H\n#define A_H\n#endif\n");

    let result = engine_with(Rejects("boom")).analyze(&[&path]);

    assert!(result.by_kind(RuleKind::Compilation).is_empty());
}

// ── Properties ──

#[test]
fn group_count_matches_distinct_kinds() {
    let dir = TempDir::new().unwrap();
    let files = [
        write(&dir, "load.c", MESSY_SOURCE),
        write(&dir, "bare.h", "int f(void);\n"),
        dir.path().join("missing.c"),
    ];

    let result = engine().analyze(&files);
    let distinct: HashSet<RuleKind> = result.violations.iter().map(|v| v.rule).collect();
    let grouped = result.grouped();

    assert_eq!(grouped.len(), distinct.len());
    assert!(grouped.values().all(|group| !group.is_empty()));
    for kind in distinct {
        assert!(result
            .render_report()
            .contains(&format!("{kind} ({} violations):", grouped[&kind].len())));
    }
}

#[test]
fn header_guard_requires_all_three_directives() {
    let dir = TempDir::new().unwrap();
    let guarded = "#ifndef X\n#define X\nint f(void);\n#endif";
    let path = write(&dir, "x.h", guarded);
    assert!(engine().analyze(&[&path]).by_kind(RuleKind::HeaderGuard).is_empty());

    for directive in ["#ifndef X\n", "#define X\n", "\n#endif"] {
        let path = write(&dir, "x.h", &guarded.replacen(directive, "", 1));
        let result = engine().analyze(&[&path]);
        assert_eq!(
            result.by_kind(RuleKind::HeaderGuard).len(),
            1,
            "without {directive:?}"
        );
    }
}

#[test]
fn fopen_check_on_next_line_clears_violation() {
    let dir = TempDir::new().unwrap();

    let unchecked = write(
        &dir,
        "open.c",
        "FILE *f = fopen(\"x\", \"r\");\n\n\n\n\nfclose(f);\n",
    );
    let result = engine().analyze(&[&unchecked]);
    let handling = result.by_kind(RuleKind::ErrorHandling);
    assert_eq!(handling.len(), 1);
    assert!(handling[0].message.contains("fopen"));

    let checked = write(
        &dir,
        "open.c",
        "FILE *f = fopen(\"x\", \"r\");\nif (f == NULL) return 1;\n",
    );
    let result = engine().analyze(&[&checked]);
    assert!(result.by_kind(RuleKind::ErrorHandling).is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let files = [
        write(&dir, "load.c", MESSY_SOURCE),
        write(&dir, "bare.h", "int f(void);\n"),
    ];
    let analyzer = engine();

    let first: LintResult = analyzer.analyze(&files);
    let second: LintResult = analyzer.analyze(&files);

    assert_eq!(first, second);
    assert_eq!(first.render_report(), second.render_report());
}

// ── Error isolation ──

#[test]
fn unreadable_file_is_recorded_and_skipped() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone.c");
    let present = write(&dir, "here.c", MESSY_SOURCE);

    let result = engine().analyze(&[&missing, &present]);

    let errors = result.by_kind(RuleKind::FileError);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.file, missing);
    assert_eq!(errors[0].location.line, 0);
    assert!(errors[0].message.starts_with("Error reading file: "));
    assert_eq!(result.checked_files, vec![present]);
    assert!(!result.by_kind(RuleKind::Header).is_empty());
}

#[test]
fn invalid_utf8_is_checked_lossily() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.c");
    std::fs::write(&path, b"/* caf\xe9 */\nint x;\n").unwrap();

    let result = engine().analyze(&[&path]);

    assert!(result.by_kind(RuleKind::FileError).is_empty());
    assert_eq!(result.checked_files, vec![path]);
}

// ── Configuration ──

#[test]
fn disabled_rules_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "load.c", MESSY_SOURCE);
    let config = Config::parse(
        r#"
[rules.header]
enabled = false

[rules.compilation]
enabled = false

[rules.error-handling]
functions = ["malloc"]
"#,
    )
    .unwrap();

    let result = Analyzer::builder()
        .rules(rules_from_config(&config))
        .config(config)
        .build()
        .analyze(&[&path]);

    assert!(result.by_kind(RuleKind::Header).is_empty());
    assert!(result.by_kind(RuleKind::Compilation).is_empty());
    let handling = result.by_kind(RuleKind::ErrorHandling);
    assert_eq!(handling.len(), 1);
    assert_eq!(handling[0].message, "Call to malloc() not checked for errors");
}
