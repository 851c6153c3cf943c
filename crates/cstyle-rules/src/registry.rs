//! Rule registry: builds detectors by name, code or configuration.

use crate::{
    compilation, error_handling, function_doc, header, header_guard, indentation, Compilation,
    ErrorHandling, FileHeader, FunctionDoc, HeaderGuard, Indentation,
};
use cstyle_core::{Config, RuleBox, RuleConfig};

/// `(code, name)` of every built-in rule, in execution order.
pub const RULES: &[(&str, &str)] = &[
    (header::CODE, header::NAME),
    (function_doc::CODE, function_doc::NAME),
    (indentation::CODE, indentation::NAME),
    (header_guard::CODE, header_guard::NAME),
    (error_handling::CODE, error_handling::NAME),
    (compilation::CODE, compilation::NAME),
];

/// Returns all built-in rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FileHeader::new()),
        Box::new(FunctionDoc::new()),
        Box::new(Indentation::new()),
        Box::new(HeaderGuard::new()),
        Box::new(ErrorHandling::new()),
        Box::new(Compilation::new()),
    ]
}

/// Returns all built-in rules, configured from `config`.
///
/// Disabled rules are still returned; the analyzer skips them.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    RULES
        .iter()
        .filter_map(|(_, name)| rule_from_config(name, config))
        .collect()
}

/// Builds a single rule by name (`header-guard`) or code (`CS004`).
///
/// Returns `None` for unknown rules.
#[must_use]
pub fn rule_from_config(name_or_code: &str, config: &Config) -> Option<RuleBox> {
    let (code, name) = RULES
        .iter()
        .find(|(code, name)| *code == name_or_code || *name == name_or_code)?;

    let defaults = RuleConfig::default();
    let options = config.rule(name, code).unwrap_or(&defaults);

    let rule: RuleBox = match *name {
        header::NAME => Box::new(FileHeader::from_config(options)),
        function_doc::NAME => Box::new(FunctionDoc::from_config(options)),
        indentation::NAME => Box::new(Indentation::new()),
        header_guard::NAME => Box::new(HeaderGuard::new()),
        error_handling::NAME => Box::new(ErrorHandling::from_config(options)),
        compilation::NAME => Box::new(Compilation::from_config(options)),
        _ => return None,
    };
    Some(rule)
}
