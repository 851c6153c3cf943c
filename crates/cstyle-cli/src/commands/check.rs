//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use cstyle_core::{Analyzer, Config, RuleBox};
use cstyle_rules::{rule_from_config, rules_from_config};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};
use crate::discovery::{existing_files, Discovery};
use crate::OutputFormat;

/// Arguments of the default (check) command.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// C source files to lint
    pub files: Vec<PathBuf>,

    /// Directory to search for C files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Recursively search the directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Write the report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Only run specific rules (comma-separated names or codes)
    #[arg(long)]
    pub rules: Option<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    check(args, config_path, Path::new(".")).map(ExitCode::from)
}

/// Checks the selected files and returns the process exit code.
///
/// `base` is where project config is looked up and the directory searched
/// when no files or `--dir` are given.
fn check(args: &CheckArgs, config_path: Option<&Path>, base: &Path) -> Result<u8> {
    let source = config_resolver::resolve(base, config_path);
    let config = load_config(&source)?;

    let discovery = Discovery::new(&config.analyzer, &args.exclude)?;
    let files = collect_files(&discovery, args, base)?;
    if files.is_empty() {
        println!("No C source files found to check.");
        return Ok(1);
    }

    let rules = match &args.rules {
        Some(filter) => filter_rules(filter, &config),
        None => rules_from_config(&config),
    };

    let analyzer = Analyzer::builder().rules(rules).config(config).build();
    let result = analyzer.analyze(&files);

    super::output::emit(&result, args.format, args.output.as_deref())?;

    Ok(result.exit_code())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Gathers the files to check.
///
/// Directory results and explicit files are merged. Only when neither files
/// nor `--dir` were given is `base` searched instead.
fn collect_files(discovery: &Discovery, args: &CheckArgs, base: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if args.files.is_empty() && args.dir.is_none() {
        files.extend(discovery.search_dir(base, false)?);
    } else {
        if let Some(dir) = &args.dir {
            files.extend(discovery.search_dir(dir, args.recursive)?);
        }
        files.extend(existing_files(&args.files));
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn filter_rules(filter: &str, config: &Config) -> Vec<RuleBox> {
    let mut seen = HashSet::new();
    let mut rules = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match rule_from_config(name, config) {
            Some(rule) => {
                if seen.insert(rule.name()) {
                    rules.push(rule);
                }
            }
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstyle_core::AnalyzerConfig;
    use std::fs;
    use tempfile::TempDir;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn filter_accepts_names_and_codes() {
        let rules = filter_rules("header, CS004,indentation", &Config::default());
        assert_eq!(names(&rules), vec!["header", "header-guard", "indentation"]);
    }

    #[test]
    fn filter_skips_unknown_and_duplicates() {
        let rules = filter_rules("bogus,header,CS001,,", &Config::default());
        assert_eq!(names(&rules), vec!["header"]);
    }

    #[test]
    fn collect_merges_dir_and_explicit_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("b.c"), "").unwrap();
        fs::write(src.join("a.h"), "").unwrap();
        let extra = tmp.path().join("extra.c");
        fs::write(&extra, "").unwrap();

        let args = CheckArgs {
            files: vec![extra.clone(), src.join("b.c"), tmp.path().join("gone.c")],
            dir: Some(src.clone()),
            ..CheckArgs::default()
        };
        let discovery = Discovery::new(&AnalyzerConfig::default(), &[]).unwrap();
        let files = collect_files(&discovery, &args, tmp.path()).unwrap();

        let mut expected = vec![src.join("a.h"), src.join("b.c"), extra];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn missing_explicit_file_does_not_fall_back_to_base() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("other.c"), "").unwrap();

        let args = CheckArgs {
            files: vec![tmp.path().join("typo.c")],
            ..CheckArgs::default()
        };
        let discovery = Discovery::new(&AnalyzerConfig::default(), &[]).unwrap();

        assert!(collect_files(&discovery, &args, tmp.path()).unwrap().is_empty());
        assert_eq!(check(&args, None, tmp.path()).unwrap(), 1);
    }

    #[test]
    fn base_is_searched_without_files_or_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("other.c"), "").unwrap();

        let discovery = Discovery::new(&AnalyzerConfig::default(), &[]).unwrap();
        let files = collect_files(&discovery, &CheckArgs::default(), tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().join("other.c")]);
    }

    #[test]
    fn no_files_found_exits_with_failure() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(check(&CheckArgs::default(), None, tmp.path()).unwrap(), 1);
    }

    #[test]
    fn clean_file_exits_with_success() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("cstyle.toml");
        fs::write(&config, "[rules.compilation]\nenabled = false\n").unwrap();
        let header = tmp.path().join("ok.h");
        fs::write(
            &header,
            "/*\n * File: ok.h\n * Author: A\n * Purpose: B\n */\n#ifndef OK_H\n#define OK_H\n#endif\n",
        )
        .unwrap();

        let args = CheckArgs {
            files: vec![header],
            output: Some(tmp.path().join("report.txt")),
            ..CheckArgs::default()
        };
        assert_eq!(check(&args, Some(&config), tmp.path()).unwrap(), 0);
        assert!(fs::read_to_string(tmp.path().join("report.txt"))
            .unwrap()
            .contains("No style violations found"));
    }

    #[test]
    fn default_config_when_nothing_resolved() {
        let config = load_config(&ConfigSource::Default).unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn broken_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstyle.toml");
        fs::write(&path, "[rules.header\n").unwrap();

        let err = load_config(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
