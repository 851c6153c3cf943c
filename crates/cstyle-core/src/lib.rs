//! # cstyle-core
//!
//! Core framework for checking C source text against coding conventions.
//!
//! This crate provides the foundational traits and types for building
//! line-based style detectors. It includes:
//!
//! - [`Rule`] trait for per-file detectors
//! - [`Analyzer`] for running detectors over a set of files
//! - [`Violation`] and [`RuleKind`] for representing findings
//! - [`LintResult`] for aggregating and rendering the report
//! - [`utils::scan`] with the shared comment, brace and indentation tracking
//!
//! ## Example
//!
//! ```ignore
//! use cstyle_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = analyzer.analyze(&["src/list.c", "src/list.h"]);
//! println!("{}", result.render_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod report;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{FileContext, HEADER_EXTENSION, SOURCE_EXTENSION};
pub use report::STANDARDS_REFERENCE;
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Location, RuleKind, Violation};
