//! # cstyle-rules
//!
//! Built-in C coding standard rules for cstyle.
//!
//! ## Available Rules
//!
//! | Code | Name | Violation kinds |
//! |------|------|-----------------|
//! | CS001 | `header` | `HEADER` |
//! | CS002 | `function-doc` | `FUNCTION_DOC` |
//! | CS003 | `indentation` | `INDENTATION` |
//! | CS004 | `header-guard` | `HEADER_GUARD` |
//! | CS005 | `error-handling` | `ERROR_HANDLING`, `ERROR_OUTPUT` |
//! | CS006 | `compilation` | `COMPILATION` |
//!
//! ## Usage
//!
//! ```ignore
//! use cstyle_core::Analyzer;
//! use cstyle_rules::{FileHeader, HeaderGuard};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(FileHeader::new())
//!     .rule(HeaderGuard::new())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compilation;
pub mod error_handling;
pub mod function_doc;
pub mod header;
pub mod header_guard;
pub mod indentation;
mod registry;

pub use compilation::{
    CheckOutcome, CheckerError, Compilation, CompilerChecker, SyntaxChecker, SyntaxCheckerBox,
};
pub use error_handling::ErrorHandling;
pub use function_doc::{
    inspect_doc_comment, DocComment, FunctionDefinition, FunctionDefinitions, FunctionDoc,
};
pub use header::FileHeader;
pub use header_guard::HeaderGuard;
pub use indentation::Indentation;
pub use registry::{all_rules, rule_from_config, rules_from_config, RULES};

/// Re-export core types for convenience.
pub use cstyle_core::{Rule, RuleKind, Violation};
