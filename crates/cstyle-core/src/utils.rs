//! Utility functions for rule implementations.

pub mod scan;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use scan::{brace_delta, code_lines, indent_width, CodeLines, LineKind, ScanState};
