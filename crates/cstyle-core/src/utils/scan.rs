//! Line-based scanning primitives shared by the detectors.
//!
//! These are heuristics over raw text lines, not a C lexer. Comment markers
//! inside string or character literals are treated like real markers:
//!
//! ```text
//! printf("/* not a comment */");   // still classified as a comment line
//! ```

/// Opens a block comment.
pub const BLOCK_COMMENT_OPEN: &str = "/*";

/// Closes a block comment.
pub const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Starts a line comment.
pub const LINE_COMMENT: &str = "//";

/// Classification of a single line by comment tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The line may contain code.
    Code,
    /// The line is (part of) a comment and carries no code structure.
    Comment,
}

/// Ephemeral per-file scanning state.
///
/// Created fresh for every file and detector; nothing here outlives a single
/// pass over one line sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Inside an unterminated block comment.
    pub in_comment: bool,
    /// Net count of `{` minus `}` seen so far.
    pub brace_level: i64,
    /// Indentation unit inferred from the first indented line.
    pub indent_unit: Option<usize>,
}

impl ScanState {
    /// Creates a fresh state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances comment tracking over `line` and classifies it.
    ///
    /// An opener sets `in_comment`; a closer on the same or a later line
    /// clears it, and the closing line itself counts as comment. Lines that
    /// start with `//` are comments as well.
    pub fn classify(&mut self, line: &str) -> LineKind {
        if line.contains(BLOCK_COMMENT_OPEN) {
            self.in_comment = true;
        }
        if line.contains(BLOCK_COMMENT_CLOSE) {
            self.in_comment = false;
            return LineKind::Comment;
        }
        if self.in_comment || is_line_comment(line.trim()) {
            LineKind::Comment
        } else {
            LineKind::Code
        }
    }

    /// Adds the brace delta of a stripped line to the running depth.
    pub fn track_braces(&mut self, stripped: &str) -> i64 {
        self.brace_level += brace_delta(stripped);
        self.brace_level
    }

    /// Records an indentation width and returns the established unit.
    ///
    /// The first nonzero width becomes the unit for the rest of the file.
    pub fn observe_indent(&mut self, width: usize) -> Option<usize> {
        if self.indent_unit.is_none() && width > 0 {
            self.indent_unit = Some(width);
        }
        self.indent_unit
    }
}

/// Net brace delta of a line: opening minus closing braces.
#[must_use]
pub fn brace_delta(stripped: &str) -> i64 {
    stripped.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Width of the leading whitespace of a line, in characters.
///
/// Tabs count as one character, like any other whitespace.
#[must_use]
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Returns true if a stripped line starts with `//`.
#[must_use]
pub fn is_line_comment(stripped: &str) -> bool {
    stripped.starts_with(LINE_COMMENT)
}

/// Returns true if a stripped line continues a block comment (starts with `*`).
#[must_use]
pub fn is_continuation_comment(stripped: &str) -> bool {
    stripped.starts_with('*')
}

/// Iterator over the code lines of a file.
///
/// Yields `(index, line)` pairs (0-indexed) for lines that comment tracking
/// classifies as [`LineKind::Code`].
#[derive(Debug, Clone)]
pub struct CodeLines<'a> {
    lines: std::iter::Enumerate<std::slice::Iter<'a, &'a str>>,
    state: ScanState,
}

impl<'a> Iterator for CodeLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            if self.state.classify(line) == LineKind::Code {
                return Some((index, *line));
            }
        }
        None
    }
}

/// Returns an iterator over the code lines of `lines`.
#[must_use]
pub fn code_lines<'a>(lines: &'a [&'a str]) -> CodeLines<'a> {
    CodeLines {
        lines: lines.iter().enumerate(),
        state: ScanState::new(),
    }
}
