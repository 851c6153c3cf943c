//! Rule to require warning-free compilation of source files.
//!
//! The actual check is delegated to a [`SyntaxChecker`]. The default
//! [`CompilerChecker`] runs `gcc -Wall -c <file> -o /dev/null` and reports
//! every line the compiler prints on failure.

use cstyle_core::{FileContext, Location, Rule, RuleConfig, RuleKind, Violation};
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Rule code for compilation.
pub const CODE: &str = "CS006";

/// Rule name for compilation.
pub const NAME: &str = "compilation";

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "gcc";

/// Flags passed to the compiler when none are configured.
pub const DEFAULT_FLAGS: &[&str] = &["-Wall"];

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Outcome of a syntax check that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The compiler accepted the file.
    Passed,
    /// The compiler rejected the file.
    Failed {
        /// Diagnostic output, as printed by the compiler.
        diagnostics: String,
    },
}

/// Errors that prevent a syntax check from running to completion.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// The compiler executable could not be found.
    #[error("{tool} not found - cannot test compilation")]
    NotFound {
        /// Compiler that was looked up.
        tool: String,
    },

    /// The compiler did not finish in time and was killed.
    #[error("{tool} timed out after {}s", .timeout.as_secs())]
    TimedOut {
        /// Compiler that was run.
        tool: String,
        /// Configured limit.
        timeout: Duration,
    },

    /// Any other failure to run or wait for the compiler.
    #[error("failed to run {tool}: {source}")]
    Io {
        /// Compiler that was run.
        tool: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Checks that a source file compiles cleanly.
///
/// Implementations must not leave build artifacts behind.
pub trait SyntaxChecker: Send + Sync {
    /// Checks the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the check could not run, e.g. the tool is missing.
    fn check(&self, path: &Path) -> Result<CheckOutcome, CheckerError>;
}

/// Type alias for boxed `SyntaxChecker` trait objects.
pub type SyntaxCheckerBox = Box<dyn SyntaxChecker>;

/// Runs an external C compiler in compile-only mode.
#[derive(Debug, Clone)]
pub struct CompilerChecker {
    /// Compiler executable.
    pub compiler: String,
    /// Flags placed before `-c <file>`.
    pub flags: Vec<String>,
    /// Optional limit on how long the compiler may run.
    pub timeout: Option<Duration>,
}

impl Default for CompilerChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerChecker {
    /// Creates a checker running `gcc -Wall` without a timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            flags: DEFAULT_FLAGS.iter().map(ToString::to_string).collect(),
            timeout: None,
        }
    }

    /// Sets the compiler executable.
    #[must_use]
    pub fn compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Sets the compiler flags.
    #[must_use]
    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the time limit.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.compiler);
        cmd.args(&self.flags)
            .arg("-c")
            .arg(path)
            .arg("-o")
            .arg(NULL_DEVICE)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn io_error(&self, source: std::io::Error) -> CheckerError {
        if source.kind() == std::io::ErrorKind::NotFound {
            CheckerError::NotFound {
                tool: self.compiler.clone(),
            }
        } else {
            CheckerError::Io {
                tool: self.compiler.clone(),
                source,
            }
        }
    }

    /// Runs the compiler to completion, or until the time limit expires.
    ///
    /// On expiry the pending wait is dropped, which kills the child.
    async fn run(&self, path: &Path) -> Result<Output, CheckerError> {
        let child = self.command(path).spawn().map_err(|e| self.io_error(e))?;
        let output = child.wait_with_output();

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output).await.map_err(|_| {
                CheckerError::TimedOut {
                    tool: self.compiler.clone(),
                    timeout: limit,
                }
            })?,
            None => output.await,
        };
        result.map_err(|e| self.io_error(e))
    }
}

impl SyntaxChecker for CompilerChecker {
    fn check(&self, path: &Path) -> Result<CheckOutcome, CheckerError> {
        debug!("Running {} on {}", self.compiler, path.display());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| self.io_error(e))?;
        let output = runtime.block_on(self.run(path))?;

        if output.status.success() {
            Ok(CheckOutcome::Passed)
        } else {
            Ok(CheckOutcome::Failed {
                diagnostics: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// Requires source files to compile with the configured checker.
pub struct Compilation {
    checker: SyntaxCheckerBox,
}

impl Default for Compilation {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Compilation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compilation").finish_non_exhaustive()
    }
}

impl Compilation {
    /// Creates a new rule backed by the default compiler.
    #[must_use]
    pub fn new() -> Self {
        Self::with_checker(CompilerChecker::new())
    }

    /// Creates a rule backed by a custom checker.
    #[must_use]
    pub fn with_checker<C: SyntaxChecker + 'static>(checker: C) -> Self {
        Self {
            checker: Box::new(checker),
        }
    }

    /// Creates the rule from its configuration section.
    ///
    /// Recognized options: `compiler`, `flags` and `timeout_secs`.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let flags = config.get_str_array("flags");
        let timeout = config
            .get_option::<u64>("timeout_secs")
            .map(Duration::from_secs);

        let mut checker = CompilerChecker::new()
            .compiler(config.get_str("compiler", DEFAULT_COMPILER))
            .timeout(timeout);
        if !flags.is_empty() {
            checker = checker.flags(flags);
        }
        Self::with_checker(checker)
    }
}

impl Rule for Compilation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires .c files to compile with gcc -Wall"
    }

    fn applies_to(&self, ctx: &FileContext) -> bool {
        ctx.is_source()
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let location = Location::file_level(ctx.path);

        match self.checker.check(ctx.path) {
            Ok(CheckOutcome::Passed) => Vec::new(),
            Ok(CheckOutcome::Failed { diagnostics }) => diagnostics
                .trim()
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| {
                    Violation::new(
                        RuleKind::Compilation,
                        location.clone(),
                        format!("Compiler error/warning: {line}"),
                    )
                })
                .collect(),
            Err(e) => {
                warn!("{}: {}", ctx.path.display(), e);
                vec![Violation::new(RuleKind::Compilation, location, e.to_string())]
            }
        }
    }
}
