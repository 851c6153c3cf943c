//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "cstyle.toml";

const DEFAULT_CONFIG: &str = r#"# cstyle configuration

[analyzer]
# Glob patterns skipped by directory discovery
exclude = [
    "**/build/**",
]

# File extensions picked up by directory discovery
extensions = ["c", "h"]

# Respect .gitignore files
respect_gitignore = false

# Rule configurations
# Each rule can be enabled/disabled by name or code (CS001..CS006)

[rules.header]
enabled = true
scan_lines = 20
window = 15

[rules.function-doc]
enabled = true
window = 10

[rules.indentation]
enabled = true

[rules.header-guard]
enabled = true

[rules.error-handling]
enabled = true
functions = ["malloc", "fopen", "fprintf", "fscanf", "fclose"]
lookahead = 4

[rules.compilation]
enabled = true
compiler = "gcc"
flags = ["-Wall"]
# timeout_secs = 30
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: cstyle --dir . --recursive");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
