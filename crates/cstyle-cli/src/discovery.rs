//! Input file discovery.
//!
//! Directory searches keep files whose extension is listed in
//! `[analyzer] extensions` and that match no exclude pattern. Explicit files
//! are kept as given when they exist.

use anyhow::{Context, Result};
use cstyle_core::AnalyzerConfig;
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Finds the files to lint.
#[derive(Debug)]
pub struct Discovery {
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
    respect_gitignore: bool,
}

impl Discovery {
    /// Builds a discovery from the analyzer config plus extra exclude globs.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn new(config: &AnalyzerConfig, extra_exclude: &[String]) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .chain(extra_exclude)
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extensions: config.extensions.clone(),
            exclude,
            respect_gitignore: config.respect_gitignore,
        })
    }

    /// Lists matching files in `dir`, or in its whole subtree when
    /// `recursive` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk fails.
    pub fn search_dir(&self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            tracing::warn!("Not a directory: {}", dir.display());
            return Ok(Vec::new());
        }

        let mut builder = ignore::WalkBuilder::new(dir);
        builder
            .standard_filters(self.respect_gitignore)
            .hidden(false)
            .max_depth(if recursive { None } else { Some(1) });

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let path = path.strip_prefix(".").unwrap_or(path);
            if !self.has_extension(path) {
                continue;
            }
            if self.is_excluded(path, dir) {
                tracing::debug!("Excluded: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        tracing::debug!("Found {} file(s) in {}", files.len(), dir.display());
        Ok(files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}

/// Keeps the explicit paths that exist.
pub fn existing_files(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|file| {
            let exists = file.exists();
            if !exists {
                tracing::warn!("Skipping missing file: {}", file.display());
            }
            exists
        })
        .cloned()
        .collect()
}
