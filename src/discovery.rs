//! Encrypted fixture discovery.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::error::{MangleError, Result};
use crate::processor::TEMP_PREFIX;

/// File-name glob for encrypted fixtures.
pub const DEFAULT_INCLUDE: &str = "*.enc.yaml";

/// Path globs pruned during the walk.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/.git"];

/// Decides which files under a root are candidates for mangling.
#[derive(Debug, Clone)]
pub struct FileFinder {
    include: Pattern,
    exclude: Vec<Pattern>,
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| MangleError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl FileFinder {
    /// Create a finder from an include glob (matched against file names) and
    /// exclude globs (matched against paths relative to the root).
    pub fn new(include: &str, exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: exclude
                .iter()
                .map(|p| compile(p))
                .collect::<Result<_>>()?,
        })
    }

    /// Check whether a file name is a candidate.
    pub fn is_candidate(&self, file_name: &str) -> bool {
        !file_name.starts_with(TEMP_PREFIX) && self.include.matches(file_name)
    }

    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.exclude.iter().any(|p| p.matches_path(relative))
    }

    /// Find candidate files under `root`, sorted.
    pub fn find(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(root, e))
        {
            let entry = entry.map_err(|e| MangleError::Other(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let candidate = self.is_candidate(&entry.file_name().to_string_lossy());
            if candidate {
                files.push(entry.into_path());
            }
        }

        // Sort for determinism
        files.sort();

        tracing::debug!("Found {} candidate file(s) under {}", files.len(), root.display());
        Ok(files)
    }
}

/// Default exclude globs as owned strings.
pub fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect()
}
