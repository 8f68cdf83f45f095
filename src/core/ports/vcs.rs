//! Version control system port
//!
//! When a run is given no explicit files it asks version control which files
//! are modified in the working tree.

use std::path::PathBuf;

use serde::Serialize;

/// One `{status code, path}` entry of a working-tree status listing
///
/// Codes follow the porcelain convention: `M` modified, `A` added,
/// `D` deleted, `R` renamed, `??` untracked. Index and worktree columns may
/// both be present (`MM`, `AM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    /// Status code
    pub code: String,
    /// Path relative to the repository root
    pub path: PathBuf,
}

impl FileStatus {
    /// Create a status entry
    pub fn new(code: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
        }
    }

    /// Whether this entry denotes a modified file
    ///
    /// Added, deleted and untracked entries are excluded even when they
    /// also carry an `M` column.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.code.contains('M') && !self.code.contains(['A', 'D', '?'])
    }
}

/// Version control system abstraction
pub trait ModifiedFiles {
    /// Working-tree status entries
    fn status(&self) -> anyhow::Result<Vec<FileStatus>>;

    /// Paths of modified files only
    fn modified_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(self
            .status()?
            .into_iter()
            .filter(FileStatus::is_modified)
            .map(|s| s.path)
            .collect())
    }
}
