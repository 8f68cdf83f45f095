//! File selection - resolves a rule set's policy into concrete files
//!
//! Every root directory is walked recursively, in file-name order so runs are
//! reproducible. Hidden entries below a root (`.git`, `.svn`, editor swap
//! files) are not visited. Files are kept if they carry one of the rule set's
//! extensions and their path below the root passes its stoplist/whitelist.
//!
//! # Examples
//!
//! ```no_run
//! use resub::core::models::RuleSet;
//! use resub::selector::FileSelector;
//!
//! let ruleset = RuleSet::builder("imports")
//!     .directory("src")
//!     .extension("java")
//!     .rule(r"import old\.", "import new.")
//!     .build()
//!     .unwrap();
//! for path in FileSelector::select(&ruleset).unwrap() {
//!     println!("{}", path.unwrap().display());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::error::{ConfigurationError, FileAccessError};
use crate::core::models::RuleSet;

/// Lazy sequence of selected files
///
/// Traversal failures below a root surface as per-file errors.
pub type Selection<'a> = Box<dyn Iterator<Item = Result<PathBuf, FileAccessError>> + 'a>;

/// Resolves rule set policies to files
#[derive(Debug, Clone, Copy)]
pub struct FileSelector;

impl FileSelector {
    /// Walk every root of `ruleset` and yield eligible files
    ///
    /// Fails up front if any root directory is missing.
    pub fn select(ruleset: &RuleSet) -> Result<Selection<'_>, ConfigurationError> {
        ruleset.verify_directories()?;

        let walk = ruleset.directories().iter().flat_map(move |root| {
            WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(move |e| e.depth() == 0 || !is_hidden(e))
                .filter_map(move |entry| match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        let path = entry.into_path();
                        ruleset.admits(root, &path).then_some(Ok(path))
                    },
                    Ok(_) => None,
                    Err(e) => Some(Err(FileAccessError::Walk {
                        path: e.path().map_or_else(|| root.clone(), Path::to_path_buf),
                        message: e.to_string(),
                    })),
                })
        });

        Ok(Box::new(walk))
    }

    /// Restrict an explicit file list to what `ruleset` may touch
    ///
    /// Files must lie under one of the roots, carry an accepted extension and
    /// pass the stoplist/whitelist. Input order is kept. Paths are compared
    /// canonicalized so relative and absolute spellings agree.
    #[must_use]
    pub fn filter(ruleset: &RuleSet, files: &[PathBuf]) -> Vec<PathBuf> {
        let roots: Vec<PathBuf> = ruleset.directories().iter().map(|d| canonical(d)).collect();
        files
            .iter()
            .filter(|path| {
                let resolved = canonical(path);
                roots
                    .iter()
                    .find(|root| resolved.starts_with(root))
                    .is_some_and(|root| ruleset.admits(root, &resolved))
            })
            .cloned()
            .collect()
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Check if an entry is hidden (starts with .)
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
