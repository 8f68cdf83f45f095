//! Git integration adapter
//!
//! Implements `ModifiedFiles` on top of `git2`, reporting working-tree status
//! entries with porcelain-style codes.

use std::path::{Path, PathBuf};

use git2::{Repository, Status, StatusOptions};

use crate::core::ports::{FileStatus, ModifiedFiles};

/// Git-based status listing
#[derive(Debug, Clone)]
pub struct GitStatus {
    /// Directory inside the repository
    workdir: PathBuf,
}

impl GitStatus {
    /// Create an adapter for the repository containing `workdir`
    #[must_use]
    pub const fn new(workdir: PathBuf) -> Self {
        Self { workdir }
    }

    /// Create an adapter for the current directory
    pub fn current_dir() -> anyhow::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }
}

impl ModifiedFiles for GitStatus {
    fn status(&self) -> anyhow::Result<Vec<FileStatus>> {
        let repo = Repository::discover(&self.workdir)?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("bare repository has no working tree"))?;

        let mut options = StatusOptions::new();
        options.include_untracked(true).recurse_untracked_dirs(true).include_ignored(false);

        let statuses = repo.statuses(Some(&mut options))?;
        let mut entries = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                log::warn!("skipping status entry with non UTF-8 path");
                continue;
            };
            let code = status_code(entry.status());
            if code.is_empty() {
                continue;
            }
            entries.push(FileStatus::new(code, root.join(path)));
        }
        Ok(entries)
    }
}

/// Porcelain-style code for a status bit set
///
/// Index column first, then worktree column; untracked files are `??`.
#[must_use]
pub fn status_code(status: Status) -> String {
    if status.contains(Status::WT_NEW) && !status.intersects(index_bits()) {
        return "??".to_string();
    }

    let index = if status.contains(Status::INDEX_NEW) {
        Some('A')
    } else if status.contains(Status::INDEX_DELETED) {
        Some('D')
    } else if status.contains(Status::INDEX_RENAMED) {
        Some('R')
    } else if status.intersects(Status::INDEX_MODIFIED | Status::INDEX_TYPECHANGE) {
        Some('M')
    } else {
        None
    };

    let worktree = if status.contains(Status::WT_DELETED) {
        Some('D')
    } else if status.contains(Status::WT_RENAMED) {
        Some('R')
    } else if status.intersects(Status::WT_MODIFIED | Status::WT_TYPECHANGE) {
        Some('M')
    } else {
        None
    };

    index.into_iter().chain(worktree).collect()
}

fn index_bits() -> Status {
    Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE
}
