//! Atomic file replacement
//!
//! New content is written to a temporary sibling of the target (same
//! directory, name derived from the target), flushed, then renamed over the
//! target. A reader sees either the old file or the new one. If the process
//! dies between the two steps the target is untouched and only the
//! `.<name>.*.resub-tmp` sibling is left behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::error::FileAccessError;
use crate::core::ports::SourceFiles;

const TEMP_SUFFIX: &str = ".resub-tmp";

/// Real filesystem access with atomic write-back
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicFiles;

impl AtomicFiles {
    /// Create the adapter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Write `content` to a temporary sibling of `path` without replacing it
    ///
    /// The sibling inherits the target's permissions.
    pub fn stage(path: &Path, content: &str) -> Result<StagedWrite, FileAccessError> {
        let write_err = |source| FileAccessError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{name}."))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .map_err(write_err)?;

        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(temp.path(), meta.permissions()).map_err(write_err)?;
        }

        Ok(StagedWrite {
            temp,
            target: path.to_path_buf(),
        })
    }
}

impl SourceFiles for AtomicFiles {
    fn read(&self, path: &Path) -> Result<String, FileAccessError> {
        fs::read_to_string(path).map_err(|source| FileAccessError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_back(&self, path: &Path, content: &str) -> Result<(), FileAccessError> {
        Self::stage(path, content)?.commit()
    }
}

/// Content written to a temporary sibling, not yet renamed into place
///
/// Dropping it without [`StagedWrite::commit`] removes the sibling and leaves
/// the target as it was.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Location of the temporary sibling
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Rename the sibling onto the target
    pub fn commit(self) -> Result<(), FileAccessError> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map(|_| ())
            .map_err(|e| FileAccessError::Persist {
                path: target.clone(),
                source: e.error,
            })
    }
}
