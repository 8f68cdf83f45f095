//! Source file access port
//!
//! The engine reads and persists files only through this trait, so a run can
//! be observed (or made dry) without touching the disk.

use std::path::Path;

use crate::core::error::FileAccessError;

/// Read and atomically replace source files
pub trait SourceFiles {
    /// Read the whole file as UTF-8
    fn read(&self, path: &Path) -> Result<String, FileAccessError>;

    /// Replace the file's content
    ///
    /// Implementations must never leave a half-written target behind: either
    /// the old content or the new content is observable, nothing in between.
    fn write_back(&self, path: &Path, content: &str) -> Result<(), FileAccessError>;
}
