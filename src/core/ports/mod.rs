//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the rewrite logic and the
//! outside world (the filesystem being rewritten, version control).
//!
//! Implementations live in the `adapters` module.

mod source_files;
mod vcs;

pub use source_files::SourceFiles;
pub use vcs::{FileStatus, ModifiedFiles};
