//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `file/` - Reading sources and atomic write-back
//! - `git/` - Working-tree status via git2
//! - `properties/` - Message catalogs feeding the level map

pub mod file;
pub mod git;
pub mod properties;

pub use file::AtomicFiles;
pub use git::GitStatus;
pub use properties::LevelMapBuilder;
