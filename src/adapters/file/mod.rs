//! Filesystem adapter
//!
//! Implements `SourceFiles` on the real filesystem with atomic replacement.

mod atomic;

pub use atomic::{AtomicFiles, StagedWrite};
