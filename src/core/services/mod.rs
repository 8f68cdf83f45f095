//! Rewrite services
//!
//! Pure transformation logic over file content. File access goes through the
//! [`SourceFiles`](crate::core::ports::SourceFiles) port.
//!
//! - [`engine`] - Apply a rule set's rules to one file
//! - [`level_rewrite`] - Two-phase message-to-log-level rewrite

pub mod engine;
pub mod level_rewrite;

pub use engine::{DEFAULT_MAX_PASSES, FileOutcome, Rewrite, RewriteEngine, apply_rule};
pub use level_rewrite::{LevelRewrite, LevelRewriter};
