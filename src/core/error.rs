//! Error taxonomy for rewrite runs
//!
//! Two classes of failure exist:
//! - [`ConfigurationError`] is fatal and always raised before any file is touched.
//! - [`FileAccessError`] concerns a single file; the run records it and moves on.
//!
//! A message key with no resolvable level is not an error at all: the call site
//! is left as it was and the key is reported alongside the counts.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::core::models::RuleError;

/// Fatal, pre-flight errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A rule failed validation
    #[error("rule set '{ruleset}': {source}")]
    Rule {
        /// Owning rule set
        ruleset: String,
        /// What was wrong with the rule
        #[source]
        source: RuleError,
    },

    /// A declared root directory does not exist
    #[error("rule set '{ruleset}': directory does not exist: {}", path.display())]
    MissingDirectory {
        /// Owning rule set
        ruleset: String,
        /// The missing directory
        path: PathBuf,
    },

    /// A required option is absent or empty
    #[error("rule set '{ruleset}': missing required option '{field}'")]
    MissingField {
        /// Owning rule set
        ruleset: String,
        /// Option name
        field: &'static str,
    },

    /// A log-level rule set was declared without a message data source
    #[error("rule set '{0}' rewrites log levels but no messages_dir is configured")]
    MissingMessagesDir(String),

    /// Anything else that makes the configuration unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Config or data file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("cannot parse {}: {source}", path.display())]
    Toml {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },
}

/// Recoverable, per-file errors
#[derive(Debug, Error)]
pub enum FileAccessError {
    /// File could not be read (missing, permissions, not UTF-8)
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Temporary sibling could not be created or written
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Rename of the temporary sibling onto the target failed
    #[error("cannot replace {}: {source}", path.display())]
    Persist {
        /// Target file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below a root
    #[error("cannot traverse {}: {message}", path.display())]
    Walk {
        /// Entry being visited
        path: PathBuf,
        /// Walker message
        message: String,
    },

    /// A fixed-point rule kept changing the content past the pass bound
    #[error("{}: rule `{pattern}` did not reach a fixed point after {passes} passes", path.display())]
    NoFixedPoint {
        /// File being rewritten
        path: PathBuf,
        /// The rule pattern
        pattern: String,
        /// Pass bound that was hit
        passes: usize,
    },
}

impl FileAccessError {
    /// Path of the file the error concerns
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Persist { path, .. }
            | Self::Walk { path, .. }
            | Self::NoFixedPoint { path, .. } => path,
        }
    }
}
