//! Log severity levels
//!
//! The closed set of levels a message key can resolve to. The lowercase name
//! doubles as the logger method name emitted by the level rewrite.

use serde::{Deserialize, Serialize};

/// Severity level of a logged message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Finest-grained tracing
    Trace,
    /// Debugging detail
    Debug,
    /// Informational notice
    Info,
    /// Something unexpected but recoverable
    Warn,
    /// A failure
    Error,
}

impl Level {
    /// Method name on the target logger (`logger.warn(...)`)
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Resolve a message-key tag (`ERR`, `SEVERE_WARN`, ...) to a level
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TRACE" => Some(Self::Trace),
            "DEBUG" => Some(Self::Debug),
            "INFO" | "NOTE" | "SEVERE_NOTE" | "MILD_NOTE" => Some(Self::Info),
            "WARN" | "SEVERE_WARN" | "MILD_WARN" => Some(Self::Warn),
            "ERR" | "SEVERE_ERR" | "MILD_ERR" | "FATAL_ERR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Whether `tag` resolves on its own, without the next key segment
    #[must_use]
    pub fn is_bare_tag(tag: &str) -> bool {
        matches!(tag, "TRACE" | "DEBUG" | "INFO" | "NOTE" | "WARN" | "ERR")
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid level: {s}. Use: trace, debug, info, warn, error")),
        }
    }
}
