//! Per-rule-set counters

use serde::Serialize;

/// Counters accumulated over the files of one rule set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files whose content changed
    pub files_changed: usize,
    /// Sum of per-file substitution counts
    pub total_substitutions: usize,
}

impl RunSummary {
    /// Fold one file's substitution count in
    pub const fn record(&mut self, substitutions: usize) {
        if substitutions > 0 {
            self.files_changed += 1;
            self.total_substitutions += substitutions;
        }
    }

    /// Add another summary's counters
    pub const fn absorb(&mut self, other: Self) {
        self.files_changed += other.files_changed;
        self.total_substitutions += other.total_substitutions;
    }
}
