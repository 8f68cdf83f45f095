//! Runner - applies rule sets in declared order and aggregates counts
//!
//! A run is strictly sequential: one rule set at a time, one file at a time.
//! All configuration problems surface from [`preflight`] before the
//! first file is read. A file that cannot be read or written is recorded in
//! its rule set's report and the run moves on.

use std::path::PathBuf;

use crate::core::error::ConfigurationError;
use crate::core::models::{RuleSet, RunSummary};
use crate::core::ports::{ModifiedFiles, SourceFiles};
use crate::core::services::RewriteEngine;
use crate::output::{FileChange, FileFailure, RuleSetReport, RunReport};
use crate::selector::FileSelector;

/// Which files a run considers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Walk every rule set's root directories
    Tree,
    /// Only these files, still subject to each rule set's policy
    Files(Vec<PathBuf>),
}

impl Targets {
    /// Resolve command-line input into targets
    ///
    /// Explicit files win; with none, `all` walks the tree; otherwise the
    /// version control collaborator supplies the modified files.
    pub fn resolve(
        files: Vec<PathBuf>,
        all: bool,
        vcs: &dyn ModifiedFiles,
    ) -> anyhow::Result<Self> {
        if !files.is_empty() {
            return Ok(Self::Files(files));
        }
        if all {
            return Ok(Self::Tree);
        }
        let modified = vcs.modified_files()?;
        log::info!("{} modified file(s) reported by version control", modified.len());
        Ok(Self::Files(modified))
    }
}

/// Fail on anything that must abort a run before files are touched
pub fn preflight(rulesets: &[RuleSet]) -> Result<(), ConfigurationError> {
    rulesets.iter().try_for_each(RuleSet::verify_directories)
}

/// Orchestrates rule sets over an engine
#[derive(Debug)]
pub struct Runner<'a, F: SourceFiles> {
    engine: RewriteEngine<'a, F>,
    dry_run: bool,
}

impl<'a, F: SourceFiles> Runner<'a, F> {
    /// Create a runner; dry-run state is taken from the report flag
    pub const fn new(engine: RewriteEngine<'a, F>, dry_run: bool) -> Self {
        Self {
            engine: engine.dry_run(dry_run),
            dry_run,
        }
    }

    /// Run every rule set in order
    pub fn run(
        &self,
        rulesets: &[RuleSet],
        targets: &Targets,
    ) -> Result<RunReport, ConfigurationError> {
        preflight(rulesets)?;

        let mut report = RunReport {
            rulesets: Vec::with_capacity(rulesets.len()),
            total: RunSummary::default(),
            dry_run: self.dry_run,
        };

        for ruleset in rulesets {
            let ruleset_report = self.run_ruleset(ruleset, targets)?;
            report.total.absorb(ruleset_report.summary);
            report.rulesets.push(ruleset_report);
        }

        log::info!(
            "done: {} file(s) changed, {} substitution(s)",
            report.total.files_changed,
            report.total.total_substitutions
        );
        Ok(report)
    }

    /// Run one rule set over its files
    pub fn run_ruleset(
        &self,
        ruleset: &RuleSet,
        targets: &Targets,
    ) -> Result<RuleSetReport, ConfigurationError> {
        log::info!(
            "rule set '{}': {} rule(s), {} mode",
            ruleset.name(),
            ruleset.rules().len(),
            ruleset.mode()
        );

        let mut report = RuleSetReport::new(ruleset.name());
        match targets {
            Targets::Tree => {
                for selected in FileSelector::select(ruleset)? {
                    match selected {
                        Ok(path) => self.process(ruleset, path, &mut report),
                        Err(error) => {
                            log::warn!("{error}");
                            report.failures.push(FileFailure::from(&error));
                        },
                    }
                }
            },
            Targets::Files(files) => {
                for path in FileSelector::filter(ruleset, files) {
                    self.process(ruleset, path, &mut report);
                }
            },
        }

        log::info!(
            "rule set '{}': {} file(s) changed, {} substitution(s)",
            ruleset.name(),
            report.summary.files_changed,
            report.summary.total_substitutions
        );
        Ok(report)
    }

    fn process(&self, ruleset: &RuleSet, path: PathBuf, report: &mut RuleSetReport) {
        match self.engine.apply(ruleset, &path) {
            Ok(outcome) => {
                if outcome.substitutions > 0 {
                    log::info!("  {}: {} substitution(s)", path.display(), outcome.substitutions);
                    report.files.push(FileChange {
                        path: path.clone(),
                        substitutions: outcome.substitutions,
                    });
                } else {
                    log::debug!("  {}: unchanged", path.display());
                }
                for key in &outcome.unresolved_keys {
                    log::debug!("  {}: no level for {key}", path.display());
                }
                report.summary.record(outcome.substitutions);
                report.unresolved_keys.extend(outcome.unresolved_keys);
            },
            Err(error) => {
                log::warn!("{error}");
                report.failures.push(FileFailure::from(&error));
            },
        }
    }
}
