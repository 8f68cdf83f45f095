//! Tests for running rule sets end to end

use std::path::PathBuf;

use resub::adapters::{AtomicFiles, LevelMapBuilder};
use resub::config::Config;
use resub::core::error::ConfigurationError;
use resub::core::models::{ApplyMode, LevelMap, RuleSet, RuleSetKind};
use resub::core::ports::{FileStatus, ModifiedFiles};
use resub::core::services::RewriteEngine;
use resub::runner::{Runner, Targets};

use crate::common::{RecordingFiles, TestRepo};

fn foo_to_bar(repo: &TestRepo) -> RuleSet {
    RuleSet::builder("rename")
        .directory(repo.file("src"))
        .extension("java")
        .rule("foo", "bar")
        .mode(ApplyMode::FixedPoint)
        .build()
        .unwrap()
}

#[test]
fn test_tree_run_aggregates_counts() {
    let repo = TestRepo::new();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);

    let report = runner.run(&[foo_to_bar(&repo)], &Targets::Tree).unwrap();

    assert_eq!(report.total.files_changed, 2);
    assert_eq!(report.total.total_substitutions, 3);
    assert_eq!(report.rulesets[0].files.len(), 2);
    assert_eq!(repo.read("src/ui/Panel.java"), "class Panel { bar(); bar(); }\n");
    assert_eq!(repo.read("src/core/Gadget.java"), "class Gadget { bar(); }\n");
    assert_eq!(repo.read("README.md"), "# foo\n");
}

#[test]
fn test_single_pass_scenario_on_text_file() {
    let repo = TestRepo::empty();
    repo.add_file("docs/a.txt", "foo foo");
    let ruleset = RuleSet::builder("text")
        .directory(repo.file("docs"))
        .extension("txt")
        .rule("foo", "bar")
        .build()
        .unwrap();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);

    let report = runner.run(&[ruleset], &Targets::Tree).unwrap();

    assert_eq!(repo.read("docs/a.txt"), "bar foo");
    assert_eq!(report.total.files_changed, 1);
    assert_eq!(report.total.total_substitutions, 1);
}

#[test]
fn test_second_run_changes_nothing() {
    let repo = TestRepo::new();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);
    let rulesets = [foo_to_bar(&repo)];

    runner.run(&rulesets, &Targets::Tree).unwrap();
    let report = runner.run(&rulesets, &Targets::Tree).unwrap();

    assert_eq!(report.total.files_changed, 0);
    assert_eq!(report.total.total_substitutions, 0);
}

#[test]
fn test_dry_run_reports_but_keeps_files() {
    let repo = TestRepo::new();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), true);

    let report = runner.run(&[foo_to_bar(&repo)], &Targets::Tree).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.total.files_changed, 2);
    assert_eq!(repo.read("src/ui/Panel.java"), "class Panel { foo(); foo(); }\n");
}

#[test]
fn test_missing_directory_aborts_before_any_write() {
    let repo = TestRepo::new();
    let broken = RuleSet::builder("broken")
        .directory(repo.file("missing"))
        .extension("java")
        .rule("x", "y")
        .build()
        .unwrap();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);

    let err = runner.run(&[foo_to_bar(&repo), broken], &Targets::Tree).unwrap_err();

    assert!(matches!(err, ConfigurationError::MissingDirectory { .. }));
    assert_eq!(repo.read("src/ui/Panel.java"), "class Panel { foo(); foo(); }\n");
}

#[test]
fn test_file_failure_does_not_stop_the_run() {
    let ruleset = RuleSet::builder("rename")
        .directory("/")
        .extension("java")
        .rule("foo", "bar")
        .build()
        .unwrap();
    let files = RecordingFiles::new()
        .with("/a/A.java", "foo")
        .with("/b/B.java", "foo")
        .unwritable("/a/A.java");
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);
    let targets = Targets::Files(vec![PathBuf::from("/a/A.java"), PathBuf::from("/b/B.java")]);

    let report = runner.run(&[ruleset], &targets).unwrap();

    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.rulesets[0].failures[0].path, PathBuf::from("/a/A.java"));
    assert_eq!(report.total.files_changed, 1);
    assert_eq!(files.content("/b/B.java").unwrap(), "bar");
}

#[test]
fn test_explicit_files_respect_policy() {
    let repo = TestRepo::new();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);
    let targets = Targets::Files(vec![repo.file("src/ui/Panel.java"), repo.file("README.md")]);

    let report = runner.run(&[foo_to_bar(&repo)], &targets).unwrap();

    assert_eq!(report.total.files_changed, 1);
    assert_eq!(repo.read("README.md"), "# foo\n");
    assert_eq!(repo.read("src/core/Widget.java"), "class Widget { foo(); }\n");
}

#[test]
fn test_rule_sets_run_in_order() {
    let repo = TestRepo::new();
    let second = RuleSet::builder("then")
        .directory(repo.file("src"))
        .extension("java")
        .rule("bar", "baz")
        .build()
        .unwrap();
    let files = AtomicFiles::new();
    let levels = LevelMap::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);

    let report = runner.run(&[foo_to_bar(&repo), second], &Targets::Tree).unwrap();

    let names: Vec<_> = report.rulesets.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["rename", "then"]);
    assert_eq!(repo.read("src/core/Widget.java"), "class Widget { baz(); }\n");
}

struct Fixed(Vec<FileStatus>);

impl ModifiedFiles for Fixed {
    fn status(&self) -> anyhow::Result<Vec<FileStatus>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_targets_prefer_explicit_then_all_then_vcs() {
    let vcs = Fixed(vec![
        FileStatus::new("M", "/r/Changed.java"),
        FileStatus::new("??", "/r/New.java"),
    ]);

    let explicit = Targets::resolve(vec![PathBuf::from("x.java")], true, &vcs).unwrap();
    assert_eq!(explicit, Targets::Files(vec![PathBuf::from("x.java")]));

    assert_eq!(Targets::resolve(Vec::new(), true, &vcs).unwrap(), Targets::Tree);

    let modified = Targets::resolve(Vec::new(), false, &vcs).unwrap();
    assert_eq!(modified, Targets::Files(vec![PathBuf::from("/r/Changed.java")]));
}

// =============================================================================
// LOG LEVEL RULE SETS
// =============================================================================

#[test]
fn test_log_levels_from_catalog_to_source() {
    let repo = TestRepo::empty();
    repo.add_file(
        "messages/core.properties",
        "GLOBAL_NAME=core\nSEVERE_WARN_DISK_LOW_12=Disk %s is low\nERR_NO_CONFIG_3=No config\n",
    );
    repo.add_file(
        "src/Store.java",
        "class Store {\n  void check() {\n    LocalizableMessage message = WARN_DISK_LOW.get(path);\n    logError(message);\n    logError(ERR_NO_CONFIG.get());\n    logError(UNKNOWN_KEY.get());\n  }\n}\n",
    );

    let levels = LevelMapBuilder::new().build_from_dir(&repo.file("messages")).unwrap();
    let ruleset = RuleSet::builder("logging")
        .directory(repo.file("src"))
        .extension("java")
        .kind(RuleSetKind::LogLevels)
        .build()
        .unwrap();
    let files = AtomicFiles::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);

    let report = runner.run(&[ruleset], &Targets::Tree).unwrap();

    assert_eq!(
        repo.read("src/Store.java"),
        "class Store {\n  void check() {\n    logger.warn(WARN_DISK_LOW, path);\n    logger.error(ERR_NO_CONFIG);\n    logError(UNKNOWN_KEY.get());\n  }\n}\n"
    );
    assert_eq!(report.total.total_substitutions, 2);
    assert!(report.rulesets[0].unresolved_keys.contains("UNKNOWN_KEY"));
}

#[test]
fn test_config_drives_full_run() {
    let repo = TestRepo::new();
    repo.add_file(
        "resub.toml",
        r#"
[[ruleset]]
name = "rename"
dirs = ["src/core"]
extensions = ["java"]
replacements = [['(\w+)\(\);', 'renamed_\1();']]
"#,
    );

    let config = Config::load(&repo.file("resub.toml")).unwrap();
    let rulesets = config.rule_sets().unwrap();
    let levels = config.level_map().unwrap();
    let files = AtomicFiles::new();
    let runner = Runner::new(RewriteEngine::new(&files, &levels), false);

    let report = runner.run(&rulesets, &Targets::Tree).unwrap();

    assert_eq!(report.total.files_changed, 2);
    assert_eq!(repo.read("src/core/Widget.java"), "class Widget { renamed_foo(); }\n");
}
