//! Tests for the rewrite engine through the `SourceFiles` port

use std::path::Path;

use resub::core::error::FileAccessError;
use resub::core::models::{ApplyMode, LevelMap, RuleSet, RuleSetBuilder};
use resub::core::services::RewriteEngine;

use crate::common::RecordingFiles;

fn foo_to_bar(mode: ApplyMode) -> RuleSetBuilder {
    RuleSet::builder("rename").directory("/src").extension("java").rule("foo", "bar").mode(mode)
}

// =============================================================================
// SINGLE PASS
// =============================================================================

#[test]
fn test_no_match_leaves_file_alone() {
    let files = RecordingFiles::new().with("/src/A.java", "nothing here");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    let ruleset = foo_to_bar(ApplyMode::Single).build().unwrap();
    let outcome = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(outcome.substitutions, 0);
    assert!(!outcome.written);
    assert!(files.writes().is_empty());
    assert_eq!(files.content("/src/A.java").unwrap(), "nothing here");
}

#[test]
fn test_single_pass_replaces_first_occurrence() {
    let files = RecordingFiles::new().with("/src/A.java", "foo foo");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    let ruleset = foo_to_bar(ApplyMode::Single).build().unwrap();
    let outcome = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(outcome.substitutions, 1);
    assert!(outcome.written);
    assert_eq!(files.content("/src/A.java").unwrap(), "bar foo");
    assert_eq!(files.writes().len(), 1);
}

#[test]
fn test_rules_apply_in_declared_order() {
    let ruleset = RuleSet::builder("chain")
        .directory("/src")
        .extension("java")
        .rule("a", "b")
        .rule("b", "c")
        .build()
        .unwrap();
    let files = RecordingFiles::new().with("/src/A.java", "a");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    let outcome = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(files.content("/src/A.java").unwrap(), "c");
    assert_eq!(outcome.substitutions, 2);
    assert_eq!(files.writes().len(), 1, "one write-back per file, not per rule");
}

#[test]
fn test_rules_cancelling_out_write_nothing() {
    let ruleset = RuleSet::builder("undo")
        .directory("/src")
        .extension("java")
        .rule("x", "y")
        .rule("y", "x")
        .build()
        .unwrap();
    let files = RecordingFiles::new().with("/src/A.java", "x");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    let outcome = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(outcome.substitutions, 0);
    assert!(files.writes().is_empty());
}

#[test]
fn test_placeholder_is_file_stem() {
    let ruleset = RuleSet::builder("logger")
        .directory("/src")
        .extension("java")
        .rule(r"Logger\.get\(\)", "Logger.get(@CLASSNAME@.class)")
        .build()
        .unwrap();
    let files = RecordingFiles::new().with("/src/Widget.java", "Logger.get()");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    engine.apply(&ruleset, Path::new("/src/Widget.java")).unwrap();

    assert_eq!(files.content("/src/Widget.java").unwrap(), "Logger.get(Widget.class)");
}

#[test]
fn test_group_references_expand() {
    let ruleset = RuleSet::builder("imports")
        .directory("/src")
        .extension("java")
        .rule(r"import org\.old\.(\w+);", r"import org.new.\1;")
        .build()
        .unwrap();
    let files = RecordingFiles::new().with("/src/A.java", "import org.old.Thing;\n");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(files.content("/src/A.java").unwrap(), "import org.new.Thing;\n");
}

// =============================================================================
// FIXED POINT
// =============================================================================

#[test]
fn test_fixed_point_counts_every_pass() {
    let files = RecordingFiles::new().with("/src/A.java", "foo foo");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);
    let ruleset = foo_to_bar(ApplyMode::FixedPoint).build().unwrap();

    let outcome = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(outcome.substitutions, 2);
    assert_eq!(files.content("/src/A.java").unwrap(), "bar bar");
}

#[test]
fn test_fixed_point_second_run_is_noop() {
    let files = RecordingFiles::new().with("/src/A.java", "foo foo");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);
    let ruleset = foo_to_bar(ApplyMode::FixedPoint).build().unwrap();

    engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();
    let second = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(second.substitutions, 0);
    assert_eq!(files.writes().len(), 1);
}

#[test]
fn test_pass_bound_is_per_file_error() {
    let ruleset = RuleSet::builder("grow")
        .directory("/src")
        .extension("java")
        .rule("a", "aa")
        .mode(ApplyMode::FixedPoint)
        .build()
        .unwrap();
    let files = RecordingFiles::new().with("/src/A.java", "a");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels).max_passes(8);

    let err = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap_err();

    assert!(matches!(err, FileAccessError::NoFixedPoint { passes: 8, .. }));
    assert!(files.writes().is_empty());
    assert_eq!(files.content("/src/A.java").unwrap(), "a");
}

// =============================================================================
// DRY RUN AND FAILURES
// =============================================================================

#[test]
fn test_dry_run_counts_without_writing() {
    let files = RecordingFiles::new().with("/src/A.java", "foo foo");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels).dry_run(true);

    let ruleset = foo_to_bar(ApplyMode::FixedPoint).build().unwrap();
    let outcome = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap();

    assert_eq!(outcome.substitutions, 2);
    assert!(!outcome.written);
    assert!(files.writes().is_empty());
    assert_eq!(files.content("/src/A.java").unwrap(), "foo foo");
}

#[test]
fn test_read_failure_surfaces() {
    let files = RecordingFiles::new().unreadable("/src/A.java");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    let ruleset = foo_to_bar(ApplyMode::Single).build().unwrap();
    let err = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap_err();

    assert!(matches!(err, FileAccessError::Read { .. }));
    assert_eq!(err.path(), Path::new("/src/A.java"));
}

#[test]
fn test_write_failure_surfaces() {
    let files = RecordingFiles::new().with("/src/A.java", "foo").unwritable("/src/A.java");
    let levels = LevelMap::new();
    let engine = RewriteEngine::new(&files, &levels);

    let ruleset = foo_to_bar(ApplyMode::Single).build().unwrap();
    let err = engine.apply(&ruleset, Path::new("/src/A.java")).unwrap_err();

    assert!(matches!(err, FileAccessError::Persist { .. }));
    assert_eq!(files.content("/src/A.java").unwrap(), "foo");
}
