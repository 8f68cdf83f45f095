//! Tests for building the level map from message catalogs

use resub::adapters::LevelMapBuilder;
use resub::adapters::properties::catalog_files;
use resub::core::error::ConfigurationError;
use resub::core::models::Level;

use crate::common::TestRepo;

#[test]
fn test_catalogs_read_in_name_order() {
    let repo = TestRepo::empty();
    repo.add_file("messages/b.properties", "NOTE_STARTED_1=b\n");
    repo.add_file("messages/a.properties", "WARN_STARTED_1=a\n");
    repo.add_file("messages/readme.txt", "ERR_IGNORED=x\n");

    let files = catalog_files(&repo.file("messages")).unwrap();
    assert_eq!(
        files,
        [repo.file("messages/a.properties"), repo.file("messages/b.properties")]
    );
}

#[test]
fn test_duplicate_keys_across_catalogs_collapse() {
    let repo = TestRepo::empty();
    repo.add_file("messages/a.properties", "WARN_STARTED_1=a\nNOTE_READY_2=r\n");
    repo.add_file("messages/b.properties", "SEVERE_WARN_STARTED_2=b\n");

    let map = LevelMapBuilder::new().build_from_dir(&repo.file("messages")).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.level("WARN_STARTED"), Some(Level::Warn));
    assert_eq!(map.level("NOTE_READY"), Some(Level::Info));
}

#[test]
fn test_catalog_details() {
    let repo = TestRepo::empty();
    repo.add_file(
        "messages/core.properties",
        "# comment\n\
         GLOBAL_PRODUCT=resub\n\
         SEVERE_ERR_CANNOT_BIND_7=cannot bind %s\n\
         MILD_WARN_SLOW_12=slow \\\n\
         ERR_NOT_A_KEY=continued value\n\
         DEBUG_TRACE_POINT=here\n\
         ODD_THING_4=no tag\n",
    );

    let map = LevelMapBuilder::new().build_from_dir(&repo.file("messages")).unwrap();

    assert_eq!(map.level("ERR_CANNOT_BIND"), Some(Level::Error));
    assert_eq!(map.level("WARN_SLOW"), Some(Level::Warn));
    assert_eq!(map.level("DEBUG_TRACE_POINT"), Some(Level::Debug));
    assert!(!map.contains("ERR_NOT_A_KEY"));
    assert!(!map.contains("GLOBAL_PRODUCT"));
    assert!(map.contains("ODD_THING"));
    assert_eq!(map.level("ODD_THING"), None);
}

#[test]
fn test_custom_reserved_prefixes() {
    let repo = TestRepo::empty();
    repo.add_file("messages/core.properties", "GLOBAL_X=1\nINTERNAL_Y=2\n");

    let map = LevelMapBuilder::new()
        .reserved_prefixes(vec!["INTERNAL".to_string()])
        .build_from_dir(&repo.file("messages"))
        .unwrap();

    assert!(map.contains("GLOBAL_X"));
    assert!(!map.contains("INTERNAL_Y"));
}

#[test]
fn test_missing_catalog_dir_is_configuration_error() {
    let repo = TestRepo::empty();
    let err = LevelMapBuilder::new().build_from_dir(&repo.file("messages")).unwrap_err();
    assert!(matches!(err, ConfigurationError::Io { .. }));
}
