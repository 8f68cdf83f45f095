//! Tests for report serialization

use std::path::PathBuf;

use resub::core::models::RunSummary;
use resub::output::{FileChange, RuleSetReport, RunReport};

#[test]
fn test_run_report_json_shape() {
    let mut ruleset = RuleSetReport::new("rename");
    ruleset.summary.record(2);
    ruleset.files.push(FileChange {
        path: PathBuf::from("src/A.java"),
        substitutions: 2,
    });
    ruleset.unresolved_keys.insert("ODD_KEY".to_string());

    let mut total = RunSummary::default();
    total.absorb(ruleset.summary);
    let report = RunReport {
        rulesets: vec![ruleset],
        total,
        dry_run: true,
    };

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["files_changed"], 1);
    assert_eq!(json["total_substitutions"], 2);
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["rulesets"][0]["name"], "rename");
    assert_eq!(json["rulesets"][0]["files_changed"], 1);
    assert_eq!(json["rulesets"][0]["files"][0]["substitutions"], 2);
    assert_eq!(json["rulesets"][0]["unresolved_keys"][0], "ODD_KEY");
    assert_eq!(report.failure_count(), 0);
}
