use std::fs;

use super::*;
use crate::pipeline::stage3_aggregate::{
    ColumnAnalysis, PatternBreakdown, PatternCount, ValueStat,
};

fn result() -> AnalysisResult {
    AnalysisResult {
        total_samples: 3,
        overall: vec![PatternCount {
            pattern: "+/+/-".to_string(),
            count: 3,
            percent: 100.0,
        }],
        other_patterns: 0,
        columns: vec![ColumnAnalysis {
            column: "Vital".to_string(),
            distinct_values: vec!["LIVING".to_string()],
            patterns: vec![PatternBreakdown {
                pattern: "+/+/-".to_string(),
                total_samples: 3,
                non_empty_total: 2,
                value_distribution: vec![ValueStat {
                    value: "LIVING".to_string(),
                    count: 2,
                    percent_of_pattern: 200.0 / 3.0,
                    percent_of_non_empty: 100.0,
                }],
            }],
        }],
    }
}

#[test]
fn test_write_all_targets() {
    let dir = tempfile::tempdir().unwrap();
    let targets = ReportTargets {
        markdown: Some(dir.path().join("summary.md")),
        detailed: Some(dir.path().join("nested").join("detailed.tsv")),
        json: Some(dir.path().join("summary.json")),
    };
    let written = write_reports(&result(), &targets).unwrap();
    assert_eq!(written.len(), 3);

    let md = fs::read_to_string(dir.path().join("summary.md")).unwrap();
    assert!(md.contains("## Analysis: Vital"));

    let tsv = fs::read_to_string(dir.path().join("nested").join("detailed.tsv")).unwrap();
    assert!(tsv.contains("Vital\t+/+/-\t3\tLIVING\t2\t66.67\t100.00\t2"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(json["tool"], TOOL_NAME);
    assert_eq!(json["total_samples"], 3);
}

#[test]
fn test_no_targets_writes_nothing() {
    let written = write_reports(&result(), &ReportTargets::default()).unwrap();
    assert!(written.is_empty());
}

#[test]
fn test_write_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").unwrap();
    let targets = ReportTargets {
        markdown: Some(blocker.join("summary.md")),
        ..ReportTargets::default()
    };
    let err = write_reports(&result(), &targets).unwrap_err();
    assert!(matches!(err, ReportError::Write { .. }));
}
