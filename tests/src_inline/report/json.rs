use super::*;
use crate::pipeline::stage3_aggregate::PatternCount;

#[test]
fn test_summary_json_flattens_result() {
    let result = AnalysisResult {
        total_samples: 2,
        overall: vec![PatternCount {
            pattern: "-/-/-".to_string(),
            count: 2,
            percent: 100.0,
        }],
        other_patterns: 0,
        columns: Vec::new(),
    };
    let text = render_summary_json(&result, "kira-ihcstats", "0.1.0").unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["tool"], "kira-ihcstats");
    assert_eq!(value["version"], "0.1.0");
    assert_eq!(value["total_samples"], 2);
    assert_eq!(value["overall"][0]["pattern"], "-/-/-");
    assert_eq!(value["overall"][0]["percent"], 100.0);
}
