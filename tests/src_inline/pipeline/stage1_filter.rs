use super::*;
use crate::model::status::marker_source_columns;

fn clinical_table() -> ClinicalTable {
    let columns = vec![
        "ER_Status_nature2012".to_string(),
        "PR_Status_nature2012".to_string(),
        "HER2_Final_Status_nature2012".to_string(),
        "Age".to_string(),
    ];
    let rows = vec![
        vec!["Positive", "Negative", "NA", "40"],
        vec!["Positive", "Positive", "Negative", ""],
        vec!["", "Negative", "Negative", "61"],
        vec!["Negative", "Negative", "Positive", "55"],
    ];
    ClinicalTable::new(
        Some("sampleID".to_string()),
        vec!["S1".into(), "S2".into(), "S3".into(), "S4".into()],
        columns,
        rows.into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect(),
    )
}

#[test]
fn test_mask_requires_all_markers() {
    let table = clinical_table();
    let (mask, per_column) = completeness_mask(&table, &marker_source_columns()).unwrap();
    assert_eq!(mask, vec![false, true, false, true]);
    let counts: Vec<usize> = per_column.iter().map(|c| c.non_empty).collect();
    assert_eq!(counts, vec![3, 4, 3]);
}

#[test]
fn test_stage1_keeps_complete_rows_in_order() {
    let table = clinical_table();
    let out = run_stage1(&table, &marker_source_columns()).unwrap();
    assert_eq!(out.total_rows, 4);
    assert_eq!(out.kept_rows(), 2);
    assert_eq!(out.table.keys, vec!["S2", "S4"]);

    let columns = marker_source_columns();
    for row in 0..out.table.n_rows() {
        for name in columns {
            let col = out.table.column_index(name).unwrap();
            assert!(!is_missing(out.table.cell(row, col)));
        }
    }
}

#[test]
fn test_missing_marker_column_is_error() {
    let table = clinical_table();
    let err = completeness_mask(&table, &["ER_Status_nature2012", "Nope"]).unwrap_err();
    assert!(matches!(err, InputError::MissingColumns { ref columns } if columns == &["Nope"]));
}
