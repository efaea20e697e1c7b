use std::fs;
use std::path::Path;

use super::*;
use crate::input::InputError;

const MATRIX: &str = "sampleID\tER_Status_nature2012\tPR_Status_nature2012\tHER2_Final_Status_nature2012\tVital_Status_nature2012\tpathologic_stage\n\
S1\tPositive\tNegative\tNA\tLIVING\tStage I\n\
S2\tPositive\tPositive\tNegative\tLIVING\tStage IIA\n\
S3\tNegative\tNegative\tNegative\tDECEASED\t\n\
S4\tNegative\tNegative\tPositive\tNA\tStage III\n\
S5\tPositive\tPositive\tNegative\tDECEASED\tStage I\n";

fn write_matrix(dir: &Path) -> PathBuf {
    let path = dir.join("BRCA_clinicalMatrix.txt");
    fs::write(&path, MATRIX).unwrap();
    path
}

fn extract_args(input: PathBuf, output: PathBuf, columns: &[&str]) -> ExtractArgs {
    ExtractArgs {
        input,
        output,
        columns: columns.iter().map(|s| s.to_string()).collect(),
        list_columns: false,
        search_columns: None,
        placeholder: DEFAULT_PLACEHOLDER.to_string(),
    }
}

fn analyze_args(input: PathBuf, columns: &[&str]) -> AnalyzeArgs {
    AnalyzeArgs {
        input,
        columns: columns.iter().map(|s| s.to_string()).collect(),
        output: None,
        detailed: None,
        json: None,
        missing_tokens: Vec::new(),
        list_columns: false,
    }
}

#[test]
fn test_parse_extract_args() {
    let cli = Cli::try_parse_from([
        "kira-ihcstats",
        "extract",
        "-i",
        "m.txt",
        "-o",
        "out.tsv",
        "-c",
        "pathologic_stage",
        "Vital_Status_nature2012",
    ])
    .unwrap();
    let Command::Extract(args) = cli.command else {
        panic!("expected extract");
    };
    assert_eq!(args.input, PathBuf::from("m.txt"));
    assert_eq!(args.columns.len(), 2);
    assert_eq!(args.placeholder, "~");
}

#[test]
fn test_parse_analyze_args() {
    let cli = Cli::try_parse_from([
        "kira-ihcstats",
        "analyze",
        "-c",
        "Vital",
        "--detailed",
        "d.tsv",
        "--missing-token",
        "~",
    ])
    .unwrap();
    let Command::Analyze(args) = cli.command else {
        panic!("expected analyze");
    };
    assert_eq!(args.input, PathBuf::from("extracted_clinical_data.tsv"));
    assert_eq!(args.columns, vec!["Vital"]);
    assert_eq!(args.detailed, Some(PathBuf::from("d.tsv")));
    assert_eq!(args.missing_tokens, vec!["~"]);
    assert!(args.output.is_none());
}

#[test]
fn test_too_many_columns_fails_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let names: Vec<String> = (0..11).map(|i| format!("col{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    // Input does not exist: the column budget is checked first.
    let args = extract_args(dir.path().join("missing.txt"), dir.path().join("o.tsv"), &refs);
    let err = run_extract(&args).unwrap_err();
    assert!(matches!(
        err,
        AppError::TooManyColumns {
            requested: 11,
            max: 10
        }
    ));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = extract_args(dir.path().join("missing.txt"), dir.path().join("o.tsv"), &[]);
    let err = run_extract(&args).unwrap_err();
    assert!(matches!(err, AppError::Input(InputError::MissingInput(_))));
}

#[test]
fn test_missing_required_columns_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.txt");
    fs::write(&path, "id\tER_Status_nature2012\nS1\tPositive\n").unwrap();
    let args = extract_args(path, dir.path().join("o.tsv"), &[]);
    let err = run_extract(&args).unwrap_err();
    match err {
        AppError::Input(InputError::MissingColumns { columns }) => {
            assert_eq!(columns.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_user_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_matrix(dir.path());
    let output = dir.path().join("o.tsv");
    let args = extract_args(input, output.clone(), &["pathologic_stage", "OS_status"]);
    let err = run_extract(&args).unwrap_err();
    assert!(matches!(err, AppError::InvalidColumns(ref names) if names == &["OS_status"]));
    assert!(!output.exists());
}

#[test]
fn test_listing_exits_cleanly_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_matrix(dir.path());
    let output = dir.path().join("o.tsv");
    let mut args = extract_args(input, output.clone(), &[]);
    args.search_columns = Some("status".to_string());
    run_extract(&args).unwrap();
    assert!(!output.exists());
}

#[test]
fn test_extract_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_matrix(dir.path());
    let extract_path = dir.path().join("out").join("extract.tsv");
    let args = extract_args(
        input,
        extract_path.clone(),
        &["Vital_Status_nature2012", "pathologic_stage"],
    );
    run_extract(&args).unwrap();

    let text = fs::read_to_string(&extract_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[1],
        "S2\t+\t+\t-\t+/+/-\tLIVING\tStage IIA"
    );
    assert_eq!(lines[2], "S3\t-\t-\t-\t-/-/-\tDECEASED\t~");
    assert_eq!(lines[3], "S4\t-\t-\t+\t-/-/+\t~\tStage III");

    let mut analyze = analyze_args(extract_path, &["Vital_Status_nature2012", "nope"]);
    let detailed = dir.path().join("detailed.tsv");
    let markdown = dir.path().join("summary.md");
    analyze.detailed = Some(detailed.clone());
    analyze.output = Some(markdown.clone());
    run_analyze(&analyze).unwrap();

    let tsv = fs::read_to_string(&detailed).unwrap();
    assert!(tsv.contains("Vital_Status_nature2012\t+/+/-\t2\tLIVING\t1\t50.00\t50.00\t2"));
    // "~" is an observed value unless declared missing.
    assert!(tsv.contains("Vital_Status_nature2012\t-/-/+\t1\t~\t1\t100.00\t100.00\t1"));
    assert!(markdown.exists());
}

#[test]
fn test_analyze_no_data_row_with_missing_token() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_matrix(dir.path());
    let extract_path = dir.path().join("extract.tsv");
    run_extract(&extract_args(
        input,
        extract_path.clone(),
        &["pathologic_stage"],
    ))
    .unwrap();

    let mut analyze = analyze_args(extract_path, &["pathologic_stage"]);
    let detailed = dir.path().join("detailed.tsv");
    analyze.detailed = Some(detailed.clone());
    analyze.missing_tokens = vec!["~".to_string()];
    run_analyze(&analyze).unwrap();

    let tsv = fs::read_to_string(&detailed).unwrap();
    assert!(tsv.contains("pathologic_stage\t-/-/-\t1\tNo_Data\t0\t0.00\t0.00\t0"));
}

#[test]
fn test_analyze_requires_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_matrix(dir.path());
    let extract_path = dir.path().join("extract.tsv");
    run_extract(&extract_args(input, extract_path.clone(), &[])).unwrap();

    let err = run_analyze(&analyze_args(extract_path.clone(), &[])).unwrap_err();
    assert!(matches!(err, AppError::NoColumnsSpecified));

    let err = run_analyze(&analyze_args(extract_path, &["nope"])).unwrap_err();
    assert!(matches!(err, AppError::NoValidColumns));
}

#[test]
fn test_analyze_rejects_non_extract_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.tsv");
    fs::write(&path, "SampleID\tOther\nS1\tx\n").unwrap();
    let err = run_analyze(&analyze_args(path, &["Other"])).unwrap_err();
    assert!(matches!(
        err,
        AppError::Input(InputError::MissingColumns { .. })
    ));
}
