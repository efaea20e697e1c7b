mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::AppError;
use crate::input::columns::{
    MAX_USER_COLUMNS, require_columns, search_columns, sorted_columns, validate_columns,
};
use crate::input::{ClinicalTable, KeyMode, load_table};
use crate::model::status::marker_source_columns;
use crate::model::{DEFAULT_PLACEHOLDER, EXTRACT_COLUMNS};
use crate::pipeline::stage1_filter::run_stage1;
use crate::pipeline::stage2_extract::{run_stage2, write_extract};
use crate::pipeline::stage3_aggregate::{MissingMarkers, profile_columns, run_stage3};
use crate::pipeline::stage4_report::{ReportTargets, ensure_parent, write_reports};
use crate::report::text::{
    render_analysis_text, render_column_listing, render_column_profiles, render_column_search,
    render_extract_summary,
};

#[derive(Parser, Debug)]
#[command(name = "kira-ihcstats")]
#[command(about = "IHC receptor status extraction and receptor-pattern statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract ER/PR/HER2 status and selected columns from a clinical matrix
    Extract(ExtractArgs),
    /// Tabulate extracted columns by IHC receptor pattern
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
struct ExtractArgs {
    /// Input clinical matrix (tab-separated, first column is the sample id)
    #[arg(short, long, default_value = "BRCA_clinicalMatrix.txt")]
    input: PathBuf,

    /// Output TSV file
    #[arg(short, long, default_value = "brca_extracted_data.tsv")]
    output: PathBuf,

    /// User-defined columns to extract (max 10)
    #[arg(short, long, num_args = 0..)]
    columns: Vec<String>,

    /// List all available columns and exit
    #[arg(long)]
    list_columns: bool,

    /// List columns containing a term and exit
    #[arg(long, value_name = "TERM")]
    search_columns: Option<String>,

    /// Placeholder written for missing user-column values
    #[arg(long, default_value = DEFAULT_PLACEHOLDER, env = "KIRA_IHC_PLACEHOLDER")]
    placeholder: String,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Extracted TSV file
    #[arg(short, long, default_value = "extracted_clinical_data.tsv")]
    input: PathBuf,

    /// Columns to analyze
    #[arg(short, long, num_args = 1..)]
    columns: Vec<String>,

    /// Markdown summary report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Detailed statistics TSV
    #[arg(long, value_name = "PATH")]
    detailed: Option<PathBuf>,

    /// JSON summary
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Extra cell value to treat as missing (repeatable), e.g. the extract placeholder
    #[arg(long = "missing-token", value_name = "TOKEN")]
    missing_tokens: Vec<String>,

    /// Describe available columns and exit
    #[arg(long)]
    list_columns: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Extract(args) => run_extract(&args),
        Command::Analyze(args) => run_analyze(&args),
    }
}

fn run_extract(args: &ExtractArgs) -> Result<(), AppError> {
    let listing = args.list_columns || args.search_columns.is_some();
    if !listing {
        check_column_budget(&args.columns)?;
    }

    tracing::info!("reading clinical matrix: {}", args.input.display());
    let table = load_table(&args.input, KeyMode::FirstColumn)?;
    tracing::info!(
        "loaded clinical data: {} samples keyed by '{}', {} features",
        table.n_rows(),
        table.key_name.as_deref().unwrap_or_default(),
        table.n_columns()
    );
    let ihc_columns = marker_source_columns();
    require_columns(&table, &ihc_columns)?;
    tracing::info!("all required IHC columns found");

    if args.list_columns {
        print!("{}", render_column_listing(&sorted_columns(&table)));
        return Ok(());
    }
    if let Some(term) = &args.search_columns {
        print!("{}", render_column_search(term, &search_columns(&table, term)));
        return Ok(());
    }

    let user_columns = if args.columns.is_empty() {
        tracing::info!("no user-defined columns specified; only IHC data will be extracted");
        Vec::new()
    } else {
        validate_user_columns(&table, &args.columns)?
    };

    let stage1 = run_stage1(&table, &ihc_columns)?;
    let extract = run_stage2(&stage1.table, &user_columns, &args.placeholder)?;

    tracing::info!("saving output to {}", args.output.display());
    ensure_parent(&args.output)
        .and_then(|_| write_extract(&extract, &args.output))
        .map_err(|source| AppError::Write {
            path: args.output.clone(),
            source,
        })?;

    print!("{}", render_extract_summary(&extract));
    tracing::info!(
        "extraction completed: {} of {} samples written to {}",
        stage1.kept_rows(),
        stage1.total_rows,
        args.output.display()
    );
    Ok(())
}

fn check_column_budget(columns: &[String]) -> Result<(), AppError> {
    if columns.len() > MAX_USER_COLUMNS {
        return Err(AppError::TooManyColumns {
            requested: columns.len(),
            max: MAX_USER_COLUMNS,
        });
    }
    Ok(())
}

fn validate_user_columns(
    table: &ClinicalTable,
    requested: &[String],
) -> Result<Vec<String>, AppError> {
    tracing::info!("validating user-defined columns");
    let validation = validate_columns(table, requested);
    for c in &validation.valid {
        tracing::info!("  {}: {} non-empty values", c.name, c.non_empty);
    }
    for c in &validation.invalid {
        tracing::warn!("  {}: column not found", c.name);
        if !c.suggestions.is_empty() {
            tracing::warn!(
                "  similar columns for '{}': {}",
                c.name,
                c.suggestions.join(", ")
            );
        }
    }
    if !validation.invalid.is_empty() {
        return Err(AppError::InvalidColumns(validation.invalid_names()));
    }
    Ok(validation.valid_names())
}

fn run_analyze(args: &AnalyzeArgs) -> Result<(), AppError> {
    tracing::info!("reading TSV file: {}", args.input.display());
    let table = load_table(&args.input, KeyMode::Unkeyed)?;
    tracing::info!(
        "loaded data: {} samples, {} columns",
        table.n_rows(),
        table.n_columns()
    );
    require_columns(&table, &EXTRACT_COLUMNS)?;

    let markers = MissingMarkers {
        tokens: args.missing_tokens.clone(),
    };
    let profiles = profile_columns(&table, &EXTRACT_COLUMNS, &markers);

    if args.list_columns {
        print!(
            "{}",
            render_column_profiles(&args.input.display().to_string(), &profiles)
        );
        return Ok(());
    }

    tracing::info!("available columns for analysis: {}", profiles.len());
    for p in &profiles {
        tracing::info!("  {} ({} non-empty values)", p.name, p.non_empty);
    }

    if args.columns.is_empty() {
        return Err(AppError::NoColumnsSpecified);
    }

    let validation = validate_columns(&table, &args.columns);
    for c in &validation.invalid {
        tracing::warn!("  {}: column not found; skipping", c.name);
    }
    if !validation.invalid.is_empty() {
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        tracing::warn!("available columns: {}", names.join(", "));
    }
    let columns = validation.valid_names();
    if columns.is_empty() {
        return Err(AppError::NoValidColumns);
    }

    let result = run_stage3(&table, &columns, &markers)?;
    print!("{}", render_analysis_text(&result));

    let targets = ReportTargets {
        markdown: args.output.clone(),
        detailed: args.detailed.clone(),
        json: args.json.clone(),
    };
    write_reports(&result, &targets)?;

    tracing::info!(
        "analysis complete: {} samples across {} columns",
        result.total_samples,
        result.columns.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
