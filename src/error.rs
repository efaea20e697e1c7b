use std::path::PathBuf;

use crate::input::InputError;
use crate::pipeline::stage4_report::ReportError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("too many user-defined columns ({requested}); maximum allowed: {max}")]
    TooManyColumns { requested: usize, max: usize },
    #[error(
        "invalid columns: {}; use --search-columns <term> to find similar column names",
        .0.join(", ")
    )]
    InvalidColumns(Vec<String>),
    #[error("no analysis columns specified; use -c to name columns or --list-columns to see them")]
    NoColumnsSpecified,
    #[error("no valid columns to analyze")]
    NoValidColumns,
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}
