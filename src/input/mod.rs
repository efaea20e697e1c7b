use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

pub mod columns;
pub mod table;

pub use table::{ClinicalTable, KeyMode, load_table};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// A cell counts as missing when it is empty or the literal `NA`.
pub fn is_missing(value: &str) -> bool {
    value.is_empty() || value == "NA"
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
