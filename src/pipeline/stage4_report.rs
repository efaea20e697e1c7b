use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::stage3_aggregate::AnalysisResult;
use crate::report::detailed::write_detailed_tsv;
use crate::report::json::render_summary_json;
use crate::report::markdown::render_markdown;

#[derive(Debug, Clone, Default)]
pub struct ReportTargets {
    pub markdown: Option<PathBuf>,
    pub detailed: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Writes every requested output. Stops at the first failure; files already
/// written are left in place.
pub fn write_reports(
    result: &AnalysisResult,
    targets: &ReportTargets,
) -> Result<Vec<PathBuf>, ReportError> {
    let mut written = Vec::new();

    if let Some(path) = &targets.markdown {
        let md = render_markdown(result, TOOL_NAME, TOOL_VERSION);
        write_text(path, &md).map_err(|source| write_error(path, source))?;
        tracing::info!("summary report saved to {}", path.display());
        written.push(path.clone());
    }

    if let Some(path) = &targets.detailed {
        ensure_parent(path).map_err(|source| write_error(path, source))?;
        write_detailed_tsv(result, path).map_err(|source| write_error(path, source))?;
        tracing::info!("detailed statistics saved to {}", path.display());
        written.push(path.clone());
    }

    if let Some(path) = &targets.json {
        let json = render_summary_json(result, TOOL_NAME, TOOL_VERSION)?;
        write_text(path, &json).map_err(|source| write_error(path, source))?;
        tracing::info!("json summary saved to {}", path.display());
        written.push(path.clone());
    }

    Ok(written)
}

pub fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    ensure_parent(path)?;
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

pub fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn write_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
