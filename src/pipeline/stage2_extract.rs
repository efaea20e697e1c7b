use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::{ClinicalTable, InputError, is_missing};
use crate::model::{EXTRACT_COLUMNS, Marker, ReceptorPattern};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    pub sample_id: String,
    pub pattern: ReceptorPattern,
    pub user_values: Vec<String>,
}

impl ExtractedRow {
    /// Output cells in header order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(EXTRACT_COLUMNS.len() + self.user_values.len());
        cells.push(self.sample_id.clone());
        for status in self.pattern.statuses() {
            cells.push(status.to_string());
        }
        cells.push(self.pattern.to_string());
        cells.extend(self.user_values.iter().cloned());
        cells
    }
}

#[derive(Debug, Clone)]
pub struct Extract {
    pub user_columns: Vec<String>,
    pub rows: Vec<ExtractedRow>,
}

impl Extract {
    pub fn header(&self) -> Vec<String> {
        EXTRACT_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(self.user_columns.iter().cloned())
            .collect()
    }

    pub fn n_columns(&self) -> usize {
        EXTRACT_COLUMNS.len() + self.user_columns.len()
    }

    /// Receptor_Pattern counts, most frequent first; ties keep first-seen order.
    pub fn pattern_distribution(&self) -> Vec<(String, usize)> {
        value_counts(self.rows.iter().map(|r| r.pattern.to_string()))
    }
}

pub fn run_stage2(
    table: &ClinicalTable,
    user_columns: &[String],
    placeholder: &str,
) -> Result<Extract, InputError> {
    let mut marker_idx = [0usize; 3];
    let mut missing = Vec::new();
    for (slot, marker) in marker_idx.iter_mut().zip(Marker::ALL) {
        match table.column_index(marker.source_column()) {
            Some(idx) => *slot = idx,
            None => missing.push(marker.source_column().to_string()),
        }
    }
    let user_idx: Vec<Option<usize>> = user_columns
        .iter()
        .map(|name| table.column_index(name))
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns { columns: missing });
    }

    let mut rows = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        let [er, pr, her2] = marker_idx.map(|col| table.cell(row, col));
        let user_values = user_idx
            .iter()
            .map(|idx| match idx {
                Some(col) => {
                    let value = table.cell(row, *col);
                    if is_missing(value) {
                        placeholder.to_string()
                    } else {
                        value.to_string()
                    }
                }
                None => placeholder.to_string(),
            })
            .collect();
        rows.push(ExtractedRow {
            sample_id: table.key(row).to_string(),
            pattern: ReceptorPattern::from_raw(er, pr, her2),
            user_values,
        });
    }

    tracing::info!("extracted data for {} samples", rows.len());
    Ok(Extract {
        user_columns: user_columns.to_vec(),
        rows,
    })
}

pub fn write_extract(extract: &Extract, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", extract.header().join("\t"))?;
    for row in &extract.rows {
        writeln!(w, "{}", row.cells().join("\t"))?;
    }
    w.flush()?;
    Ok(())
}

pub(crate) fn value_counts<I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for value in values {
        match slot.get(&value) {
            Some(&idx) => order[idx].1 += 1,
            None => {
                slot.insert(value.clone(), order.len());
                order.push((value, 1));
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_extract.rs"]
mod tests;
