use crate::input::{ClinicalTable, InputError, is_missing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCompleteness {
    pub column: String,
    pub non_empty: usize,
}

#[derive(Debug)]
pub struct Stage1Output {
    pub table: ClinicalTable,
    pub total_rows: usize,
    pub per_column: Vec<ColumnCompleteness>,
}

impl Stage1Output {
    pub fn kept_rows(&self) -> usize {
        self.table.n_rows()
    }
}

/// Row mask that is true where every listed column is non-missing, plus the
/// individual pass count of each column.
pub fn completeness_mask(
    table: &ClinicalTable,
    columns: &[&str],
) -> Result<(Vec<bool>, Vec<ColumnCompleteness>), InputError> {
    let mut mask = vec![true; table.n_rows()];
    let mut per_column = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();

    for &name in columns {
        let Some(col) = table.column_index(name) else {
            missing.push(name.to_string());
            continue;
        };
        let mut non_empty = 0usize;
        for (row, value) in table.column_values(col).enumerate() {
            if is_missing(value) {
                mask[row] = false;
            } else {
                non_empty += 1;
            }
        }
        per_column.push(ColumnCompleteness {
            column: name.to_string(),
            non_empty,
        });
    }

    if !missing.is_empty() {
        return Err(InputError::MissingColumns { columns: missing });
    }
    Ok((mask, per_column))
}

pub fn run_stage1(table: &ClinicalTable, columns: &[&str]) -> Result<Stage1Output, InputError> {
    let (mask, per_column) = completeness_mask(table, columns)?;

    tracing::info!("total samples in clinical matrix: {}", table.n_rows());
    for c in &per_column {
        tracing::info!("  {}: {} non-empty values", c.column, c.non_empty);
    }

    let filtered = table.select_rows(&mask);
    tracing::info!("samples with complete IHC data: {}", filtered.n_rows());

    Ok(Stage1Output {
        table: filtered,
        total_rows: table.n_rows(),
        per_column,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_filter.rs"]
mod tests;
