use crate::input::{ClinicalTable, InputError};

pub const MAX_USER_COLUMNS: usize = 10;
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidColumn {
    pub name: String,
    pub non_empty: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColumn {
    pub name: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnValidation {
    pub valid: Vec<ValidColumn>,
    pub invalid: Vec<InvalidColumn>,
}

impl ColumnValidation {
    pub fn valid_names(&self) -> Vec<String> {
        self.valid.iter().map(|c| c.name.clone()).collect()
    }

    pub fn invalid_names(&self) -> Vec<String> {
        self.invalid.iter().map(|c| c.name.clone()).collect()
    }
}

pub fn missing_columns(table: &ClinicalTable, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect()
}

pub fn require_columns(table: &ClinicalTable, required: &[&str]) -> Result<(), InputError> {
    let missing = missing_columns(table, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingColumns { columns: missing })
    }
}

/// Splits `requested` on underscores/whitespace and returns the columns that
/// contain any token, case-insensitively, in table order.
pub fn suggest_columns(available: &[String], requested: &str, limit: usize) -> Vec<String> {
    let tokens: Vec<String> = requested
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    available
        .iter()
        .filter(|col| {
            let lower = col.to_lowercase();
            tokens.iter().any(|t| lower.contains(t.as_str()))
        })
        .take(limit)
        .cloned()
        .collect()
}

pub fn validate_columns(table: &ClinicalTable, requested: &[String]) -> ColumnValidation {
    let mut out = ColumnValidation::default();
    for name in requested {
        match table.non_empty_count(name) {
            Some(non_empty) => out.valid.push(ValidColumn {
                name: name.clone(),
                non_empty,
            }),
            None => out.invalid.push(InvalidColumn {
                name: name.clone(),
                suggestions: suggest_columns(&table.columns, name, MAX_SUGGESTIONS),
            }),
        }
    }
    out
}

/// Columns whose name contains `term` (case-insensitive), sorted, with their
/// non-empty counts. An empty term matches everything.
pub fn search_columns(table: &ClinicalTable, term: &str) -> Vec<(String, usize)> {
    let needle = term.to_lowercase();
    let mut hits: Vec<(String, usize)> = table
        .columns
        .iter()
        .filter(|col| col.to_lowercase().contains(&needle))
        .map(|col| (col.clone(), table.non_empty_count(col).unwrap_or(0)))
        .collect();
    hits.sort();
    hits
}

pub fn sorted_columns(table: &ClinicalTable) -> Vec<String> {
    let mut cols = table.columns.clone();
    cols.sort();
    cols
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/columns.rs"]
mod tests;
