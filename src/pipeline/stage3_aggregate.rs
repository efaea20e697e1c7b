use std::collections::HashSet;

use serde::Serialize;

use crate::input::{ClinicalTable, InputError, is_missing};
use crate::model::{PATTERN_COLUMN, PATTERNS_OF_INTEREST};
use crate::pipeline::stage2_extract::value_counts;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCount {
    pub pattern: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueStat {
    pub value: String,
    pub count: usize,
    pub percent_of_pattern: f64,
    pub percent_of_non_empty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternBreakdown {
    pub pattern: String,
    pub total_samples: usize,
    pub non_empty_total: usize,
    pub value_distribution: Vec<ValueStat>,
}

impl PatternBreakdown {
    pub fn has_data(&self) -> bool {
        self.non_empty_total > 0
    }

    pub fn missing(&self) -> usize {
        self.total_samples - self.non_empty_total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnAnalysis {
    pub column: String,
    pub distinct_values: Vec<String>,
    /// Only patterns with at least one sample, in pattern-universe order.
    pub patterns: Vec<PatternBreakdown>,
}

#[cfg(test)]
impl ColumnAnalysis {
    pub fn pattern(&self, pattern: &str) -> Option<&PatternBreakdown> {
        self.patterns.iter().find(|p| p.pattern == pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_samples: usize,
    pub overall: Vec<PatternCount>,
    /// Rows whose pattern is outside the fixed universe.
    pub other_patterns: usize,
    pub columns: Vec<ColumnAnalysis>,
}

#[cfg(test)]
impl AnalysisResult {
    pub fn column(&self, name: &str) -> Option<&ColumnAnalysis> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Extra cell values treated as missing on top of empty and `NA`.
#[derive(Debug, Clone, Default)]
pub struct MissingMarkers {
    pub tokens: Vec<String>,
}

impl MissingMarkers {
    pub fn is_missing(&self, value: &str) -> bool {
        is_missing(value) || self.tokens.iter().any(|t| t == value)
    }
}

pub fn percent(count: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * count as f64 / denominator as f64
    }
}

pub fn run_stage3(
    table: &ClinicalTable,
    columns: &[String],
    markers: &MissingMarkers,
) -> Result<AnalysisResult, InputError> {
    let pattern_col = table
        .column_index(PATTERN_COLUMN)
        .ok_or_else(|| InputError::MissingColumns {
            columns: vec![PATTERN_COLUMN.to_string()],
        })?;
    let missing: Vec<String> = columns
        .iter()
        .filter(|c| !table.has_column(c))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns { columns: missing });
    }

    let total_samples = table.n_rows();
    let patterns: Vec<&str> = table.column_values(pattern_col).collect();

    let mut overall = Vec::with_capacity(PATTERNS_OF_INTEREST.len());
    for pattern in PATTERNS_OF_INTEREST {
        let count = patterns.iter().filter(|p| **p == pattern).count();
        overall.push(PatternCount {
            pattern: pattern.to_string(),
            count,
            percent: percent(count, total_samples),
        });
    }
    let in_universe: usize = overall.iter().map(|p| p.count).sum();

    let mut analyses = Vec::with_capacity(columns.len());
    for name in columns {
        let Some(col) = table.column_index(name) else {
            continue;
        };
        analyses.push(analyze_column(table, name, col, &patterns, markers));
    }

    Ok(AnalysisResult {
        total_samples,
        overall,
        other_patterns: total_samples - in_universe,
        columns: analyses,
    })
}

fn analyze_column(
    table: &ClinicalTable,
    name: &str,
    col: usize,
    patterns: &[&str],
    markers: &MissingMarkers,
) -> ColumnAnalysis {
    let distinct_values = distinct_in_order(
        table
            .column_values(col)
            .filter(|v| !markers.is_missing(v)),
    );

    let mut breakdowns = Vec::new();
    for pattern in PATTERNS_OF_INTEREST {
        let rows: Vec<usize> = (0..patterns.len())
            .filter(|&row| patterns[row] == pattern)
            .collect();
        let total = rows.len();
        if total == 0 {
            continue;
        }
        let present = rows
            .iter()
            .map(|&row| table.cell(row, col))
            .filter(|v| !markers.is_missing(v))
            .map(str::to_string);
        let counts = value_counts(present);
        let non_empty_total: usize = counts.iter().map(|(_, c)| c).sum();
        let value_distribution = counts
            .into_iter()
            .map(|(value, count)| ValueStat {
                value,
                count,
                percent_of_pattern: percent(count, total),
                percent_of_non_empty: percent(count, non_empty_total),
            })
            .collect();
        breakdowns.push(PatternBreakdown {
            pattern: pattern.to_string(),
            total_samples: total,
            non_empty_total,
            value_distribution,
        });
    }

    ColumnAnalysis {
        column: name.to_string(),
        distinct_values,
        patterns: breakdowns,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    pub name: String,
    pub non_empty: usize,
    pub unique: Vec<String>,
}

/// Describes every column except `skip`, in table order.
pub fn profile_columns(
    table: &ClinicalTable,
    skip: &[&str],
    markers: &MissingMarkers,
) -> Vec<ColumnProfile> {
    let mut out = Vec::new();
    for (col, name) in table.columns.iter().enumerate() {
        if skip.contains(&name.as_str()) {
            continue;
        }
        let unique = distinct_in_order(
            table
                .column_values(col)
                .filter(|v| !markers.is_missing(v)),
        );
        let non_empty = table
            .column_values(col)
            .filter(|v| !markers.is_missing(v))
            .count();
        out.push(ColumnProfile {
            name: name.clone(),
            non_empty,
            unique,
        });
    }
    out
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
