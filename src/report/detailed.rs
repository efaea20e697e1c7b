use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::pipeline::stage3_aggregate::AnalysisResult;
use crate::report::{format_pct_2, sanitize_tsv};

pub const DETAILED_HEADER: [&str; 8] = [
    "Column",
    "IHC_Pattern",
    "Total_Samples_in_Pattern",
    "Column_Value",
    "Count",
    "Percentage_of_Pattern_Total",
    "Percentage_of_Non_Empty",
    "Non_Empty_Total",
];

pub const NO_DATA: &str = "No_Data";

pub fn detailed_rows(result: &AnalysisResult) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for column in &result.columns {
        for p in &column.patterns {
            if !p.has_data() {
                rows.push(vec![
                    column.column.clone(),
                    p.pattern.clone(),
                    p.total_samples.to_string(),
                    NO_DATA.to_string(),
                    "0".to_string(),
                    format_pct_2(0.0),
                    format_pct_2(0.0),
                    p.non_empty_total.to_string(),
                ]);
                continue;
            }
            for v in &p.value_distribution {
                rows.push(vec![
                    column.column.clone(),
                    p.pattern.clone(),
                    p.total_samples.to_string(),
                    sanitize_tsv(&v.value),
                    v.count.to_string(),
                    format_pct_2(v.percent_of_pattern),
                    format_pct_2(v.percent_of_non_empty),
                    p.non_empty_total.to_string(),
                ]);
            }
        }
    }
    rows
}

pub fn write_detailed_tsv(result: &AnalysisResult, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", DETAILED_HEADER.join("\t"))?;
    for row in detailed_rows(result) {
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/detailed.rs"]
mod tests;
