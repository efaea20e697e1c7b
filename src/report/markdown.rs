use crate::pipeline::stage3_aggregate::{AnalysisResult, ColumnAnalysis};
use crate::report::format_pct_1;

const TABLE_HEADER: &str =
    "| IHC_Pattern | Total_Samples | Non_Empty | Value | Count | % of Pattern | % of Non_Empty |";
const TABLE_RULE: &str =
    "|-------------|---------------|-----------|-------|-------|--------------|----------------|";

pub fn render_markdown(result: &AnalysisResult, tool: &str, version: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# IHC Receptor Pattern Analysis Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- Tool: {} {}", tool, version));
    lines.push(format!("- Total samples: {}", result.total_samples));
    lines.push(format!("- Columns analyzed: {}", result.columns.len()));
    lines.push(String::new());

    lines.push("## Overall IHC Receptor Pattern Distribution".to_string());
    lines.push(String::new());
    for p in &result.overall {
        lines.push(format!(
            "- {}: {} samples ({}%)",
            p.pattern,
            p.count,
            format_pct_1(p.percent)
        ));
    }
    lines.push(String::new());

    for column in &result.columns {
        lines.push(format!("## Analysis: {}", column.column));
        lines.push(String::new());
        lines.extend(column_table(column));
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One table per column. Only the first row of a pattern group carries the
/// pattern, total and non-empty cells.
pub fn column_table(column: &ColumnAnalysis) -> Vec<String> {
    let mut rows = vec![TABLE_HEADER.to_string(), TABLE_RULE.to_string()];
    for p in &column.patterns {
        if !p.has_data() {
            rows.push(format!(
                "| {} | {} | {} | No data | - | - | - |",
                p.pattern, p.total_samples, p.non_empty_total
            ));
            continue;
        }
        for (idx, v) in p.value_distribution.iter().enumerate() {
            let lead = if idx == 0 {
                format!("| {} | {} | {} |", p.pattern, p.total_samples, p.non_empty_total)
            } else {
                "| | | |".to_string()
            };
            rows.push(format!(
                "{} {} | {} | {}% | {}% |",
                lead,
                escape_cell(&v.value),
                v.count,
                format_pct_1(v.percent_of_pattern),
                format_pct_1(v.percent_of_non_empty)
            ));
        }
    }
    rows
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/markdown.rs"]
mod tests;
