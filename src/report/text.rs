use crate::pipeline::stage2_extract::Extract;
use crate::pipeline::stage3_aggregate::{
    AnalysisResult, ColumnAnalysis, ColumnProfile, PatternBreakdown, percent,
};
use crate::report::{format_pct_1, render_aligned};

const PREVIEW_ROWS: usize = 3;
const DISTINCT_PREVIEW: usize = 10;
const PROFILE_VALUE_LIMIT: usize = 5;

pub fn render_extract_summary(extract: &Extract) -> String {
    let mut out = String::new();

    out.push_str("Output Summary\n");
    out.push_str(&format!("  Total samples: {}\n", extract.rows.len()));
    out.push_str(&format!("  Total columns: {}\n\n", extract.n_columns()));

    out.push_str("Receptor Pattern Distribution\n");
    for (pattern, count) in extract.pattern_distribution() {
        out.push_str(&format!("  {}: {} samples\n", pattern, count));
    }
    out.push('\n');

    out.push_str(&format!("Sample of output (first {} rows)\n", PREVIEW_ROWS));
    let preview: Vec<Vec<String>> = extract
        .rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|r| r.cells())
        .collect();
    out.push_str(&render_aligned(&extract.header(), &preview));

    out
}

pub fn render_analysis_text(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("IHC Receptor Pattern Analysis\n");
    out.push_str("=============================\n\n");

    out.push_str("1. Overall IHC receptor pattern distribution\n");
    for p in &result.overall {
        out.push_str(&format!(
            "  {:<8} {:>5} samples ({:>5}%)\n",
            p.pattern,
            p.count,
            format_pct_1(p.percent)
        ));
    }
    out.push_str(&format!("  {:<8} {:>5} samples\n", "Other", result.other_patterns));
    out.push_str(&format!("  {:<8} {:>5} samples\n", "Total", result.total_samples));

    for (idx, column) in result.columns.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}. Column: {}\n", idx + 2, column.column));
        push_distinct(&mut out, column);
        for pattern in &column.patterns {
            push_pattern(&mut out, &column.column, pattern);
        }
    }

    out
}

fn push_distinct(out: &mut String, column: &ColumnAnalysis) {
    let n = column.distinct_values.len();
    let shown: Vec<&str> = column
        .distinct_values
        .iter()
        .take(DISTINCT_PREVIEW)
        .map(String::as_str)
        .collect();
    if n > DISTINCT_PREVIEW {
        out.push_str(&format!(
            "Unique values: {} (first {}): {}\n",
            n,
            DISTINCT_PREVIEW,
            shown.join(", ")
        ));
    } else {
        out.push_str(&format!("Unique values: {}: {}\n", n, shown.join(", ")));
    }
}

fn push_pattern(out: &mut String, column: &str, p: &PatternBreakdown) {
    out.push_str(&format!(
        "\n  IHC Pattern: {} ({} total samples)\n",
        p.pattern, p.total_samples
    ));
    if !p.has_data() {
        out.push_str(&format!("    No data available for {}\n", column));
        return;
    }
    for v in &p.value_distribution {
        out.push_str(&format!(
            "    {:<20} {:>4} samples ({:>5}% of {} total, {:>5}% of non-empty)\n",
            v.value,
            v.count,
            format_pct_1(v.percent_of_pattern),
            p.pattern,
            format_pct_1(v.percent_of_non_empty)
        ));
    }
    let missing = p.missing();
    if missing > 0 {
        out.push_str(&format!(
            "    {:<20} {:>4} samples ({:>5}% of {} total)\n",
            "Missing/Empty",
            missing,
            format_pct_1(percent(missing, p.total_samples)),
            p.pattern
        ));
    }
}

pub fn render_column_listing(columns: &[String]) -> String {
    let mut out = format!("All available columns ({}):\n", columns.len());
    for col in columns {
        out.push_str(&format!("  - {}\n", col));
    }
    out
}

pub fn render_column_search(term: &str, hits: &[(String, usize)]) -> String {
    let mut out = format!("Available columns containing '{}' ({}):\n", term, hits.len());
    for (col, non_empty) in hits {
        out.push_str(&format!("  - {} ({} non-empty)\n", col, non_empty));
    }
    out
}

pub fn render_column_profiles(source: &str, profiles: &[ColumnProfile]) -> String {
    let mut out = format!("All available columns in {}:\n", source);
    for (idx, p) in profiles.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", idx + 1, p.name));
        out.push_str(&format!("      Non-empty values: {}\n", p.non_empty));
        out.push_str(&format!("      Unique values: {}\n", p.unique.len()));
        if p.unique.len() <= PROFILE_VALUE_LIMIT {
            out.push_str(&format!("      Values: {}\n", p.unique.join(", ")));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
