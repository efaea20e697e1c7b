use serde::Serialize;

use crate::pipeline::stage3_aggregate::AnalysisResult;

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    tool: &'a str,
    version: &'a str,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

pub fn render_summary_json(
    result: &AnalysisResult,
    tool: &str,
    version: &str,
) -> serde_json::Result<String> {
    let doc = SummaryDocument {
        tool,
        version,
        result,
    };
    serde_json::to_string_pretty(&doc)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
