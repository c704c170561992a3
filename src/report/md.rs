use super::Subject;
use crate::types::report::AnalysisResult;

pub fn to_markdown(result: &AnalysisResult, subject: &Subject) -> String {
    let mut output = String::new();
    output.push_str("# Contract Security Report\n\n");
    output.push_str(&format!("Contract: `{}`\n", subject.path));
    if let Some(sha256) = &subject.sha256 {
        output.push_str(&format!("SHA-256: `{sha256}`\n"));
    }
    output.push('\n');
    output.push_str(&format!(
        "Overall score: {} ({} risk)\n\n",
        result.overall_score, result.overall_risk
    ));

    output.push_str("## Dimensions\n\n");
    for (name, dimension) in result.dimensions() {
        output.push_str(&format!(
            "### {name}: {:.1} ({} risk)\n\n",
            dimension.score(),
            dimension.risk_level()
        ));
        for detail in dimension.details() {
            output.push_str(&format!("- {detail}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Recommendations\n\n");
    if result.recommendations.is_empty() {
        output.push_str("- none\n");
    } else {
        for recommendation in &result.recommendations {
            output.push_str(&format!("- {recommendation}\n"));
        }
    }

    output
}
