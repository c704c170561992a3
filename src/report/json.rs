use crate::types::report::AnalysisResult;

pub fn to_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{analyze, AnalyzeOptions};
    use crate::types::scoring::ScoringProfile;

    #[test]
    fn json_report_uses_snake_case_contract_fields() {
        let result = analyze("contract A { uint a; }", &AnalyzeOptions::default(), None);
        let rendered = to_json(&result).expect("json should serialize");
        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("rendered json should parse");

        assert!(value["overall_score"].is_u64());
        assert!(value["complexity"]["score"].is_number());
        assert!(value["complexity"]["details"].is_array());
        assert_eq!(value["vulnerabilities"]["risk_level"], "Low");
        assert!(value.get("upgradability").is_none());
        assert!(value["recommendations"].is_array());
    }

    #[test]
    fn json_report_includes_extended_dimensions_when_present() {
        let result = analyze(
            "contract A { uint a; }",
            &AnalyzeOptions::new(ScoringProfile::Extended),
            None,
        );
        let rendered = to_json(&result).expect("json should serialize");
        assert!(rendered.contains("\"upgradability\""));
        assert!(rendered.contains("\"Reentrancy Protection: No\""));
    }
}
