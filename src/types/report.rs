use super::scoring::{clamp_score, RiskLevel, Score};
use serde::Serialize;

/// Score, findings and risk bucket for one scoring dimension.
///
/// The score is clamped on construction and the risk level is always derived
/// from it, so neither can drift from the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionResult {
    score: Score,
    details: Vec<String>,
    risk_level: RiskLevel,
}

impl DimensionResult {
    pub fn new(score: Score, details: Vec<String>) -> Self {
        let score = clamp_score(score);
        Self {
            score,
            details,
            risk_level: RiskLevel::from_score(score),
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn has_detail_containing(&self, needle: &str) -> bool {
        self.details.iter().any(|detail| detail.contains(needle))
    }

    pub fn has_detail_containing_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.details
            .iter()
            .any(|detail| detail.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub overall_risk: RiskLevel,
    pub complexity: DimensionResult,
    pub vulnerabilities: DimensionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgradability: Option<DimensionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<DimensionResult>,
    pub recommendations: Vec<String>,
    /// Error message when this is a degraded document rather than a score.
    #[serde(skip)]
    pub failure: Option<String>,
}

impl AnalysisResult {
    /// Structurally valid all-zero document used when analysis cannot run.
    pub fn failed(message: &str, extended: bool) -> Self {
        let zero = || DimensionResult::new(0.0, vec![message.to_string()]);
        Self {
            overall_score: 0,
            overall_risk: RiskLevel::High,
            complexity: zero(),
            vulnerabilities: zero(),
            upgradability: extended.then(zero),
            behavior: extended.then(zero),
            recommendations: Vec::new(),
            failure: Some(message.to_string()),
        }
    }

    pub fn dimensions(&self) -> Vec<(&'static str, &DimensionResult)> {
        let mut dimensions = vec![
            ("complexity", &self.complexity),
            ("vulnerabilities", &self.vulnerabilities),
        ];
        if let Some(upgradability) = &self.upgradability {
            dimensions.push(("upgradability", upgradability));
        }
        if let Some(behavior) = &self.behavior {
            dimensions.push(("behavior", behavior));
        }
        dimensions
    }
}
