use crate::types::report::AnalysisResult;
use serde::Serialize;

const COMPLEXITY_FACTOR_WEIGHT: f64 = 0.2;
const VULNERABILITY_FACTOR_WEIGHT: f64 = 0.4;
const UPGRADABILITY_FACTOR_WEIGHT: f64 = 0.2;
const BEHAVIOR_FACTOR_WEIGHT: f64 = 0.2;

/// Monthly insurance premium quoted from a four-dimension analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumEstimate {
    pub base_rate: f64,
    /// Weighted shortfall from a perfect score, in `[0, 1]`.
    pub risk_factor: f64,
    pub premium: u64,
}

/// Quotes a premium between `base_rate` and three times `base_rate`.
///
/// Needs upgradability and behavior results; baseline analyses return `None`.
pub fn estimate(result: &AnalysisResult, base_rate: f64) -> Option<PremiumEstimate> {
    let upgradability = result.upgradability.as_ref()?;
    let behavior = result.behavior.as_ref()?;

    let shortfall = |score: f64| (100.0 - score) / 100.0;
    let risk_factor = shortfall(result.complexity.score()) * COMPLEXITY_FACTOR_WEIGHT
        + shortfall(result.vulnerabilities.score()) * VULNERABILITY_FACTOR_WEIGHT
        + shortfall(upgradability.score()) * UPGRADABILITY_FACTOR_WEIGHT
        + shortfall(behavior.score()) * BEHAVIOR_FACTOR_WEIGHT;

    let premium = (base_rate * (1.0 + risk_factor * 2.0)).round().max(0.0) as u64;
    Some(PremiumEstimate {
        base_rate,
        risk_factor,
        premium,
    })
}
