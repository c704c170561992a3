pub mod behavior;
pub mod complexity;
pub mod recommend;
pub mod upgradability;
pub mod vulnerability;

use crate::narrator::{self, Narrator};
use crate::scan::{self, SignalSet};
use crate::types::config::GuardConfig;
use crate::types::report::{AnalysisResult, DimensionResult};
use crate::types::scoring::{clamp_score, ComplexityPolicy, RiskLevel, ScoringProfile, Weights};
use tracing::{debug, info};

/// Named scoring configuration for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeOptions {
    pub profile: ScoringProfile,
    pub complexity_policy: ComplexityPolicy,
    pub weights: Weights,
    /// Caller-supplied vulnerability labels; when non-empty they replace the
    /// detector's findings.
    pub labels: Vec<String>,
}

impl AnalyzeOptions {
    pub fn new(profile: ScoringProfile) -> Self {
        Self {
            profile,
            complexity_policy: profile.default_complexity_policy(),
            weights: profile.default_weights(),
            labels: Vec::new(),
        }
    }

    pub fn from_config(config: &GuardConfig, profile: ScoringProfile) -> Self {
        Self {
            complexity_policy: config.complexity_policy(profile),
            weights: config.weights(profile),
            ..Self::new(profile)
        }
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::new(ScoringProfile::default())
    }
}

/// Detects signals in `source`, asks the narrator (if any) for a narration
/// and scores the result. Narrator failures fall back to pattern scoring.
pub fn analyze(
    source: &str,
    options: &AnalyzeOptions,
    narrator: Option<&dyn Narrator>,
) -> AnalysisResult {
    let signals = scan::detect(source);
    let narration = narrator.and_then(|narrator| narrator::narration_for(narrator, source));
    analyze_signals(&signals, options, narration.as_deref())
}

pub fn analyze_signals(
    signals: &SignalSet,
    options: &AnalyzeOptions,
    narration: Option<&str>,
) -> AnalysisResult {
    let complexity = complexity::complexity_score(signals, options.complexity_policy);
    let vulnerabilities = match narration {
        Some(text) => {
            debug!("scoring vulnerabilities from narration");
            vulnerability::vulnerability_from_narration(text)
        }
        None if !options.labels.is_empty() => {
            debug!(labels = ?options.labels, "scoring vulnerabilities from supplied labels");
            vulnerability::vulnerability_from_labels(&options.labels)
        }
        None => vulnerability::vulnerability_score(signals),
    };

    let (upgradability, behavior) = if options.profile.includes_extended_dimensions() {
        (
            Some(upgradability::upgradability_score(signals)),
            Some(behavior::behavior_score(signals)),
        )
    } else {
        (None, None)
    };

    let overall_score = aggregate(
        &options.weights,
        &complexity,
        &vulnerabilities,
        upgradability.as_ref(),
        behavior.as_ref(),
    );
    let recommendations = recommend::recommendations(&complexity, &vulnerabilities);

    info!(
        overall_score,
        complexity = complexity.score(),
        vulnerabilities = vulnerabilities.score(),
        "analysis complete"
    );

    AnalysisResult {
        overall_score,
        overall_risk: RiskLevel::from_score(f64::from(overall_score)),
        complexity,
        vulnerabilities,
        upgradability,
        behavior,
        recommendations,
        failure: None,
    }
}

/// Weighted sum of the present dimensions, rounded half-to-even and clamped.
pub fn aggregate(
    weights: &Weights,
    complexity: &DimensionResult,
    vulnerabilities: &DimensionResult,
    upgradability: Option<&DimensionResult>,
    behavior: Option<&DimensionResult>,
) -> u8 {
    let mut total =
        complexity.score() * weights.complexity + vulnerabilities.score() * weights.vulnerabilities;
    if let Some(upgradability) = upgradability {
        total += upgradability.score() * weights.upgradability;
    }
    if let Some(behavior) = behavior {
        total += behavior.score() * weights.behavior;
    }
    clamp_score(total.round_ties_even()) as u8
}
