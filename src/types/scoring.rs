use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension score on the 0..=100 scale.
pub type Score = f64;

pub const MIN_SCORE: Score = 0.0;
pub const MAX_SCORE: Score = 100.0;

pub fn clamp_score(score: Score) -> Score {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Three-bucket classification derived from a score. Higher scores are safer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: Score) -> Self {
        if score >= 80.0 {
            RiskLevel::Low
        } else if score >= 60.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which dimensions are computed and how they are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringProfile {
    /// Complexity and vulnerabilities only, weighted 0.3 / 0.7.
    #[default]
    Baseline,
    /// All four dimensions, weighted 0.3 / 0.4 / 0.15 / 0.15.
    Extended,
}

impl ScoringProfile {
    pub fn default_weights(self) -> Weights {
        match self {
            ScoringProfile::Baseline => Weights {
                complexity: 0.3,
                vulnerabilities: 0.7,
                upgradability: 0.0,
                behavior: 0.0,
            },
            ScoringProfile::Extended => Weights {
                complexity: 0.3,
                vulnerabilities: 0.4,
                upgradability: 0.15,
                behavior: 0.15,
            },
        }
    }

    pub fn default_complexity_policy(self) -> ComplexityPolicy {
        match self {
            ScoringProfile::Baseline => ComplexityPolicy::Weighted,
            ScoringProfile::Extended => ComplexityPolicy::Extended,
        }
    }

    pub fn includes_extended_dimensions(self) -> bool {
        matches!(self, ScoringProfile::Extended)
    }
}

/// Complexity formula variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityPolicy {
    /// `100 - (min(50, loc/10) + calls*10 + nesting*15)`
    Deduction,
    /// `0.4*loc_score + 0.3*calls_score + 0.3*nesting_score`
    Weighted,
    /// `100 - (min(50, loc/10) + calls*10 + nesting*5 + state_vars*2)`
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub complexity: f64,
    pub vulnerabilities: f64,
    pub upgradability: f64,
    pub behavior: f64,
}

impl Weights {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.complexity,
            self.vulnerabilities,
            self.upgradability,
            self.behavior,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}
