use crate::scan::SignalSet;
use crate::types::report::DimensionResult;
use crate::types::scoring::Score;

pub const NO_VULNERABILITIES: &str = "No major vulnerabilities detected";

const NARRATION_PENALTY: Score = 10.0;

/// Category keys and the points each one costs. A label may hit several keys.
pub const DEDUCTIONS: [(&str, Score); 6] = [
    ("reentrancy", 30.0),
    ("selfdestruct", 25.0),
    ("unchecked_external_call", 20.0),
    ("tx_origin", 15.0),
    ("integer_overflow", 15.0),
    ("unprotected_functions", 10.0),
];

/// Issues the pattern detector can raise on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulnerabilityFinding {
    ContainsSelfdestruct,
    PotentialReentrancy,
    UsesTxOrigin,
    NoInputValidation,
}

impl VulnerabilityFinding {
    pub fn label(self) -> &'static str {
        match self {
            Self::ContainsSelfdestruct => "contains_selfdestruct",
            Self::PotentialReentrancy => "potential_reentrancy",
            Self::UsesTxOrigin => "uses_tx_origin",
            Self::NoInputValidation => "no_input_validation",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ContainsSelfdestruct => "Contains selfdestruct - high risk",
            Self::PotentialReentrancy => "Potential reentrancy vulnerability",
            Self::UsesTxOrigin => "Unsafe use of tx.origin",
            Self::NoInputValidation => "Missing input validation",
        }
    }
}

pub fn detect_findings(signals: &SignalSet) -> Vec<VulnerabilityFinding> {
    let mut findings = Vec::new();
    if signals.has_selfdestruct {
        findings.push(VulnerabilityFinding::ContainsSelfdestruct);
    }
    if signals.has_value_transfer_call
        && !signals.has_reentrancy_guard
        && !signals.has_reentrancy_guard_base
    {
        findings.push(VulnerabilityFinding::PotentialReentrancy);
    }
    if signals.has_tx_origin {
        findings.push(VulnerabilityFinding::UsesTxOrigin);
    }
    if !signals.has_input_validation {
        findings.push(VulnerabilityFinding::NoInputValidation);
    }
    findings
}

/// `100` minus the deduction for every category key found in every label,
/// matched case-insensitively.
pub fn deduction_score<S: AsRef<str>>(labels: &[S]) -> Score {
    let mut score = 100.0;
    for label in labels {
        let label = label.as_ref().to_lowercase();
        for (key, deduction) in DEDUCTIONS {
            if label.contains(key) {
                score -= deduction;
            }
        }
    }
    score
}

/// Pattern-only scoring over the detector's own findings.
pub fn vulnerability_score(signals: &SignalSet) -> DimensionResult {
    let messages = detect_findings(signals)
        .into_iter()
        .map(|finding| finding.message().to_string())
        .collect::<Vec<_>>();
    vulnerability_from_labels(&messages)
}

/// Pattern-only scoring over a caller-supplied list of labels.
pub fn vulnerability_from_labels<S: AsRef<str>>(labels: &[S]) -> DimensionResult {
    let score = deduction_score(labels);
    let details = if labels.is_empty() {
        vec![NO_VULNERABILITIES.to_string()]
    } else {
        labels
            .iter()
            .map(|label| label.as_ref().to_string())
            .collect()
    };
    DimensionResult::new(score, details)
}

/// Narration scoring: each narrated line that mentions a vulnerability or a
/// risk costs ten points and becomes a detail.
pub fn vulnerability_from_narration(narration: &str) -> DimensionResult {
    let flagged = narration
        .lines()
        .map(str::trim)
        .filter(|line| {
            let line = line.to_lowercase();
            line.contains("vulnerability") || line.contains("risk")
        })
        .map(str::to_string)
        .collect::<Vec<_>>();

    let score = 100.0 - NARRATION_PENALTY * flagged.len() as Score;
    let details = if flagged.is_empty() {
        vec![NO_VULNERABILITIES.to_string()]
    } else {
        flagged
    };
    DimensionResult::new(score, details)
}
