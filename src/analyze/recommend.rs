use crate::types::report::DimensionResult;

pub const SPLIT_CONTRACT: &str =
    "Consider breaking down the contract into smaller, more manageable components";
pub const MINIMIZE_CALLS: &str = "Minimize external calls to reduce attack surface";
pub const REDUCE_NESTING: &str = "Reduce code nesting to improve readability and auditability";
pub const ADD_REENTRANCY_GUARD: &str =
    "Implement ReentrancyGuard and follow checks-effects-interactions pattern";
pub const SECURE_SELFDESTRUCT: &str = "Remove or secure selfdestruct functionality";
pub const USE_MSG_SENDER: &str = "Use msg.sender instead of tx.origin";

const COMPLEXITY_THRESHOLD: f64 = 80.0;

/// Remediation advice derived from dimension results only. Rules are
/// evaluated in a fixed order and each fires at most once.
pub fn recommendations(
    complexity: &DimensionResult,
    vulnerabilities: &DimensionResult,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    let mut push = |text: &str| {
        if !recommendations.iter().any(|existing| existing == text) {
            recommendations.push(text.to_string());
        }
    };

    if complexity.score() < COMPLEXITY_THRESHOLD {
        if complexity.has_detail_containing("Lines of Code") {
            push(SPLIT_CONTRACT);
        }
        if complexity.has_detail_containing("External Calls") {
            push(MINIMIZE_CALLS);
        }
        if complexity.has_detail_containing("Nesting Depth") {
            push(REDUCE_NESTING);
        }
    }

    if vulnerabilities.has_detail_containing_ignore_case("reentrancy") {
        push(ADD_REENTRANCY_GUARD);
    }
    if vulnerabilities.has_detail_containing_ignore_case("selfdestruct") {
        push(SECURE_SELFDESTRUCT);
    }
    if vulnerabilities.has_detail_containing_ignore_case("tx.origin") {
        push(USE_MSG_SENDER);
    }

    recommendations
}
