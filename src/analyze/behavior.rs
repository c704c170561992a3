use super::upgradability::yes_no;
use crate::scan::SignalSet;
use crate::types::report::DimensionResult;
use crate::types::scoring::Score;

/// Behavior starts at 80, not 100.
const BEHAVIOR_BASELINE: Score = 80.0;

pub fn behavior_score(signals: &SignalSet) -> DimensionResult {
    let mut score = BEHAVIOR_BASELINE;
    if signals.external_call_count > 0 && !signals.has_reentrancy_guard {
        score -= 30.0;
    }
    if !signals.has_access_control {
        score -= 20.0;
    }

    DimensionResult::new(
        score,
        vec![
            format!(
                "Reentrancy Protection: {}",
                yes_no(signals.has_reentrancy_guard)
            ),
            format!("Access Controls: {}", yes_no(signals.has_access_control)),
        ],
    )
}
