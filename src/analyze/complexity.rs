use crate::scan::SignalSet;
use crate::types::report::DimensionResult;
use crate::types::scoring::{ComplexityPolicy, Score};

const MAX_LOC_PENALTY: f64 = 50.0;
const CALL_PENALTY: f64 = 10.0;

pub fn complexity_score(signals: &SignalSet, policy: ComplexityPolicy) -> DimensionResult {
    let loc_penalty = (signals.line_count as f64 / 10.0).min(MAX_LOC_PENALTY);
    let calls = signals.external_call_count as f64;
    let nesting = signals.max_nesting_depth as f64;

    let score: Score = match policy {
        ComplexityPolicy::Deduction => 100.0 - (loc_penalty + calls * CALL_PENALTY + nesting * 15.0),
        ComplexityPolicy::Weighted => {
            let loc_score = 100.0 - loc_penalty;
            let calls_score = 100.0 - calls * CALL_PENALTY;
            let nesting_score = 100.0 - nesting * 15.0;
            loc_score * 0.4 + calls_score * 0.3 + nesting_score * 0.3
        }
        ComplexityPolicy::Extended => {
            100.0
                - (loc_penalty
                    + calls * CALL_PENALTY
                    + nesting * 5.0
                    + signals.state_variable_count as f64 * 2.0)
        }
    };

    let mut details = vec![
        format!("Lines of Code: {}", signals.line_count),
        format!("External Calls: {}", signals.external_call_count),
        format!("Maximum Nesting Depth: {}", signals.max_nesting_depth),
    ];
    if matches!(policy, ComplexityPolicy::Extended) {
        details.push(format!("State Variables: {}", signals.state_variable_count));
    }

    DimensionResult::new(score, details)
}
