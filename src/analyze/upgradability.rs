use crate::scan::SignalSet;
use crate::types::report::DimensionResult;

pub fn upgradability_score(signals: &SignalSet) -> DimensionResult {
    let mut score = 100.0;
    if signals.is_upgradeable {
        score -= 30.0;
    }
    if signals.has_owner_concept && !signals.has_access_control {
        score -= 20.0;
    }

    DimensionResult::new(
        score,
        vec![
            format!("Upgradeable: {}", yes_no(signals.is_upgradeable)),
            format!("Access Control: {}", yes_no(signals.has_access_control)),
        ],
    )
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
