//! Pattern detector.
//!
//! Every signal is a line or substring match over the raw contract text; no
//! grammar is parsed. A comment or string literal that mentions `tx.origin`
//! raises the same flag as real code does.

pub mod patterns;

use serde::Serialize;
use tracing::debug;

/// Facts extracted once from a contract source. Scorers read these and never
/// rescan the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalSet {
    pub line_count: usize,
    pub external_call_count: usize,
    /// Largest number of `{` on any single line, not a running brace depth.
    pub max_nesting_depth: usize,
    pub state_variable_count: usize,
    pub has_selfdestruct: bool,
    pub has_tx_origin: bool,
    pub has_input_validation: bool,
    /// `nonReentrant` modifier in use.
    pub has_reentrancy_guard: bool,
    /// `ReentrancyGuard` base contract referenced.
    pub has_reentrancy_guard_base: bool,
    /// `.call{value:` or the legacy `.call.value` form.
    pub has_value_transfer_call: bool,
    pub has_access_control: bool,
    pub has_owner_concept: bool,
    pub is_upgradeable: bool,
}

pub fn detect(source: &str) -> SignalSet {
    let lines: Vec<&str> = source.split('\n').collect();

    let signals = SignalSet {
        line_count: lines.len(),
        external_call_count: patterns::EXTERNAL_CALL.find_iter(source).count(),
        max_nesting_depth: lines
            .iter()
            .map(|line| line.matches('{').count())
            .max()
            .unwrap_or(0),
        state_variable_count: lines
            .iter()
            .filter(|line| patterns::STATE_VARIABLE.is_match(line))
            .count(),
        has_selfdestruct: source.contains(patterns::SELFDESTRUCT),
        has_tx_origin: source.contains(patterns::TX_ORIGIN),
        has_input_validation: patterns::INPUT_VALIDATION.is_match(source),
        has_reentrancy_guard: source.contains(patterns::REENTRANCY_MODIFIER),
        has_reentrancy_guard_base: source.contains(patterns::REENTRANCY_GUARD_BASE),
        has_value_transfer_call: source.contains(patterns::VALUE_CALL)
            || source.contains(patterns::LEGACY_VALUE_CALL),
        has_access_control: source.contains(patterns::OWNER_MODIFIER)
            || source.contains(patterns::SENDER_CHECK),
        has_owner_concept: source.to_lowercase().contains(patterns::OWNER),
        is_upgradeable: patterns::UPGRADEABLE.is_match(source),
    };

    debug!(?signals, "detected contract signals");
    signals
}
