use regex::Regex;
use std::sync::LazyLock;

/// `.call`, `.delegatecall` or `.staticcall` anywhere in the text. Also matches
/// identifiers that merely start with one of those names (`.callback`).
pub static EXTERNAL_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(call|delegatecall|staticcall)").expect("external call pattern is valid")
});

/// Line starting with a value type keyword. Prefix match only, so
/// `interface` and `internal` count as `int`.
pub static STATE_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(uint|int|bool|address|string|bytes|mapping)")
        .expect("state variable pattern is valid")
});

pub static INPUT_VALIDATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"require\(|assert\(").expect("input validation pattern is valid")
});

pub static UPGRADEABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)upgradeable|proxy").expect("upgradeable pattern is valid")
});

pub const SELFDESTRUCT: &str = "selfdestruct";
pub const TX_ORIGIN: &str = "tx.origin";
pub const REENTRANCY_MODIFIER: &str = "nonReentrant";
pub const REENTRANCY_GUARD_BASE: &str = "ReentrancyGuard";
pub const VALUE_CALL: &str = ".call{value:";
pub const LEGACY_VALUE_CALL: &str = ".call.value";
pub const OWNER_MODIFIER: &str = "onlyOwner";
pub const SENDER_CHECK: &str = "require(msg.sender ==";
pub const OWNER: &str = "owner";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_call_pattern_counts_each_call_style() {
        let text = "a.call(x); b.delegatecall(y); c.staticcall(z); d.transfer(1);";
        assert_eq!(EXTERNAL_CALL.find_iter(text).count(), 3);
    }

    #[test]
    fn state_variable_pattern_ignores_leading_whitespace() {
        assert!(STATE_VARIABLE.is_match("    uint256 public total;"));
        assert!(STATE_VARIABLE.is_match("\tmapping(address => uint) balances;"));
        assert!(!STATE_VARIABLE.is_match("    function f() public {"));
    }

    #[test]
    fn upgradeable_pattern_is_case_insensitive() {
        assert!(UPGRADEABLE.is_match("contract Vault is UUPSUpgradeable {"));
        assert!(UPGRADEABLE.is_match("contract DangerousProxy {"));
        assert!(!UPGRADEABLE.is_match("contract Plain {"));
    }
}
