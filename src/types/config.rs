use super::scoring::{ComplexityPolicy, ScoringProfile, Weights};
use crate::error::GuardError;
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_NARRATOR_ENDPOINT: &str = "http://localhost:11434/v1/chat/completions";
pub const DEFAULT_NARRATOR_MODEL: &str = "qwen:0.5b";
pub const DEFAULT_BASE_RATE: f64 = 1000.0;

const ALLOWED_WEIGHT_KEYS: [&str; 4] = ["complexity", "vulnerabilities", "upgradability", "behavior"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub narrator: NarratorConfig,
    #[serde(default)]
    pub premium: PremiumConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub profile: ScoringProfile,
    pub complexity_policy: Option<ComplexityPolicy>,
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarratorConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key_env: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_NARRATOR_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_NARRATOR_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.2
}

#[derive(Debug, Clone, Deserialize)]
pub struct PremiumConfig {
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            base_rate: DEFAULT_BASE_RATE,
        }
    }
}

fn default_base_rate() -> f64 {
    DEFAULT_BASE_RATE
}

impl GuardConfig {
    pub fn complexity_policy(&self, profile: ScoringProfile) -> ComplexityPolicy {
        self.scoring
            .complexity_policy
            .unwrap_or_else(|| profile.default_complexity_policy())
    }

    /// Weights for `profile`, with any configured overrides applied.
    pub fn weights(&self, profile: ScoringProfile) -> Weights {
        let defaults = profile.default_weights();
        match &self.scoring.weights {
            Some(weights) => Weights {
                complexity: *weights.get("complexity").unwrap_or(&defaults.complexity),
                vulnerabilities: *weights
                    .get("vulnerabilities")
                    .unwrap_or(&defaults.vulnerabilities),
                upgradability: *weights
                    .get("upgradability")
                    .unwrap_or(&defaults.upgradability),
                behavior: *weights.get("behavior").unwrap_or(&defaults.behavior),
            },
            None => defaults,
        }
    }

    /// Validates the configuration as it would be used under `profile`.
    pub fn validate_for(&self, profile: ScoringProfile) -> Result<(), GuardError> {
        if let Some(weights) = &self.scoring.weights {
            let unknown = weights
                .keys()
                .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(GuardError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }

            if !profile.includes_extended_dimensions()
                && (weights.contains_key("upgradability") || weights.contains_key("behavior"))
            {
                return Err(GuardError::ConfigParse(
                    "scoring.weights.upgradability and scoring.weights.behavior require the extended profile"
                        .to_string(),
                ));
            }
        }

        let weights = self.weights(profile);
        if weights
            .as_array()
            .iter()
            .any(|weight| !(0.0..=1.0).contains(weight))
        {
            return Err(GuardError::ConfigParse(
                "scoring.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum = weights.sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(GuardError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if self.narrator.timeout_secs == 0 {
            return Err(GuardError::ConfigParse(
                "narrator.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.narrator.enabled && self.narrator.endpoint.trim().is_empty() {
            return Err(GuardError::ConfigParse(
                "narrator.endpoint cannot be empty when narrator.enabled = true".to_string(),
            ));
        }

        if self.premium.base_rate <= 0.0 || !self.premium.base_rate.is_finite() {
            return Err(GuardError::ConfigParse(
                "premium.base_rate must be a positive number".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config_uses_defaults() {
        let cfg: GuardConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.scoring.profile, ScoringProfile::Baseline);
        assert_eq!(
            cfg.complexity_policy(ScoringProfile::Baseline),
            ComplexityPolicy::Weighted
        );
        assert!(!cfg.narrator.enabled);
        assert_eq!(cfg.narrator.timeout_secs, 30);
        assert_eq!(cfg.premium.base_rate, 1000.0);
        assert!(cfg.validate_for(cfg.scoring.profile).is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[scoring]
profile = "extended"
complexity_policy = "deduction"

[scoring.weights]
complexity = 0.25
vulnerabilities = 0.45

[narrator]
enabled = true
endpoint = "http://127.0.0.1:8080/v1/chat/completions"
model = "auditor"
api_key_env = "AUDITOR_KEY"
timeout_secs = 5

[premium]
base_rate = 250.0
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.scoring.profile, ScoringProfile::Extended);
        assert_eq!(
            cfg.complexity_policy(ScoringProfile::Extended),
            ComplexityPolicy::Deduction
        );
        let weights = cfg.weights(ScoringProfile::Extended);
        assert_eq!(weights.complexity, 0.25);
        assert_eq!(weights.vulnerabilities, 0.45);
        assert_eq!(weights.upgradability, 0.15);
        assert_eq!(cfg.narrator.model, "auditor");
        assert_eq!(cfg.narrator.api_key_env.as_deref(), Some("AUDITOR_KEY"));
        assert!(cfg.validate_for(cfg.scoring.profile).is_ok());
    }

    #[test]
    fn complexity_policy_follows_profile_when_unset() {
        let cfg = GuardConfig::default();
        assert_eq!(
            cfg.complexity_policy(ScoringProfile::Extended),
            ComplexityPolicy::Extended
        );
    }

    #[test]
    fn validate_rejects_invalid_weight_sum() {
        let toml_str = r#"
[scoring.weights]
complexity = 0.5
vulnerabilities = 0.7
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate_for(cfg.scoring.profile).expect_err("validation should fail");
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn validate_rejects_unknown_weight_keys() {
        let toml_str = r#"
[scoring.weights]
complexity = 0.3
vulnerabilities = 0.7
gas = 0.0
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate_for(cfg.scoring.profile).expect_err("validation should fail");
        assert!(err.to_string().contains("unknown key"));
        assert!(err.to_string().contains("gas"));
    }

    #[test]
    fn validate_rejects_extended_weights_under_baseline() {
        let toml_str = r#"
[scoring.weights]
complexity = 0.3
vulnerabilities = 0.7
behavior = 0.0
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate_for(cfg.scoring.profile).expect_err("validation should fail");
        assert!(err.to_string().contains("require the extended profile"));
        assert!(cfg.validate_for(ScoringProfile::Extended).is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let toml_str = r#"
[narrator]
timeout_secs = 0
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate_for(cfg.scoring.profile).expect_err("validation should fail");
        assert!(err.to_string().contains("narrator.timeout_secs"));
    }

    #[test]
    fn validate_rejects_empty_endpoint_when_enabled() {
        let toml_str = r#"
[narrator]
enabled = true
endpoint = "  "
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate_for(cfg.scoring.profile).expect_err("validation should fail");
        assert!(err.to_string().contains("narrator.endpoint"));
    }

    #[test]
    fn validate_rejects_non_positive_base_rate() {
        let toml_str = r#"
[premium]
base_rate = 0.0
"#;
        let cfg: GuardConfig = toml::from_str(toml_str).expect("config should parse");
        assert!(cfg.validate_for(cfg.scoring.profile).is_err());
    }

    #[test]
    fn parse_rejects_unknown_profile() {
        let toml_str = r#"
[scoring]
profile = "paranoid"
"#;
        assert!(toml::from_str::<GuardConfig>(toml_str).is_err());
    }
}
