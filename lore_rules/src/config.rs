//! Rulebook configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rule_card::RuleCatalog;
use crate::validation::LengthLimits;

fn default_rate_limit() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

/// Settings for submission gating and rule rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Shards one author may submit per window. Counting happens in the store.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_hour: u32,

    /// Hold an author's first shard of the window for moderator review.
    #[serde(default = "default_true")]
    pub mod_review_enabled: bool,

    #[serde(default)]
    pub limits: LengthLimits,

    #[serde(default)]
    pub catalog: RuleCatalog,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_hour: default_rate_limit(),
            mod_review_enabled: true,
            limits: LengthLimits::default(),
            catalog: RuleCatalog::default(),
        }
    }
}

impl RulesConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.min_chars > self.limits.max_chars {
            return Err(ConfigError::Invalid(format!(
                "min_chars ({}) exceeds max_chars ({})",
                self.limits.min_chars, self.limits.max_chars
            )));
        }
        self.catalog.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.rate_limit_per_hour, 2);
        assert!(config.mod_review_enabled);
        assert_eq!(config.limits.min_chars, 200);
        assert_eq!(config.limits.max_chars, 300);
        assert_eq!(config.catalog.len(), 4);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RulesConfig::from_toml_str("").unwrap();
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = RulesConfig::from_toml_str(
            r#"
rate_limit_per_hour = 5

[limits]
min_chars = 50
max_chars = 500
"#,
        )
        .unwrap();

        assert_eq!(config.rate_limit_per_hour, 5);
        assert_eq!(config.limits.min_chars, 50);
        assert_eq!(config.limits.max_chars, 500);
        assert_eq!(config.catalog, RuleCatalog::default());
    }

    #[test]
    fn test_custom_catalog() {
        let config = RulesConfig::from_toml_str(
            r#"
[catalog]
banned_word_sets = [["dragon", "magic"], ["wizard"]]
required_tag_sets = [["mystery"], ["twist"]]
style_tags = ["noir", "gothic"]
"#,
        )
        .unwrap();

        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.catalog.style_tags[1], "gothic");
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let err = RulesConfig::from_toml_str(
            r#"
[limits]
min_chars = 400
max_chars = 300
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = RulesConfig::from_toml_str("rate_limit_per_hour = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RulesConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(RulesConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
