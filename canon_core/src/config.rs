//! Engine configuration.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use lore_rules::{ConfigError, RulesConfig};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringWeights;
use crate::tree::{RootPolicy, DEFAULT_MAX_PATHS};

/// Time of day (UTC) at which a chapter closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterSchedule {
    pub close_hour: u32,
    pub close_minute: u32,
}

impl Default for ChapterSchedule {
    fn default() -> Self {
        Self {
            close_hour: 23,
            close_minute: 50,
        }
    }
}

impl ChapterSchedule {
    /// The first closing time strictly after `now`.
    pub fn next_close_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let close = NaiveTime::from_hms_opt(self.close_hour, self.close_minute, 0)?;
        let today = now.date_naive().and_time(close).and_utc();
        if today > now {
            Some(today)
        } else {
            Some(today + Duration::days(1))
        }
    }
}

/// Configuration for a canonization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonConfig {
    /// Cap on enumerated paths; 0 disables the cap.
    pub max_paths: usize,

    pub root_policy: RootPolicy,

    /// Author name put on generated chapters.
    pub bot_name: String,

    /// Leading word of generated chapter titles.
    pub title_prefix: String,

    pub weights: ScoringWeights,

    pub schedule: ChapterSchedule,

    pub rules: RulesConfig,
}

impl Default for CanonConfig {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            root_policy: RootPolicy::default(),
            bot_name: "LoreWeaveBot".to_string(),
            title_prefix: "LoreWeave".to_string(),
            weights: ScoringWeights::default(),
            schedule: ChapterSchedule::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl CanonConfig {
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

    /// Path cap as passed to enumeration.
    pub fn path_limit(&self) -> Option<usize> {
        (self.max_paths > 0).then_some(self.max_paths)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let all_finite = [
            w.votes_weight,
            w.novelty_weight,
            w.diversity_weight,
            w.penalty_per_violation,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::Invalid("scoring weights must be finite".to_string()));
        }

        if self.schedule.close_hour > 23 || self.schedule.close_minute > 59 {
            return Err(ConfigError::Invalid(format!(
                "invalid closing time {:02}:{:02}",
                self.schedule.close_hour, self.schedule.close_minute
            )));
        }

        self.rules.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = CanonConfig::default();
        assert_eq!(config.weights, ScoringWeights::default());
        assert_eq!(config.path_limit(), Some(DEFAULT_MAX_PATHS));
        assert_eq!(config.root_policy, RootPolicy::EarliestCreated);
        assert_eq!(config.rules.limits.min_chars, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let config = CanonConfig::from_toml_str(
            r#"
max_paths = 0
root_policy = "strict"

[weights]
votes_weight = 0.7
penalty_per_violation = 0.5

[schedule]
close_hour = 20
close_minute = 0

[rules]
rate_limit_per_hour = 10
"#,
        )
        .unwrap();

        assert_eq!(config.path_limit(), None);
        assert_eq!(config.root_policy, RootPolicy::Strict);
        assert_eq!(config.weights.votes_weight, 0.7);
        assert_eq!(config.weights.novelty_weight, 0.3);
        assert_eq!(config.weights.penalty_per_violation, 0.5);
        assert_eq!(config.schedule.close_hour, 20);
        assert_eq!(config.rules.rate_limit_per_hour, 10);
        assert_eq!(config.bot_name, "LoreWeaveBot");
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let err = CanonConfig::from_toml_str("[schedule]\nclose_hour = 24\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_round_trip() {
        let config = CanonConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(CanonConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_next_close_same_day() {
        let schedule = ChapterSchedule::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(
            schedule.next_close_after(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 23, 50, 0).unwrap())
        );
    }

    #[test]
    fn test_next_close_rolls_over() {
        let schedule = ChapterSchedule::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 23, 50, 0).unwrap();
        assert_eq!(
            schedule.next_close_after(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 23, 50, 0).unwrap())
        );
    }
}
