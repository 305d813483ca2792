//! Engine configuration with documented constants
//!
//! All scoring and progression numbers are collected here with explanations
//! of their purpose. Defaults reproduce the shipped balance; a host may load
//! overrides from TOML.

use crate::core::error::{EngineError, Result};
use crate::progression::{SkillDomain, MAX_CURVE_LEVEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Level curve limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Level cap for every core skill domain
    pub max_level: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self { max_level: 100 }
    }
}

/// One value per core skill domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainValues {
    pub combat: u32,
    pub survival: u32,
    pub mental: u32,
    pub social: u32,
    pub spiritual: u32,
}

impl DomainValues {
    pub fn get(&self, domain: SkillDomain) -> u32 {
        match domain {
            SkillDomain::Combat => self.combat,
            SkillDomain::Survival => self.survival,
            SkillDomain::Mental => self.mental,
            SkillDomain::Social => self.social,
            SkillDomain::Spiritual => self.spiritual,
        }
    }
}

/// Battle-length bucket: battles shorter than `under_seconds` use `multiplier`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBucket {
    pub under_seconds: u32,
    pub multiplier: f64,
}

/// Weights for combat experience scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Experience every participant earns per domain before bonuses
    ///
    /// Asymmetric: combat and survival are the battle-facing domains.
    pub base: DomainValues,

    // === COMBAT ===
    /// Damage points per bonus experience point
    pub damage_per_point: u32,
    /// Cap on the damage-dealt bonus
    pub damage_bonus_cap: u32,
    pub critical_hit_bonus: u32,
    pub ability_bonus: u32,
    pub outnumbered_bonus: u32,

    // === SURVIVAL ===
    pub dodge_bonus: u32,
    pub block_bonus: u32,
    /// Damage taken per bonus experience point (surviving punishment)
    pub damage_taken_per_point: u32,
    pub damage_taken_cap: u32,
    pub terrain_bonus: u32,

    // === MENTAL ===
    pub strategic_decision_bonus: u32,
    /// Per failure in a recovered failure streak
    pub adaptation_per_failure: u32,
    /// Cap per single recovery
    pub adaptation_cap: u32,
    /// Minimum failure streak length that counts as adaptation
    pub adaptation_min_streak: u32,
    pub underdog_per_level: u32,
    pub underdog_cap: u32,

    // === SOCIAL ===
    pub social_interaction_bonus: u32,
    pub team_battle_bonus: u32,

    // === SPIRITUAL ===
    pub spiritual_moment_bonus: u32,
    pub defeat_resolve_bonus: u32,

    // === MULTIPLIERS ===
    pub victory_multiplier: f64,
    pub defeat_multiplier: f64,
    /// Added per level the opponent is above the player
    pub difficulty_step: f64,
    /// Lower bound on the difficulty multiplier
    pub difficulty_floor: f64,
    /// Ascending buckets; first bucket whose bound exceeds the duration wins
    pub duration_buckets: Vec<DurationBucket>,
    /// Used when the battle outlasts every bucket
    pub long_battle_multiplier: f64,

    pub rating: RatingConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: DomainValues {
                combat: 20,
                survival: 15,
                mental: 12,
                social: 8,
                spiritual: 6,
            },

            damage_per_point: 50,
            damage_bonus_cap: 50,
            critical_hit_bonus: 10,
            ability_bonus: 8,
            outnumbered_bonus: 15,

            dodge_bonus: 8,
            block_bonus: 6,
            damage_taken_per_point: 40,
            damage_taken_cap: 30,
            terrain_bonus: 10,

            strategic_decision_bonus: 15,
            adaptation_per_failure: 3,
            adaptation_cap: 15,
            adaptation_min_streak: 2,
            underdog_per_level: 5,
            underdog_cap: 25,

            social_interaction_bonus: 12,
            team_battle_bonus: 10,

            spiritual_moment_bonus: 20,
            defeat_resolve_bonus: 5,

            victory_multiplier: 1.5,
            defeat_multiplier: 0.8,
            difficulty_step: 0.1,
            difficulty_floor: 0.5,
            // Short battles under-reward shallow play, very long ones are inefficient
            duration_buckets: vec![
                DurationBucket { under_seconds: 30, multiplier: 0.7 },
                DurationBucket { under_seconds: 60, multiplier: 1.0 },
                DurationBucket { under_seconds: 180, multiplier: 1.2 },
                DurationBucket { under_seconds: 300, multiplier: 1.1 },
            ],
            long_battle_multiplier: 0.9,

            rating: RatingConfig::default(),
        }
    }
}

/// Weights and thresholds for the qualitative performance rating
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub victory_points: u32,
    /// Battles under this many seconds earn `fast_points`
    pub fast_seconds: u32,
    pub fast_points: u32,
    /// Battles under this many seconds (but not fast) earn `quick_points`
    pub quick_seconds: u32,
    pub quick_points: u32,
    /// Damage dealt / damage taken of at least 3, 2 and 1 respectively
    pub dominant_ratio_points: u32,
    pub strong_ratio_points: u32,
    pub even_ratio_points: u32,
    pub critical_hit_points: u32,
    pub dodge_points: u32,
    pub ability_points: u32,
    pub strategic_decision_points: u32,
    pub level_difference_points: u32,
    pub outnumbered_points: u32,
    /// Total experience is divided by this and added to the score
    pub experience_divisor: u32,

    pub legendary_threshold: u32,
    pub excellent_threshold: u32,
    pub good_threshold: u32,
    pub average_threshold: u32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            victory_points: 50,
            fast_seconds: 60,
            fast_points: 20,
            quick_seconds: 120,
            quick_points: 10,
            dominant_ratio_points: 30,
            strong_ratio_points: 20,
            even_ratio_points: 10,
            critical_hit_points: 5,
            dodge_points: 3,
            ability_points: 2,
            strategic_decision_points: 4,
            level_difference_points: 5,
            outnumbered_points: 25,
            experience_divisor: 5,

            legendary_threshold: 150,
            excellent_threshold: 120,
            good_threshold: 90,
            average_threshold: 60,
        }
    }
}

/// Interaction runtime tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Combo count at which the activated interaction becomes mastered
    pub mastery_combo_threshold: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mastery_combo_threshold: 10,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document; missing sections use defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.progression.max_level == 0 {
            return Err(EngineError::InvalidConfig(
                "progression.max_level must be at least 1".into(),
            ));
        }
        if self.progression.max_level > MAX_CURVE_LEVEL {
            return Err(EngineError::InvalidConfig(format!(
                "progression.max_level must be at most {}",
                MAX_CURVE_LEVEL
            )));
        }

        let scoring = &self.scoring;
        if scoring.damage_per_point == 0 || scoring.damage_taken_per_point == 0 {
            return Err(EngineError::InvalidConfig(
                "damage divisors must be positive".into(),
            ));
        }

        let multipliers = [
            scoring.victory_multiplier,
            scoring.defeat_multiplier,
            scoring.difficulty_floor,
            scoring.long_battle_multiplier,
        ];
        if multipliers.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(EngineError::InvalidConfig(
                "multipliers must be finite and positive".into(),
            ));
        }

        if scoring
            .duration_buckets
            .windows(2)
            .any(|pair| pair[0].under_seconds >= pair[1].under_seconds)
        {
            return Err(EngineError::InvalidConfig(
                "duration_buckets must be strictly ascending".into(),
            ));
        }
        if scoring
            .duration_buckets
            .iter()
            .any(|b| !b.multiplier.is_finite() || b.multiplier <= 0.0)
        {
            return Err(EngineError::InvalidConfig(
                "duration bucket multipliers must be finite and positive".into(),
            ));
        }

        let rating = &scoring.rating;
        if rating.experience_divisor == 0 {
            return Err(EngineError::InvalidConfig(
                "rating.experience_divisor must be positive".into(),
            ));
        }
        if !(rating.legendary_threshold > rating.excellent_threshold
            && rating.excellent_threshold > rating.good_threshold
            && rating.good_threshold > rating.average_threshold)
        {
            return Err(EngineError::InvalidConfig(format!(
                "rating thresholds must descend: {} > {} > {} > {}",
                rating.legendary_threshold,
                rating.excellent_threshold,
                rating.good_threshold,
                rating.average_threshold
            )));
        }

        if self.runtime.mastery_combo_threshold == 0 {
            return Err(EngineError::InvalidConfig(
                "runtime.mastery_combo_threshold must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_bases_favor_battle_domains() {
        let base = ScoringConfig::default().base;
        assert_eq!(base.get(SkillDomain::Combat), 20);
        assert_eq!(base.get(SkillDomain::Survival), 15);
        assert_eq!(base.get(SkillDomain::Mental), 12);
        assert_eq!(base.get(SkillDomain::Social), 8);
        assert_eq!(base.get(SkillDomain::Spiritual), 6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [progression]
            max_level = 60

            [runtime]
            mastery_combo_threshold = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.progression.max_level, 60);
        assert_eq!(config.runtime.mastery_combo_threshold, 5);
        assert_eq!(config.scoring.critical_hit_bonus, 10);
        assert_eq!(config.scoring.duration_buckets.len(), 4);
    }

    #[test]
    fn test_rejects_unordered_buckets() {
        let mut config = EngineConfig::default();
        config.scoring.duration_buckets.swap(0, 1);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_max_level() {
        let result = EngineConfig::from_toml_str("[progression]\nmax_level = 0\n");
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_max_level_bounded_by_curve() {
        let result = EngineConfig::from_toml_str("[progression]\nmax_level = 400\n");
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));

        let at_limit = format!("[progression]\nmax_level = {}\n", MAX_CURVE_LEVEL);
        assert!(EngineConfig::from_toml_str(&at_limit).is_ok());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = EngineConfig::from_toml_str("[progression\nmax_level = 3");
        assert!(matches!(result, Err(EngineError::TomlError(_))));
    }

    #[test]
    fn test_global_config_defaults() {
        assert!(config().progression.max_level >= 1);
    }
}
