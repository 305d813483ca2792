//! Scorer output: per-domain gains and the battle-wide reward

use crate::progression::{LevelUp, SkillDomain};
use serde::{Deserialize, Serialize};

/// What earned a line item in a domain's experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusSource {
    Base,
    DamageDealt,
    CriticalHits,
    Abilities,
    Outnumbered,
    Dodges,
    Blocks,
    DamageEndured,
    TerrainDisadvantage,
    StrategicDecisions,
    Adaptation,
    Underdog,
    SocialInteractions,
    TeamBattle,
    SpiritualMoments,
    DefeatResolve,
}

/// One itemized clause of a justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusItem {
    pub source: BonusSource,
    pub label: String,
    pub amount: u64,
}

impl BonusItem {
    pub fn new(source: BonusSource, label: impl Into<String>, amount: u64) -> Self {
        Self {
            source,
            label: label.into(),
            amount,
        }
    }
}

/// Experience earned in one domain for one battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGain {
    pub domain: SkillDomain,
    pub experience: u64,
    /// Combined multiplier applied to the itemized total
    pub multiplier: f64,
    /// Fixed per-domain base; `experience` never drops below it
    pub base_amount: u64,
    /// Itemized bonuses before the multiplier (base included)
    pub breakdown: Vec<BonusItem>,
    pub justification: String,
}

impl SkillGain {
    /// Sum of the itemized bonuses before the multiplier
    pub fn itemized_total(&self) -> u64 {
        self.breakdown.iter().map(|item| item.amount).sum()
    }

    /// Amount contributed by one bonus source (0 if it did not apply)
    pub fn bonus(&self, source: BonusSource) -> u64 {
        self.breakdown
            .iter()
            .filter(|item| item.source == source)
            .map(|item| item.amount)
            .sum()
    }
}

/// The factors behind one battle's combined multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub victory: f64,
    pub difficulty: f64,
    pub duration: f64,
    pub combined: f64,
}

/// Qualitative summary of how well a battle showcased skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Poor,
    Average,
    Good,
    Excellent,
    Legendary,
}

impl PerformanceRating {
    pub fn name(&self) -> &'static str {
        match self {
            PerformanceRating::Poor => "Poor",
            PerformanceRating::Average => "Average",
            PerformanceRating::Good => "Good",
            PerformanceRating::Excellent => "Excellent",
            PerformanceRating::Legendary => "Legendary",
        }
    }
}

/// Everything one battle earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSkillReward {
    /// One gain per domain, in `SkillDomain::ALL` order
    pub gains: Vec<SkillGain>,
    pub total_experience: u64,
    pub multipliers: Multipliers,
    /// Domains that would level if the gains were applied
    pub level_ups: Vec<LevelUp>,
    /// Interactions that become eligible through those level-ups
    pub unlocked_interaction_ids: Vec<String>,
    pub performance_rating: PerformanceRating,
    /// Raw weighted score behind `performance_rating`
    pub rating_score: u64,
}

impl CombatSkillReward {
    pub fn gain(&self, domain: SkillDomain) -> Option<&SkillGain> {
        self.gains.iter().find(|g| g.domain == domain)
    }

    pub fn experience_for(&self, domain: SkillDomain) -> u64 {
        self.gain(domain).map_or(0, |g| g.experience)
    }
}
