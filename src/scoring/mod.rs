//! Combat performance scoring
//!
//! One finished battle in, one `CombatSkillReward` out. Each domain starts
//! from a fixed base, adds itemized bonuses from the battle counters, and is
//! scaled by a victory x difficulty x duration multiplier.

pub mod demo;
pub mod performance;
pub mod rating;
pub mod reward;
pub mod scorer;

pub use performance::{ActionKind, BattleAction, BattleOutcome, BattlePerformance};
pub use rating::{rating_for_score, rating_score};
pub use reward::{
    BonusItem, BonusSource, CombatSkillReward, Multipliers, PerformanceRating, SkillGain,
};
pub use scorer::{adaptation_recoveries, score, CombatScorer};
