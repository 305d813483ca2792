//! Level curve and per-character skill domain ledger
//!
//! Experience is cumulative per domain. The curve decides where each level
//! starts; the ledger records where a character stands.

pub mod curve;
pub mod ledger;
pub mod milestones;

pub use curve::{
    experience_required_for, experience_to_next, progress_fraction, title_for, Tier,
    MAX_CURVE_LEVEL,
};
pub use ledger::{
    projected_level, LevelUp, SkillDomain, SkillDomainLedger, SkillDomainLevel, SkillKey,
    SkillSource,
};
pub use milestones::{milestone_for, milestones_crossed, MilestoneKind, MilestoneReward, MILESTONES};
