//! Skill interactions - synergies unlocked by skill thresholds
//!
//! The catalog holds the rules, the eligibility resolver decides who
//! qualifies, and `SkillSynergy` tracks what each character has active.

pub mod catalog;
pub mod definition;
pub mod eligibility;
pub mod runtime;

pub use catalog::InteractionCatalog;
pub use definition::{
    CombatPhase, EffectCategory, InteractionDefinition, InteractionEffects, RuleGroup,
    SkillRequirement, TriggerConditions, TriggerContext,
};
pub use eligibility::{eligible_ids, is_eligible, locked_for, resolve_eligible};
pub use runtime::{
    combined_bonuses, ActivationError, ActivationReceipt, ActiveInteraction, SkillSynergy,
};
