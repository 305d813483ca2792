//! Interaction definitions - immutable catalog entries
//!
//! An interaction is a synergy bonus unlocked by reaching skill-level
//! thresholds, optionally scoped to one character or archetype.

use crate::core::{Archetype, CharacterId, CharacterIdentity};
use crate::progression::{SkillKey, SkillSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which rule group of the catalog an interaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    /// Any character may qualify
    Universal,
    /// Scoped to a single character
    Character,
    /// Scoped to an archetype
    Archetype,
}

/// Minimum level in one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: SkillKey,
    pub min_level: u32,
}

impl SkillRequirement {
    pub fn new(skill: impl Into<SkillKey>, min_level: u32) -> Self {
        Self {
            skill: skill.into(),
            min_level,
        }
    }

    /// A missing skill never satisfies a requirement
    pub fn is_met<S: SkillSource + ?Sized>(&self, skills: &S) -> bool {
        skills
            .skill_level(&self.skill)
            .is_some_and(|level| level >= self.min_level)
    }
}

/// Broad kind of effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectCategory {
    /// Always on while active; usually no duration
    #[default]
    Passive,
    /// Player-triggered, time-limited
    Active,
    /// Chains off other actions
    Combo,
    /// Rare, powerful, long cooldown
    Ultimate,
}

/// What an active interaction does
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionEffects {
    #[serde(default)]
    pub category: EffectCategory,
    /// Additive bonuses keyed by stat name (e.g. "attack", "crit_chance")
    #[serde(default)]
    pub bonuses: BTreeMap<String, f32>,
    /// Ability ids made available while active
    #[serde(default)]
    pub unlocks: Vec<String>,
    /// Seconds the effect lasts; `None` for passive effects
    #[serde(default)]
    pub duration: Option<u64>,
    /// Seconds before it can be activated again
    #[serde(default)]
    pub cooldown: Option<u64>,
}

/// Phase of the current battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPhase {
    Opening,
    Midgame,
    Finisher,
}

/// Situational filters on when an interaction may fire (all optional)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerConditions {
    #[serde(default)]
    pub combat_phase: Option<CombatPhase>,
    /// Own health fraction must be strictly below this
    #[serde(default)]
    pub health_below: Option<f32>,
    /// Enemy must currently have this condition (e.g. "stunned")
    #[serde(default)]
    pub enemy_condition: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl TriggerConditions {
    pub fn is_unconditional(&self) -> bool {
        self.combat_phase.is_none()
            && self.health_below.is_none()
            && self.enemy_condition.is_none()
            && self.environment.is_none()
    }

    pub fn matches(&self, context: &TriggerContext) -> bool {
        if let Some(phase) = self.combat_phase {
            if context.phase != Some(phase) {
                return false;
            }
        }
        if let Some(threshold) = self.health_below {
            if context.health_fraction >= threshold {
                return false;
            }
        }
        if let Some(condition) = &self.enemy_condition {
            if !context.enemy_conditions.iter().any(|c| c == condition) {
                return false;
            }
        }
        if let Some(environment) = &self.environment {
            if context.environment.as_ref() != Some(environment) {
                return false;
            }
        }
        true
    }
}

/// Battle situation at the moment of an activation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerContext {
    pub phase: Option<CombatPhase>,
    /// Own health, 0.0 to 1.0
    pub health_fraction: f32,
    pub enemy_conditions: Vec<String>,
    pub environment: Option<String>,
}

impl Default for TriggerContext {
    fn default() -> Self {
        Self {
            phase: None,
            health_fraction: 1.0,
            enemy_conditions: Vec::new(),
            environment: None,
        }
    }
}

impl TriggerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_phase(mut self, phase: CombatPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_health(mut self, fraction: f32) -> Self {
        self.health_fraction = fraction;
        self
    }

    pub fn with_enemy_condition(mut self, condition: impl Into<String>) -> Self {
        self.enemy_conditions.push(condition.into());
        self
    }

    pub fn in_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<SkillRequirement>,
    /// Only this character may use it
    #[serde(default)]
    pub character: Option<CharacterId>,
    /// Only this archetype may use it
    #[serde(default)]
    pub archetype: Option<Archetype>,
    #[serde(default)]
    pub effects: InteractionEffects,
    #[serde(default)]
    pub triggers: TriggerConditions,
}

impl InteractionDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            requirements: Vec::new(),
            character: None,
            archetype: None,
            effects: InteractionEffects::default(),
            triggers: TriggerConditions::default(),
        }
    }

    pub fn requires(mut self, skill: impl Into<SkillKey>, min_level: u32) -> Self {
        self.requirements.push(SkillRequirement::new(skill, min_level));
        self
    }

    pub fn for_character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(CharacterId::new(character));
        self
    }

    pub fn for_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(Archetype::new(archetype));
        self
    }

    pub fn with_category(mut self, category: EffectCategory) -> Self {
        self.effects.category = category;
        self
    }

    pub fn with_bonus(mut self, key: impl Into<String>, amount: f32) -> Self {
        self.effects.bonuses.insert(key.into(), amount);
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.effects.duration = Some(seconds);
        self
    }

    pub fn with_cooldown(mut self, seconds: u64) -> Self {
        self.effects.cooldown = Some(seconds);
        self
    }

    pub fn with_triggers(mut self, triggers: TriggerConditions) -> Self {
        self.triggers = triggers;
        self
    }

    /// Group implied by the scope filters
    pub fn rule_group(&self) -> RuleGroup {
        match (&self.character, &self.archetype) {
            (Some(_), _) => RuleGroup::Character,
            (None, Some(_)) => RuleGroup::Archetype,
            (None, None) => RuleGroup::Universal,
        }
    }

    /// Character and archetype filters pass for `identity`
    pub fn applies_to(&self, identity: &CharacterIdentity) -> bool {
        if let Some(character) = &self.character {
            if *character != identity.id {
                return false;
            }
        }
        if let Some(archetype) = &self.archetype {
            if identity.archetype.as_ref() != Some(archetype) {
                return false;
            }
        }
        true
    }

    /// Every requirement met; an empty list is always met
    pub fn requirements_met<S: SkillSource + ?Sized>(&self, skills: &S) -> bool {
        self.requirements.iter().all(|req| req.is_met(skills))
    }

    /// Requirements not yet met, for "what do I still need" displays
    pub fn missing_requirements<'a, S: SkillSource + ?Sized>(
        &'a self,
        skills: &S,
    ) -> Vec<&'a SkillRequirement> {
        self.requirements
            .iter()
            .filter(|req| !req.is_met(skills))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{SkillDomain, SkillDomainLedger};

    #[test]
    fn test_requirement_missing_skill_fails() {
        let ledger = SkillDomainLedger::new(100);
        let req = SkillRequirement::new(SkillKey::signature("spear"), 1);
        assert!(!req.is_met(&ledger));
    }

    #[test]
    fn test_requirement_threshold_inclusive() {
        let ledger = SkillDomainLedger::new(100).with_level(SkillDomain::Combat, 10);
        assert!(SkillRequirement::new(SkillDomain::Combat, 10).is_met(&ledger));
        assert!(!SkillRequirement::new(SkillDomain::Combat, 11).is_met(&ledger));
    }

    #[test]
    fn test_rule_group_from_filters() {
        assert_eq!(InteractionDefinition::new("a", "A").rule_group(), RuleGroup::Universal);
        assert_eq!(
            InteractionDefinition::new("b", "B").for_character("merlin").rule_group(),
            RuleGroup::Character
        );
        assert_eq!(
            InteractionDefinition::new("c", "C").for_archetype("mage").rule_group(),
            RuleGroup::Archetype
        );
    }

    #[test]
    fn test_applies_to_filters() {
        let merlin = CharacterIdentity::new("merlin").with_archetype("mage");
        let achilles = CharacterIdentity::new("achilles").with_archetype("warrior");
        let nobody = CharacterIdentity::new("villager");

        let mage_only = InteractionDefinition::new("x", "X").for_archetype("mage");
        assert!(mage_only.applies_to(&merlin));
        assert!(!mage_only.applies_to(&achilles));
        assert!(!mage_only.applies_to(&nobody));

        let merlin_only = InteractionDefinition::new("y", "Y").for_character("merlin");
        assert!(merlin_only.applies_to(&merlin));
        assert!(!merlin_only.applies_to(&achilles));
    }

    #[test]
    fn test_missing_requirements_listed() {
        let ledger = SkillDomainLedger::new(100).with_level(SkillDomain::Mental, 8);
        let def = InteractionDefinition::new("z", "Z")
            .requires(SkillDomain::Mental, 5)
            .requires(SkillDomain::Spiritual, 5)
            .requires(SkillKey::signature("runes"), 1);

        let missing: Vec<String> = def
            .missing_requirements(&ledger)
            .iter()
            .map(|r| r.skill.to_string())
            .collect();
        assert_eq!(missing, vec!["spiritual", "signature:runes"]);
    }

    #[test]
    fn test_trigger_matching() {
        let triggers = TriggerConditions {
            combat_phase: Some(CombatPhase::Finisher),
            health_below: Some(0.3),
            enemy_condition: Some("stunned".into()),
            environment: None,
        };
        let ready = TriggerContext::new()
            .in_phase(CombatPhase::Finisher)
            .with_health(0.2)
            .with_enemy_condition("stunned");
        assert!(triggers.matches(&ready));

        assert!(!triggers.matches(&ready.clone().with_health(0.3)));
        assert!(!triggers.matches(&ready.clone().in_phase(CombatPhase::Opening)));
        let healthy_enough = TriggerContext::new()
            .in_phase(CombatPhase::Finisher)
            .with_health(0.1);
        assert!(!triggers.matches(&healthy_enough));
    }

    #[test]
    fn test_unconditional_triggers_always_match() {
        let triggers = TriggerConditions::default();
        assert!(triggers.is_unconditional());
        assert!(triggers.matches(&TriggerContext::default()));
    }

    #[test]
    fn test_definition_from_toml() {
        let def: InteractionDefinition = toml::from_str(
            r#"
            id = "war_cry"
            name = "War Cry"
            requirements = [
                { skill = "combat", min_level = 10 },
                { skill = "signature:shout", min_level = 2 },
            ]

            [effects]
            category = "active"
            bonuses = { attack = 15.0, morale = 10.0 }
            duration = 30
            cooldown = 90

            [triggers]
            combat_phase = "opening"
            "#,
        )
        .unwrap();

        assert_eq!(def.requirements.len(), 2);
        assert_eq!(def.requirements[1].skill, SkillKey::signature("shout"));
        assert_eq!(def.effects.category, EffectCategory::Active);
        assert_eq!(def.effects.bonuses.get("attack"), Some(&15.0));
        assert_eq!(def.effects.duration, Some(30));
        assert_eq!(def.triggers.combat_phase, Some(CombatPhase::Opening));
    }
}
