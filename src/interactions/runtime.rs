//! Interaction runtime - per-character activation state machine
//!
//! inactive -> active -> (expired | on cooldown) -> inactive
//!
//! The runtime clock only moves through `tick`. Activation stamps the
//! current clock; durations and cooldowns count down against it. A cooldown
//! outlives the effect window and blocks re-activation until it reaches 0.

use crate::core::{CharacterId, CharacterIdentity, GameTime};
use crate::interactions::{is_eligible, InteractionCatalog, InteractionDefinition, TriggerContext};
use crate::progression::SkillSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Rule violations on activation; the synergy is left untouched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    #[error("Interaction {id} is on cooldown for {remaining}s")]
    OnCooldown { id: String, remaining: u64 },

    #[error("Unknown interaction: {0}")]
    UnknownInteraction(String),

    #[error("Requirements not met for interaction: {0}")]
    RequirementsNotMet(String),

    #[error("Trigger conditions not met for interaction: {0}")]
    TriggerNotMet(String),
}

/// One interaction currently in effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveInteraction {
    pub interaction_id: String,
    pub activated_at: GameTime,
    /// Full effect length; `None` for passive effects that never time out
    pub duration: Option<u64>,
    pub remaining_duration: Option<u64>,
    pub remaining_cooldown: u64,
    pub bonuses: BTreeMap<String, f32>,
}

/// Result of a successful activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationReceipt {
    pub interaction_id: String,
    pub combo_count: u32,
    /// This activation put the interaction into the mastered set
    pub newly_mastered: bool,
}

/// Per-character interaction state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSynergy")]
pub struct SkillSynergy {
    pub character_id: CharacterId,
    active_interactions: Vec<ActiveInteraction>,
    /// Cooldowns of interactions whose effect already ended
    cooldowns: BTreeMap<String, u64>,
    mastered_interaction_ids: Vec<String>,
    combo_count: u32,
    last_updated: GameTime,
    clock: GameTime,
    mastery_threshold: u32,
}

/// Persisted form of `SkillSynergy`; everything but the id may be absent
#[derive(Deserialize)]
struct StoredSynergy {
    character_id: CharacterId,
    #[serde(default)]
    active_interactions: Vec<ActiveInteraction>,
    #[serde(default)]
    cooldowns: BTreeMap<String, u64>,
    #[serde(default)]
    mastered_interaction_ids: Vec<String>,
    #[serde(default)]
    combo_count: u32,
    #[serde(default)]
    last_updated: GameTime,
    clock: Option<GameTime>,
    mastery_threshold: Option<u32>,
}

impl From<StoredSynergy> for SkillSynergy {
    fn from(stored: StoredSynergy) -> Self {
        // The clock never runs behind the last update
        let clock = stored
            .clock
            .map_or(stored.last_updated, |clock| clock.max(stored.last_updated));
        let mastery_threshold = stored
            .mastery_threshold
            .unwrap_or_else(|| crate::core::config().runtime.mastery_combo_threshold)
            .max(1);
        Self {
            character_id: stored.character_id,
            active_interactions: stored.active_interactions,
            cooldowns: stored.cooldowns,
            mastered_interaction_ids: stored.mastered_interaction_ids,
            combo_count: stored.combo_count,
            last_updated: stored.last_updated,
            clock,
            mastery_threshold,
        }
    }
}

impl SkillSynergy {
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            character_id,
            active_interactions: Vec::new(),
            cooldowns: BTreeMap::new(),
            mastered_interaction_ids: Vec::new(),
            combo_count: 0,
            last_updated: GameTime::ZERO,
            clock: GameTime::ZERO,
            mastery_threshold: crate::core::config().runtime.mastery_combo_threshold,
        }
    }

    pub fn with_mastery_threshold(mut self, threshold: u32) -> Self {
        self.mastery_threshold = threshold.max(1);
        self
    }

    pub fn active_interactions(&self) -> &[ActiveInteraction] {
        &self.active_interactions
    }

    pub fn mastered_interaction_ids(&self) -> &[String] {
        &self.mastered_interaction_ids
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn last_updated(&self) -> GameTime {
        self.last_updated
    }

    pub fn now(&self) -> GameTime {
        self.clock
    }

    pub fn active(&self, id: &str) -> Option<&ActiveInteraction> {
        self.active_interactions.iter().find(|a| a.interaction_id == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active(id).is_some()
    }

    pub fn is_mastered(&self, id: &str) -> bool {
        self.mastered_interaction_ids.iter().any(|m| m == id)
    }

    /// Seconds until `id` may be activated again
    pub fn remaining_cooldown(&self, id: &str) -> u64 {
        self.active(id)
            .map(|a| a.remaining_cooldown)
            .or_else(|| self.cooldowns.get(id).copied())
            .unwrap_or(0)
    }

    pub fn is_on_cooldown(&self, id: &str) -> bool {
        self.remaining_cooldown(id) > 0
    }

    /// Activate an interaction
    ///
    /// Mastery follows the character-wide combo counter: the interaction that
    /// happens to be activated when the counter reaches the threshold (and any
    /// activated after) joins the mastered set, not the one used most often.
    pub fn activate(
        &mut self,
        id: &str,
        catalog: &InteractionCatalog,
    ) -> Result<ActivationReceipt, ActivationError> {
        let remaining = self.remaining_cooldown(id);
        if remaining > 0 {
            tracing::debug!("{}: {} rejected, {}s cooldown", self.character_id, id, remaining);
            return Err(ActivationError::OnCooldown {
                id: id.to_string(),
                remaining,
            });
        }
        let definition = catalog
            .get(id)
            .ok_or_else(|| ActivationError::UnknownInteraction(id.to_string()))?;

        Ok(self.start(definition))
    }

    /// Activate only if the character qualifies and the situation matches
    pub fn activate_checked<S: SkillSource + ?Sized>(
        &mut self,
        id: &str,
        catalog: &InteractionCatalog,
        identity: &CharacterIdentity,
        skills: &S,
        context: &TriggerContext,
    ) -> Result<ActivationReceipt, ActivationError> {
        let definition = catalog
            .get(id)
            .ok_or_else(|| ActivationError::UnknownInteraction(id.to_string()))?;
        if !is_eligible(definition, identity, skills) {
            return Err(ActivationError::RequirementsNotMet(id.to_string()));
        }
        if !definition.triggers.matches(context) {
            return Err(ActivationError::TriggerNotMet(id.to_string()));
        }
        self.activate(id, catalog)
    }

    fn start(&mut self, definition: &InteractionDefinition) -> ActivationReceipt {
        let id = definition.id.clone();
        self.active_interactions.retain(|a| a.interaction_id != id);
        self.cooldowns.remove(&id);
        self.active_interactions.push(ActiveInteraction {
            interaction_id: id.clone(),
            activated_at: self.clock,
            duration: definition.effects.duration,
            remaining_duration: definition.effects.duration,
            remaining_cooldown: definition.effects.cooldown.unwrap_or(0),
            bonuses: definition.effects.bonuses.clone(),
        });

        self.combo_count += 1;
        self.last_updated = self.clock;

        let newly_mastered = self.combo_count >= self.mastery_threshold && !self.is_mastered(&id);
        if newly_mastered {
            tracing::info!("{} mastered {}", self.character_id, id);
            self.mastered_interaction_ids.push(id.clone());
        }

        ActivationReceipt {
            interaction_id: id,
            combo_count: self.combo_count,
            newly_mastered,
        }
    }

    /// Advance the clock; returns ids whose effect ended this tick
    ///
    /// Duration-less interactions are never removed by time.
    pub fn tick(&mut self, delta_seconds: u64) -> Vec<String> {
        self.clock = self.clock.advance(delta_seconds);
        self.last_updated = self.clock;

        self.cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(delta_seconds);
            *remaining > 0
        });

        let now = self.clock;
        let mut expired = Vec::new();
        let mut still_active = Vec::with_capacity(self.active_interactions.len());
        for mut active in self.active_interactions.drain(..) {
            active.remaining_cooldown = active.remaining_cooldown.saturating_sub(delta_seconds);

            let Some(duration) = active.duration else {
                still_active.push(active);
                continue;
            };
            let elapsed = now.since(active.activated_at);
            if elapsed >= duration {
                if active.remaining_cooldown > 0 {
                    self.cooldowns
                        .insert(active.interaction_id.clone(), active.remaining_cooldown);
                }
                expired.push(active.interaction_id);
            } else {
                active.remaining_duration = Some(duration - elapsed);
                still_active.push(active);
            }
        }
        self.active_interactions = still_active;

        if !expired.is_empty() {
            tracing::debug!("{}: expired {}", self.character_id, expired.join(", "));
        }
        expired
    }

    /// End an effect early; its cooldown keeps running
    pub fn clear(&mut self, id: &str) -> bool {
        let Some(position) = self
            .active_interactions
            .iter()
            .position(|a| a.interaction_id == id)
        else {
            return false;
        };
        let removed = self.active_interactions.remove(position);
        if removed.remaining_cooldown > 0 {
            self.cooldowns.insert(removed.interaction_id, removed.remaining_cooldown);
        }
        self.last_updated = self.clock;
        true
    }

    /// Eligible interactions that could be activated right now
    pub fn activatable<'c>(
        &self,
        eligible: &[&'c InteractionDefinition],
    ) -> Vec<&'c InteractionDefinition> {
        eligible
            .iter()
            .copied()
            .filter(|def| !self.is_active(&def.id) && !self.is_on_cooldown(&def.id))
            .collect()
    }

    pub fn combined_bonuses(&self) -> BTreeMap<String, f32> {
        combined_bonuses(&self.active_interactions)
    }
}

/// Sum every bonus key across active interactions
///
/// Stacking is additive and never de-duplicated.
pub fn combined_bonuses(active: &[ActiveInteraction]) -> BTreeMap<String, f32> {
    let mut totals = BTreeMap::new();
    for interaction in active {
        for (key, amount) in &interaction.bonuses {
            *totals.entry(key.clone()).or_insert(0.0) += amount;
        }
    }
    totals
}
