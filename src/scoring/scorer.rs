//! Combat performance scorer
//!
//! Turns one battle's telemetry into per-domain experience. Pure: reads the
//! ledger to project level-ups but never mutates it. Applying the reward is
//! the caller's job (`SkillDomainLedger::apply_reward`).

use crate::core::{CharacterIdentity, ScoringConfig};
use crate::interactions::{resolve_eligible, InteractionCatalog};
use crate::progression::{LevelUp, SkillDomain, SkillDomainLedger};
use crate::scoring::rating::{rating_for_score, rating_score};
use crate::scoring::{
    BattleAction, BattlePerformance, BonusItem, BonusSource, CombatSkillReward, Multipliers,
    SkillGain,
};
use std::collections::HashSet;

/// Scores battles against a fixed scoring configuration
#[derive(Debug, Clone)]
pub struct CombatScorer {
    config: ScoringConfig,
}

impl Default for CombatScorer {
    fn default() -> Self {
        Self::new(crate::core::config().scoring.clone())
    }
}

impl CombatScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    // === MULTIPLIERS ===

    pub fn victory_multiplier(&self, performance: &BattlePerformance) -> f64 {
        if performance.is_victory() {
            self.config.victory_multiplier
        } else {
            self.config.defeat_multiplier
        }
    }

    /// `1 + step * (opponent - player)`, never below the floor
    pub fn difficulty_multiplier(&self, performance: &BattlePerformance) -> f64 {
        let raw = 1.0 + self.config.difficulty_step * performance.level_difference() as f64;
        raw.max(self.config.difficulty_floor)
    }

    pub fn duration_multiplier(&self, duration_seconds: u32) -> f64 {
        self.config
            .duration_buckets
            .iter()
            .find(|bucket| duration_seconds < bucket.under_seconds)
            .map_or(self.config.long_battle_multiplier, |bucket| bucket.multiplier)
    }

    pub fn multipliers(&self, performance: &BattlePerformance) -> Multipliers {
        let victory = self.victory_multiplier(performance);
        let difficulty = self.difficulty_multiplier(performance);
        let duration = self.duration_multiplier(performance.duration_seconds);
        Multipliers {
            victory,
            difficulty,
            duration,
            combined: victory * difficulty * duration,
        }
    }

    // === SCORING ===

    /// Score a battle; `unlocked_interaction_ids` is left empty
    pub fn score(
        &self,
        performance: &BattlePerformance,
        ledger: &SkillDomainLedger,
    ) -> CombatSkillReward {
        let multipliers = self.multipliers(performance);

        let gains: Vec<SkillGain> = SkillDomain::ALL
            .iter()
            .map(|domain| self.domain_gain(*domain, performance, &multipliers))
            .collect();

        let total_experience = gains.iter().map(|g| g.experience).sum();

        let level_ups = gains
            .iter()
            .filter_map(|gain| {
                let current = ledger.domain(gain.domain);
                let new_level = current.projected_level(gain.experience);
                (new_level > current.level).then_some(LevelUp {
                    domain: gain.domain,
                    previous_level: current.level,
                    new_level,
                })
            })
            .collect();

        let rating_score = rating_score(performance, total_experience, &self.config.rating);
        let performance_rating = rating_for_score(rating_score, &self.config.rating);

        tracing::debug!(
            "Scored {:?} ({}s, L{} vs L{}): {} xp, x{:.2}, {:?}",
            performance.outcome,
            performance.duration_seconds,
            performance.player_level,
            performance.opponent_level,
            total_experience,
            multipliers.combined,
            performance_rating
        );

        CombatSkillReward {
            gains,
            total_experience,
            multipliers,
            level_ups,
            unlocked_interaction_ids: Vec::new(),
            performance_rating,
            rating_score,
        }
    }

    /// Score a battle and list interactions the projected level-ups unlock
    pub fn score_with_catalog(
        &self,
        performance: &BattlePerformance,
        ledger: &SkillDomainLedger,
        identity: &CharacterIdentity,
        catalog: &InteractionCatalog,
    ) -> CombatSkillReward {
        let mut reward = self.score(performance, ledger);
        if reward.level_ups.is_empty() {
            return reward;
        }

        let before: HashSet<&str> = resolve_eligible(catalog, identity, ledger)
            .into_iter()
            .map(|def| def.id.as_str())
            .collect();
        let projected = ledger.projected(&reward);

        reward.unlocked_interaction_ids = resolve_eligible(catalog, identity, &projected)
            .into_iter()
            .filter(|def| !before.contains(def.id.as_str()))
            .map(|def| def.id.clone())
            .collect();

        if !reward.unlocked_interaction_ids.is_empty() {
            tracing::info!(
                "{} unlocked interactions: {}",
                identity.id,
                reward.unlocked_interaction_ids.join(", ")
            );
        }
        reward
    }

    fn domain_gain(
        &self,
        domain: SkillDomain,
        performance: &BattlePerformance,
        multipliers: &Multipliers,
    ) -> SkillGain {
        let base_amount = self.config.base.get(domain) as u64;
        let mut breakdown = vec![BonusItem::new(
            BonusSource::Base,
            format!("Base {} experience", domain),
            base_amount,
        )];
        breakdown.extend(
            self.domain_bonuses(domain, performance)
                .into_iter()
                .filter(|item| item.amount > 0),
        );

        let itemized: u64 = breakdown.iter().map(|item| item.amount).sum();
        let scaled = (itemized as f64 * multipliers.combined).floor();
        // Participation always earns at least the base
        let experience = (scaled.max(0.0) as u64).max(base_amount);

        let justification = justify(&breakdown, itemized, multipliers, experience);

        SkillGain {
            domain,
            experience,
            multiplier: multipliers.combined,
            base_amount,
            breakdown,
            justification,
        }
    }

    /// Itemized bonuses beyond the base for one domain (zero amounts allowed)
    fn domain_bonuses(
        &self,
        domain: SkillDomain,
        performance: &BattlePerformance,
    ) -> Vec<BonusItem> {
        let c = &self.config;
        let p = performance;
        match domain {
            SkillDomain::Combat => vec![
                BonusItem::new(
                    BonusSource::DamageDealt,
                    format!("{} damage dealt", p.damage_dealt),
                    ((p.damage_dealt / c.damage_per_point.max(1)).min(c.damage_bonus_cap)) as u64,
                ),
                per_count(
                    BonusSource::CriticalHits,
                    p.critical_hits,
                    "Critical hits",
                    c.critical_hit_bonus,
                ),
                per_count(
                    BonusSource::Abilities,
                    p.abilities_used,
                    "Abilities used",
                    c.ability_bonus,
                ),
                flag(
                    BonusSource::Outnumbered,
                    p.outnumbered,
                    "Fought outnumbered",
                    c.outnumbered_bonus,
                ),
            ],
            SkillDomain::Survival => vec![
                per_count(BonusSource::Dodges, p.dodges, "Dodges", c.dodge_bonus),
                per_count(BonusSource::Blocks, p.blocks, "Blocks", c.block_bonus),
                BonusItem::new(
                    BonusSource::DamageEndured,
                    format!("Endured {} damage", p.damage_taken),
                    ((p.damage_taken / c.damage_taken_per_point.max(1)).min(c.damage_taken_cap))
                        as u64,
                ),
                flag(
                    BonusSource::TerrainDisadvantage,
                    p.terrain_disadvantage,
                    "Held out on bad terrain",
                    c.terrain_bonus,
                ),
            ],
            SkillDomain::Mental => {
                let recoveries = adaptation_recoveries(&p.actions, c.adaptation_min_streak);
                let adaptation: u64 = recoveries
                    .iter()
                    .map(|streak| (streak * c.adaptation_per_failure).min(c.adaptation_cap) as u64)
                    .sum();
                let underdog = p.level_difference().max(0) as u64 * c.underdog_per_level as u64;
                vec![
                    per_count(
                        BonusSource::StrategicDecisions,
                        p.strategic_decisions,
                        "Strategic decisions",
                        c.strategic_decision_bonus,
                    ),
                    BonusItem::new(
                        BonusSource::Adaptation,
                        format!("Recovered from {} failure streak(s)", recoveries.len()),
                        adaptation,
                    ),
                    BonusItem::new(
                        BonusSource::Underdog,
                        format!("Outplanned a foe {} level(s) higher", p.level_difference().max(0)),
                        underdog.min(c.underdog_cap as u64),
                    ),
                ]
            }
            SkillDomain::Social => vec![
                per_count(
                    BonusSource::SocialInteractions,
                    p.social_interactions,
                    "Social interactions",
                    c.social_interaction_bonus,
                ),
                flag(
                    BonusSource::TeamBattle,
                    p.team_battle,
                    "Fought as a team",
                    c.team_battle_bonus,
                ),
            ],
            SkillDomain::Spiritual => vec![
                per_count(
                    BonusSource::SpiritualMoments,
                    p.spiritual_moments,
                    "Spiritual moments",
                    c.spiritual_moment_bonus,
                ),
                flag(
                    BonusSource::DefeatResolve,
                    !p.is_victory(),
                    "Kept resolve in defeat",
                    c.defeat_resolve_bonus,
                ),
            ],
        }
    }
}

/// Lengths of failure streaks that were followed by a success
///
/// Only streaks of at least `min_streak` consecutive failures count. A streak
/// still running when the battle ends is not a recovery.
pub fn adaptation_recoveries(actions: &[BattleAction], min_streak: u32) -> Vec<u32> {
    let mut recoveries = Vec::new();
    let mut streak = 0u32;
    for action in actions {
        if action.success {
            if streak >= min_streak {
                recoveries.push(streak);
            }
            streak = 0;
        } else {
            streak += 1;
        }
    }
    recoveries
}

/// Score a battle with the global scoring configuration
pub fn score(performance: &BattlePerformance, ledger: &SkillDomainLedger) -> CombatSkillReward {
    CombatScorer::default().score(performance, ledger)
}

fn per_count(source: BonusSource, count: u32, label: &str, each: u32) -> BonusItem {
    BonusItem::new(source, format!("{} x{}", label, count), count as u64 * each as u64)
}

fn flag(source: BonusSource, set: bool, label: &str, amount: u32) -> BonusItem {
    BonusItem::new(source, label, if set { amount as u64 } else { 0 })
}

fn justify(
    breakdown: &[BonusItem],
    itemized: u64,
    multipliers: &Multipliers,
    experience: u64,
) -> String {
    let clauses: Vec<String> = breakdown
        .iter()
        .map(|item| format!("{} (+{})", item.label, item.amount))
        .collect();
    format!(
        "{}; {} x{:.2} (victory x{:.2}, difficulty x{:.2}, duration x{:.2}) = {}",
        clauses.join(", "),
        itemized,
        multipliers.combined,
        multipliers.victory,
        multipliers.difficulty,
        multipliers.duration,
        experience
    )
}
