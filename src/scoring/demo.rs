//! Randomized sample battles for demos and tests
//!
//! All scoring randomness lives here; the scorer itself is deterministic.

use crate::scoring::{ActionKind, BattleAction, BattleOutcome, BattlePerformance};
use rand::Rng;

const ENVIRONMENTS: &[&str] = &["arena", "forest", "mountain", "swamp", "ruins", "temple"];

const ACTION_KINDS: &[ActionKind] = &[
    ActionKind::Attack,
    ActionKind::Attack,
    ActionKind::Ability,
    ActionKind::Defend,
    ActionKind::Dodge,
    ActionKind::Tactic,
    ActionKind::Social,
    ActionKind::Spiritual,
];

/// A plausible battle for a character at `player_level`
pub fn sample_performance<R: Rng>(rng: &mut R, player_level: u32) -> BattlePerformance {
    let outcome = if rng.gen_bool(0.6) {
        BattleOutcome::Victory
    } else {
        BattleOutcome::Defeat
    };
    let opponent_level = (player_level as i64 + rng.gen_range(-3..=4)).max(1) as u32;
    let duration_seconds = rng.gen_range(15..=360);

    let action_count = rng.gen_range(4..=24);
    let actions = sample_actions(rng, action_count);
    let count = |kind: ActionKind| -> u32 {
        actions
            .iter()
            .filter(|a| a.kind == kind && a.success)
            .count() as u32
    };

    let mut performance =
        BattlePerformance::new(outcome, duration_seconds, player_level, opponent_level)
        .with_damage(rng.gen_range(50..=900), rng.gen_range(0..=600))
        .with_critical_hits(rng.gen_range(0..=4))
        .with_dodges(count(ActionKind::Dodge) + rng.gen_range(0..=2))
        .with_blocks(count(ActionKind::Defend) + rng.gen_range(0..=2))
        .with_abilities_used(count(ActionKind::Ability))
        .with_strategic_decisions(count(ActionKind::Tactic))
        .with_social_interactions(count(ActionKind::Social))
        .with_spiritual_moments(count(ActionKind::Spiritual))
        .in_environment(ENVIRONMENTS[rng.gen_range(0..ENVIRONMENTS.len())])
        .with_actions(actions);

    performance.outnumbered = rng.gen_bool(0.2);
    performance.team_battle = rng.gen_bool(0.3);
    performance.terrain_disadvantage = rng.gen_bool(0.15);
    performance
}

/// `len` actions with a 65% success rate
pub fn sample_actions<R: Rng>(rng: &mut R, len: usize) -> Vec<BattleAction> {
    (0..len)
        .map(|_| BattleAction {
            kind: ACTION_KINDS[rng.gen_range(0..ACTION_KINDS.len())],
            success: rng.gen_bool(0.65),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_battle() {
        let a = sample_performance(&mut ChaCha8Rng::seed_from_u64(7), 12);
        let b = sample_performance(&mut ChaCha8Rng::seed_from_u64(7), 12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_is_well_formed() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            let perf = sample_performance(&mut rng, 1);
            assert!(perf.opponent_level >= 1);
            assert!((15..=360).contains(&perf.duration_seconds));
            assert!(!perf.actions.is_empty());
        }
    }
}
