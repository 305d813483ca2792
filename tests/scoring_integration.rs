//! Integration tests for combat performance scoring

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skill_synergy::core::{CharacterIdentity, ScoringConfig};
use skill_synergy::interactions::{InteractionCatalog, InteractionDefinition};
use skill_synergy::progression::{SkillDomain, SkillDomainLedger};
use skill_synergy::scoring::{demo, BattlePerformance, BonusSource, CombatScorer, PerformanceRating};

fn scorer() -> CombatScorer {
    CombatScorer::new(ScoringConfig::default())
}

/// Reference victory: 450 damage, 3 crits, 4 abilities, 95s, L15 vs L17
#[test]
fn test_reference_battle_breakdown() {
    let perf = BattlePerformance::victory(95, 15, 17)
        .with_damage(450, 0)
        .with_critical_hits(3)
        .with_abilities_used(4);
    let reward = scorer().score(&perf, &SkillDomainLedger::new(100));

    let combat = reward.gain(SkillDomain::Combat).unwrap();
    assert_eq!(combat.itemized_total(), 91);
    assert_eq!(combat.experience, 196);
    assert!(combat.justification.contains("Critical hits x3 (+30)"));
    assert!(combat.justification.ends_with("= 196"));

    // Mental picks up the underdog bonus for a 2-level gap
    let mental = reward.gain(SkillDomain::Mental).unwrap();
    assert_eq!(mental.bonus(BonusSource::Underdog), 10);

    let total: u64 = reward.gains.iter().map(|g| g.experience).sum();
    assert_eq!(reward.total_experience, total);
}

/// Defeats and harsh multipliers never drop a domain below its base
#[test]
fn test_short_lopsided_defeat_keeps_base() {
    let perf = BattlePerformance::defeat(5, 40, 2);
    let reward = scorer().score(&perf, &SkillDomainLedger::new(100));
    let base = ScoringConfig::default().base;
    for gain in &reward.gains {
        assert_eq!(gain.base_amount, base.get(gain.domain) as u64);
        assert!(gain.experience >= gain.base_amount);
    }
    assert_eq!(reward.performance_rating, PerformanceRating::Poor);
}

/// Scoring never mutates the ledger it reads
#[test]
fn test_scoring_is_pure() {
    let ledger = SkillDomainLedger::new(100).with_level(SkillDomain::Combat, 9);
    let before = ledger.clone();
    let perf = BattlePerformance::victory(120, 9, 12).with_damage(2_000, 300);
    let first = scorer().score(&perf, &ledger);
    let second = scorer().score(&perf, &ledger);
    assert_eq!(ledger, before);
    assert_eq!(first, second);
}

/// Level-ups that cross a requirement surface as newly unlocked interactions
#[test]
fn test_score_with_catalog_reports_unlocks() {
    let catalog = InteractionCatalog::from_definitions(vec![
        InteractionDefinition::new("free", "Free"),
        InteractionDefinition::new("first_blood", "First Blood").requires(SkillDomain::Combat, 2),
        InteractionDefinition::new("veteran", "Veteran").requires(SkillDomain::Combat, 3),
    ])
    .unwrap();
    let identity = CharacterIdentity::new("achilles");
    let ledger = SkillDomainLedger::new(100);

    let perf = BattlePerformance::victory(95, 15, 17)
        .with_damage(450, 0)
        .with_critical_hits(3)
        .with_abilities_used(4);
    let reward = scorer().score_with_catalog(&perf, &ledger, &identity, &catalog);

    assert_eq!(reward.unlocked_interaction_ids, vec!["first_blood".to_string()]);
}

/// Seeded sample battles are reproducible end to end
#[test]
fn test_seeded_samples_are_deterministic() {
    let ledger = SkillDomainLedger::new(100);
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..5)
            .map(|_| scorer().score(&demo::sample_performance(&mut rng, 10), &ledger))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
}

proptest! {
    #[test]
    fn prop_every_domain_earns_at_least_base(
        victory in any::<bool>(),
        duration in 0u32..1_000,
        player in 1u32..80,
        opponent in 1u32..80,
        dealt in 0u32..10_000,
        taken in 0u32..10_000,
        crits in 0u32..20,
    ) {
        let perf = if victory {
            BattlePerformance::victory(duration, player, opponent)
        } else {
            BattlePerformance::defeat(duration, player, opponent)
        }
        .with_damage(dealt, taken)
        .with_critical_hits(crits);

        let reward = scorer().score(&perf, &SkillDomainLedger::new(100));
        for gain in &reward.gains {
            prop_assert!(gain.experience >= gain.base_amount);
            prop_assert!(!gain.justification.is_empty());
            let scaled = (gain.itemized_total() as f64 * gain.multiplier).floor() as u64;
            prop_assert_eq!(gain.experience, scaled.max(gain.base_amount));
        }
    }
}
