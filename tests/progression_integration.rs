//! Integration tests for the level curve and skill domain ledger

use proptest::prelude::*;
use skill_synergy::core::ScoringConfig;
use skill_synergy::progression::{
    experience_required_for, experience_to_next, milestones_crossed, projected_level, title_for,
    SkillDomain, SkillDomainLedger, SkillDomainLevel, SkillKey, SkillSource, Tier,
    MAX_CURVE_LEVEL,
};
use skill_synergy::scoring::{BattlePerformance, CombatScorer};

/// Level 2 sits exactly on the first threshold
#[test]
fn test_curve_known_points() {
    assert_eq!(experience_required_for(1), 0);
    assert_eq!(experience_required_for(2), 150);
    assert_eq!(experience_required_for(3), 238);
    assert_eq!(experience_to_next(1), 150);
}

/// A fresh domain crosses one threshold after the reference victory
#[test]
fn test_battle_levels_combat_domain() {
    let scorer = CombatScorer::new(ScoringConfig::default());
    let mut ledger = SkillDomainLedger::new(100);

    let perf = BattlePerformance::victory(95, 15, 17)
        .with_damage(450, 0)
        .with_critical_hits(3)
        .with_abilities_used(4);
    let reward = scorer.score(&perf, &ledger);
    assert_eq!(reward.experience_for(SkillDomain::Combat), 196);

    let projected = ledger.projected(&reward);
    let level_ups = ledger.apply_reward(&reward);

    assert_eq!(ledger, projected);
    assert_eq!(ledger.level(SkillDomain::Combat), 2);
    assert_eq!(ledger.domain(SkillDomain::Combat).experience, 196);
    assert!(level_ups
        .iter()
        .any(|l| l.domain == SkillDomain::Combat && l.previous_level == 1 && l.new_level == 2));
    assert_eq!(reward.level_ups, level_ups);
}

/// One large gain can skip several levels at once
#[test]
fn test_multi_level_gain() {
    let level = projected_level(1, experience_required_for(7) + 1, 100);
    assert_eq!(level, 7);
}

/// The cap stops leveling but experience keeps accumulating
#[test]
fn test_capped_domain_keeps_experience() {
    let mut domain = SkillDomainLevel::at_level(5, 5);
    assert!(domain.is_capped());
    assert_eq!(domain.projected_level(1_000_000), 5);
    domain.experience += 1_000_000;
    assert_eq!(domain.experience_remaining(), 0);
}

#[test]
fn test_ledger_is_a_skill_source() {
    let ledger = SkillDomainLedger::new(100)
        .with_level(SkillDomain::Social, 12)
        .with_signature_skill("arcane_lore", 8)
        .with_archetype_skill("spellcraft", 4);

    assert_eq!(ledger.skill_level(&SkillKey::from(SkillDomain::Social)), Some(12));
    assert_eq!(ledger.skill_level(&SkillKey::signature("arcane_lore")), Some(8));
    assert_eq!(ledger.skill_level(&SkillKey::archetype("spellcraft")), Some(4));
    assert_eq!(ledger.skill_level(&SkillKey::signature("missing")), None);
}

#[test]
fn test_titles_and_milestones_follow_levels() {
    assert_eq!(Tier::for_level(1), Tier::Novice);
    assert_eq!(Tier::for_level(51), Tier::Legend);
    assert_eq!(title_for(1), Tier::Novice.titles()[0]);

    let crossed: Vec<u32> = milestones_crossed(4, 11).map(|m| m.level).collect();
    assert_eq!(crossed, vec![5, 10]);
}

proptest! {
    #[test]
    fn prop_curve_strictly_increasing(level in 1u32..MAX_CURVE_LEVEL) {
        prop_assert!(experience_required_for(level + 1) > experience_required_for(level));
    }

    #[test]
    fn prop_projected_level_matches_curve(level in 1u32..60, extra in 0u64..50_000) {
        let experience = experience_required_for(level) + extra;
        let projected = projected_level(level, experience, 100);
        prop_assert!(projected >= level);
        prop_assert!(experience_required_for(projected) <= experience);
        if projected < 100 {
            prop_assert!(experience_required_for(projected + 1) > experience);
        }
    }
}
