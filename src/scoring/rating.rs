//! Performance rating
//!
//! Independent of the per-domain experience math: a weighted score over the
//! whole battle, bucketed into five ratings.

use crate::core::RatingConfig;
use crate::scoring::{BattlePerformance, PerformanceRating};

/// Weighted skill-demonstration score for one battle
pub fn rating_score(
    performance: &BattlePerformance,
    total_experience: u64,
    config: &RatingConfig,
) -> u64 {
    let mut score: u64 = 0;

    if performance.is_victory() {
        score += config.victory_points as u64;
    }

    // Speed
    if performance.duration_seconds < config.fast_seconds {
        score += config.fast_points as u64;
    } else if performance.duration_seconds < config.quick_seconds {
        score += config.quick_points as u64;
    }

    // Damage ratio
    let ratio = performance.damage_dealt as f64 / performance.damage_taken.max(1) as f64;
    if ratio >= 3.0 {
        score += config.dominant_ratio_points as u64;
    } else if ratio >= 2.0 {
        score += config.strong_ratio_points as u64;
    } else if ratio >= 1.0 {
        score += config.even_ratio_points as u64;
    }

    score += performance.critical_hits as u64 * config.critical_hit_points as u64;
    score += performance.dodges as u64 * config.dodge_points as u64;
    score += performance.abilities_used as u64 * config.ability_points as u64;
    score += performance.strategic_decisions as u64 * config.strategic_decision_points as u64;

    let level_difference = performance.level_difference();
    if level_difference > 0 {
        score += level_difference as u64 * config.level_difference_points as u64;
    }
    if performance.outnumbered {
        score += config.outnumbered_points as u64;
    }

    score + total_experience / config.experience_divisor.max(1) as u64
}

/// Bucket a raw rating score
pub fn rating_for_score(score: u64, config: &RatingConfig) -> PerformanceRating {
    if score >= config.legendary_threshold as u64 {
        PerformanceRating::Legendary
    } else if score >= config.excellent_threshold as u64 {
        PerformanceRating::Excellent
    } else if score >= config.good_threshold as u64 {
        PerformanceRating::Good
    } else if score >= config.average_threshold as u64 {
        PerformanceRating::Average
    } else {
        PerformanceRating::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_buckets() {
        let config = RatingConfig::default();
        assert_eq!(rating_for_score(150, &config), PerformanceRating::Legendary);
        assert_eq!(rating_for_score(149, &config), PerformanceRating::Excellent);
        assert_eq!(rating_for_score(120, &config), PerformanceRating::Excellent);
        assert_eq!(rating_for_score(90, &config), PerformanceRating::Good);
        assert_eq!(rating_for_score(60, &config), PerformanceRating::Average);
        assert_eq!(rating_for_score(59, &config), PerformanceRating::Poor);
        assert_eq!(rating_for_score(0, &config), PerformanceRating::Poor);
    }

    #[test]
    fn test_quiet_defeat_scores_low() {
        let config = RatingConfig::default();
        // 400s, took more than it dealt, no counters
        let perf = BattlePerformance::defeat(400, 10, 10).with_damage(50, 300);
        assert_eq!(rating_score(&perf, 0, &config), 0);
    }

    #[test]
    fn test_score_itemization() {
        let config = RatingConfig::default();
        let perf = BattlePerformance::victory(45, 10, 12)
            .with_damage(300, 100)
            .with_critical_hits(2)
            .with_dodges(1)
            .with_abilities_used(3)
            .with_strategic_decisions(1)
            .outnumbered();

        // 50 win + 20 fast + 30 ratio + 10 crits + 3 dodge + 6 abilities
        // + 4 strategy + 10 level diff + 25 outnumbered + 100/5
        assert_eq!(rating_score(&perf, 100, &config), 178);
    }

    #[test]
    fn test_ratio_with_no_damage_taken() {
        let config = RatingConfig::default();
        let perf = BattlePerformance::defeat(500, 5, 5).with_damage(1, 0);
        assert_eq!(rating_score(&perf, 0, &config), config.even_ratio_points as u64);
    }
}
