//! Level curve, tiers and titles
//!
//! Pure functions. Both leveling and UI display read the same curve, so any
//! tuning happens here and applies curve-wide.

use serde::{Deserialize, Serialize};

/// Highest level whose threshold fits in a `u64`; the curve saturates past it
pub const MAX_CURVE_LEVEL: u32 = 286;

/// Total experience a domain must have accumulated to reach `level`
///
/// `floor(100 * 1.15^(level-2) + 50 * (level-1)^1.3)` for level > 1, else 0.
/// Strictly increasing in `level` up to `MAX_CURVE_LEVEL`.
pub fn experience_required_for(level: u32) -> u64 {
    debug_assert!(level >= 1, "levels start at 1");
    debug_assert!(level <= MAX_CURVE_LEVEL, "level {} is past the curve", level);
    if level <= 1 {
        return 0;
    }
    let l = level as f64;
    let required = 100.0 * 1.15_f64.powf(l - 2.0) + 50.0 * (l - 1.0).powf(1.3);
    required.floor() as u64
}

/// Experience between the start of `level` and the start of `level + 1`
///
/// Zero at `MAX_CURVE_LEVEL`, which has no next level.
pub fn experience_to_next(level: u32) -> u64 {
    if level >= MAX_CURVE_LEVEL {
        return 0;
    }
    experience_required_for(level.saturating_add(1)).saturating_sub(experience_required_for(level))
}

/// How far through the current level band `experience` is (0.0 to 1.0)
pub fn progress_fraction(level: u32, experience: u64) -> f32 {
    let floor = experience_required_for(level);
    let span = experience_to_next(level);
    if span == 0 {
        return 1.0;
    }
    let into = experience.saturating_sub(floor) as f64;
    (into / span as f64).clamp(0.0, 1.0) as f32
}

/// Ordered progression tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Novice,
    Apprentice,
    Adept,
    Expert,
    Master,
    /// Open-ended: no upper level bound
    Legend,
}

/// Levels per title within a tier
const LEVELS_PER_TITLE: u32 = 2;

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Novice,
        Tier::Apprentice,
        Tier::Adept,
        Tier::Expert,
        Tier::Master,
        Tier::Legend,
    ];

    pub fn for_level(level: u32) -> Self {
        match level {
            0..=10 => Tier::Novice,
            11..=20 => Tier::Apprentice,
            21..=30 => Tier::Adept,
            31..=40 => Tier::Expert,
            41..=50 => Tier::Master,
            _ => Tier::Legend,
        }
    }

    /// Inclusive level range; `None` upper bound for the legend tier
    pub fn level_range(&self) -> (u32, Option<u32>) {
        match self {
            Tier::Novice => (1, Some(10)),
            Tier::Apprentice => (11, Some(20)),
            Tier::Adept => (21, Some(30)),
            Tier::Expert => (31, Some(40)),
            Tier::Master => (41, Some(50)),
            Tier::Legend => (51, None),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Novice => "Novice",
            Tier::Apprentice => "Apprentice",
            Tier::Adept => "Adept",
            Tier::Expert => "Expert",
            Tier::Master => "Master",
            Tier::Legend => "Legend",
        }
    }

    pub fn titles(&self) -> &'static [&'static str] {
        match self {
            Tier::Novice => &["Recruit", "Initiate", "Trainee", "Skirmisher", "Blooded"],
            Tier::Apprentice => &["Apprentice", "Squire", "Duelist", "Tactician", "Journeyman"],
            Tier::Adept => &["Adept", "Veteran", "Vanguard", "Warden", "Champion"],
            Tier::Expert => &["Expert", "Elite", "Warlord", "Paragon", "Exemplar"],
            Tier::Master => &["Master", "Grandmaster", "Battle Sage", "Living Weapon", "Ascendant"],
            Tier::Legend => &["Legend", "Myth", "Immortal", "Demigod", "Eternal"],
        }
    }
}

/// Display title for a level
///
/// Every two levels within a tier advance one title; once a tier runs out of
/// titles the last one sticks.
pub fn title_for(level: u32) -> &'static str {
    let tier = Tier::for_level(level);
    let (min, _) = tier.level_range();
    let titles = tier.titles();
    let index = (level.saturating_sub(min) / LEVELS_PER_TITLE) as usize;
    titles[index.min(titles.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_requires_nothing() {
        assert_eq!(experience_required_for(1), 0);
    }

    #[test]
    fn test_known_curve_points() {
        // 100 * 1.15^0 + 50 * 1^1.3
        assert_eq!(experience_required_for(2), 150);
        // 100 * 1.15 + 50 * 2^1.3 = 115 + 123.11
        assert_eq!(experience_required_for(3), 238);
    }

    #[test]
    fn test_curve_strictly_increases() {
        for level in 1..MAX_CURVE_LEVEL {
            assert!(
                experience_required_for(level + 1) > experience_required_for(level),
                "curve flat at level {}",
                level
            );
        }
    }

    #[test]
    fn test_last_curve_level_is_representable() {
        assert!(experience_required_for(MAX_CURVE_LEVEL) < u64::MAX);
        assert_eq!(experience_to_next(MAX_CURVE_LEVEL), 0);
        assert!(experience_to_next(MAX_CURVE_LEVEL - 1) > 0);
    }

    #[test]
    fn test_experience_to_next() {
        assert_eq!(experience_to_next(1), 150);
        assert_eq!(experience_to_next(2), 88);
    }

    #[test]
    fn test_progress_fraction_bounds() {
        assert_eq!(progress_fraction(1, 0), 0.0);
        assert_eq!(progress_fraction(1, 75), 0.5);
        assert_eq!(progress_fraction(1, 10_000), 1.0);
    }

    #[test]
    fn test_tier_buckets() {
        assert_eq!(Tier::for_level(1), Tier::Novice);
        assert_eq!(Tier::for_level(10), Tier::Novice);
        assert_eq!(Tier::for_level(11), Tier::Apprentice);
        assert_eq!(Tier::for_level(30), Tier::Adept);
        assert_eq!(Tier::for_level(31), Tier::Expert);
        assert_eq!(Tier::for_level(50), Tier::Master);
        assert_eq!(Tier::for_level(51), Tier::Legend);
        assert_eq!(Tier::for_level(10_000), Tier::Legend);
    }

    #[test]
    fn test_tier_ranges_are_contiguous() {
        for pair in Tier::ALL.windows(2) {
            let (_, end) = pair[0].level_range();
            let (start, _) = pair[1].level_range();
            assert_eq!(end.map(|e| e + 1), Some(start));
        }
        assert_eq!(Tier::Legend.level_range().1, None);
    }

    #[test]
    fn test_titles_advance_within_tier() {
        assert_eq!(title_for(1), "Recruit");
        assert_eq!(title_for(2), "Recruit");
        assert_eq!(title_for(3), "Initiate");
        assert_eq!(title_for(10), "Blooded");
        assert_eq!(title_for(11), "Apprentice");
    }

    #[test]
    fn test_legend_title_clamps() {
        assert_eq!(title_for(51), "Legend");
        assert_eq!(title_for(59), "Eternal");
        assert_eq!(title_for(500), "Eternal");
    }
}
