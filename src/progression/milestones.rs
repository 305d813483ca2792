//! One-time rewards at specific domain levels
//!
//! Sparse: a level without an entry has no milestone.

use serde::Serialize;

/// What a milestone hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum MilestoneKind {
    /// Free attribute points
    AttributePoints(u32),
    /// One more interaction may be active at a time
    InteractionSlot,
    /// New display title
    Title,
    /// Cosmetic only
    Cosmetic,
}

/// Static milestone definition
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneReward {
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: MilestoneKind,
}

/// Milestone table, ascending by level
pub static MILESTONES: &[MilestoneReward] = &[
    MilestoneReward {
        level: 5,
        title: "First Blood",
        description: "Survived the early skirmishes",
        kind: MilestoneKind::AttributePoints(1),
    },
    MilestoneReward {
        level: 10,
        title: "Proven",
        description: "Mastered the fundamentals",
        kind: MilestoneKind::InteractionSlot,
    },
    MilestoneReward {
        level: 20,
        title: "Seasoned",
        description: "Reliable under pressure",
        kind: MilestoneKind::AttributePoints(2),
    },
    MilestoneReward {
        level: 25,
        title: "Banner Bearer",
        description: "Others rally to your example",
        kind: MilestoneKind::Cosmetic,
    },
    MilestoneReward {
        level: 30,
        title: "Tactical Mind",
        description: "Reads the flow of battle",
        kind: MilestoneKind::InteractionSlot,
    },
    MilestoneReward {
        level: 40,
        title: "Renowned",
        description: "Your name precedes you",
        kind: MilestoneKind::Title,
    },
    MilestoneReward {
        level: 50,
        title: "Master of the Art",
        description: "Reached the pinnacle of mortal skill",
        kind: MilestoneKind::AttributePoints(5),
    },
    MilestoneReward {
        level: 75,
        title: "Living Legend",
        description: "Stories are told of your battles",
        kind: MilestoneKind::Title,
    },
    MilestoneReward {
        level: 100,
        title: "Transcendent",
        description: "Beyond the limits of the curve",
        kind: MilestoneKind::InteractionSlot,
    },
];

/// Milestone reached exactly at `level`, if any
pub fn milestone_for(level: u32) -> Option<&'static MilestoneReward> {
    MILESTONES.iter().find(|m| m.level == level)
}

/// Milestones passed when moving from `from` to `to` (exclusive, inclusive)
pub fn milestones_crossed(from: u32, to: u32) -> impl Iterator<Item = &'static MilestoneReward> {
    MILESTONES
        .iter()
        .filter(move |m| m.level > from && m.level <= to)
}
