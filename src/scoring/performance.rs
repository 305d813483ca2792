//! Battle telemetry consumed by the scorer
//!
//! Built once by the combat resolver when a battle ends, never mutated after.
//! Counters are unsigned so malformed negative telemetry cannot be expressed.

use serde::{Deserialize, Serialize};

/// How the battle ended for the scored character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Broad category of a single battle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Ability,
    Defend,
    Dodge,
    Item,
    Tactic,
    Social,
    Spiritual,
}

/// One action in battle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleAction {
    pub kind: ActionKind,
    pub success: bool,
}

impl BattleAction {
    pub fn success(kind: ActionKind) -> Self {
        Self { kind, success: true }
    }

    pub fn failure(kind: ActionKind) -> Self {
        Self {
            kind,
            success: false,
        }
    }
}

/// Complete record of one finished battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePerformance {
    pub outcome: BattleOutcome,
    pub duration_seconds: u32,
    pub player_level: u32,
    pub opponent_level: u32,

    // === COUNTERS ===
    #[serde(default)]
    pub damage_dealt: u32,
    #[serde(default)]
    pub damage_taken: u32,
    #[serde(default)]
    pub critical_hits: u32,
    #[serde(default)]
    pub dodges: u32,
    #[serde(default)]
    pub blocks: u32,
    #[serde(default)]
    pub abilities_used: u32,
    #[serde(default)]
    pub strategic_decisions: u32,
    #[serde(default)]
    pub social_interactions: u32,
    #[serde(default)]
    pub spiritual_moments: u32,

    // === CONTEXT ===
    #[serde(default)]
    pub outnumbered: bool,
    #[serde(default)]
    pub team_battle: bool,
    #[serde(default)]
    pub terrain_disadvantage: bool,
    #[serde(default)]
    pub environment: Option<String>,

    /// Actions in the order they happened
    #[serde(default)]
    pub actions: Vec<BattleAction>,
}

impl BattlePerformance {
    /// Bare record with every counter at zero
    pub fn new(
        outcome: BattleOutcome,
        duration_seconds: u32,
        player_level: u32,
        opponent_level: u32,
    ) -> Self {
        Self {
            outcome,
            duration_seconds,
            player_level,
            opponent_level,
            damage_dealt: 0,
            damage_taken: 0,
            critical_hits: 0,
            dodges: 0,
            blocks: 0,
            abilities_used: 0,
            strategic_decisions: 0,
            social_interactions: 0,
            spiritual_moments: 0,
            outnumbered: false,
            team_battle: false,
            terrain_disadvantage: false,
            environment: None,
            actions: Vec::new(),
        }
    }

    pub fn victory(duration_seconds: u32, player_level: u32, opponent_level: u32) -> Self {
        Self::new(BattleOutcome::Victory, duration_seconds, player_level, opponent_level)
    }

    pub fn defeat(duration_seconds: u32, player_level: u32, opponent_level: u32) -> Self {
        Self::new(BattleOutcome::Defeat, duration_seconds, player_level, opponent_level)
    }

    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }

    /// Opponent level minus player level (positive = fought up)
    pub fn level_difference(&self) -> i64 {
        self.opponent_level as i64 - self.player_level as i64
    }

    pub fn with_damage(mut self, dealt: u32, taken: u32) -> Self {
        self.damage_dealt = dealt;
        self.damage_taken = taken;
        self
    }

    pub fn with_critical_hits(mut self, count: u32) -> Self {
        self.critical_hits = count;
        self
    }

    pub fn with_dodges(mut self, count: u32) -> Self {
        self.dodges = count;
        self
    }

    pub fn with_blocks(mut self, count: u32) -> Self {
        self.blocks = count;
        self
    }

    pub fn with_abilities_used(mut self, count: u32) -> Self {
        self.abilities_used = count;
        self
    }

    pub fn with_strategic_decisions(mut self, count: u32) -> Self {
        self.strategic_decisions = count;
        self
    }

    pub fn with_social_interactions(mut self, count: u32) -> Self {
        self.social_interactions = count;
        self
    }

    pub fn with_spiritual_moments(mut self, count: u32) -> Self {
        self.spiritual_moments = count;
        self
    }

    pub fn outnumbered(mut self) -> Self {
        self.outnumbered = true;
        self
    }

    pub fn team_battle(mut self) -> Self {
        self.team_battle = true;
        self
    }

    pub fn terrain_disadvantage(mut self) -> Self {
        self.terrain_disadvantage = true;
        self
    }

    pub fn in_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_actions(mut self, actions: Vec<BattleAction>) -> Self {
        self.actions = actions;
        self
    }
}
