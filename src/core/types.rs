//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a playable character (catalog key, e.g. "achilles")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Character archetype (e.g. "warrior", "mage")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archetype(pub String);

impl Archetype {
    pub fn new(archetype: impl Into<String>) -> Self {
        Self(archetype.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a character is, as far as interaction filters care
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterIdentity {
    pub id: CharacterId,
    pub archetype: Option<Archetype>,
}

impl CharacterIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(id),
            archetype: None,
        }
    }

    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(Archetype::new(archetype));
        self
    }
}

/// Game clock in whole seconds since the character's runtime started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTime(pub u64);

impl GameTime {
    pub const ZERO: GameTime = GameTime(0);

    pub fn seconds(&self) -> u64 {
        self.0
    }

    pub fn advance(&self, delta_seconds: u64) -> Self {
        Self(self.0.saturating_add(delta_seconds))
    }

    /// Seconds elapsed since `earlier` (zero if `earlier` is in the future)
    pub fn since(&self, earlier: GameTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_id_display() {
        let id = CharacterId::new("achilles");
        assert_eq!(id.to_string(), "achilles");
        assert_eq!(id.as_str(), "achilles");
    }

    #[test]
    fn test_identity_builder() {
        let who = CharacterIdentity::new("merlin").with_archetype("mage");
        assert_eq!(who.id, CharacterId::new("merlin"));
        assert_eq!(who.archetype, Some(Archetype::new("mage")));
    }

    #[test]
    fn test_game_time_since_saturates() {
        let t = GameTime(10);
        assert_eq!(t.advance(5).since(t), 5);
        assert_eq!(t.since(GameTime(20)), 0);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&CharacterId::new("joan")).unwrap();
        assert_eq!(json, "\"joan\"");
    }
}
