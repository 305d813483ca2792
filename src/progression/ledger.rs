//! Per-character skill domain ledger
//!
//! Five fixed core domains plus free-form signature and archetype sub-skills.
//! Sub-skills only matter as interaction requirements.

use crate::core::error::EngineError;
use crate::progression::curve::{
    experience_required_for, experience_to_next, progress_fraction, MAX_CURVE_LEVEL,
};
use crate::scoring::{CombatSkillReward, SkillGain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Core skill domains every character has
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillDomain {
    Combat,
    Survival,
    Mental,
    Social,
    Spiritual,
}

impl SkillDomain {
    pub const ALL: [SkillDomain; 5] = [
        SkillDomain::Combat,
        SkillDomain::Survival,
        SkillDomain::Mental,
        SkillDomain::Social,
        SkillDomain::Spiritual,
    ];

    /// Lowercase key used in catalogs and justifications
    pub fn name(&self) -> &'static str {
        match self {
            SkillDomain::Combat => "combat",
            SkillDomain::Survival => "survival",
            SkillDomain::Mental => "mental",
            SkillDomain::Social => "social",
            SkillDomain::Spiritual => "spiritual",
        }
    }

    fn index(&self) -> usize {
        match self {
            SkillDomain::Combat => 0,
            SkillDomain::Survival => 1,
            SkillDomain::Mental => 2,
            SkillDomain::Social => 3,
            SkillDomain::Spiritual => 4,
        }
    }
}

impl fmt::Display for SkillDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkillDomain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillDomain::ALL
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| EngineError::UnknownDomain(s.to_string()))
    }
}

/// Any skill an interaction requirement can name
///
/// String form: `combat`, `signature:<name>`, `archetype:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkillKey {
    Core(SkillDomain),
    Signature(String),
    Archetype(String),
}

impl SkillKey {
    pub fn signature(name: impl Into<String>) -> Self {
        SkillKey::Signature(name.into())
    }

    pub fn archetype(name: impl Into<String>) -> Self {
        SkillKey::Archetype(name.into())
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillKey::Core(domain) => write!(f, "{}", domain),
            SkillKey::Signature(name) => write!(f, "signature:{}", name),
            SkillKey::Archetype(name) => write!(f, "archetype:{}", name),
        }
    }
}

impl FromStr for SkillKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("signature", name)) if !name.is_empty() => Ok(SkillKey::Signature(name.into())),
            Some(("archetype", name)) if !name.is_empty() => Ok(SkillKey::Archetype(name.into())),
            Some(_) => Err(EngineError::InvalidSkillKey(s.to_string())),
            None => s
                .parse::<SkillDomain>()
                .map(SkillKey::Core)
                .map_err(|_| EngineError::InvalidSkillKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for SkillKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SkillKey> for String {
    fn from(key: SkillKey) -> Self {
        key.to_string()
    }
}

impl From<SkillDomain> for SkillKey {
    fn from(domain: SkillDomain) -> Self {
        SkillKey::Core(domain)
    }
}

/// Anything that can answer "what level is this skill at?"
///
/// `None` means the character has no such skill at all.
pub trait SkillSource {
    fn skill_level(&self, key: &SkillKey) -> Option<u32>;
}

/// Level and accumulated experience for one core domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDomainLevel {
    pub level: u32,
    /// Total experience ever earned in this domain
    pub experience: u64,
    pub max_level: u32,
}

impl SkillDomainLevel {
    /// `max_level` is clamped to the curve's last level
    pub fn new(max_level: u32) -> Self {
        assert!(max_level >= 1, "max_level must be at least 1");
        Self {
            level: 1,
            experience: 0,
            max_level: max_level.min(MAX_CURVE_LEVEL),
        }
    }

    /// Domain sitting exactly at the start of `level`
    pub fn at_level(level: u32, max_level: u32) -> Self {
        assert!(max_level >= 1, "max_level must be at least 1");
        let max_level = max_level.min(MAX_CURVE_LEVEL);
        let level = level.clamp(1, max_level);
        Self {
            level,
            experience: experience_required_for(level),
            max_level,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.level >= self.max_level
    }

    /// Experience still needed for the next level (0 when capped)
    pub fn experience_remaining(&self) -> u64 {
        if self.is_capped() {
            return 0;
        }
        experience_required_for(self.level + 1).saturating_sub(self.experience)
    }

    pub fn experience_to_next(&self) -> u64 {
        experience_to_next(self.level)
    }

    pub fn progress(&self) -> f32 {
        if self.is_capped() {
            return 1.0;
        }
        progress_fraction(self.level, self.experience)
    }

    /// Level this domain would reach after adding `gain` experience
    pub fn projected_level(&self, gain: u64) -> u32 {
        projected_level(self.level, self.experience.saturating_add(gain), self.max_level)
    }
}

/// Highest level reachable from `level` with `experience` total, capped
pub fn projected_level(level: u32, experience: u64, max_level: u32) -> u32 {
    let max_level = max_level.min(MAX_CURVE_LEVEL);
    let mut level = level;
    while level < max_level && experience >= experience_required_for(level + 1) {
        level += 1;
    }
    level
}

/// A domain crossing one or more level thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub domain: SkillDomain,
    pub previous_level: u32,
    pub new_level: u32,
}

/// A character's complete skill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDomainLedger {
    domains: [SkillDomainLevel; 5],
    #[serde(default)]
    signature_skills: BTreeMap<String, u32>,
    #[serde(default)]
    archetype_skills: BTreeMap<String, u32>,
}

impl Default for SkillDomainLedger {
    fn default() -> Self {
        Self::new(crate::core::config().progression.max_level)
    }
}

impl SkillDomainLedger {
    /// Fresh ledger with every domain at level 1
    pub fn new(max_level: u32) -> Self {
        Self {
            domains: [SkillDomainLevel::new(max_level); 5],
            signature_skills: BTreeMap::new(),
            archetype_skills: BTreeMap::new(),
        }
    }

    pub fn domain(&self, domain: SkillDomain) -> &SkillDomainLevel {
        &self.domains[domain.index()]
    }

    pub fn level(&self, domain: SkillDomain) -> u32 {
        self.domain(domain).level
    }

    /// Iterate domains in `SkillDomain::ALL` order
    pub fn domains(&self) -> impl Iterator<Item = (SkillDomain, &SkillDomainLevel)> {
        SkillDomain::ALL.iter().map(move |d| (*d, self.domain(*d)))
    }

    /// Place a domain at the start of `level` (character setup / tests)
    pub fn set_level(&mut self, domain: SkillDomain, level: u32) {
        let max = self.domains[domain.index()].max_level;
        self.domains[domain.index()] = SkillDomainLevel::at_level(level, max);
    }

    pub fn with_level(mut self, domain: SkillDomain, level: u32) -> Self {
        self.set_level(domain, level);
        self
    }

    pub fn set_signature_skill(&mut self, name: impl Into<String>, level: u32) {
        self.signature_skills.insert(name.into(), level);
    }

    pub fn with_signature_skill(mut self, name: impl Into<String>, level: u32) -> Self {
        self.set_signature_skill(name, level);
        self
    }

    pub fn set_archetype_skill(&mut self, name: impl Into<String>, level: u32) {
        self.archetype_skills.insert(name.into(), level);
    }

    pub fn with_archetype_skill(mut self, name: impl Into<String>, level: u32) -> Self {
        self.set_archetype_skill(name, level);
        self
    }

    pub fn signature_skills(&self) -> &BTreeMap<String, u32> {
        &self.signature_skills
    }

    pub fn archetype_skills(&self) -> &BTreeMap<String, u32> {
        &self.archetype_skills
    }

    /// Add one gain's experience and level the domain up as far as it goes
    ///
    /// Capped domains keep accumulating experience but never level.
    pub fn apply_gain(&mut self, gain: &SkillGain) -> Option<LevelUp> {
        let entry = &mut self.domains[gain.domain.index()];
        let previous_level = entry.level;

        entry.experience = entry.experience.saturating_add(gain.experience);
        entry.level = projected_level(entry.level, entry.experience, entry.max_level);

        if entry.level > previous_level {
            tracing::info!(
                "{} leveled up: {} -> {}",
                gain.domain,
                previous_level,
                entry.level
            );
            Some(LevelUp {
                domain: gain.domain,
                previous_level,
                new_level: entry.level,
            })
        } else {
            None
        }
    }

    /// Apply every gain from a battle reward
    pub fn apply_reward(&mut self, reward: &CombatSkillReward) -> Vec<LevelUp> {
        reward
            .gains
            .iter()
            .filter_map(|gain| self.apply_gain(gain))
            .collect()
    }

    /// Copy of this ledger with the reward applied (no mutation)
    pub fn projected(&self, reward: &CombatSkillReward) -> Self {
        let mut next = self.clone();
        for gain in &reward.gains {
            let entry = &mut next.domains[gain.domain.index()];
            entry.experience = entry.experience.saturating_add(gain.experience);
            entry.level = projected_level(entry.level, entry.experience, entry.max_level);
        }
        next
    }
}

impl SkillSource for SkillDomainLedger {
    fn skill_level(&self, key: &SkillKey) -> Option<u32> {
        match key {
            SkillKey::Core(domain) => Some(self.level(*domain)),
            SkillKey::Signature(name) => self.signature_skills.get(name).copied(),
            SkillKey::Archetype(name) => self.archetype_skills.get(name).copied(),
        }
    }
}
