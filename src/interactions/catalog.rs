//! Interaction catalog - the shared, read-only rule registry
//!
//! Built once at startup and passed by reference to the resolver and
//! runtime. Partitioned into universal, character-specific and
//! archetype-specific groups; each id lives in exactly one group.

use crate::core::error::{EngineError, Result};
use crate::interactions::{InteractionDefinition, RuleGroup};
use ahash::AHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Built-in catalog shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../../data/interactions.toml");

/// On-disk layout: one array of tables per rule group
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    universal: Vec<InteractionDefinition>,
    #[serde(default)]
    character: Vec<InteractionDefinition>,
    #[serde(default)]
    archetype: Vec<InteractionDefinition>,
}

/// Immutable registry of interaction definitions
#[derive(Debug, Clone, Default)]
pub struct InteractionCatalog {
    universal: Vec<InteractionDefinition>,
    character_specific: Vec<InteractionDefinition>,
    archetype_specific: Vec<InteractionDefinition>,
    index: AHashMap<String, (RuleGroup, usize)>,
}

impl InteractionCatalog {
    /// Build a catalog, rejecting duplicate ids and misplaced entries
    pub fn new(
        universal: Vec<InteractionDefinition>,
        character_specific: Vec<InteractionDefinition>,
        archetype_specific: Vec<InteractionDefinition>,
    ) -> Result<Self> {
        let mut index = AHashMap::new();
        let groups = [
            (RuleGroup::Universal, &universal),
            (RuleGroup::Character, &character_specific),
            (RuleGroup::Archetype, &archetype_specific),
        ];
        for (group, definitions) in groups {
            for (position, def) in definitions.iter().enumerate() {
                check_placement(def, group)?;
                if index.insert(def.id.clone(), (group, position)).is_some() {
                    return Err(EngineError::DuplicateInteraction(def.id.clone()));
                }
            }
        }

        Ok(Self {
            universal,
            character_specific,
            archetype_specific,
            index,
        })
    }

    /// Sort loose definitions into groups by their scope filters
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = InteractionDefinition>,
    ) -> Result<Self> {
        let mut universal = Vec::new();
        let mut character = Vec::new();
        let mut archetype = Vec::new();
        for def in definitions {
            match def.rule_group() {
                RuleGroup::Universal => universal.push(def),
                RuleGroup::Character => character.push(def),
                RuleGroup::Archetype => archetype.push(def),
            }
        }
        Self::new(universal, character, archetype)
    }

    /// Parse a catalog from TOML (`[[universal]]`, `[[character]]`, `[[archetype]]`)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.universal, file.character, file.archetype)
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded {} interactions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The catalog bundled in `data/interactions.toml`
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn get(&self, id: &str) -> Option<&InteractionDefinition> {
        let (group, position) = self.index.get(id)?;
        self.group(*group).get(*position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn group_of(&self, id: &str) -> Option<RuleGroup> {
        self.index.get(id).map(|(group, _)| *group)
    }

    pub fn group(&self, group: RuleGroup) -> &[InteractionDefinition] {
        match group {
            RuleGroup::Universal => &self.universal,
            RuleGroup::Character => &self.character_specific,
            RuleGroup::Archetype => &self.archetype_specific,
        }
    }

    /// Universal, then character-specific, then archetype-specific
    pub fn iter(&self) -> impl Iterator<Item = &InteractionDefinition> {
        self.universal
            .iter()
            .chain(self.character_specific.iter())
            .chain(self.archetype_specific.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn check_placement(def: &InteractionDefinition, group: RuleGroup) -> Result<()> {
    let reason = match group {
        RuleGroup::Universal if def.character.is_some() || def.archetype.is_some() => {
            "has a character or archetype filter"
        }
        RuleGroup::Character if def.character.is_none() => "has no character filter",
        RuleGroup::Archetype if def.archetype.is_none() => "has no archetype filter",
        RuleGroup::Archetype if def.character.is_some() => "also has a character filter",
        _ => return Ok(()),
    };
    Err(EngineError::MisplacedInteraction {
        id: def.id.clone(),
        group,
        reason,
    })
}
