//! Eligibility resolver
//!
//! Filters the catalog down to the interactions a character qualifies for
//! right now. Pure: same inputs, same output, in catalog order.

use crate::core::CharacterIdentity;
use crate::interactions::{InteractionCatalog, InteractionDefinition};
use crate::progression::SkillSource;

/// True when scope filters pass and every requirement is met
///
/// A requirement naming a skill the character lacks fails outright; there is
/// no partial credit and no default level.
pub fn is_eligible<S: SkillSource + ?Sized>(
    definition: &InteractionDefinition,
    identity: &CharacterIdentity,
    skills: &S,
) -> bool {
    definition.applies_to(identity) && definition.requirements_met(skills)
}

/// Every catalog entry `identity` currently qualifies for
pub fn resolve_eligible<'c, S: SkillSource + ?Sized>(
    catalog: &'c InteractionCatalog,
    identity: &CharacterIdentity,
    skills: &S,
) -> Vec<&'c InteractionDefinition> {
    catalog
        .iter()
        .filter(|def| is_eligible(def, identity, skills))
        .collect()
}

/// Ids of `resolve_eligible`, for callers that only need membership
pub fn eligible_ids<S: SkillSource + ?Sized>(
    catalog: &InteractionCatalog,
    identity: &CharacterIdentity,
    skills: &S,
) -> Vec<String> {
    resolve_eligible(catalog, identity, skills)
        .into_iter()
        .map(|def| def.id.clone())
        .collect()
}

/// Entries in scope for `identity` whose requirements are not yet met
pub fn locked_for<'c, S: SkillSource + ?Sized>(
    catalog: &'c InteractionCatalog,
    identity: &CharacterIdentity,
    skills: &S,
) -> Vec<&'c InteractionDefinition> {
    catalog
        .iter()
        .filter(|def| def.applies_to(identity) && !def.requirements_met(skills))
        .collect()
}
