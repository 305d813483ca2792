//! Skill Synergy - battle-driven skill progression for turn-based combat
//!
//! Battles award experience across five skill domains; domain levels unlock
//! interactions that a per-character runtime activates, stacks and cools down.

pub mod core;
pub mod interactions;
pub mod progression;
pub mod scoring;
