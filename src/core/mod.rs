pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, EngineConfig, RatingConfig, ScoringConfig};
pub use error::{EngineError, Result};
pub use types::{Archetype, CharacterId, CharacterIdentity, GameTime};
