use thiserror::Error;

use crate::interactions::RuleGroup;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Duplicate interaction id: {0}")]
    DuplicateInteraction(String),

    #[error("Interaction {id} is in the {group:?} group but {reason}")]
    MisplacedInteraction {
        id: String,
        group: RuleGroup,
        reason: &'static str,
    },

    #[error("Invalid skill key: {0}")]
    InvalidSkillKey(String),

    #[error("Unknown skill domain: {0}")]
    UnknownDomain(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
