use thiserror::Error;

use crate::models::{PlayerId, Skill};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid weight table '{table}': empty or references no attribute of the player")]
    InvalidWeightTable { table: String },

    #[error("Empty roster: position group '{group}' has no players")]
    EmptyRoster { group: &'static str },

    #[error("Play exhausted {rounds} rounds without a terminal result")]
    ExhaustedRoundsWithoutResolution { rounds: u8 },

    #[error("Attribute {skill:?} of player {player} out of range: {value}")]
    AttributeOutOfRange { player: PlayerId, skill: Skill, value: f32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Logic defects in inputs or the engine itself. The engine is a pure
    /// function of its inputs and random stream, so nothing here is retryable.
    pub fn is_logic_defect(&self) -> bool {
        match self {
            EngineError::InvalidWeightTable { .. } => true,
            EngineError::ExhaustedRoundsWithoutResolution { .. } => true,
            EngineError::InvalidConfig(_) => true,
            EngineError::EmptyRoster { .. } => false,
            EngineError::AttributeOutOfRange { .. } => false,
            EngineError::UnsupportedSchema(_) => false,
            EngineError::Json(_) | EngineError::Yaml(_) | EngineError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_defect_classification() {
        assert!(EngineError::InvalidWeightTable { table: "ol_block".into() }.is_logic_defect());
        assert!(EngineError::ExhaustedRoundsWithoutResolution { rounds: 6 }.is_logic_defect());
        assert!(!EngineError::EmptyRoster { group: "receivers" }.is_logic_defect());
    }

    #[test]
    fn test_display_names_group() {
        let err = EngineError::EmptyRoster { group: "receivers" };
        assert_eq!(err.to_string(), "Empty roster: position group 'receivers' has no players");
    }
}
