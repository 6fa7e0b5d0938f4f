use super::attributes::AttributeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity assigned by the roster system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    OL,
    DL,
    LB,
    CB,
    S,
}

impl Position {
    pub fn is_safety(self) -> bool {
        matches!(self, Position::S)
    }
}

/// Player data as seen by the play engine.
///
/// # Boundary Contract
/// - Supplied by the roster system, never mutated by the engine
/// - `attributes` values must lie in [0, 100]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub attributes: AttributeSet,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position, attributes: AttributeSet) -> Self {
        Self { id: PlayerId(id), name: name.into(), position, attributes }
    }
}

/// Quarterback decision-making personality.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QbTrait {
    Gunslinger,
    GameManager,
    #[default]
    Balanced,
    Scrambler,
}

impl QbTrait {
    pub const ALL: [QbTrait; 4] =
        [QbTrait::Gunslinger, QbTrait::GameManager, QbTrait::Balanced, QbTrait::Scrambler];
}
