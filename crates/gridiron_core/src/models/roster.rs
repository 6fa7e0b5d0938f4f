//! Offensive and defensive units for one snap
//!
//! Line pairings are positional: defensive lineman `i` is engaged by
//! offensive lineman `i`. Any extra rusher is unblocked.

use super::player::{Player, PlayerId, QbTrait};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Depth band owned by a zone defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneDepth {
    /// depth < 6 yards
    Underneath,
    /// 6..=15 yards
    Intermediate,
    /// depth > 15 yards
    Deep,
}

impl ZoneDepth {
    pub fn for_depth(depth: f32) -> Self {
        if depth < 6.0 {
            ZoneDepth::Underneath
        } else if depth <= 15.0 {
            ZoneDepth::Intermediate
        } else {
            ZoneDepth::Deep
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoverageAssignment {
    Man { receiver: PlayerId },
    Zone { depth: ZoneDepth },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageDefender {
    pub player: Player,
    pub assignment: CoverageAssignment,
}

impl CoverageDefender {
    /// Whether this defender is on `receiver` at the given depth.
    pub fn covers(&self, receiver: PlayerId, depth: f32) -> bool {
        match self.assignment {
            CoverageAssignment::Man { receiver: target } => target == receiver,
            CoverageAssignment::Zone { depth: band } => ZoneDepth::for_depth(depth) == band,
        }
    }

    pub fn is_man(&self) -> bool {
        matches!(self.assignment, CoverageAssignment::Man { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offense {
    pub quarterback: Player,
    #[serde(default)]
    pub qb_trait: QbTrait,
    pub receivers: Vec<Player>,
    #[serde(default)]
    pub line: Vec<Player>,
}

impl Offense {
    pub fn validate(&self) -> Result<()> {
        if self.receivers.is_empty() {
            return Err(EngineError::EmptyRoster { group: "receivers" });
        }
        if self.quarterback.attributes.is_empty() {
            return Err(EngineError::EmptyRoster { group: "quarterback" });
        }
        std::iter::once(&self.quarterback)
            .chain(self.receivers.iter())
            .chain(self.line.iter())
            .try_for_each(check_attributes)
    }

    pub fn receiver(&self, id: PlayerId) -> Option<&Player> {
        self.receivers.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defense {
    #[serde(default)]
    pub line: Vec<Player>,
    #[serde(default)]
    pub coverage: Vec<CoverageDefender>,
}

impl Defense {
    /// An empty defensive line or secondary is a legal (lopsided) snap.
    pub fn validate(&self) -> Result<()> {
        self.line
            .iter()
            .chain(self.coverage.iter().map(|d| &d.player))
            .try_for_each(check_attributes)
    }
}

fn check_attributes(player: &Player) -> Result<()> {
    match player.attributes.out_of_range() {
        Some((skill, value)) => {
            Err(EngineError::AttributeOutOfRange { player: player.id, skill, value })
        }
        None => Ok(()),
    }
}
