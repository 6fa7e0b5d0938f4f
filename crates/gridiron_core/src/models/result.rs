//! Play and drive results
//!
//! Consumed by the rendering, statistics and season layers. Every variant
//! names the participants involved so those layers never need engine state.

use super::field::FieldPosition;
use super::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Terminal result of one snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayResult {
    /// `rusher` is `None` for a coverage sack.
    Sack { passer: PlayerId, rusher: Option<PlayerId>, yards: i32 },
    Throwaway { passer: PlayerId },
    Incomplete { passer: PlayerId, target: PlayerId, defender: Option<PlayerId> },
    Interception { passer: PlayerId, target: PlayerId, defender: PlayerId },
    Complete { passer: PlayerId, target: PlayerId, yards: i32, tackler: Option<PlayerId> },
    Touchdown { passer: PlayerId, target: PlayerId, yards: i32 },
    Scramble { runner: PlayerId, yards: i32 },
}

impl PlayResult {
    /// Signed yards gained on the play.
    pub fn yards(&self) -> i32 {
        match self {
            PlayResult::Sack { yards, .. }
            | PlayResult::Complete { yards, .. }
            | PlayResult::Touchdown { yards, .. }
            | PlayResult::Scramble { yards, .. } => *yards,
            PlayResult::Throwaway { .. }
            | PlayResult::Incomplete { .. }
            | PlayResult::Interception { .. } => 0,
        }
    }

    pub fn kind(&self) -> PlayKind {
        match self {
            PlayResult::Sack { .. } => PlayKind::Sack,
            PlayResult::Throwaway { .. } => PlayKind::Throwaway,
            PlayResult::Incomplete { .. } => PlayKind::Incomplete,
            PlayResult::Interception { .. } => PlayKind::Interception,
            PlayResult::Complete { .. } => PlayKind::Complete,
            PlayResult::Touchdown { .. } => PlayKind::Touchdown,
            PlayResult::Scramble { .. } => PlayKind::Scramble,
        }
    }

    pub fn is_turnover(&self) -> bool {
        matches!(self, PlayResult::Interception { .. })
    }

    /// Pass attempts exclude sacks, scrambles and throwaways.
    pub fn is_pass_attempt(&self) -> bool {
        matches!(
            self,
            PlayResult::Incomplete { .. }
                | PlayResult::Interception { .. }
                | PlayResult::Complete { .. }
                | PlayResult::Touchdown { .. }
        )
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, PlayResult::Complete { .. } | PlayResult::Touchdown { .. })
    }
}

/// Fieldless discriminant of `PlayResult`, used for tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayKind {
    Sack,
    Throwaway,
    Incomplete,
    Interception,
    Complete,
    Touchdown,
    Scramble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveOutcome {
    Touchdown,
    Turnover,
    FieldGoal,
    MissedFg,
    Punt,
}

impl DriveOutcome {
    pub fn points(self) -> u8 {
        match self {
            DriveOutcome::Touchdown => 7,
            DriveOutcome::FieldGoal => 3,
            DriveOutcome::Turnover | DriveOutcome::MissedFg | DriveOutcome::Punt => 0,
        }
    }
}

/// Per-play context kept next to the result list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayLogEntry {
    /// Down, distance and spot before the snap
    pub field: FieldPosition,
    /// Rounds the play lasted (1..=5, 6 for a desperation resolution)
    pub rounds: u8,
    /// Pressure on the quarterback when the play ended
    pub total_pressure: f32,
}

/// Terminal result of one possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveResult {
    pub points: u8,
    pub outcome: DriveOutcome,
    pub plays: Vec<PlayResult>,
    pub log: Vec<PlayLogEntry>,
    pub final_field: FieldPosition,
}

impl DriveResult {
    pub fn total_yards(&self) -> i32 {
        self.plays.iter().map(PlayResult::yards).sum()
    }
}
