//! Working state of one play
//!
//! A `PlayState` is created fresh per snap and discarded once the play
//! resolves. Phase transitions consume the state and return the next one, so
//! every phase works on a complete snapshot and nothing leaks across plays.

use super::routes::RouteTemplate;
use crate::models::{PlayerId, QbTrait};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayPhase {
    AwaitingLineClash,
    AwaitingSeparation,
    AwaitingCatchCalc,
    AwaitingQbDecision,
    Thrown,
    Sacked,
    Desperation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinemanState {
    pub engaged: bool,
    pub knocked_down: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverState {
    pub id: PlayerId,
    pub route: RouteTemplate,
    pub current_depth: f32,
    pub separation_margin: f32,
    /// Catch threshold in [5, 95]
    pub catch_probability: f32,
    pub roll_mean: f32,
    /// Index into the coverage group of the best covering defender
    pub primary_defender: Option<usize>,
    pub defender_count: usize,
    pub visible: bool,
}

impl ReceiverState {
    pub fn new(id: PlayerId, route: RouteTemplate) -> Self {
        Self {
            id,
            route,
            current_depth: 0.0,
            separation_margin: 0.0,
            catch_probability: 0.0,
            roll_mean: 0.0,
            primary_defender: None,
            defender_count: 0,
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QbState {
    pub qb_trait: QbTrait,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayState {
    pub round: u8,
    /// Clamped to [0, max_pressure], never decreases within a play
    pub total_pressure: f32,
    pub sacked: bool,
    pub phase: PlayPhase,
    pub offensive_line: Vec<LinemanState>,
    pub defensive_line: Vec<LinemanState>,
    pub receivers: Vec<ReceiverState>,
    pub qb: QbState,
}

impl PlayState {
    pub fn new(
        ol_count: usize,
        dl_count: usize,
        receivers: Vec<ReceiverState>,
        qb_trait: QbTrait,
    ) -> Self {
        let offensive_line = (0..ol_count)
            .map(|i| LinemanState { engaged: i < dl_count, knocked_down: false })
            .collect();
        let defensive_line = (0..dl_count)
            .map(|i| LinemanState { engaged: i < ol_count, knocked_down: false })
            .collect();
        Self {
            round: 0,
            total_pressure: 0.0,
            sacked: false,
            phase: PlayPhase::AwaitingLineClash,
            offensive_line,
            defensive_line,
            receivers,
            qb: QbState { qb_trait },
        }
    }

    pub fn next_round(mut self) -> Self {
        self.round += 1;
        self.phase = PlayPhase::AwaitingLineClash;
        self
    }

    pub fn with_phase(mut self, phase: PlayPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn thrown(mut self) -> Self {
        self.phase = PlayPhase::Thrown;
        self
    }

    /// Receiver with the highest catch threshold; ties keep receiver order.
    pub fn best_receiver(&self) -> Option<usize> {
        self.receivers
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (idx, r)| match best {
                Some((_, p)) if p >= r.catch_probability => best,
                _ => Some((idx, r.catch_probability)),
            })
            .map(|(idx, _)| idx)
    }
}

/// Immutable per-round record for replay and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u8,
    pub phase: PlayPhase,
    pub total_pressure: f32,
    pub ol_knocked_down: usize,
    pub dl_knocked_down: usize,
    pub receivers: Vec<ReceiverSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverSnapshot {
    pub id: PlayerId,
    pub route: String,
    pub depth: f32,
    pub separation: f32,
    pub catch_threshold: f32,
    pub visible: bool,
}

impl RoundSnapshot {
    pub fn capture(state: &PlayState) -> Self {
        Self {
            round: state.round,
            phase: state.phase,
            total_pressure: state.total_pressure,
            ol_knocked_down: state.offensive_line.iter().filter(|l| l.knocked_down).count(),
            dl_knocked_down: state.defensive_line.iter().filter(|l| l.knocked_down).count(),
            receivers: state
                .receivers
                .iter()
                .map(|r| ReceiverSnapshot {
                    id: r.id,
                    route: r.route.name.clone(),
                    depth: r.current_depth,
                    separation: r.separation_margin,
                    catch_threshold: r.catch_probability,
                    visible: r.visible,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::routes::RouteCatalog;

    fn receivers(thresholds: &[f32]) -> Vec<ReceiverState> {
        let route = RouteCatalog::default().standard[0].clone();
        thresholds
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut r = ReceiverState::new(PlayerId(i as u32), route.clone());
                r.catch_probability = p;
                r
            })
            .collect()
    }

    #[test]
    fn test_engagement_is_positional() {
        let state = PlayState::new(5, 4, vec![], QbTrait::Balanced);
        assert!(state.offensive_line[3].engaged);
        assert!(!state.offensive_line[4].engaged, "fifth lineman has nobody to block");
        assert!(state.defensive_line.iter().all(|d| d.engaged));

        let blitz = PlayState::new(4, 5, vec![], QbTrait::Balanced);
        assert!(!blitz.defensive_line[4].engaged);
    }

    #[test]
    fn test_round_advances_by_one() {
        let state = PlayState::new(5, 4, vec![], QbTrait::Balanced).next_round().next_round();
        assert_eq!(state.round, 2);
        assert_eq!(state.phase, PlayPhase::AwaitingLineClash);
    }

    #[test]
    fn test_best_receiver_ties_keep_order() {
        let state = PlayState::new(5, 4, receivers(&[40.0, 72.0, 72.0, 10.0]), QbTrait::Balanced);
        assert_eq!(state.best_receiver(), Some(1));
    }

    #[test]
    fn test_snapshot_copies_receivers() {
        let state = PlayState::new(5, 4, receivers(&[40.0, 60.0]), QbTrait::Gunslinger);
        let snap = RoundSnapshot::capture(&state);
        assert_eq!(snap.receivers.len(), 2);
        assert_eq!(snap.receivers[1].catch_threshold, 60.0);
    }
}
