//! Line clash: pass protection vs pass rush
//!
//! Each defensive lineman is matched against the offensive lineman in the
//! same slot. An unblocked rusher (no blocker, or the blocker is on the
//! ground) adds flat pressure and carries an independent sack chance.
//! Otherwise `margin = dl_roll + round_bonus - ol_roll` selects a bucket of
//! the line table.

use super::config::{EngineConfig, LineClashConfig, LineOutcome};
use super::play_state::LinemanState;
use super::rng;
use super::roll::weighted_roll;
use crate::error::Result;
use crate::models::Player;
use rand::Rng;

/// Result of one rusher's rep this round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairingResult {
    pub rusher: usize,
    pub blocker: Option<usize>,
    /// `None` when unblocked
    pub margin: Option<f32>,
    pub pressure: f32,
    pub sack: bool,
    pub ol_knocked_down: bool,
    pub dl_knocked_down: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineRound {
    pub pairings: Vec<PairingResult>,
    pub pressure_added: f32,
    /// First rusher (slot order) to get home
    pub sack_by: Option<usize>,
}

#[inline]
pub fn outcome_for_margin(margin: f32, cfg: &LineClashConfig) -> &LineOutcome {
    cfg.table.lookup(margin)
}

#[inline]
pub fn round_bonus(round: u8, cfg: &LineClashConfig) -> f32 {
    round.saturating_sub(1) as f32 * cfg.round_bonus
}

/// Pressure after adding this round's contributions.
#[inline]
pub fn accumulate_pressure(total: f32, added: f32, cfg: &LineClashConfig) -> f32 {
    (total + added.max(0.0)).clamp(0.0, cfg.max_pressure)
}

/// Yards lost on a sack (negative).
pub fn sack_yards<R: Rng + ?Sized>(cfg: &LineClashConfig, rng: &mut R) -> i32 {
    -rng.gen_range(cfg.sack_yards_min..=cfg.sack_yards_max)
}

/// Unblocked rusher: flat pressure plus one independent sack draw.
pub fn resolve_unblocked<R: Rng + ?Sized>(rusher: usize, cfg: &LineClashConfig, rng: &mut R) -> PairingResult {
    PairingResult {
        rusher,
        blocker: None,
        margin: None,
        pressure: cfg.unblocked_pressure,
        sack: rng::chance(rng, cfg.unblocked_sack_chance),
        ol_knocked_down: false,
        dl_knocked_down: false,
    }
}

/// Draws the side effects of a bucket. Only non-zero chances consume draws.
pub fn apply_outcome<R: Rng + ?Sized>(
    rusher: usize,
    blocker: usize,
    margin: f32,
    outcome: &LineOutcome,
    rng: &mut R,
) -> PairingResult {
    let mut draw = |p: f32| p > 0.0 && rng::chance(&mut *rng, p);
    let sack = draw(outcome.sack_chance);
    let ol_knocked_down = draw(outcome.ol_knockdown_chance);
    let dl_knocked_down = draw(outcome.dl_knockdown_chance);
    PairingResult {
        rusher,
        blocker: Some(blocker),
        margin: Some(margin),
        pressure: outcome.pressure,
        sack,
        ol_knocked_down,
        dl_knocked_down,
    }
}

pub fn resolve_pairing<R: Rng + ?Sized>(
    rusher: usize,
    dl: &Player,
    blocker: Option<(usize, &Player)>,
    round: u8,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<PairingResult> {
    let Some((blocker_idx, ol)) = blocker else {
        return Ok(resolve_unblocked(rusher, &cfg.line, rng));
    };

    let variance = cfg.roll.variance_factor;
    let ol_roll = weighted_roll(&ol.attributes, &cfg.weights.pass_block, variance, rng)?;
    let dl_roll = weighted_roll(&dl.attributes, &cfg.weights.pass_rush, variance, rng)?
        + round_bonus(round, &cfg.line);
    let margin = dl_roll - ol_roll;

    log::trace!("line clash r{round}: {} vs {} margin {margin:.1}", dl.name, ol.name);
    let outcome = outcome_for_margin(margin, &cfg.line);
    Ok(apply_outcome(rusher, blocker_idx, margin, outcome, rng))
}

/// One round across the whole line. Rushers on the ground sit out. An
/// engaged rusher meets the lineman in the same slot unless that lineman
/// is down.
pub fn resolve_line_round<R: Rng + ?Sized>(
    offensive_line: &[Player],
    defensive_line: &[Player],
    ol_state: &[LinemanState],
    dl_state: &[LinemanState],
    round: u8,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<LineRound> {
    let mut line_round = LineRound::default();

    for (idx, dl) in defensive_line.iter().enumerate() {
        let rusher = dl_state.get(idx).copied().unwrap_or_default();
        if rusher.knocked_down {
            continue;
        }
        let blocker = offensive_line
            .get(idx)
            .filter(|_| rusher.engaged && !ol_state.get(idx).is_some_and(|s| s.knocked_down))
            .map(|ol| (idx, ol));

        let pairing = resolve_pairing(idx, dl, blocker, round, cfg, rng)?;
        line_round.pressure_added += pairing.pressure;
        if pairing.sack && line_round.sack_by.is_none() {
            line_round.sack_by = Some(idx);
        }
        line_round.pairings.push(pairing);
    }

    Ok(line_round)
}
