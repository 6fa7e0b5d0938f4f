//! Quarterback reads and throw decision
//!
//! Each round the quarterback first reads which receivers are visible, then
//! scores them with the trait profile and rolls whether to let the ball go.

use super::config::{DecisionConfig, EngineConfig, TraitParams};
use super::play_state::{PlayState, ReceiverState};
use super::rng;
use super::roll::weighted_roll;
use crate::error::Result;
use crate::models::{FieldPosition, Player};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QbDecision {
    /// Throw to the receiver at `target` (index into the play's receivers)
    Throw { target: usize, score: f32, likelihood: f32 },
    /// Nobody visible and the pocket forced the ball away
    Throwaway { likelihood: f32 },
    /// Keep reading; the play moves to the next round
    Hold { likelihood: f32 },
}

#[inline]
pub fn notice_threshold(separation_margin: f32, cfg: &DecisionConfig) -> f32 {
    cfg.notice_base - separation_margin
}

/// Vision roll plus uniform noise against the notice threshold.
pub fn notices<R: Rng + ?Sized>(
    qb: &Player,
    separation_margin: f32,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<bool> {
    let vision = weighted_roll(&qb.attributes, &cfg.weights.qb_vision, cfg.roll.variance_factor, rng)?;
    let noise = cfg.decision.vision_noise;
    let noisy = vision + rng.gen_range(-noise..=noise);
    Ok(noisy >= notice_threshold(separation_margin, &cfg.decision))
}

/// Refresh every receiver's visibility for this round.
pub fn read_field<R: Rng + ?Sized>(
    mut state: PlayState,
    qb: &Player,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<PlayState> {
    for receiver in state.receivers.iter_mut() {
        receiver.visible = notices(qb, receiver.separation_margin, cfg, rng)?;
    }
    Ok(state)
}

/// Trait-weighted utility of throwing to `receiver` this round.
pub fn score_target(
    receiver: &ReceiverState,
    field: &FieldPosition,
    round: u8,
    params: &TraitParams,
    cfg: &DecisionConfig,
) -> f32 {
    let mut score = receiver.catch_probability;
    if receiver.current_depth >= field.yards_to_go as f32 {
        score += params.first_down_bias;
    } else {
        score -= f32::from(round) * cfg.late_round_penalty;
        if field.down >= cfg.late_down {
            score -= cfg.late_down_penalty;
        }
    }
    if receiver.separation_margin < params.open_threshold {
        score -= cfg.covered_penalty;
    }
    if receiver.separation_margin < cfg.contested_margin {
        score *= params.aggressiveness;
    }
    score
}

/// Highest-scoring visible receiver; ties keep receiver order.
pub fn pick_target(
    state: &PlayState,
    field: &FieldPosition,
    params: &TraitParams,
    cfg: &DecisionConfig,
) -> Option<(usize, f32)> {
    state
        .receivers
        .iter()
        .enumerate()
        .filter(|(_, r)| r.visible)
        .map(|(idx, r)| (idx, score_target(r, field, state.round, params, cfg)))
        .fold(None, |best, (idx, score)| match best {
            Some((_, s)) if s >= score => best,
            _ => Some((idx, score)),
        })
}

/// Throw likelihood as a percentage. `None` scores the throwaway path.
pub fn throw_likelihood(
    candidate_score: Option<f32>,
    total_pressure: f32,
    round: u8,
    params: &TraitParams,
    cfg: &DecisionConfig,
) -> f32 {
    let round = f32::from(round);
    match candidate_score {
        Some(score) => {
            let mut likelihood = score
                + total_pressure * params.pressure_multiplier * cfg.pressure_scale
                + round * cfg.round_urgency;
            if total_pressure > cfg.panic_pressure {
                likelihood += cfg.panic_bonus;
            }
            likelihood
        }
        None => total_pressure * cfg.throwaway_pressure_scale + round * cfg.throwaway_round_urgency,
    }
}

/// Decide this round. Consumes exactly one draw.
pub fn decide<R: Rng + ?Sized>(
    state: &PlayState,
    field: &FieldPosition,
    cfg: &EngineConfig,
    rng: &mut R,
) -> QbDecision {
    let params = cfg.traits.params(state.qb.qb_trait);
    let candidate = pick_target(state, field, params, &cfg.decision);
    let likelihood =
        throw_likelihood(candidate.map(|(_, s)| s), state.total_pressure, state.round, params, &cfg.decision);
    let go = rng::percent(rng, likelihood);
    match candidate {
        Some((target, score)) if go => QbDecision::Throw { target, score, likelihood },
        None if go => QbDecision::Throwaway { likelihood },
        _ => QbDecision::Hold { likelihood },
    }
}
