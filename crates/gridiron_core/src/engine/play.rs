//! Play orchestrator
//!
//! Runs the round loop: line clash, separation, catch calc, QB decision. A
//! throw resolves the play; otherwise the next round starts. Past the round
//! cap the desperation fallback guarantees a result.

use super::catch_prob::{qb_accuracy, receiver_threshold, roll_mean};
use super::config::EngineConfig;
use super::line_clash::{accumulate_pressure, resolve_line_round, sack_yards};
use super::play_state::{PlayPhase, PlayState, ReceiverState, RoundSnapshot};
use super::qb_decision::{decide, read_field, QbDecision};
use super::rng;
use super::routes::RouteTemplate;
use super::separation::resolve_receiver;
use super::throw::{resolve_throw, ThrowOutcome};
use super::yac::resolve_yac;
use crate::error::{EngineError, Result};
use crate::models::{Defense, FieldPosition, Offense, PlayResult, Skill};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of one snap plus its round-by-round trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayReport {
    pub result: PlayResult,
    /// Rounds played; `max_rounds + 1` when the desperation fallback ran
    pub rounds: u8,
    pub total_pressure: f32,
    pub snapshots: Vec<RoundSnapshot>,
}

/// Everything a single snap reads.
#[derive(Debug, Clone, Copy)]
pub struct Snap<'a> {
    pub offense: &'a Offense,
    pub defense: &'a Defense,
    pub field: &'a FieldPosition,
    pub cfg: &'a EngineConfig,
}

/// Validates `cfg` and resolves one snap.
pub fn run_play<R: Rng + ?Sized>(
    offense: &Offense,
    defense: &Defense,
    field: &FieldPosition,
    routes: &[&RouteTemplate],
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<PlayReport> {
    cfg.validate()?;
    resolve_snap(offense, defense, field, routes, cfg, rng)
}

/// Resolves one snap against an already validated config.
pub(crate) fn resolve_snap<R: Rng + ?Sized>(
    offense: &Offense,
    defense: &Defense,
    field: &FieldPosition,
    routes: &[&RouteTemplate],
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<PlayReport> {
    if routes.len() != offense.receivers.len() {
        return Err(EngineError::InvalidConfig(format!(
            "{} routes for {} receivers",
            routes.len(),
            offense.receivers.len()
        )));
    }
    let snap = Snap { offense, defense, field, cfg };

    let receivers = offense
        .receivers
        .iter()
        .zip(routes)
        .map(|(player, route)| ReceiverState::new(player.id, (*route).clone()))
        .collect();
    let mut state = PlayState::new(offense.line.len(), defense.line.len(), receivers, offense.qb_trait);
    let mut snapshots = Vec::with_capacity(usize::from(cfg.play.max_rounds) + 1);

    for _ in 0..=cfg.play.max_rounds {
        state = state.next_round();

        if state.round > cfg.play.max_rounds {
            state = state.with_phase(PlayPhase::Desperation);
            snapshots.push(RoundSnapshot::capture(&state));
            let result = desperation(&state, &snap, rng)?;
            return Ok(finish(result, state, snapshots));
        }

        let (next, sack) = line_phase(state, &snap, rng)?;
        state = next;
        if let Some(result) = sack {
            snapshots.push(RoundSnapshot::capture(&state));
            return Ok(finish(result, state, snapshots));
        }

        state = separation_phase(state, &snap, rng)?;
        state = catch_phase(state, &snap);
        state = read_field(state, &offense.quarterback, cfg, rng)?;

        match decide(&state, field, cfg, rng) {
            QbDecision::Throw { target, .. } => {
                state = state.thrown();
                snapshots.push(RoundSnapshot::capture(&state));
                let threshold = state.receivers[target].catch_probability;
                let result = throw_to(&state, target, threshold, &snap, rng)?;
                return Ok(finish(result, state, snapshots));
            }
            QbDecision::Throwaway { .. } => {
                state = state.thrown();
                snapshots.push(RoundSnapshot::capture(&state));
                let result = PlayResult::Throwaway { passer: offense.quarterback.id };
                return Ok(finish(result, state, snapshots));
            }
            QbDecision::Hold { likelihood } => {
                log::trace!("round {}: hold (likelihood {likelihood:.1}%)", state.round);
                snapshots.push(RoundSnapshot::capture(&state));
            }
        }
    }

    Err(EngineError::ExhaustedRoundsWithoutResolution { rounds: state.round })
}

fn finish(result: PlayResult, state: PlayState, snapshots: Vec<RoundSnapshot>) -> PlayReport {
    log::debug!(
        "play resolved: {:?} for {} yards after {} rounds (pressure {:.0})",
        result.kind(),
        result.yards(),
        state.round,
        state.total_pressure
    );
    PlayReport { result, rounds: state.round, total_pressure: state.total_pressure, snapshots }
}

/// Line clash for the current round. Returns the sack if one landed.
fn line_phase<R: Rng + ?Sized>(
    mut state: PlayState,
    snap: &Snap<'_>,
    rng: &mut R,
) -> Result<(PlayState, Option<PlayResult>)> {
    let line = resolve_line_round(
        &snap.offense.line,
        &snap.defense.line,
        &state.offensive_line,
        &state.defensive_line,
        state.round,
        snap.cfg,
        rng,
    )?;

    for pairing in &line.pairings {
        if pairing.dl_knocked_down {
            if let Some(dl) = state.defensive_line.get_mut(pairing.rusher) {
                dl.knocked_down = true;
            }
        }
        if pairing.ol_knocked_down {
            if let Some(ol) = pairing.blocker.and_then(|idx| state.offensive_line.get_mut(idx)) {
                ol.knocked_down = true;
            }
        }
    }
    state.total_pressure = accumulate_pressure(state.total_pressure, line.pressure_added, &snap.cfg.line);

    if let Some(rusher) = line.sack_by {
        state.sacked = true;
        let state = state.with_phase(PlayPhase::Sacked);
        let result = PlayResult::Sack {
            passer: snap.offense.quarterback.id,
            rusher: snap.defense.line.get(rusher).map(|p| p.id),
            yards: sack_yards(&snap.cfg.line, rng),
        };
        return Ok((state, Some(result)));
    }
    Ok((state.with_phase(PlayPhase::AwaitingSeparation), None))
}

fn separation_phase<R: Rng + ?Sized>(
    mut state: PlayState,
    snap: &Snap<'_>,
    rng: &mut R,
) -> Result<PlayState> {
    let round = state.round;
    for (receiver, player) in state.receivers.iter_mut().zip(&snap.offense.receivers) {
        let sep = resolve_receiver(player, &receiver.route, round, &snap.defense.coverage, snap.cfg, rng)?;
        receiver.current_depth = sep.current_depth;
        receiver.separation_margin = sep.margin;
        receiver.primary_defender = sep.primary_defender;
        receiver.defender_count = sep.defender_count;
    }
    Ok(state.with_phase(PlayPhase::AwaitingCatchCalc))
}

fn catch_phase(mut state: PlayState, snap: &Snap<'_>) -> PlayState {
    let catch = &snap.cfg.catch;
    let mean = roll_mean(qb_accuracy(&snap.offense.quarterback.attributes), state.total_pressure, catch);
    for (receiver, player) in state.receivers.iter_mut().zip(&snap.offense.receivers) {
        receiver.catch_probability =
            receiver_threshold(&player.attributes, receiver.separation_margin, receiver.current_depth, catch);
        receiver.roll_mean = mean;
    }
    state.with_phase(PlayPhase::AwaitingQbDecision)
}

/// Throw to `target` against `threshold`, running YAC on a completion.
fn throw_to<R: Rng + ?Sized>(
    state: &PlayState,
    target: usize,
    threshold: f32,
    snap: &Snap<'_>,
    rng: &mut R,
) -> Result<PlayResult> {
    let receiver = &state.receivers[target];
    let catcher = &snap.offense.receivers[target];
    let passer = snap.offense.quarterback.id;
    let defender = receiver.primary_defender.and_then(|idx| snap.defense.coverage.get(idx)).map(|d| &d.player);

    let throw = resolve_throw(
        receiver.roll_mean,
        threshold,
        receiver.separation_margin,
        defender,
        &snap.cfg.interception,
        rng,
    );

    let result = match throw.outcome {
        ThrowOutcome::Intercepted => match defender {
            Some(defender) => PlayResult::Interception { passer, target: catcher.id, defender: defender.id },
            None => PlayResult::Incomplete { passer, target: catcher.id, defender: None },
        },
        ThrowOutcome::Incomplete => {
            PlayResult::Incomplete { passer, target: catcher.id, defender: defender.map(|d| d.id) }
        }
        ThrowOutcome::Complete => {
            let yac = resolve_yac(
                catcher,
                receiver.current_depth,
                receiver.separation_margin,
                receiver.primary_defender,
                &snap.defense.coverage,
                snap.field,
                snap.cfg,
                rng,
            )?;
            if yac.touchdown {
                PlayResult::Touchdown { passer, target: catcher.id, yards: yac.yards }
            } else {
                PlayResult::Complete { passer, target: catcher.id, yards: yac.yards, tackler: yac.tackler }
            }
        }
    };
    Ok(result)
}

/// Forced resolution once the round cap is passed. Branches fall through in
/// order: coverage sack, scramble, discounted throw, throwaway.
fn desperation<R: Rng + ?Sized>(state: &PlayState, snap: &Snap<'_>, rng: &mut R) -> Result<PlayResult> {
    let play = &snap.cfg.play;
    let qb = &snap.offense.quarterback;

    if state.total_pressure > play.coverage_sack_pressure && rng::chance(rng, play.coverage_sack_chance) {
        return Ok(PlayResult::Sack { passer: qb.id, rusher: None, yards: sack_yards(&snap.cfg.line, rng) });
    }

    let params = snap.cfg.traits.params(state.qb.qb_trait);
    if let Some(bonus) = params.scramble_bonus {
        if rng::percent(rng, bonus) {
            let attrs = &qb.attributes;
            let extra = if play.scramble_random_max > 0.0 {
                rng.gen_range(0.0..play.scramble_random_max)
            } else {
                0.0
            };
            let gain = attrs.value(Skill::Speed) * play.scramble_speed_scale
                + attrs.value(Skill::Agility) * play.scramble_agility_scale
                + extra;
            let yards = (gain.round() as i32).min(snap.field.yards_from_goal);
            return Ok(PlayResult::Scramble { runner: qb.id, yards });
        }
    }

    if let Some(best) = state.best_receiver() {
        let threshold = state.receivers[best].catch_probability;
        if threshold > play.desperation_min_threshold {
            log::trace!("desperation throw at {:.1} (discounted)", threshold * play.desperation_discount);
            return throw_to(state, best, threshold * play.desperation_discount, snap, rng);
        }
    }

    Ok(PlayResult::Throwaway { passer: qb.id })
}
