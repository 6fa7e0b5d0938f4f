//! Separation clash: receiver vs coverage
//!
//! The receiver's depth follows its route. Uncovered receivers are wide open.
//! Otherwise the receiver roll (with crossing and break bonuses) is compared
//! to the best roll among every covering defender; bracket coverage adds a
//! flat bonus to that best roll.

use super::config::{EngineConfig, SeparationConfig};
use super::roll::weighted_roll;
use super::routes::RouteTemplate;
use crate::error::Result;
use crate::models::{CoverageDefender, Player, Skill};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationResult {
    pub current_depth: f32,
    pub margin: f32,
    /// Index into the coverage group of the best defender
    pub primary_defender: Option<usize>,
    pub defender_count: usize,
    pub crossing: bool,
    pub is_break: bool,
}

/// Receiver bonus for a crossing round.
#[inline]
pub fn crossing_bonus(agility: f32, route_running: f32, cfg: &SeparationConfig) -> f32 {
    (agility * cfg.crossing_agility_weight + route_running * cfg.crossing_route_weight)
        * cfg.crossing_scale
}

#[inline]
pub fn break_bonus(route_running: f32, cfg: &SeparationConfig) -> f32 {
    route_running * cfg.break_route_weight
}

/// Defender penalty for chasing a crossing route.
#[inline]
pub fn crossing_penalty(defender_agility: f32, cfg: &SeparationConfig) -> f32 {
    (100.0 - defender_agility) * cfg.crossing_coverage_penalty
}

/// Indices of every defender on this receiver at `depth`.
pub fn covering_defenders(receiver: &Player, depth: f32, coverage: &[CoverageDefender]) -> Vec<usize> {
    coverage
        .iter()
        .enumerate()
        .filter(|(_, d)| d.covers(receiver.id, depth))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn resolve_receiver<R: Rng + ?Sized>(
    receiver: &Player,
    route: &RouteTemplate,
    round: u8,
    coverage: &[CoverageDefender],
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<SeparationResult> {
    let sep = &cfg.separation;
    let step = route.step(round);
    let is_break = route.is_break(round);
    let covering = covering_defenders(receiver, step.target_depth, coverage);

    if covering.is_empty() {
        return Ok(SeparationResult {
            current_depth: step.target_depth,
            margin: sep.wide_open_margin,
            primary_defender: None,
            defender_count: 0,
            crossing: step.crossing,
            is_break,
        });
    }

    let variance = cfg.roll.variance_factor;
    let attrs = &receiver.attributes;
    let mut receiver_roll = weighted_roll(attrs, &cfg.weights.route, variance, rng)?;
    if step.crossing {
        receiver_roll +=
            crossing_bonus(attrs.value(Skill::Agility), attrs.value(Skill::RouteRunning), sep);
    }
    if is_break {
        receiver_roll += break_bonus(attrs.value(Skill::RouteRunning), sep);
    }

    let mut best: Option<(usize, f32)> = None;
    for &idx in &covering {
        let defender = &coverage[idx];
        let table =
            if defender.is_man() { &cfg.weights.man_coverage } else { &cfg.weights.zone_coverage };
        let mut roll = weighted_roll(&defender.player.attributes, table, variance, rng)?;
        if step.crossing {
            roll -= crossing_penalty(defender.player.attributes.value(Skill::Agility), sep);
        }
        if best.map_or(true, |(_, b)| roll > b) {
            best = Some((idx, roll));
        }
    }

    let (primary, mut defender_roll) = best.unwrap_or((covering[0], 0.0));
    if covering.len() > 1 {
        defender_roll += sep.double_coverage_bonus;
    }

    let margin = receiver_roll - defender_roll;
    log::trace!("separation r{round}: {} margin {margin:.1} vs {} defenders", receiver.name, covering.len());

    Ok(SeparationResult {
        current_depth: step.target_depth,
        margin,
        primary_defender: Some(primary),
        defender_count: covering.len(),
        crossing: step.crossing,
        is_break,
    })
}
