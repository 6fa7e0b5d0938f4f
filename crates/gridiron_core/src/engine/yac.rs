//! Yards after catch
//!
//! A close defender gets one catch-point tackle. After that the carrier runs
//! up to `max_segments` segments, each contested by the next pursuer in line.
//! A tackle credits a share of that segment and ends the run.

use super::config::{EngineConfig, YacConfig};
use super::roll::weighted_roll;
use crate::error::Result;
use crate::models::{CoverageDefender, FieldPosition, Player, PlayerId, Skill};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YacOutcome {
    /// Total yards from the line of scrimmage, capped at the goal line
    pub yards: i32,
    pub tackler: Option<PlayerId>,
    pub touchdown: bool,
    pub segments: u8,
}

/// Tackle holds unless the carrier wins by more than the margin.
#[inline]
pub fn tackle_succeeds(margin: f32, cfg: &YacConfig) -> bool {
    margin >= cfg.tackle_margin
}

#[inline]
pub fn segment_yards(run_roll: f32, cfg: &YacConfig) -> f32 {
    (cfg.segment_base + run_roll / 100.0 * cfg.segment_scale).clamp(cfg.segment_min, cfg.segment_max)
}

/// `tackle_roll + bonus - evasion_roll`
pub fn tackle_margin<R: Rng + ?Sized>(
    tackler: &Player,
    carrier: &Player,
    bonus: f32,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<f32> {
    let variance = cfg.roll.variance_factor;
    let tackle = weighted_roll(&tackler.attributes, &cfg.weights.tackle, variance, rng)? + bonus;
    let evasion = weighted_roll(&carrier.attributes, &cfg.weights.evasion, variance, rng)?;
    Ok(tackle - evasion)
}

/// Coverage indices by pursuit, fastest first; equal pursuit keeps order.
pub fn pursuit_order(coverage: &[CoverageDefender], exclude: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..coverage.len()).filter(|&idx| Some(idx) != exclude).collect();
    order.sort_by(|&a, &b| {
        let pa = coverage[a].player.attributes.value(Skill::Pursuit);
        let pb = coverage[b].player.attributes.value(Skill::Pursuit);
        pb.total_cmp(&pa)
    });
    order
}

pub fn resolve_yac<R: Rng + ?Sized>(
    carrier: &Player,
    catch_depth: f32,
    separation_margin: f32,
    primary_defender: Option<usize>,
    coverage: &[CoverageDefender],
    field: &FieldPosition,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<YacOutcome> {
    let yac = &cfg.yac;
    let goal = field.yards_from_goal;
    let finish = |yards: f32, tackler: Option<PlayerId>, segments: u8| {
        let yards = yards.round() as i32;
        if yards >= goal {
            YacOutcome { yards: goal, tackler: None, touchdown: true, segments }
        } else {
            YacOutcome { yards, tackler, touchdown: false, segments }
        }
    };

    let mut yards = catch_depth;
    let close = primary_defender.filter(|_| separation_margin < yac.immediate_range);
    if let Some(idx) = close {
        let defender = &coverage[idx].player;
        let margin = tackle_margin(defender, carrier, yac.catch_point_bonus, cfg, rng)?;
        if tackle_succeeds(margin, yac) {
            log::trace!("catch-point tackle by {} (margin {margin:.1})", defender.name);
            return Ok(finish(yards, Some(defender.id), 0));
        }
    }

    let pursuers = pursuit_order(coverage, close);
    let mut segments = 0;
    for attempt in 0..yac.max_segments {
        segments += 1;
        let run = weighted_roll(&carrier.attributes, &cfg.weights.yac_run, cfg.roll.variance_factor, rng)?;
        let gain = segment_yards(run, yac);

        let Some(&idx) = pursuers.get(usize::from(attempt)) else {
            yards += gain;
            continue;
        };
        let tackler = &coverage[idx].player;
        let bonus = if tackler.position.is_safety() {
            yac.safety_bonus_base + f32::from(attempt) * yac.safety_bonus_per_attempt
        } else {
            0.0
        };
        if tackle_succeeds(tackle_margin(tackler, carrier, bonus, cfg, rng)?, yac) {
            yards += gain * yac.tackled_share;
            return Ok(finish(yards, Some(tackler.id), segments));
        }
        yards += gain;
        if yards.round() as i32 >= goal {
            break;
        }
    }

    Ok(finish(yards, None, segments))
}
