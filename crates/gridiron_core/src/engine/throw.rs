//! Throw, catch and interception resolution
//!
//! `qb_roll = -roll_mean * ln(u)`. A roll under the catch threshold is a
//! completion. A miss into coverage with negative separation also gets an
//! interception check scaled by how bad the throw was.

use super::config::InterceptionConfig;
use super::rng;
use crate::models::{Player, Skill};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    Complete,
    Incomplete,
    Intercepted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowResolution {
    pub qb_roll: f32,
    pub outcome: ThrowOutcome,
    /// Percent chance used when the interception check ran
    pub interception_chance: Option<f32>,
}

/// Exponential throw-quality sample. Lower is better.
pub fn throw_quality<R: Rng + ?Sized>(roll_mean: f32, rng: &mut R) -> f32 {
    (-(roll_mean as f64) * rng::open01(rng).ln()) as f32
}

/// Percent chance that a missed throw is picked off.
pub fn interception_chance(
    throw_badness: f32,
    separation_margin: f32,
    defender: &Player,
    cfg: &InterceptionConfig,
) -> f32 {
    let attrs = &defender.attributes;
    let mut chance = (throw_badness * cfg.badness_scale).clamp(0.0, cfg.badness_cap)
        + (attrs.value(Skill::Awareness) - cfg.awareness_baseline) * cfg.awareness_scale
        + (attrs.value(Skill::Catching) - cfg.catching_baseline) * cfg.catching_scale;
    if separation_margin < cfg.blanket_margin {
        chance += cfg.blanket_bonus;
    }
    chance.clamp(cfg.min_chance, cfg.max_chance)
}

pub fn resolve_throw<R: Rng + ?Sized>(
    roll_mean: f32,
    catch_threshold: f32,
    separation_margin: f32,
    defender: Option<&Player>,
    cfg: &InterceptionConfig,
    rng: &mut R,
) -> ThrowResolution {
    let qb_roll = throw_quality(roll_mean, rng);
    if qb_roll < catch_threshold {
        return ThrowResolution { qb_roll, outcome: ThrowOutcome::Complete, interception_chance: None };
    }

    match defender {
        Some(defender) if separation_margin < 0.0 => {
            let chance =
                interception_chance(qb_roll - catch_threshold, separation_margin, defender, cfg);
            let outcome = if rng::percent(rng, chance) {
                ThrowOutcome::Intercepted
            } else {
                ThrowOutcome::Incomplete
            };
            log::trace!("missed throw: badness {:.1}, int chance {chance:.1}%", qb_roll - catch_threshold);
            ThrowResolution { qb_roll, outcome, interception_chance: Some(chance) }
        }
        _ => ThrowResolution { qb_roll, outcome: ThrowOutcome::Incomplete, interception_chance: None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeSet, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn defender(awareness: f32, catching: Option<f32>) -> Player {
        let mut attrs = AttributeSet::new().with(Skill::Awareness, awareness);
        if let Some(c) = catching {
            attrs.set(Skill::Catching, c);
        }
        Player::new(30, "CB", Position::CB, attrs)
    }

    #[test]
    fn test_interception_chance_formula() {
        let cfg = InterceptionConfig::default();
        // 20*0.4 + (80-60)*0.2 + (70-50)*0.1 = 8 + 4 + 2
        let chance = interception_chance(20.0, -5.0, &defender(80.0, Some(70.0)), &cfg);
        assert!((chance - 14.0).abs() < 1e-4);
        let blanket = interception_chance(20.0, -11.0, &defender(80.0, Some(70.0)), &cfg);
        assert!((blanket - 19.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_catching_reads_as_fifty() {
        let cfg = InterceptionConfig::default();
        let chance = interception_chance(20.0, -5.0, &defender(60.0, None), &cfg);
        assert!((chance - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_interception_chance_clamped() {
        let cfg = InterceptionConfig::default();
        assert_eq!(interception_chance(0.0, -1.0, &defender(0.0, Some(0.0)), &cfg), 5.0);
        assert_eq!(interception_chance(500.0, -20.0, &defender(100.0, Some(100.0)), &cfg), 35.0);
    }

    #[test]
    fn test_blanketed_miss_runs_interception_check() {
        let cfg = InterceptionConfig::default();
        let cb = defender(70.0, Some(60.0));
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut checked = 0;
        for _ in 0..500 {
            let res = resolve_throw(80.0, 5.0, -15.0, Some(&cb), &cfg, &mut rng);
            if res.outcome != ThrowOutcome::Complete {
                assert!(res.interception_chance.is_some(), "check skipped at margin -15");
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_no_check_with_positive_separation_or_no_defender() {
        let cfg = InterceptionConfig::default();
        let cb = defender(70.0, Some(60.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let res = resolve_throw(80.0, 5.0, 2.0, Some(&cb), &cfg, &mut rng);
            assert!(res.interception_chance.is_none());
            assert_ne!(res.outcome, ThrowOutcome::Intercepted);
            let res = resolve_throw(80.0, 5.0, -15.0, None, &cfg, &mut rng);
            assert!(res.interception_chance.is_none());
        }
    }

    #[test]
    fn test_completion_rate_matches_exponential_model() {
        let cfg = InterceptionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let trials = 20_000;
        let completions = (0..trials)
            .filter(|_| resolve_throw(62.0, 70.0, 10.0, None, &cfg, &mut rng).outcome == ThrowOutcome::Complete)
            .count();
        let rate = completions as f64 / trials as f64;
        assert!((rate - 0.677).abs() < 0.02, "completion rate {rate}");
    }
}
