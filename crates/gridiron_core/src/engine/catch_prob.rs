//! Catch threshold and throw quality
//!
//! A receiver's catch threshold blends hands, separation, contested focus and
//! route depth. Throw quality follows an exponential model where lower rolls
//! are better; `roll_mean` grows with inaccuracy and pressure.

use super::config::CatchConfig;
use crate::models::{AttributeSet, Skill};

/// Receiver's catch threshold, clamped to `[min_threshold, max_threshold]`.
pub fn catch_threshold(
    catching: f32,
    focus: f32,
    separation_margin: f32,
    current_depth: f32,
    cfg: &CatchConfig,
) -> f32 {
    let mut threshold = catching + *cfg.separation_buckets.lookup(separation_margin);
    if separation_margin < cfg.contested_margin {
        threshold += (focus - cfg.focus_baseline) * cfg.focus_scale;
    }
    threshold -= ((current_depth - cfg.depth_penalty_start) * cfg.depth_penalty_scale).max(0.0);
    threshold.clamp(cfg.min_threshold, cfg.max_threshold)
}

pub fn receiver_threshold(
    attrs: &AttributeSet,
    separation_margin: f32,
    current_depth: f32,
    cfg: &CatchConfig,
) -> f32 {
    catch_threshold(
        attrs.value(Skill::Catching),
        attrs.value(Skill::Focus),
        separation_margin,
        current_depth,
        cfg,
    )
}

#[inline]
pub fn qb_accuracy(attrs: &AttributeSet) -> f32 {
    (attrs.value(Skill::Throwing) + attrs.value(Skill::Awareness)) / 2.0
}

/// Mean of the exponential throw-quality draw.
pub fn roll_mean(accuracy: f32, total_pressure: f32, cfg: &CatchConfig) -> f32 {
    cfg.roll_mean_base
        + (cfg.accuracy_baseline - accuracy) * cfg.accuracy_scale
        + total_pressure * cfg.pressure_scale
}

/// Completion percentage implied by a threshold and roll mean. Analytics only;
/// the actual throw draws through [`super::throw`].
pub fn effective_completion(catch_threshold: f32, roll_mean: f32) -> f32 {
    if roll_mean <= 0.0 {
        return 100.0;
    }
    let p = 1.0 - (-(catch_threshold as f64) / roll_mean as f64).exp();
    (p * 100.0) as f32
}
