//! Catch, decision and interception constants

use crate::engine::threshold::{Comparison, ThresholdTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchConfig {
    /// Separation margin → catch adjustment, inclusive thresholds
    pub separation_buckets: ThresholdTable<f32>,
    pub contested_margin: f32,
    pub focus_baseline: f32,
    pub focus_scale: f32,
    pub depth_penalty_start: f32,
    pub depth_penalty_scale: f32,
    pub min_threshold: f32,
    pub max_threshold: f32,

    // === Throw quality (exponential, lower is better) ===
    pub roll_mean_base: f32,
    pub accuracy_baseline: f32,
    pub accuracy_scale: f32,
    pub pressure_scale: f32,
}

impl Default for CatchConfig {
    fn default() -> Self {
        Self {
            separation_buckets: ThresholdTable::new(
                Comparison::Inclusive,
                vec![(20.0, 15.0), (10.0, 8.0), (3.0, 3.0), (-3.0, 0.0), (-10.0, -15.0)],
                -30.0,
            ),
            contested_margin: 5.0,
            focus_baseline: 70.0,
            focus_scale: 0.3,
            depth_penalty_start: 15.0,
            depth_penalty_scale: 0.3,
            min_threshold: 5.0,
            max_threshold: 95.0,

            roll_mean_base: 79.0,
            accuracy_baseline: 75.0,
            accuracy_scale: 1.7,
            pressure_scale: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Notice threshold is `notice_base - separation`
    pub notice_base: f32,
    /// Vision noise is uniform in `[-vision_noise, vision_noise]`
    pub vision_noise: f32,
    pub contested_margin: f32,
    pub late_round_penalty: f32,
    pub late_down: u8,
    pub late_down_penalty: f32,
    pub covered_penalty: f32,
    pub pressure_scale: f32,
    pub round_urgency: f32,
    pub panic_pressure: f32,
    pub panic_bonus: f32,
    pub throwaway_pressure_scale: f32,
    pub throwaway_round_urgency: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            notice_base: 70.0,
            vision_noise: 10.0,
            contested_margin: 5.0,
            late_round_penalty: 3.0,
            late_down: 3,
            late_down_penalty: 15.0,
            covered_penalty: 20.0,
            pressure_scale: 0.5,
            round_urgency: 8.0,
            panic_pressure: 70.0,
            panic_bonus: 30.0,
            throwaway_pressure_scale: 0.5,
            throwaway_round_urgency: 10.0,
        }
    }
}

/// Interception chances are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptionConfig {
    pub badness_scale: f32,
    pub badness_cap: f32,
    pub awareness_baseline: f32,
    pub awareness_scale: f32,
    pub catching_baseline: f32,
    pub catching_scale: f32,
    pub blanket_margin: f32,
    pub blanket_bonus: f32,
    pub min_chance: f32,
    pub max_chance: f32,
}

impl Default for InterceptionConfig {
    fn default() -> Self {
        Self {
            badness_scale: 0.4,
            badness_cap: 25.0,
            awareness_baseline: 60.0,
            awareness_scale: 0.2,
            catching_baseline: 50.0,
            catching_scale: 0.1,
            blanket_margin: -10.0,
            blanket_bonus: 5.0,
            min_chance: 5.0,
            max_chance: 35.0,
        }
    }
}
