//! Line, separation and tackle clash constants

use crate::engine::threshold::{Comparison, ThresholdTable};
use serde::{Deserialize, Serialize};

/// Bucket of the line-clash margin table. Chances are fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOutcome {
    pub pressure: f32,
    #[serde(default)]
    pub sack_chance: f32,
    #[serde(default)]
    pub ol_knockdown_chance: f32,
    #[serde(default)]
    pub dl_knockdown_chance: f32,
}

impl LineOutcome {
    pub const fn pressure(pressure: f32) -> Self {
        Self { pressure, sack_chance: 0.0, ol_knockdown_chance: 0.0, dl_knockdown_chance: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineClashConfig {
    /// `dl_roll - ol_roll` → outcome, exclusive thresholds
    pub table: ThresholdTable<LineOutcome>,
    pub unblocked_pressure: f32,
    pub unblocked_sack_chance: f32,
    /// Added to the rusher roll per elapsed round: `(round - 1) * bonus`
    pub round_bonus: f32,
    pub max_pressure: f32,
    pub sack_yards_min: i32,
    pub sack_yards_max: i32,
}

impl Default for LineClashConfig {
    fn default() -> Self {
        Self {
            table: ThresholdTable::new(
                Comparison::Exclusive,
                vec![
                    (
                        20.0,
                        LineOutcome {
                            pressure: 35.0,
                            sack_chance: 0.25,
                            ol_knockdown_chance: 0.30,
                            dl_knockdown_chance: 0.0,
                        },
                    ),
                    (10.0, LineOutcome::pressure(25.0)),
                    (5.0, LineOutcome::pressure(15.0)),
                    (2.0, LineOutcome::pressure(10.0)),
                    (-2.0, LineOutcome::pressure(5.0)),
                    (-10.0, LineOutcome::pressure(0.0)),
                ],
                LineOutcome {
                    pressure: 0.0,
                    sack_chance: 0.0,
                    ol_knockdown_chance: 0.0,
                    dl_knockdown_chance: 0.20,
                },
            ),
            unblocked_pressure: 40.0,
            unblocked_sack_chance: 0.35,
            round_bonus: 5.0,
            max_pressure: 100.0,
            sack_yards_min: 5,
            sack_yards_max: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    /// Margin assigned to a receiver nobody covers
    pub wide_open_margin: f32,
    pub crossing_agility_weight: f32,
    pub crossing_route_weight: f32,
    pub crossing_scale: f32,
    pub break_route_weight: f32,
    /// Defender penalty per missing agility point on a crossing round
    pub crossing_coverage_penalty: f32,
    pub double_coverage_bonus: f32,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            wide_open_margin: 30.0,
            crossing_agility_weight: 0.3,
            crossing_route_weight: 0.2,
            crossing_scale: 0.5,
            break_route_weight: 0.3,
            crossing_coverage_penalty: 0.15,
            double_coverage_bonus: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YacConfig {
    /// A defender closer than this separation gets a catch-point tackle
    pub immediate_range: f32,
    pub catch_point_bonus: f32,
    /// Tackle holds while `tackle - evasion >= tackle_margin`
    pub tackle_margin: f32,
    pub max_segments: u8,
    pub segment_base: f32,
    pub segment_scale: f32,
    pub segment_min: f32,
    pub segment_max: f32,
    /// Share of a segment credited when the runner is tackled during it
    pub tackled_share: f32,
    pub safety_bonus_base: f32,
    pub safety_bonus_per_attempt: f32,
}

impl Default for YacConfig {
    fn default() -> Self {
        Self {
            immediate_range: 10.0,
            catch_point_bonus: 5.0,
            tackle_margin: -12.0,
            max_segments: 3,
            segment_base: 2.0,
            segment_scale: 10.0,
            segment_min: 2.0,
            segment_max: 12.0,
            tackled_share: 0.5,
            safety_bonus_base: 10.0,
            safety_bonus_per_attempt: 5.0,
        }
    }
}
