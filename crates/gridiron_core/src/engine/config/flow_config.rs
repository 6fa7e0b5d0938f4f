//! Play and drive flow constants

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub max_rounds: u8,

    // === Desperation fallback ===
    pub coverage_sack_pressure: f32,
    pub coverage_sack_chance: f32,
    pub scramble_speed_scale: f32,
    pub scramble_agility_scale: f32,
    pub scramble_random_max: f32,
    /// Best catch threshold needed to attempt a desperation throw
    pub desperation_min_threshold: f32,
    pub desperation_discount: f32,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            coverage_sack_pressure: 60.0,
            coverage_sack_chance: 0.40,
            scramble_speed_scale: 0.1,
            scramble_agility_scale: 0.05,
            scramble_random_max: 5.0,
            desperation_min_threshold: 20.0,
            desperation_discount: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Safety valve; a drive never runs more plays than this
    pub max_plays: usize,
    /// A play that leaves the offense past this down ends the drive in a kick
    pub last_down: u8,
    pub field_goal_range: i32,
    pub fg_base: f32,
    pub fg_distance_offset: i32,
    pub fg_per_yard: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            max_plays: 15,
            last_down: 4,
            field_goal_range: 40,
            fg_base: 0.95,
            fg_distance_offset: 17,
            fg_per_yard: 0.01,
        }
    }
}

impl DriveConfig {
    /// `0.95 - (yards_from_goal + 17) * 0.01`, clamped to [0, 1].
    pub fn field_goal_chance(&self, yards_from_goal: i32) -> f32 {
        let kick_distance = (yards_from_goal + self.fg_distance_offset) as f32;
        (self.fg_base - kick_distance * self.fg_per_yard).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_goal_chance() {
        let cfg = DriveConfig::default();
        assert!((cfg.field_goal_chance(35) - 0.43).abs() < 1e-5);
        assert!((cfg.field_goal_chance(3) - 0.75).abs() < 1e-5);
        assert!(cfg.field_goal_chance(3) > cfg.field_goal_chance(35));
    }
}
