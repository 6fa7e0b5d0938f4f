//! Quarterback trait parameters

use crate::models::QbTrait;
use serde::{Deserialize, Serialize};

/// Decision parameters for one quarterback personality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitParams {
    /// Separation below which a target is considered covered (-20 score)
    pub open_threshold: f32,
    /// Scales how strongly pressure pushes the ball out
    pub pressure_multiplier: f32,
    /// Score bonus for targets at or past the line to gain
    pub first_down_bias: f32,
    /// Score multiplier for contested targets (separation < 5)
    pub aggressiveness: f32,
    /// Chance (percent) to scramble on a desperation resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scramble_bonus: Option<f32>,
}

/// Closed trait → params mapping. Each field is one `QbTrait` variant, so a
/// missing profile fails at deserialization rather than at lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitTable {
    pub gunslinger: TraitParams,
    pub game_manager: TraitParams,
    pub balanced: TraitParams,
    pub scrambler: TraitParams,
}

impl Default for TraitTable {
    fn default() -> Self {
        Self {
            gunslinger: TraitParams {
                open_threshold: -5.0,
                pressure_multiplier: 0.8,
                first_down_bias: 10.0,
                aggressiveness: 1.3,
                scramble_bonus: None,
            },
            game_manager: TraitParams {
                open_threshold: 8.0,
                pressure_multiplier: 1.2,
                first_down_bias: 15.0,
                aggressiveness: 0.7,
                scramble_bonus: None,
            },
            balanced: TraitParams {
                open_threshold: 3.0,
                pressure_multiplier: 1.0,
                first_down_bias: 12.0,
                aggressiveness: 1.0,
                scramble_bonus: None,
            },
            scrambler: TraitParams {
                open_threshold: 5.0,
                pressure_multiplier: 0.6,
                first_down_bias: 8.0,
                aggressiveness: 0.9,
                scramble_bonus: Some(30.0),
            },
        }
    }
}

impl TraitTable {
    pub fn params(&self, qb_trait: QbTrait) -> &TraitParams {
        match qb_trait {
            QbTrait::Gunslinger => &self.gunslinger,
            QbTrait::GameManager => &self.game_manager,
            QbTrait::Balanced => &self.balanced,
            QbTrait::Scrambler => &self.scrambler,
        }
    }
}
