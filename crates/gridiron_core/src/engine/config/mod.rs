//! # Engine Configuration
//!
//! Every balance constant the resolvers read lives here, so tuning never
//! touches resolver logic.
//!
//! ## Usage
//! ```rust
//! use gridiron_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.roll.variance_factor <= config.roll.variance_factor);
//! ```
//!
//! ## Environment Variables
//!
//! - `GRIDIRON_CONFIG`: path to a YAML or JSON config file
//! - `GRIDIRON_PROFILE`: preset name (`realistic`, `arcade`, `deterministic`)

mod clash_config;
mod flow_config;
mod passing_config;
mod trait_config;
mod weights_config;

pub use clash_config::{LineClashConfig, LineOutcome, SeparationConfig, YacConfig};
pub use flow_config::{DriveConfig, PlayConfig};
pub use passing_config::{CatchConfig, DecisionConfig, InterceptionConfig};
pub use trait_config::{TraitParams, TraitTable};
pub use weights_config::{WeightTable, WeightsConfig};

use crate::engine::routes::RouteCatalog;
use crate::error::{EngineError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Process-wide default configuration
pub static DEFAULT_CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Symmetric multiplicative variance: rolls land in `total * (1 ± factor)`
    pub variance_factor: f32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self { variance_factor: 0.2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub roll: RollConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub line: LineClashConfig,
    #[serde(default)]
    pub separation: SeparationConfig,
    #[serde(default)]
    pub catch: CatchConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub interception: InterceptionConfig,
    #[serde(default)]
    pub yac: YacConfig,
    #[serde(default)]
    pub play: PlayConfig,
    #[serde(default)]
    pub drive: DriveConfig,
    #[serde(default)]
    pub traits: TraitTable,
    #[serde(default)]
    pub routes: RouteCatalog,
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Cleaner pockets and sharper throws; more points per drive.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.roll.variance_factor = 0.15;
        cfg.line.unblocked_sack_chance = 0.25;
        cfg.catch.roll_mean_base = 70.0;
        cfg.interception.max_chance = 25.0;
        cfg
    }

    /// No roll variance. Draws still happen so stream consumption matches.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.roll.variance_factor = 0.0;
        cfg
    }

    pub fn from_profile(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "deterministic" => Some(Self::deterministic()),
            _ => None,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.yaml`/`.yml`/`.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(EngineError::InvalidConfig(format!(
                "unsupported config extension {other:?} for {}",
                path.display()
            ))),
        }
    }

    /// `GRIDIRON_CONFIG` wins over `GRIDIRON_PROFILE`; any failure falls back
    /// to the default with a warning.
    pub fn from_env_or_default() -> Self {
        if let Ok(path) = env::var("GRIDIRON_CONFIG") {
            match Self::from_path(&path) {
                Ok(cfg) => return cfg,
                Err(err) => log::warn!("ignoring GRIDIRON_CONFIG={path}: {err}"),
            }
        }
        if let Ok(profile) = env::var("GRIDIRON_PROFILE") {
            match Self::from_profile(&profile) {
                Some(cfg) => return cfg,
                None => log::warn!("unknown GRIDIRON_PROFILE '{profile}', using default"),
            }
        }
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        for table in self.weights.tables() {
            if table.is_empty() {
                return Err(EngineError::InvalidWeightTable { table: table.name.clone() });
            }
        }
        if !is_ratio(self.roll.variance_factor) {
            return Err(invalid("roll.variance_factor must lie in [0, 1]"));
        }
        if !self.line.table.is_sorted_descending() {
            return Err(invalid("line.table rows must be sorted high to low"));
        }
        if !self.catch.separation_buckets.is_sorted_descending() {
            return Err(invalid("catch.separation_buckets rows must be sorted high to low"));
        }
        let line_ratios = self
            .line
            .table
            .rows
            .iter()
            .map(|row| &row.value)
            .chain(std::iter::once(&self.line.table.floor))
            .all(|o| {
                is_ratio(o.sack_chance) && is_ratio(o.ol_knockdown_chance) && is_ratio(o.dl_knockdown_chance)
            });
        if !line_ratios || !is_ratio(self.line.unblocked_sack_chance) {
            return Err(invalid("line clash chances must lie in [0, 1]"));
        }
        if self.line.sack_yards_min > self.line.sack_yards_max {
            return Err(invalid("line.sack_yards_min exceeds sack_yards_max"));
        }
        if !is_non_negative(self.line.max_pressure) {
            return Err(invalid("line.max_pressure must be non-negative"));
        }
        if self.yac.segment_min.is_nan() || self.yac.segment_min > self.yac.segment_max {
            return Err(invalid("yac.segment_min exceeds segment_max"));
        }
        if !is_non_negative(self.decision.vision_noise) {
            return Err(invalid("decision.vision_noise must be finite and non-negative"));
        }
        let int = &self.interception;
        if !is_non_negative(int.badness_cap) {
            return Err(invalid("interception.badness_cap must be non-negative"));
        }
        if int.min_chance.is_nan() || int.min_chance > int.max_chance {
            return Err(invalid("interception.min_chance exceeds max_chance"));
        }
        if self.catch.min_threshold > self.catch.max_threshold {
            return Err(invalid("catch.min_threshold exceeds max_threshold"));
        }
        if !(1..=20).contains(&self.play.max_rounds) {
            return Err(invalid("play.max_rounds must lie in 1..=20"));
        }
        if self.drive.max_plays == 0 {
            return Err(invalid("drive.max_plays must be at least 1"));
        }
        self.routes.validate()
    }
}

fn is_ratio(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(msg: &str) -> EngineError {
    EngineError::InvalidConfig(msg.to_string())
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert!((cfg.roll.variance_factor - 0.2).abs() < 1e-6);
        assert_eq!(cfg.play.max_rounds, 5);
        assert_eq!(cfg.drive.max_plays, 15);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        for cfg in [EngineConfig::realistic(), EngineConfig::arcade(), EngineConfig::deterministic()] {
            assert!(cfg.validate().is_ok());
        }
        assert_eq!(EngineConfig::deterministic().roll.variance_factor, 0.0);
    }

    #[test]
    fn test_arcade_throws_better() {
        let realistic = EngineConfig::realistic();
        let arcade = EngineConfig::arcade();
        assert!(arcade.catch.roll_mean_base < realistic.catch.roll_mean_base);
        assert!(arcade.line.unblocked_sack_chance < realistic.line.unblocked_sack_chance);
    }

    #[test]
    fn test_profile_lookup() {
        assert!(EngineConfig::from_profile("ARCADE").is_some());
        assert!(EngineConfig::from_profile("nonsense").is_none());
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let cfg = EngineConfig::from_yaml_str("roll:\n  variance_factor: 0.1\n").unwrap();
        assert!((cfg.roll.variance_factor - 0.1).abs() < 1e-6);
        assert_eq!(cfg.line, LineClashConfig::default());
    }

    #[test]
    fn test_empty_weight_table_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.weights.tackle.weights.clear();
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidWeightTable { .. })));
    }

    #[test]
    fn test_unsorted_line_table_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.line.table.rows.reverse();
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_vision_noise_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.decision.vision_noise = -1.0;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));
        cfg.decision.vision_noise = f32::NAN;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));
        cfg.decision.vision_noise = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_inverted_clamp_bounds_rejected() {
        let mut segments = EngineConfig::default();
        segments.yac.segment_min = 13.0;
        assert!(matches!(segments.validate(), Err(EngineError::InvalidConfig(_))));

        let mut pressure = EngineConfig::default();
        pressure.line.max_pressure = -1.0;
        assert!(matches!(pressure.validate(), Err(EngineError::InvalidConfig(_))));

        let mut int = EngineConfig::default();
        int.interception.min_chance = 40.0;
        assert!(matches!(int.validate(), Err(EngineError::InvalidConfig(_))));

        let mut cap = EngineConfig::default();
        cap.interception.badness_cap = -5.0;
        assert!(matches!(cap.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_path_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "drive:\n  max_plays: 12\n  last_down: 4\n  field_goal_range: 35\n  fg_base: 0.9\n  fg_distance_offset: 17\n  fg_per_yard: 0.01").unwrap();
        let cfg = EngineConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.drive.max_plays, 12);
        assert_eq!(cfg.drive.field_goal_range, 35);
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            EngineConfig::from_path(file.path()),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
