//! Clash weight tables
//!
//! Weights need not sum to 1; each table is a named skill → weight map.

use crate::models::Skill;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub name: String,
    pub weights: BTreeMap<Skill, f32>,
}

impl WeightTable {
    pub fn new(name: impl Into<String>, weights: &[(Skill, f32)]) -> Self {
        Self { name: name.into(), weights: weights.iter().copied().collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, f32)> + '_ {
        self.weights.iter().map(|(&skill, &weight)| (skill, weight))
    }
}

/// Every weight table the resolvers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub pass_block: WeightTable,
    pub pass_rush: WeightTable,
    pub route: WeightTable,
    pub man_coverage: WeightTable,
    pub zone_coverage: WeightTable,
    pub qb_vision: WeightTable,
    pub tackle: WeightTable,
    pub evasion: WeightTable,
    pub yac_run: WeightTable,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        use Skill::*;
        Self {
            pass_block: WeightTable::new(
                "pass_block",
                &[(PassBlock, 0.35), (Strength, 0.30), (Balance, 0.20), (Awareness, 0.15)],
            ),
            pass_rush: WeightTable::new(
                "pass_rush",
                &[(PassRush, 0.35), (Strength, 0.30), (Acceleration, 0.20), (Speed, 0.15)],
            ),
            route: WeightTable::new(
                "route",
                &[
                    (Speed, 0.25),
                    (Agility, 0.25),
                    (RouteRunning, 0.20),
                    (Acceleration, 0.15),
                    (Release, 0.15),
                ],
            ),
            man_coverage: WeightTable::new(
                "man_coverage",
                &[
                    (Coverage, 0.30),
                    (Speed, 0.25),
                    (Agility, 0.20),
                    (Awareness, 0.15),
                    (Acceleration, 0.10),
                ],
            ),
            zone_coverage: WeightTable::new(
                "zone_coverage",
                &[
                    (Coverage, 0.25),
                    (Speed, 0.20),
                    (Agility, 0.20),
                    (Awareness, 0.15),
                    (Pursuit, 0.20),
                ],
            ),
            qb_vision: WeightTable::new(
                "qb_vision",
                &[(Awareness, 0.50), (Throwing, 0.30), (Focus, 0.20)],
            ),
            tackle: WeightTable::new(
                "tackle",
                &[(Tackling, 0.40), (Pursuit, 0.30), (HitPower, 0.30)],
            ),
            evasion: WeightTable::new(
                "evasion",
                &[(Agility, 0.35), (Speed, 0.30), (Balance, 0.35)],
            ),
            yac_run: WeightTable::new(
                "yac_run",
                &[(Speed, 0.30), (Acceleration, 0.20), (Agility, 0.25), (Balance, 0.25)],
            ),
        }
    }
}

impl WeightsConfig {
    pub fn tables(&self) -> [&WeightTable; 9] {
        [
            &self.pass_block,
            &self.pass_rush,
            &self.route,
            &self.man_coverage,
            &self.zone_coverage,
            &self.qb_vision,
            &self.tackle,
            &self.evasion,
            &self.yac_run,
        ]
    }
}
