//! Parallel drive batches for balance analysis
//!
//! Every drive owns its own generator seeded from `(base_seed, index)`, and
//! results are collected in index order, so a batch is reproducible
//! regardless of thread count.

use super::config::EngineConfig;
use super::drive::{simulate_drive, DriveSetup};
use super::rng::{derive_seed, seeded};
use crate::error::Result;
use crate::models::{DriveOutcome, DriveResult, PlayKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn simulate_drives(
    setup: &DriveSetup,
    cfg: &EngineConfig,
    base_seed: u64,
    count: usize,
) -> Result<Vec<DriveResult>> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = seeded(derive_seed(base_seed, i as u64));
            simulate_drive(setup, cfg, &mut rng)
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub drives: usize,
    pub avg_points: f64,
    pub avg_plays: f64,
    pub avg_yards: f64,
    pub outcomes: BTreeMap<DriveOutcome, usize>,
    pub play_kinds: BTreeMap<PlayKind, usize>,
    /// Completions per pass attempt
    pub completion_rate: f64,
    /// Sacks per snap
    pub sack_rate: f64,
    /// Interceptions per pass attempt
    pub interception_rate: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[DriveResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len() as f64;
        let mut summary = Self { drives: results.len(), ..Self::default() };

        let mut points = 0u64;
        let mut plays = 0usize;
        let mut yards = 0i64;
        let (mut attempts, mut completions, mut interceptions) = (0usize, 0usize, 0usize);

        for drive in results {
            points += u64::from(drive.points);
            plays += drive.plays.len();
            yards += i64::from(drive.total_yards());
            *summary.outcomes.entry(drive.outcome).or_default() += 1;
            for play in &drive.plays {
                *summary.play_kinds.entry(play.kind()).or_default() += 1;
                if play.is_pass_attempt() {
                    attempts += 1;
                }
                if play.is_completion() {
                    completions += 1;
                }
                if play.is_turnover() {
                    interceptions += 1;
                }
            }
        }

        let sacks = summary.play_kinds.get(&PlayKind::Sack).copied().unwrap_or(0);
        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

        summary.avg_points = points as f64 / n;
        summary.avg_plays = plays as f64 / n;
        summary.avg_yards = yards as f64 / n;
        summary.completion_rate = ratio(completions, attempts);
        summary.sack_rate = ratio(sacks, plays);
        summary.interception_rate = ratio(interceptions, attempts);
        summary
    }

    pub fn outcome_rate(&self, outcome: DriveOutcome) -> f64 {
        if self.drives == 0 {
            return 0.0;
        }
        self.outcomes.get(&outcome).copied().unwrap_or(0) as f64 / self.drives as f64
    }
}
