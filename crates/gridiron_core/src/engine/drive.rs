//! Drive orchestrator
//!
//! Snaps plays until the possession ends: touchdown, interception, a kick
//! once a failed fourth down leaves the offense past its last down, or the
//! play-count safety valve.

use super::config::EngineConfig;
use super::play::resolve_snap;
use super::rng;
use super::routes::select_routes;
use crate::error::Result;
use crate::models::{
    Defense, DriveOutcome, DriveResult, FieldPosition, Offense, PlayLogEntry, PlayResult,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rosters and starting spot for one possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveSetup {
    pub offense: Offense,
    pub defense: Defense,
    #[serde(default)]
    pub start: FieldPosition,
}

impl DriveSetup {
    pub fn new(offense: Offense, defense: Defense, start: FieldPosition) -> Self {
        Self { offense, defense, start }
    }
}

pub fn simulate_drive<R: Rng + ?Sized>(
    setup: &DriveSetup,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<DriveResult> {
    cfg.validate()?;
    setup.offense.validate()?;
    setup.defense.validate()?;

    let mut field = setup.start;
    let mut plays: Vec<PlayResult> = Vec::new();
    let mut log: Vec<PlayLogEntry> = Vec::new();

    while plays.len() < cfg.drive.max_plays {
        let routes = select_routes(&setup.offense.receivers, &field, &cfg.routes, rng)?;
        let report = resolve_snap(&setup.offense, &setup.defense, &field, &routes, cfg, rng)?;
        log.push(PlayLogEntry { field, rounds: report.rounds, total_pressure: report.total_pressure });

        let result = report.result;
        let turnover = result.is_turnover();
        let touchdown = matches!(result, PlayResult::Touchdown { .. });
        field = field.advance(result.yards());
        plays.push(result);

        if turnover {
            return Ok(finish(DriveOutcome::Turnover, plays, log, field));
        }
        if touchdown || field.in_end_zone() {
            return Ok(finish(DriveOutcome::Touchdown, plays, log, field));
        }
        if field.down > cfg.drive.last_down {
            let outcome = kick(&field, cfg, rng);
            return Ok(finish(outcome, plays, log, field));
        }
    }

    log::warn!(
        "drive hit the {}-play safety valve at {} yards from goal; punting",
        cfg.drive.max_plays,
        field.yards_from_goal
    );
    Ok(finish(DriveOutcome::Punt, plays, log, field))
}

/// Turnover-on-downs kick from the spot: field goal inside range, punt outside it.
pub fn kick<R: Rng + ?Sized>(field: &FieldPosition, cfg: &EngineConfig, rng: &mut R) -> DriveOutcome {
    let drive = &cfg.drive;
    if field.yards_from_goal > drive.field_goal_range {
        return DriveOutcome::Punt;
    }
    if rng::chance(rng, drive.field_goal_chance(field.yards_from_goal)) {
        DriveOutcome::FieldGoal
    } else {
        DriveOutcome::MissedFg
    }
}

fn finish(
    outcome: DriveOutcome,
    plays: Vec<PlayResult>,
    log: Vec<PlayLogEntry>,
    final_field: FieldPosition,
) -> DriveResult {
    log::debug!("drive over: {outcome:?} after {} plays", plays.len());
    DriveResult { points: outcome.points(), outcome, plays, log, final_field }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        AttributeSet, CoverageAssignment, CoverageDefender, Player, PlayerId, Position, QbTrait,
        ZoneDepth,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(off: f32, def: f32, start: FieldPosition) -> DriveSetup {
        let player = |id: u32, pos: Position, v: f32| Player::new(id, format!("{pos:?}{id}"), pos, AttributeSet::uniform(v));
        let offense = Offense {
            quarterback: player(1, Position::QB, off),
            qb_trait: QbTrait::Balanced,
            receivers: vec![player(10, Position::WR, off), player(11, Position::WR, off), player(12, Position::TE, off)],
            line: (60..65).map(|id| player(id, Position::OL, off)).collect(),
        };
        let man = |id: u32, on: u32| CoverageDefender {
            player: player(id, Position::CB, def),
            assignment: CoverageAssignment::Man { receiver: PlayerId(on) },
        };
        let defense = Defense {
            line: (90..94).map(|id| player(id, Position::DL, def)).collect(),
            coverage: vec![
                man(20, 10),
                man(21, 11),
                man(22, 12),
                CoverageDefender {
                    player: player(40, Position::S, def),
                    assignment: CoverageAssignment::Zone { depth: ZoneDepth::Deep },
                },
            ],
        };
        DriveSetup::new(offense, defense, start)
    }

    #[test]
    fn test_drive_terminates_with_consistent_result() {
        let cfg = EngineConfig::default();
        let setup = setup(70.0, 70.0, FieldPosition::default());
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let drive = simulate_drive(&setup, &cfg, &mut rng).unwrap();
            assert!(!drive.plays.is_empty());
            assert!(drive.plays.len() <= cfg.drive.max_plays);
            assert_eq!(drive.plays.len(), drive.log.len());
            assert_eq!(drive.points, drive.outcome.points());
            match drive.outcome {
                DriveOutcome::Touchdown => assert_eq!(drive.final_field.yards_from_goal, 0),
                DriveOutcome::Turnover => assert!(drive.plays.last().is_some_and(PlayResult::is_turnover)),
                DriveOutcome::FieldGoal | DriveOutcome::MissedFg => {
                    assert!(drive.final_field.down > cfg.drive.last_down);
                    assert!(drive.final_field.yards_from_goal <= cfg.drive.field_goal_range)
                }
                DriveOutcome::Punt => {}
            }
        }
    }

    #[test]
    fn test_failed_fourth_down_in_range_kicks_field_goal() {
        let cfg = EngineConfig::default();
        let start = FieldPosition::new(35, 6, 4);
        let setup = setup(70.0, 70.0, start);
        let mut failed = 0;
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let drive = simulate_drive(&setup, &cfg, &mut rng).unwrap();
            assert_eq!(drive.log[0].field, start, "the 4th-down play is snapped");

            let first = &drive.plays[0];
            if first.yards() == 0 && !first.is_turnover() {
                failed += 1;
                assert_eq!(drive.plays.len(), 1);
                assert_eq!(drive.final_field, FieldPosition::new(35, 6, 5));
                assert!(
                    matches!(drive.outcome, DriveOutcome::FieldGoal | DriveOutcome::MissedFg),
                    "failed 4th down at 35 resolved to {:?}",
                    drive.outcome
                );
            } else if first.yards() >= 6 && !matches!(first, PlayResult::Touchdown { .. }) {
                assert_eq!(drive.log[1].field.down, 1, "conversion keeps the drive alive");
            }
        }
        assert!(failed > 0);
    }

    #[test]
    fn test_failed_fourth_down_out_of_range_punts() {
        let cfg = EngineConfig::default();
        let setup = setup(70.0, 70.0, FieldPosition::new(45, 6, 4));
        let mut failed = 0;
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let drive = simulate_drive(&setup, &cfg, &mut rng).unwrap();
            let first = &drive.plays[0];
            if first.yards() == 0 && !first.is_turnover() {
                failed += 1;
                assert_eq!(drive.outcome, DriveOutcome::Punt);
                assert_eq!(drive.final_field.yards_from_goal, 45);
            }
        }
        assert!(failed > 0);
    }

    #[test]
    fn test_drive_start_on_fourth_down_snaps_a_play() {
        let cfg = EngineConfig::default();
        let setup = setup(70.0, 70.0, FieldPosition::new(35, 6, 4));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let drive = simulate_drive(&setup, &cfg, &mut rng).unwrap();
        assert!(!drive.plays.is_empty());
    }

    #[test]
    fn test_field_goal_rate_tracks_distance() {
        let cfg = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let trials = 10_000;
        let made = (0..trials)
            .filter(|_| kick(&FieldPosition::new(30, 5, 5), &cfg, &mut rng) == DriveOutcome::FieldGoal)
            .count();
        // 0.95 - 47 * 0.01 = 0.48
        let rate = made as f64 / trials as f64;
        assert!((rate - 0.48).abs() < 0.03, "fg rate {rate}");
    }

    #[test]
    fn test_safety_valve_punts() {
        let mut cfg = EngineConfig::default();
        cfg.drive.max_plays = 1;
        cfg.drive.last_down = u8::MAX;
        let setup = setup(70.0, 70.0, FieldPosition::default());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let drive = simulate_drive(&setup, &cfg, &mut rng).unwrap();
        assert_eq!(drive.plays.len(), 1);
        if !matches!(drive.outcome, DriveOutcome::Touchdown | DriveOutcome::Turnover) {
            assert_eq!(drive.outcome, DriveOutcome::Punt);
        }
    }

    #[test]
    fn test_empty_receivers_rejected() {
        let cfg = EngineConfig::default();
        let mut setup = setup(70.0, 70.0, FieldPosition::default());
        setup.offense.receivers.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            simulate_drive(&setup, &cfg, &mut rng),
            Err(EngineError::EmptyRoster { group: "receivers" })
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_any_snap() {
        let mut cfg = EngineConfig::default();
        cfg.decision.vision_noise = -1.0;
        let setup = setup(70.0, 70.0, FieldPosition::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(simulate_drive(&setup, &cfg, &mut rng), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_log_records_pre_snap_field() {
        let cfg = EngineConfig::default();
        let start = FieldPosition::new(60, 10, 1);
        let setup = setup(75.0, 60.0, start);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let drive = simulate_drive(&setup, &cfg, &mut rng).unwrap();
        assert_eq!(drive.log.first().map(|e| e.field), Some(start));
        let mut field = start;
        for (entry, play) in drive.log.iter().zip(&drive.plays) {
            assert_eq!(entry.field, field);
            field = field.advance(play.yards());
        }
        assert_eq!(field, drive.final_field);
    }
}
