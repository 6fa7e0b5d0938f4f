// Batch drive statistics for balance tuning
// Run with: cargo run --bin drive_stats --release -- [drives] [seed]
//
// Config comes from GRIDIRON_CONFIG / GRIDIRON_PROFILE when set.

use anyhow::{Context, Result};
use gridiron_core::engine::{simulate_drives, BatchSummary, DriveSetup, EngineConfig};
use gridiron_core::models::{
    AttributeSet, CoverageAssignment, CoverageDefender, Defense, DriveOutcome, FieldPosition,
    Offense, Player, PlayerId, Position, QbTrait, ZoneDepth,
};

fn sample_setup() -> DriveSetup {
    let player =
        |id: u32, pos: Position, v: f32| Player::new(id, format!("{pos:?}{id}"), pos, AttributeSet::uniform(v));
    let offense = Offense {
        quarterback: player(1, Position::QB, 78.0),
        qb_trait: QbTrait::Balanced,
        receivers: vec![player(10, Position::WR, 76.0), player(11, Position::WR, 72.0), player(12, Position::TE, 68.0)],
        line: (60..65).map(|id| player(id, Position::OL, 70.0)).collect(),
    };
    let defense = Defense {
        line: (90..94).map(|id| player(id, Position::DL, 71.0)).collect(),
        coverage: vec![
            CoverageDefender {
                player: player(20, Position::CB, 74.0),
                assignment: CoverageAssignment::Man { receiver: PlayerId(10) },
            },
            CoverageDefender {
                player: player(21, Position::CB, 70.0),
                assignment: CoverageAssignment::Man { receiver: PlayerId(11) },
            },
            CoverageDefender {
                player: player(30, Position::LB, 69.0),
                assignment: CoverageAssignment::Zone { depth: ZoneDepth::Underneath },
            },
            CoverageDefender {
                player: player(40, Position::S, 72.0),
                assignment: CoverageAssignment::Zone { depth: ZoneDepth::Deep },
            },
        ],
    };
    DriveSetup::new(offense, defense, FieldPosition::default())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let drives: usize = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid drive count '{raw}'"))?,
        None => 1000,
    };
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid seed '{raw}'"))?,
        None => 42,
    };

    let cfg = EngineConfig::from_env_or_default();
    cfg.validate().context("engine config rejected")?;

    let setup = sample_setup();
    let results = simulate_drives(&setup, &cfg, seed, drives).context("batch simulation failed")?;
    let summary = BatchSummary::from_results(&results);

    println!("=== Drive statistics ({} drives, seed {}) ===", summary.drives, seed);
    println!();
    println!("{:<14} {:>8} {:>8}", "Outcome", "Count", "Rate");
    println!("{}", "-".repeat(32));
    for outcome in [
        DriveOutcome::Touchdown,
        DriveOutcome::FieldGoal,
        DriveOutcome::MissedFg,
        DriveOutcome::Punt,
        DriveOutcome::Turnover,
    ] {
        let count = summary.outcomes.get(&outcome).copied().unwrap_or(0);
        println!("{:<14} {:>8} {:>7.1}%", format!("{outcome:?}"), count, summary.outcome_rate(outcome) * 100.0);
    }

    println!();
    println!("{:<14} {:>8}", "Play kind", "Count");
    println!("{}", "-".repeat(23));
    for (kind, count) in &summary.play_kinds {
        println!("{:<14} {:>8}", format!("{kind:?}"), count);
    }

    println!();
    println!("Avg points:        {:.2}", summary.avg_points);
    println!("Avg plays:         {:.2}", summary.avg_plays);
    println!("Avg yards:         {:.1}", summary.avg_yards);
    println!("Completion rate:   {:.1}%", summary.completion_rate * 100.0);
    println!("Sack rate:         {:.1}%", summary.sack_rate * 100.0);
    println!("Interception rate: {:.1}%", summary.interception_rate * 100.0);
    Ok(())
}
