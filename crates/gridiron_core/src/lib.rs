//! # gridiron_core - Stat-Driven Play and Drive Resolution Engine
//!
//! Resolves a single passing play, and by composition a full possession,
//! from the attributes of two rosters through a sequence of weighted
//! random clashes: pass protection, separation, QB read, throw, catch,
//! interception and yards after catch.
//!
//! ## Features
//! - Deterministic given a seed (same seed = same drive, byte for byte)
//! - Every balance constant lives in an overridable `EngineConfig`
//! - Parallel batch simulation for balance analysis
//! - JSON API for host applications

// Game engine APIs often require many parameters for rosters, field and config
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally in tests and presets
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{effective_completion_json, simulate_drive_json, DriveRequest, DriveResponse};
pub use engine::{simulate_drive, simulate_drives, BatchSummary, DriveSetup, EngineConfig};
pub use error::{EngineError, Result};
pub use models::{
    AttributeSet, CoverageAssignment, CoverageDefender, Defense, DriveOutcome, DriveResult,
    FieldPosition, Offense, Player, PlayerId, PlayResult, Position, QbTrait, Skill,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
