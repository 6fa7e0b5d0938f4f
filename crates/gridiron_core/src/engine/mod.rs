pub mod batch;
pub mod catch_prob;
pub mod config;
pub mod drive;
pub mod line_clash;
pub mod play;
pub mod play_state;
pub mod qb_decision;
pub mod rng;
pub mod roll;
pub mod routes;
pub mod separation;
pub mod threshold;
pub mod throw;
pub mod yac;

pub use batch::{simulate_drives, BatchSummary};
pub use config::{EngineConfig, DEFAULT_CONFIG};
pub use drive::{simulate_drive, DriveSetup};
pub use play::{run_play, PlayReport};
pub use play_state::{PlayPhase, PlayState, RoundSnapshot};
pub use routes::{select_routes, FieldZone, RouteCatalog, RouteTemplate};
pub use threshold::{Comparison, ThresholdTable};
