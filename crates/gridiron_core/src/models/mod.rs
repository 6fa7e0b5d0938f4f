pub mod attributes;
pub mod field;
pub mod player;
pub mod result;
pub mod roster;

pub use attributes::{AttributeSet, Skill, ATTRIBUTE_MAX, ATTRIBUTE_MIN, DEFAULT_ATTRIBUTE};
pub use field::{FieldPosition, FIRST_DOWN_DISTANCE};
pub use player::{Player, PlayerId, Position, QbTrait};
pub use result::{DriveOutcome, DriveResult, PlayKind, PlayLogEntry, PlayResult};
pub use roster::{CoverageAssignment, CoverageDefender, Defense, Offense, ZoneDepth};
