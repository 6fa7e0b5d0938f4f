use serde::{Deserialize, Serialize};

pub const FIRST_DOWN_DISTANCE: i32 = 10;

/// Down, distance and field position between snaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPosition {
    pub yards_from_goal: i32,
    pub yards_to_go: i32,
    pub down: u8,
}

impl Default for FieldPosition {
    /// 1st-and-10 from the offense's own 25.
    fn default() -> Self {
        Self::first_and_ten(75)
    }
}

impl FieldPosition {
    pub fn new(yards_from_goal: i32, yards_to_go: i32, down: u8) -> Self {
        Self { yards_from_goal, yards_to_go, down }
    }

    pub fn first_and_ten(yards_from_goal: i32) -> Self {
        Self { yards_from_goal, yards_to_go: FIRST_DOWN_DISTANCE, down: 1 }
    }

    /// Position after a play gaining `yards` (negative for a loss).
    ///
    /// `yards_from_goal` never goes below 0. Reaching the line to gain
    /// resets to 1st-and-10.
    pub fn advance(self, yards: i32) -> Self {
        let yards_from_goal = (self.yards_from_goal - yards).max(0);
        if yards >= self.yards_to_go {
            Self::first_and_ten(yards_from_goal)
        } else {
            Self {
                yards_from_goal,
                yards_to_go: self.yards_to_go - yards,
                down: self.down.saturating_add(1),
            }
        }
    }

    pub fn in_end_zone(&self) -> bool {
        self.yards_from_goal == 0
    }
}
