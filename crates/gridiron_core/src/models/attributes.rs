//! Player attribute records
//!
//! The roster system owns these values; the engine reads them through an
//! immutable `AttributeSet` for the duration of a play.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest legal attribute value
pub const ATTRIBUTE_MIN: f32 = 0.0;
/// Highest legal attribute value
pub const ATTRIBUTE_MAX: f32 = 100.0;
/// Value used by single-attribute reads when a player lacks the skill
pub const DEFAULT_ATTRIBUTE: f32 = 50.0;

/// Named skill referenced by weight tables and resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    // Line play
    PassBlock,
    PassRush,
    Strength,
    Balance,

    // Movement
    Speed,
    Acceleration,
    Agility,

    // Receiving
    RouteRunning,
    Release,
    Catching,
    Focus,

    // Passing / mental
    Throwing,
    Awareness,

    // Defense
    Coverage,
    Tackling,
    Pursuit,
    HitPower,
}

impl Skill {
    pub const ALL: [Skill; 17] = [
        Skill::PassBlock,
        Skill::PassRush,
        Skill::Strength,
        Skill::Balance,
        Skill::Speed,
        Skill::Acceleration,
        Skill::Agility,
        Skill::RouteRunning,
        Skill::Release,
        Skill::Catching,
        Skill::Focus,
        Skill::Throwing,
        Skill::Awareness,
        Skill::Coverage,
        Skill::Tackling,
        Skill::Pursuit,
        Skill::HitPower,
    ];
}

/// Sparse skill → value map in [0, 100].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: BTreeMap<Skill, f32>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every skill set to the same value. Handy for fixtures and baselines.
    pub fn uniform(value: f32) -> Self {
        Skill::ALL.iter().map(|&skill| (skill, value)).collect()
    }

    /// Builder-style setter
    pub fn with(mut self, skill: Skill, value: f32) -> Self {
        self.values.insert(skill, value);
        self
    }

    pub fn set(&mut self, skill: Skill, value: f32) {
        self.values.insert(skill, value);
    }

    pub fn get(&self, skill: Skill) -> Option<f32> {
        self.values.get(&skill).copied()
    }

    #[inline]
    pub fn get_or(&self, skill: Skill, default: f32) -> f32 {
        self.get(skill).unwrap_or(default)
    }

    /// Single-attribute read with the engine-wide default.
    #[inline]
    pub fn value(&self, skill: Skill) -> f32 {
        self.get_or(skill, DEFAULT_ATTRIBUTE)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, f32)> + '_ {
        self.values.iter().map(|(&skill, &value)| (skill, value))
    }

    /// First attribute outside [0, 100], if any.
    pub fn out_of_range(&self) -> Option<(Skill, f32)> {
        self.iter()
            .find(|(_, value)| !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(value) || value.is_nan())
    }
}

impl FromIterator<(Skill, f32)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (Skill, f32)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
