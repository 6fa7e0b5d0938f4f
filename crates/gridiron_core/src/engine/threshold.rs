//! Sorted threshold → outcome lookup
//!
//! Every clash maps a signed margin onto an outcome bucket. The buckets are
//! data, so the line clash and the catch calculator share this one table type
//! instead of each carrying an if/else ladder.

use serde::{Deserialize, Serialize};

/// How a row's `min` is compared against the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// `margin > min`
    Exclusive,
    /// `margin >= min`
    Inclusive,
}

impl Comparison {
    #[inline]
    fn passes(self, margin: f32, min: f32) -> bool {
        match self {
            Comparison::Exclusive => margin > min,
            Comparison::Inclusive => margin >= min,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRow<T> {
    pub min: f32,
    pub value: T,
}

/// Rows are evaluated high to low; the first passing row wins, `floor`
/// catches everything below the last row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable<T> {
    pub comparison: Comparison,
    pub rows: Vec<ThresholdRow<T>>,
    pub floor: T,
}

impl<T> ThresholdTable<T> {
    pub fn new(comparison: Comparison, rows: Vec<(f32, T)>, floor: T) -> Self {
        let rows = rows.into_iter().map(|(min, value)| ThresholdRow { min, value }).collect();
        Self { comparison, rows, floor }
    }

    pub fn lookup(&self, margin: f32) -> &T {
        self.rows
            .iter()
            .find(|row| self.comparison.passes(margin, row.min))
            .map(|row| &row.value)
            .unwrap_or(&self.floor)
    }

    /// Rows must be strictly descending for first-match to mean "highest bucket".
    pub fn is_sorted_descending(&self) -> bool {
        self.rows.windows(2).all(|pair| pair[0].min > pair[1].min)
    }
}
