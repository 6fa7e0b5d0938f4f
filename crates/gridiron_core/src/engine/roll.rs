//! Weighted roll evaluator
//!
//! `roll = Σ attr[skill] * weight[skill]`, scaled by a symmetric
//! multiplicative variance: `roll * (1 + (u - 0.5) * 2 * variance)`.
//! Skills the player lacks contribute nothing; a table matching none of the
//! player's skills is an `InvalidWeightTable` error.

use super::config::WeightTable;
use crate::error::{EngineError, Result};
use crate::models::AttributeSet;
use rand::Rng;

/// Deterministic part of the roll.
pub fn weighted_total(attrs: &AttributeSet, table: &WeightTable) -> Result<f32> {
    let mut matched = false;
    let mut total = 0.0;
    for (skill, weight) in table.iter() {
        if let Some(value) = attrs.get(skill) {
            matched = true;
            total += value * weight;
        }
    }
    if !matched {
        return Err(EngineError::InvalidWeightTable { table: table.name.clone() });
    }
    Ok(total)
}

/// Apply variance for a uniform draw `u` in [0, 1).
#[inline]
pub fn apply_variance(total: f32, u: f32, variance_factor: f32) -> f32 {
    total * (1.0 + (u - 0.5) * 2.0 * variance_factor)
}

/// Full roll. Consumes exactly one draw; an invalid table fails before drawing.
pub fn weighted_roll<R: Rng + ?Sized>(
    attrs: &AttributeSet,
    table: &WeightTable,
    variance_factor: f32,
    rng: &mut R,
) -> Result<f32> {
    let total = weighted_total(attrs, table)?;
    let u: f32 = rng.gen();
    Ok(apply_variance(total, u, variance_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skill;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn block_table() -> WeightTable {
        WeightTable::new(
            "pass_block",
            &[(Skill::PassBlock, 0.35), (Skill::Strength, 0.30), (Skill::Balance, 0.20), (Skill::Awareness, 0.15)],
        )
    }

    #[test]
    fn test_weighted_total() {
        let attrs = AttributeSet::new()
            .with(Skill::PassBlock, 80.0)
            .with(Skill::Strength, 70.0)
            .with(Skill::Balance, 60.0)
            .with(Skill::Awareness, 50.0);
        let total = weighted_total(&attrs, &block_table()).unwrap();
        assert!((total - (28.0 + 21.0 + 12.0 + 7.5)).abs() < 1e-4);
    }

    #[test]
    fn test_missing_skills_contribute_nothing() {
        let attrs = AttributeSet::new().with(Skill::PassBlock, 80.0);
        let total = weighted_total(&attrs, &block_table()).unwrap();
        assert!((total - 28.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_table_is_invalid() {
        let attrs = AttributeSet::uniform(70.0);
        let empty = WeightTable::new("empty", &[]);
        assert!(matches!(
            weighted_total(&attrs, &empty),
            Err(EngineError::InvalidWeightTable { .. })
        ));
    }

    #[test]
    fn test_irrelevant_table_is_invalid() {
        let attrs = AttributeSet::new().with(Skill::Throwing, 90.0);
        assert!(matches!(
            weighted_total(&attrs, &block_table()),
            Err(EngineError::InvalidWeightTable { .. })
        ));
    }

    #[test]
    fn test_variance_bounds() {
        assert!((apply_variance(100.0, 0.0, 0.2) - 80.0).abs() < 1e-4);
        assert!((apply_variance(100.0, 0.5, 0.2) - 100.0).abs() < 1e-4);
        assert!((apply_variance(100.0, 0.9999, 0.2) - 119.996).abs() < 1e-2);
        assert_eq!(apply_variance(100.0, 0.9, 0.0), 100.0);
    }

    #[test]
    fn test_roll_stays_within_twenty_percent() {
        let attrs = AttributeSet::uniform(75.0);
        let table = block_table();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let roll = weighted_roll(&attrs, &table, 0.2, &mut rng).unwrap();
            assert!((60.0..=90.0).contains(&roll), "roll {roll} escaped ±20% of 75");
        }
    }
}
