//! Row scoring
//!
//! Every completed row rolls one random multiplier. The tower's worth is its
//! placed brick count times the sum of all multipliers on top of a 1x base.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::round_tenth;

/// Multiplier earned by a completed row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowCombo {
    pub row: u32,
    pub multiplier: f64,
}

/// Roll a multiplier uniformly over [COMBO_MIN, COMBO_MAX], one decimal place
pub fn roll_multiplier<R: Rng>(rng: &mut R) -> f64 {
    let raw = rng.random_range(COMBO_MIN..=COMBO_MAX);
    round_tenth(raw).clamp(COMBO_MIN, COMBO_MAX)
}

/// Sum of all row multipliers plus the 1x base
pub fn total_combo(combos: &[RowCombo]) -> f64 {
    combos.iter().fold(BASE_COMBO, |sum, c| sum + c.multiplier)
}

/// Full-precision tower value
pub fn tower_value(bricks_placed: u32, combos: &[RowCombo]) -> f64 {
    bricks_placed as f64 * total_combo(combos)
}

/// Whole-gold value shown to the player
#[inline]
pub fn display_value(value: f64) -> u64 {
    value.max(0.0).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_in_range_one_decimal() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..2000 {
            let m = roll_multiplier(&mut rng);
            assert!((COMBO_MIN..=COMBO_MAX).contains(&m), "out of range: {}", m);
            assert!((m * 10.0 - (m * 10.0).round()).abs() < 1e-9, "not one decimal: {}", m);
        }
    }

    #[test]
    fn test_roll_covers_range_ends() {
        let mut rng = Pcg32::seed_from_u64(99);
        let rolls: Vec<f64> = (0..5000).map(|_| roll_multiplier(&mut rng)).collect();
        assert!(rolls.iter().any(|&m| m == COMBO_MIN));
        assert!(rolls.iter().any(|&m| m == COMBO_MAX));
    }

    #[test]
    fn test_roll_is_seed_deterministic() {
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        for _ in 0..50 {
            assert_eq!(roll_multiplier(&mut a), roll_multiplier(&mut b));
        }
    }

    #[test]
    fn test_tower_value() {
        assert_eq!(total_combo(&[]), 1.0);
        assert_eq!(tower_value(13, &[RowCombo { row: 0, multiplier: 2.0 }]), 39.0);

        let combos = [
            RowCombo { row: 0, multiplier: 1.5 },
            RowCombo { row: 1, multiplier: 2.5 },
        ];
        assert!((total_combo(&combos) - 5.0).abs() < 1e-9);
        assert!((tower_value(26, &combos) - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_value_floors() {
        assert_eq!(display_value(39.0), 39);
        assert_eq!(display_value(41.99), 41);
        assert_eq!(display_value(0.4), 0);
    }
}
