// tests/tower_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for the tower simulation.
 *
 * Invariants covered:
 * - The build cursor never leaves the row.
 * - `total_bricks_placed` equals the number of placed bricks.
 * - Speed multiplier is `1.02^placed` and never decreases.
 * - Row combos are in range, one decimal, one per row, and never change.
 * - Camera pans once per row completed after the visible window fills.
 * - Selling adds exactly the pre-sell value and resets the tower.
 */
use std::collections::HashMap;
use std::time::Duration;

use brick_tower::consts::*;
use brick_tower::sim::{BrickId, Game};
use proptest::prelude::*;

fn assert_tower_consistent(game: &Game, seen_combos: &mut HashMap<u32, f64>) {
    let state = game.state();

    assert!(state.cursor().index < BRICKS_PER_ROW);
    assert_eq!(state.cursor().row, state.total_rows_built());

    let placed = state.bricks().iter().filter(|b| b.is_placed()).count();
    assert_eq!(state.total_bricks_placed() as usize, placed);

    let expected_speed = SPEED_GROWTH.powi(state.total_bricks_placed() as i32);
    assert!((state.speed_multiplier() / expected_speed - 1.0).abs() < 1e-9);

    let mut rows = Vec::new();
    for combo in state.row_combos() {
        assert!((COMBO_MIN..=COMBO_MAX).contains(&combo.multiplier));
        assert!((combo.multiplier * 10.0 - (combo.multiplier * 10.0).round()).abs() < 1e-9);
        assert!(state.is_row_complete(combo.row));
        rows.push(combo.row);

        let first = *seen_combos.entry(combo.row).or_insert(combo.multiplier);
        assert_eq!(first, combo.multiplier);
    }
    let unique = rows.len();
    rows.sort_unstable();
    rows.dedup();
    assert_eq!(rows.len(), unique);

    let expected_pans = state.total_rows_built().saturating_sub(VISIBLE_ROWS - 1);
    assert_eq!(game.builder().pans_triggered(), expected_pans);
    let panned_rows = (state.camera_offset() / ROW_HEIGHT).round() as u32;
    assert!(panned_rows <= expected_pans);
    assert!(expected_pans - panned_rows <= 1);

    let mut ids: Vec<BrickId> = state.bricks().iter().map(|b| b.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), state.bricks().len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn invariants_hold_while_building(
        seed in any::<u64>(),
        frames in 1usize..2500,
        frame_ms in 1u64..40,
    ) {
        let mut game = Game::new(seed);
        let mut seen = HashMap::new();
        let mut last_speed = game.state().speed_multiplier();

        for _ in 0..frames {
            game.advance(Duration::from_millis(frame_ms));
            assert_tower_consistent(&game, &mut seen);
            prop_assert!(game.state().speed_multiplier() >= last_speed);
            last_speed = game.state().speed_multiplier();
        }
    }

    #[test]
    fn sell_adds_value_and_resets(
        seed in any::<u64>(),
        steps in prop::collection::vec((1u64..4000, any::<bool>()), 1..20),
    ) {
        let mut game = Game::new(seed);

        for (ms, sell) in steps {
            game.advance(Duration::from_millis(ms));
            if !sell {
                continue;
            }
            let gold = game.state().gold();
            let value = game.state().total_bricks_placed() as f64 * game.state().total_combo();

            game.sell_tower();
            let state = game.state();
            prop_assert!((state.gold() - (gold + value)).abs() < 1e-9);
            prop_assert!(state.bricks().is_empty());
            prop_assert!(state.row_combos().is_empty());
            prop_assert_eq!(state.total_bricks_placed(), 0);
            prop_assert_eq!(state.tower_height(), 0);
            prop_assert_eq!(state.cursor(), BrickId::new(0, 0));
            prop_assert_eq!(state.camera_offset(), 0.0);
            prop_assert_eq!(state.speed_multiplier(), 1.0);
            prop_assert_eq!(game.builder().pans_triggered(), 0);
        }
    }

    #[test]
    fn same_seed_same_tower(seed in any::<u64>(), ms in 1u64..30_000) {
        let mut a = Game::new(seed);
        let mut b = Game::new(seed);
        a.advance(Duration::from_millis(ms));
        b.advance(Duration::from_millis(ms));
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }
}
