//! Tower geometry
//!
//! Positions are in layout units measured from the bottom-left of the tower
//! (x right, y up). `scale` shrinks everything to fit narrow screens.

use glam::Vec2;

use crate::consts::*;
use crate::sim::BrickId;

/// Full tower width and the height of the visible window
pub fn viewport_size() -> Vec2 {
    let bricks = BRICKS_PER_ROW as f32;
    let rows = VISIBLE_ROWS as f32;
    Vec2::new(
        bricks * BRICK_WIDTH + (bricks - 1.0) * BRICK_GAP,
        rows * BRICK_HEIGHT + (rows - 1.0) * BRICK_GAP,
    )
}

/// Responsive brick scale: never larger than 1, shrinks to fit `available_width`
pub fn brick_scale(available_width: f32) -> f32 {
    let full = viewport_size().x;
    if available_width <= 0.0 {
        return 1.0;
    }
    (available_width / full).min(1.0)
}

/// Scaled brick size
pub fn brick_size(scale: f32) -> Vec2 {
    Vec2::new(BRICK_WIDTH, BRICK_HEIGHT) * scale
}

/// Bottom-left corner of a placed brick
pub fn brick_origin(id: BrickId, scale: f32) -> Vec2 {
    Vec2::new(
        id.index as f32 * (BRICK_WIDTH + BRICK_GAP),
        id.row as f32 * ROW_HEIGHT,
    ) * scale
}

/// Row sitting at the bottom edge of the viewport for a camera offset
pub fn visible_bottom_row(camera_offset: f32) -> u32 {
    (camera_offset / ROW_HEIGHT).round().max(0.0) as u32
}

/// Row bricks form on before dropping
pub fn formation_row(camera_offset: f32) -> u32 {
    visible_bottom_row(camera_offset) + FORMATION_ROW_LEAD
}

/// Distance a brick in `row` falls from the formation row to its slot
pub fn drop_distance(row: u32, camera_offset: f32, scale: f32) -> f32 {
    let rows = formation_row(camera_offset) as f32 - row as f32;
    rows * ROW_HEIGHT * scale
}

/// Anchor of a row's combo badge, or completion indicator over the middle brick
pub fn row_indicator_origin(row: u32, scale: f32) -> Vec2 {
    brick_origin(BrickId::new(row, BRICKS_PER_ROW / 2), scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_fits_one_row_and_three_rows() {
        let size = viewport_size();
        assert_eq!(size.x, 13.0 * 60.0 + 12.0 * 4.0);
        assert_eq!(size.y, 3.0 * 40.0 + 2.0 * 4.0);
    }

    #[test]
    fn test_brick_scale() {
        assert_eq!(brick_scale(2000.0), 1.0);
        assert_eq!(brick_scale(414.0), 0.5);
        assert_eq!(brick_scale(0.0), 1.0);
    }

    #[test]
    fn test_brick_origin() {
        assert_eq!(brick_origin(BrickId::new(0, 0), 1.0), Vec2::ZERO);
        assert_eq!(brick_origin(BrickId::new(2, 3), 1.0), Vec2::new(192.0, 88.0));
        assert_eq!(brick_origin(BrickId::new(2, 3), 0.5), Vec2::new(96.0, 44.0));
    }

    #[test]
    fn test_drop_distance_follows_camera() {
        // Fresh tower: row 0 falls four rows
        assert_eq!(drop_distance(0, 0.0, 1.0), 4.0 * ROW_HEIGHT);
        // After two pans, row 5 is bottom + 3
        assert_eq!(visible_bottom_row(2.0 * ROW_HEIGHT), 2);
        assert_eq!(drop_distance(5, 2.0 * ROW_HEIGHT, 1.0), ROW_HEIGHT);
    }

    #[test]
    fn test_indicator_over_middle_brick() {
        let middle_x = 6.0 * (BRICK_WIDTH + BRICK_GAP);
        assert_eq!(row_indicator_origin(0, 1.0), Vec2::new(middle_x, 0.0));
        assert_eq!(row_indicator_origin(1, 1.0), Vec2::new(middle_x, ROW_HEIGHT));
        assert_eq!(row_indicator_origin(4, 0.5), Vec2::new(middle_x * 0.5, 2.0 * ROW_HEIGHT));
    }

    #[test]
    fn test_brick_size_scales() {
        assert_eq!(brick_size(1.0), Vec2::new(BRICK_WIDTH, BRICK_HEIGHT));
        assert_eq!(brick_size(0.5), Vec2::new(30.0, 20.0));

        // A scaled brick plus its scaled gap spans one scaled column
        let scale = brick_scale(414.0);
        let next = brick_origin(BrickId::new(0, 1), scale);
        assert_eq!(next.x, brick_size(scale).x + BRICK_GAP * scale);
    }
}
