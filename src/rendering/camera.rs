//! # Camera
//!
//! Viewport focusing shared by every renderer.

use crate::game::Position;

/// Top-left visible cell for a `window`-sized view following `entity` on a
/// `grid`-sized frame.
///
/// The entity may move freely inside a centered threshold before the view
/// scrolls. The threshold is half the window, one cell less on even windows, and
/// the result never scrolls past the grid edges.
///
/// # Examples
///
/// ```
/// use tilewalk::{compute_camera_offset, Position};
///
/// let offset = compute_camera_offset(Position::new(12, 2), (10, 10), (20, 20));
/// assert_eq!(offset, Position::new(8, 0));
/// ```
pub fn compute_camera_offset(entity: Position, window: (i32, i32), grid: (i32, i32)) -> Position {
    Position::new(
        axis_offset(entity.x, window.0, grid.0),
        axis_offset(entity.y, window.1, grid.1),
    )
}

fn axis_offset(position: i32, window: i32, grid: i32) -> i32 {
    let threshold = if window % 2 == 0 {
        window / 2 - 1
    } else {
        window / 2
    };

    let mut offset = if position <= threshold {
        0
    } else {
        position - threshold
    };

    if grid < offset + window {
        offset = grid - window;
    }

    offset.max(0)
}
