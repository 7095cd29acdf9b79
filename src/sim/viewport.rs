//! Side-scrolling viewport math

use glam::Vec2;

/// Scroll offset along one dimension.
///
/// - `player`: the player's coordinate in that dimension
/// - `canvas`: the visible extent in that dimension
/// - `level`: the level's extent in that dimension
///
/// The player is kept centered except near either end of the level, and
/// levels that fit on the canvas never scroll.
pub fn scroll_offset(player: f32, canvas: f32, level: f32) -> f32 {
    if level <= canvas {
        return 0.0;
    }
    let half = canvas / 2.0;
    if player - half < 0.0 {
        0.0
    } else if player + half > level {
        level - canvas
    } else {
        player - half
    }
}

/// Scroll offset on both axes
pub fn viewport_offset(player: Vec2, canvas: Vec2, level: Vec2) -> Vec2 {
    Vec2::new(
        scroll_offset(player.x, canvas.x, level.x),
        scroll_offset(player.y, canvas.y, level.y),
    )
}
