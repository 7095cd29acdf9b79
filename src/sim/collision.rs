//! Axis-separated sweep-and-snap collision resolution
//!
//! Movers resolve horizontal and vertical motion as two independent 1-D
//! sweeps. The swept rectangle covers the whole path of the step, so thin
//! terrain can never be skipped regardless of speed.

use super::rect::{Axis, Rect};

/// Result of resolving one axis of motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMove {
    /// New coordinate of the mover on the resolved axis
    pub pos: f32,
    /// Whether an obstacle stopped the move
    pub collided: bool,
}

impl AxisMove {
    pub fn free(pos: f32) -> Self {
        Self {
            pos,
            collided: false,
        }
    }

    pub fn blocked(pos: f32) -> Self {
        Self {
            pos,
            collided: true,
        }
    }
}

/// Resolve a move of `delta` along `axis` against static obstacles
///
/// Every obstacle touched by the swept path is a candidate. The candidate
/// whose top-left corner is closest to the mover's starting top-left corner
/// wins (first in slice order on ties), and the mover is placed flush against
/// it on the side it came from.
pub fn resolve_axis(mover: &Rect, axis: Axis, delta: f32, obstacles: &[Rect]) -> AxisMove {
    let start = mover.coord(axis);
    if delta == 0.0 {
        return AxisMove::free(start);
    }

    let path = mover.swept(axis, delta);
    let closest = obstacles
        .iter()
        .filter(|obstacle| path.overlaps(obstacle))
        .map(|obstacle| (mover.distance_to(obstacle), obstacle))
        .min_by(|(da, _), (db, _)| da.total_cmp(db));

    match closest {
        Some((_, obstacle)) => {
            let pos = if start < obstacle.coord(axis) {
                obstacle.coord(axis) - mover.size(axis)
            } else {
                obstacle.coord(axis) + obstacle.size(axis)
            };
            AxisMove::blocked(pos)
        }
        None => AxisMove::free(start + delta),
    }
}

/// True if a rect shifted one unit below `body` rests on any obstacle
pub fn is_grounded(body: &Rect, obstacles: &[Rect]) -> bool {
    let below = body.translated(Axis::Y, 1.0);
    obstacles.iter().any(|obstacle| below.overlaps(obstacle))
}
