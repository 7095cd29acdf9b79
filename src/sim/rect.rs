//! Axis-aligned rectangle geometry
//!
//! Every body in a level (player, enemies, terrain, goal) is one of these.
//! Coordinates are level-space pixels with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the two independent movement axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a rectangle. Panics on a non-positive size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        assert!(w > 0.0 && h > 0.0, "rect size must be positive, got {w}x{h}");
        Self { x, y, w, h }
    }

    /// True if both dimensions are positive and all fields are finite
    pub fn is_valid(&self) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Half-open interval intersection on both axes.
    ///
    /// Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (tl1, br1) = (self.top_left(), self.bottom_right());
        let (tl2, br2) = (other.top_left(), other.bottom_right());
        tl1.x < br2.x && br1.x > tl2.x && tl1.y < br2.y && br1.y > tl2.y
    }

    /// Distance between the two top-left corners.
    ///
    /// Only a cheap ordering key for collision candidates, not the gap
    /// between the rectangles.
    #[inline]
    pub fn distance_to(&self, other: &Rect) -> f32 {
        self.top_left().distance(other.top_left())
    }

    /// Position on the given axis
    #[inline]
    pub fn coord(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent on the given axis
    #[inline]
    pub fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
        }
    }

    #[inline]
    pub fn set_coord(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Copy of this rect shifted by `delta` along `axis`
    pub fn translated(&self, axis: Axis, delta: f32) -> Rect {
        let mut moved = *self;
        moved.set_coord(axis, self.coord(axis) + delta);
        moved
    }

    /// Smallest rect covering every position this rect passes through while
    /// moving `delta` along `axis`.
    pub fn swept(&self, axis: Axis, delta: f32) -> Rect {
        let start = if delta < 0.0 {
            self.coord(axis) + delta
        } else {
            self.coord(axis)
        };
        let extent = delta.abs() + self.size(axis);
        let mut swept = *self;
        swept.set_coord(axis, start);
        match axis {
            Axis::X => swept.w = extent,
            Axis::Y => swept.h = extent,
        }
        swept
    }

    /// Copy of this rect shifted into screen space
    pub fn offset_by(&self, scroll: Vec2) -> Rect {
        Rect {
            x: self.x - scroll.x,
            y: self.y - scroll.y,
            ..*self
        }
    }
}
