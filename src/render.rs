//! Render sink abstraction
//!
//! The simulation never touches pixels. Each frame it clears the sink and
//! fills screen-space rectangles tagged with a symbolic color.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Symbolic fill colors, one per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Blue,
    Red,
    Yellow,
    Black,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Blue => "blue",
            ColorTag::Red => "red",
            ColorTag::Yellow => "yellow",
            ColorTag::Black => "black",
        }
    }
}

/// Drawing target consumed by levels and the game
pub trait RenderSink {
    /// Visible canvas size in pixels
    fn canvas_size(&self) -> Vec2;

    /// Erase the previous frame
    fn clear(&mut self);

    /// Fill a screen-space rectangle
    fn fill_rect(&mut self, rect: Rect, color: ColorTag);

    /// Show the end-of-campaign screen
    fn victory(&mut self) {}
}

/// A single recorded fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub rect: Rect,
    pub color: ColorTag,
}

/// In-memory sink holding the most recent frame
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    pub size: Vec2,
    /// Fills since the last clear
    pub calls: Vec<DrawCall>,
    /// Number of frames started (clears)
    pub frames: u64,
    pub victory_shown: bool,
}

impl FrameRecorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            calls: Vec::new(),
            frames: 0,
            victory_shown: false,
        }
    }

    /// Fills of the given color in the current frame
    pub fn calls_with(&self, color: ColorTag) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| c.color == color)
    }

    /// Per-color fill counts of the current frame, e.g. `blue=1 red=2`
    pub fn summary(&self) -> String {
        [ColorTag::Blue, ColorTag::Red, ColorTag::Yellow, ColorTag::Black]
            .iter()
            .map(|&color| format!("{}={}", color.as_str(), self.calls_with(color).count()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RenderSink for FrameRecorder {
    fn canvas_size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.calls.clear();
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: ColorTag) {
        self.calls.push(DrawCall { rect, color });
    }

    fn victory(&mut self) {
        self.calls.clear();
        self.victory_shown = true;
    }
}
