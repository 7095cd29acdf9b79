//! Physics tuning injected into each level

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Immutable per-level physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Milliseconds between ticks
    pub frame_period_ms: u32,
    /// Added to the player's vertical velocity every tick
    pub gravity: f32,
    /// Maximum downward velocity
    pub terminal_velocity: f32,
    /// Horizontal step per tick while a direction is held
    pub move_speed: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            frame_period_ms: FRAME_PERIOD_MS,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
        }
    }
}

impl PhysicsConfig {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    /// True if the tuning can drive a simulation
    pub fn is_valid(&self) -> bool {
        self.frame_period_ms > 0
            && self.player_width > 0.0
            && self.player_height > 0.0
            && self.gravity.is_finite()
            && self.terminal_velocity.is_finite()
            && self.move_speed.is_finite()
            && self.jump_velocity.is_finite()
    }
}
