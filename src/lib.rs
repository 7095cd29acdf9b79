//! Blockhop - a side-scrolling rectangle platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, entities, levels)
//! - `game`: Level sequencing (restart on death, advance on completion)
//! - `levels`: Level specifications and the built-in campaign
//! - `render`: Render sink abstraction consumed by the simulation
//! - `settings`: Data-driven physics tuning and canvas size

pub mod error;
pub mod game;
pub mod levels;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::LoadError;
pub use game::{Game, GamePhase};
pub use levels::{EnemySpec, LevelSpec};
pub use render::{ColorTag, DrawCall, FrameRecorder, RenderSink};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal time between simulation ticks (milliseconds)
    pub const FRAME_PERIOD_MS: u32 = 16;
    /// Maximum ticks per `Game::update` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration added to the player every tick
    pub const GRAVITY: f32 = 1.0;
    /// Ceiling for the player's downward velocity
    pub const TERMINAL_VELOCITY: f32 = 10.0;
    /// Horizontal step while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Vertical velocity applied on a successful jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -13.0;

    /// Player dimensions
    pub const PLAYER_WIDTH: f32 = 10.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
}
