//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (one `Level::tick` per frame period)
//! - Stable iteration order (terrain and enemies in authoring order)
//! - No drawing or keyboard dependencies beyond the `RenderSink` trait

pub mod collision;
pub mod entity;
pub mod input;
pub mod level;
pub mod physics;
pub mod rect;
pub mod viewport;

pub use collision::{AxisMove, resolve_axis};
pub use entity::{Enemy, EntityKind, Motion, Patrol, Player};
pub use input::InputEvent;
pub use level::{DeathCause, Level, LevelEvent, LevelPhase};
pub use physics::PhysicsConfig;
pub use rect::{Axis, Rect};
pub use viewport::{scroll_offset, viewport_offset};
