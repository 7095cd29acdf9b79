//! Entity types and their per-tick motion policies
//!
//! Terrain and goals are plain [`Rect`]s. Players and enemies carry their own
//! motion state and move through a [`Motion`] supplied by the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputEvent;
use super::physics::PhysicsConfig;
use super::rect::{Axis, Rect};
use crate::render::ColorTag;

/// Kind of body in a level, used for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Terrain,
    Goal,
}

impl EntityKind {
    /// Fixed draw color for this kind
    pub fn color(&self) -> ColorTag {
        match self {
            EntityKind::Player => ColorTag::Blue,
            EntityKind::Enemy => ColorTag::Red,
            EntityKind::Terrain => ColorTag::Black,
            EntityKind::Goal => ColorTag::Yellow,
        }
    }
}

/// Movement services a level provides to a moving entity
pub trait Motion {
    /// Move `body` by `delta` along `axis`, resolving against terrain.
    /// Returns true if terrain stopped the move.
    fn move_along(&mut self, body: &mut Rect, axis: Axis, delta: f32) -> bool;

    /// Whether `body` is allowed to start a jump right now
    fn can_jump(&self, _body: &Rect) -> bool {
        false
    }
}

/// The player-controlled rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Jump request latch, cleared by every tick
    pub wants_to_jump: bool,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    pub fn new(start: Vec2, physics: &PhysicsConfig) -> Self {
        let size = physics.player_size();
        Self {
            rect: Rect::new(start.x, start.y, size.x, size.y),
            vy: 0.0,
            wants_to_jump: false,
            moving_left: false,
            moving_right: false,
        }
    }

    /// Apply an edge-triggered input event
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeftStart => self.moving_left = true,
            InputEvent::MoveLeftEnd => self.moving_left = false,
            InputEvent::MoveRightStart => self.moving_right = true,
            InputEvent::MoveRightEnd => self.moving_right = false,
            InputEvent::JumpRequested => self.wants_to_jump = true,
        }
    }

    /// Horizontal displacement from held directions (both held cancel out)
    pub fn horizontal_step(&self, move_speed: f32) -> f32 {
        let right = if self.moving_right { move_speed } else { 0.0 };
        let left = if self.moving_left { move_speed } else { 0.0 };
        right - left
    }

    /// Advance one tick: jump, horizontal move, vertical move, gravity
    pub fn tick(&mut self, physics: &PhysicsConfig, motion: &mut impl Motion) {
        if self.wants_to_jump && motion.can_jump(&self.rect) {
            self.vy = physics.jump_velocity;
        }
        self.wants_to_jump = false;

        let dx = self.horizontal_step(physics.move_speed);
        motion.move_along(&mut self.rect, Axis::X, dx);

        // Landing or hitting a ceiling kills vertical velocity
        if motion.move_along(&mut self.rect, Axis::Y, self.vy) {
            self.vy = 0.0;
        }

        self.vy = (self.vy + physics.gravity).min(physics.terminal_velocity);
    }
}

/// A rectangle that walks back and forth along one axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patrol {
    pub rect: Rect,
    /// Starting coordinate on the patrol axis
    pub origin: f32,
    /// Length of the patrol route
    pub distance: f32,
    /// Signed step per tick
    pub velocity: f32,
}

impl Patrol {
    pub fn new(rect: Rect, axis: Axis, distance: f32, velocity: f32) -> Self {
        assert!(rect.is_valid(), "enemy rect must have positive size, got {rect:?}");
        assert!(distance >= 0.0, "patrol distance must be non-negative, got {distance}");
        Self {
            origin: rect.coord(axis),
            rect,
            distance,
            velocity,
        }
    }

    /// Turn around once past either end of the route, then step
    fn step(&mut self, axis: Axis, motion: &mut impl Motion) {
        let pos = self.rect.coord(axis);
        if pos > self.origin + self.distance || pos < self.origin {
            self.velocity = -self.velocity;
        }
        motion.move_along(&mut self.rect, axis, self.velocity);
    }
}

/// Enemy variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Enemy {
    HorizontalPatrol(Patrol),
    VerticalPatrol(Patrol),
}

impl Enemy {
    pub fn horizontal(rect: Rect, distance: f32, velocity: f32) -> Self {
        Enemy::HorizontalPatrol(Patrol::new(rect, Axis::X, distance, velocity))
    }

    pub fn vertical(rect: Rect, distance: f32, velocity: f32) -> Self {
        Enemy::VerticalPatrol(Patrol::new(rect, Axis::Y, distance, velocity))
    }

    /// Axis this enemy patrols along
    pub fn axis(&self) -> Axis {
        match self {
            Enemy::HorizontalPatrol(_) => Axis::X,
            Enemy::VerticalPatrol(_) => Axis::Y,
        }
    }

    pub fn patrol(&self) -> &Patrol {
        match self {
            Enemy::HorizontalPatrol(p) | Enemy::VerticalPatrol(p) => p,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.patrol().rect
    }

    /// Advance one tick against terrain
    pub fn tick(&mut self, motion: &mut impl Motion) {
        let axis = self.axis();
        match self {
            Enemy::HorizontalPatrol(p) | Enemy::VerticalPatrol(p) => p.step(axis, motion),
        }
    }
}
