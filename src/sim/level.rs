//! Level engine: one fixed tick of the platformer simulation
//!
//! Each tick moves every enemy, then the player, then checks (in order) for
//! falling out of the level, touching an enemy, and reaching the goal. The
//! first outcome found ends the level; otherwise the frame is drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{is_grounded, resolve_axis};
use super::entity::{Enemy, EntityKind, Motion, Player};
use super::input::InputEvent;
use super::physics::PhysicsConfig;
use super::rect::{Axis, Rect};
use super::viewport::viewport_offset;
use crate::render::RenderSink;

/// Lifecycle of a single level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Running,
    /// Terminal: the attempt failed
    PlayerDied,
    /// Terminal: the goal was reached
    Completed,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Left the level bounds entirely
    FellOut,
    /// Touched a surviving enemy
    Enemy,
}

/// Outcome signals for the level sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    PlayerDied(DeathCause),
    LevelCompleted,
}

/// Enemies only ever collide with terrain
struct TerrainMotion<'a> {
    terrain: &'a [Rect],
}

impl Motion for TerrainMotion<'_> {
    fn move_along(&mut self, body: &mut Rect, axis: Axis, delta: f32) -> bool {
        let result = resolve_axis(body, axis, delta, self.terrain);
        body.set_coord(axis, result.pos);
        result.collided
    }
}

/// Player motion: terrain collisions, grounded jump gating, and stomp
/// detection on unobstructed downward moves.
struct PlayerMotion<'a> {
    terrain: &'a [Rect],
    enemies: &'a [Enemy],
    /// Indices of enemies landed on this tick
    stomped: Vec<usize>,
}

impl Motion for PlayerMotion<'_> {
    fn move_along(&mut self, body: &mut Rect, axis: Axis, delta: f32) -> bool {
        let result = resolve_axis(body, axis, delta, self.terrain);
        body.set_coord(axis, result.pos);
        if axis == Axis::Y && delta > 0.0 && !result.collided {
            for (index, enemy) in self.enemies.iter().enumerate() {
                if body.overlaps(enemy.rect()) && !self.stomped.contains(&index) {
                    self.stomped.push(index);
                }
            }
        }
        result.collided
    }

    fn can_jump(&self, body: &Rect) -> bool {
        is_grounded(body, self.terrain)
    }
}

/// A single attempt at a level
#[derive(Debug, Clone)]
pub struct Level {
    pub player: Player,
    /// Static terrain, in authoring order
    pub terrain: Vec<Rect>,
    /// Surviving enemies
    pub enemies: Vec<Enemy>,
    pub goal: Rect,
    /// Level extent `(x_max, y_max)`; the playable area starts at the origin
    pub bounds: Vec2,
    physics: PhysicsConfig,
    phase: LevelPhase,
    events: Vec<LevelEvent>,
    time_ticks: u64,
}

impl Level {
    pub fn new(
        player_start: Vec2,
        terrain: Vec<Rect>,
        goal: Rect,
        enemies: Vec<Enemy>,
        bounds: Vec2,
        physics: PhysicsConfig,
    ) -> Self {
        assert!(
            bounds.x > 0.0 && bounds.y > 0.0,
            "level bounds must be positive, got {bounds}"
        );
        if let Some(rect) = terrain.iter().find(|r| !r.is_valid()) {
            panic!("terrain rect must have positive size, got {rect:?}");
        }
        assert!(goal.is_valid(), "goal rect must have positive size, got {goal:?}");
        Self {
            player: Player::new(player_start, &physics),
            terrain,
            enemies,
            goal,
            bounds,
            physics,
            phase: LevelPhase::Running,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// Ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    /// The whole level as a rectangle anchored at the origin
    pub fn bounds_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.bounds.x, self.bounds.y)
    }

    /// Forward an input event to the player
    pub fn handle_input(&mut self, event: InputEvent) {
        self.player.apply_input(event);
    }

    /// True if the player is standing on terrain
    pub fn player_can_jump(&self) -> bool {
        is_grounded(&self.player.rect, &self.terrain)
    }

    /// Takes all pending outcome events, leaving the queue empty
    pub fn take_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the level by one tick, drawing the frame if it keeps running
    pub fn tick(&mut self, sink: &mut impl RenderSink) -> LevelPhase {
        if self.phase != LevelPhase::Running {
            return self.phase;
        }
        self.time_ticks += 1;

        let mut enemy_motion = TerrainMotion {
            terrain: &self.terrain,
        };
        for enemy in &mut self.enemies {
            enemy.tick(&mut enemy_motion);
        }

        let mut player_motion = PlayerMotion {
            terrain: &self.terrain,
            enemies: &self.enemies,
            stomped: Vec::new(),
        };
        self.player.tick(&self.physics, &mut player_motion);
        let stomped = player_motion.stomped;
        if !stomped.is_empty() {
            log::debug!("Stomped {} enemies on tick {}", stomped.len(), self.time_ticks);
            let mut index = 0;
            self.enemies.retain(|_| {
                let keep = !stomped.contains(&index);
                index += 1;
                keep
            });
        }

        let player = self.player.rect;
        if !player.overlaps(&self.bounds_rect()) {
            return self.finish(LevelEvent::PlayerDied(DeathCause::FellOut));
        }
        if self.enemies.iter().any(|enemy| player.overlaps(enemy.rect())) {
            return self.finish(LevelEvent::PlayerDied(DeathCause::Enemy));
        }
        if player.overlaps(&self.goal) {
            return self.finish(LevelEvent::LevelCompleted);
        }

        self.draw(sink);
        self.phase
    }

    /// Draw terrain, enemies, goal and player relative to the scrolled viewport
    pub fn draw(&self, sink: &mut impl RenderSink) {
        let scroll = viewport_offset(self.player.rect.top_left(), sink.canvas_size(), self.bounds);
        sink.clear();
        for rect in &self.terrain {
            sink.fill_rect(rect.offset_by(scroll), EntityKind::Terrain.color());
        }
        for enemy in &self.enemies {
            sink.fill_rect(enemy.rect().offset_by(scroll), EntityKind::Enemy.color());
        }
        sink.fill_rect(self.goal.offset_by(scroll), EntityKind::Goal.color());
        sink.fill_rect(self.player.rect.offset_by(scroll), EntityKind::Player.color());
    }

    fn finish(&mut self, event: LevelEvent) -> LevelPhase {
        self.phase = match event {
            LevelEvent::PlayerDied(_) => LevelPhase::PlayerDied,
            LevelEvent::LevelCompleted => LevelPhase::Completed,
        };
        log::info!(
            "Level ended after {} ticks: {:?} (player at {}, {})",
            self.time_ticks,
            event,
            self.player.rect.x,
            self.player.rect.y
        );
        self.events.push(event);
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ColorTag, FrameRecorder};

    fn canvas() -> FrameRecorder {
        FrameRecorder::new(600.0, 400.0)
    }

    fn far_goal() -> Rect {
        Rect::new(900.0, 150.0, 20.0, 20.0)
    }

    fn level(player: Vec2, terrain: Vec<Rect>, goal: Rect, enemies: Vec<Enemy>) -> Level {
        Level::new(
            player,
            terrain,
            goal,
            enemies,
            Vec2::new(1000.0, 400.0),
            PhysicsConfig::default(),
        )
    }

    fn floor() -> Rect {
        Rect::new(0.0, 200.0, 150.0, 10.0)
    }

    #[test]
    fn test_player_settles_on_floor() {
        let mut level = level(Vec2::ZERO, vec![floor()], far_goal(), Vec::new());
        let mut sink = canvas();

        for _ in 0..50 {
            assert_eq!(level.tick(&mut sink), LevelPhase::Running);
        }
        assert_eq!(level.player.rect.y, 180.0);
        assert!(level.player_can_jump());

        for _ in 0..20 {
            level.tick(&mut sink);
            assert_eq!(level.player.rect.y, 180.0);
        }
    }

    #[test]
    fn test_walking_into_wall_stops_flush() {
        let wall = Rect::new(50.0, 100.0, 20.0, 100.0);
        let mut level = level(Vec2::new(0.0, 180.0), vec![floor(), wall], far_goal(), Vec::new());
        let mut sink = canvas();

        level.handle_input(InputEvent::MoveRightStart);
        for _ in 0..20 {
            level.tick(&mut sink);
        }
        assert_eq!(level.player.rect.x, 50.0 - level.player.rect.w);
        assert_eq!(level.player.rect.y, 180.0);
    }

    #[test]
    fn test_goal_completes_once_without_drawing() {
        let goal = Rect::new(20.0, 180.0, 20.0, 20.0);
        let mut level = level(Vec2::new(0.0, 180.0), vec![floor()], goal, Vec::new());
        let mut sink = canvas();

        level.handle_input(InputEvent::MoveRightStart);
        let mut ticks = 0;
        while level.tick(&mut sink) == LevelPhase::Running {
            ticks += 1;
            assert!(ticks < 100, "goal never reached");
        }
        assert_eq!(level.phase(), LevelPhase::Completed);
        // Only the running ticks drew a frame
        assert_eq!(sink.frames, ticks);
        assert_eq!(level.take_events(), vec![LevelEvent::LevelCompleted]);

        // Terminal levels stay put
        let x = level.player.rect.x;
        assert_eq!(level.tick(&mut sink), LevelPhase::Completed);
        assert_eq!(level.player.rect.x, x);
        assert!(level.take_events().is_empty());
    }

    #[test]
    fn test_falling_out_dies_once() {
        let mut level = level(Vec2::ZERO, Vec::new(), far_goal(), Vec::new());
        let mut sink = canvas();

        for _ in 0..100 {
            level.tick(&mut sink);
        }
        assert_eq!(level.phase(), LevelPhase::PlayerDied);
        assert!(level.player.rect.y >= 400.0);
        assert_eq!(
            level.take_events(),
            vec![LevelEvent::PlayerDied(DeathCause::FellOut)]
        );
    }

    #[test]
    fn test_enemy_contact_kills() {
        let enemy = Enemy::horizontal(Rect::new(12.0, 180.0, 20.0, 20.0), 100.0, -5.0);
        let mut level = level(Vec2::new(0.0, 180.0), vec![floor()], far_goal(), vec![enemy]);
        let mut sink = canvas();

        assert_eq!(level.tick(&mut sink), LevelPhase::PlayerDied);
        assert_eq!(
            level.take_events(),
            vec![LevelEvent::PlayerDied(DeathCause::Enemy)]
        );
        assert_eq!(level.enemies.len(), 1);
    }

    #[test]
    fn test_stomping_removes_enemy() {
        let enemy = Enemy::horizontal(Rect::new(0.0, 150.0, 20.0, 20.0), 0.0, 0.0);
        let ground = Rect::new(0.0, 300.0, 100.0, 10.0);
        let mut level = level(Vec2::new(0.0, 100.0), vec![ground], far_goal(), vec![enemy]);
        let mut sink = canvas();

        for _ in 0..9 {
            assert_eq!(level.tick(&mut sink), LevelPhase::Running);
        }
        assert!(level.enemies.is_empty());
        assert_eq!(level.player.rect.y, 136.0);

        // Keeps falling through where the enemy was
        level.tick(&mut sink);
        assert_eq!(level.player.rect.y, 145.0);
        assert!(level.take_events().is_empty());
    }

    #[test]
    fn test_enemy_moving_into_player_is_not_stomped() {
        let enemy = Enemy::vertical(Rect::new(0.0, 150.0, 20.0, 20.0), 100.0, 5.0);
        let mut level = level(Vec2::new(0.0, 180.0), vec![floor()], far_goal(), vec![enemy]);
        let mut sink = canvas();

        let mut phase = LevelPhase::Running;
        for _ in 0..5 {
            phase = level.tick(&mut sink);
            if phase != LevelPhase::Running {
                break;
            }
        }
        assert_eq!(phase, LevelPhase::PlayerDied);
        assert_eq!(level.enemies.len(), 1);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut level = level(Vec2::new(0.0, 100.0), vec![floor()], far_goal(), Vec::new());
        let mut sink = canvas();

        level.handle_input(InputEvent::JumpRequested);
        level.tick(&mut sink);
        assert!(!level.player.wants_to_jump);
        assert_eq!(level.player.vy, 1.0);

        while !level.player_can_jump() {
            level.tick(&mut sink);
        }
        level.handle_input(InputEvent::JumpRequested);
        level.tick(&mut sink);
        assert_eq!(level.player.rect.y, 180.0 - 13.0);
        assert_eq!(level.player.vy, -12.0);
    }

    #[test]
    fn test_frame_is_drawn_in_screen_space() {
        let terrain = vec![Rect::new(0.0, 200.0, 1000.0, 10.0)];
        let mut level = level(Vec2::new(500.0, 180.0), terrain, far_goal(), Vec::new());
        let mut sink = canvas();

        level.tick(&mut sink);
        assert_eq!(sink.frames, 1);
        assert_eq!(sink.calls_with(ColorTag::Black).count(), 1);
        assert_eq!(sink.calls_with(ColorTag::Yellow).count(), 1);

        let player = sink.calls_with(ColorTag::Blue).next().unwrap();
        assert_eq!(player.rect.x, 300.0);
        // Draw order: terrain, enemies, goal, player
        assert_eq!(sink.calls.last().map(|c| c.color), Some(ColorTag::Blue));
    }
}
