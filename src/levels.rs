//! Level specifications and the built-in campaign
//!
//! A `LevelSpec` is pure data. Every attempt at a level builds a fresh
//! [`Level`] from it so player position and surviving enemies reset.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::sim::{Enemy, Level, PhysicsConfig, Rect};

/// Enemy placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnemySpec {
    /// Patrols `distance` to the right of its starting x
    Horizontal {
        rect: Rect,
        distance: f32,
        velocity: f32,
    },
    /// Patrols `distance` below its starting y
    Vertical {
        rect: Rect,
        distance: f32,
        velocity: f32,
    },
}

impl EnemySpec {
    pub fn horizontal(x: f32, y: f32, w: f32, h: f32, distance: f32, velocity: f32) -> Self {
        EnemySpec::Horizontal {
            rect: Rect::new(x, y, w, h),
            distance,
            velocity,
        }
    }

    pub fn vertical(x: f32, y: f32, w: f32, h: f32, distance: f32, velocity: f32) -> Self {
        EnemySpec::Vertical {
            rect: Rect::new(x, y, w, h),
            distance,
            velocity,
        }
    }

    pub fn build(&self) -> Enemy {
        match *self {
            EnemySpec::Horizontal {
                rect,
                distance,
                velocity,
            } => Enemy::horizontal(rect, distance, velocity),
            EnemySpec::Vertical {
                rect,
                distance,
                velocity,
            } => Enemy::vertical(rect, distance, velocity),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let (EnemySpec::Horizontal {
            rect,
            distance,
            velocity,
        }
        | EnemySpec::Vertical {
            rect,
            distance,
            velocity,
        }) = self;
        if !rect.is_valid() {
            return Err(format!("enemy rect {:?} must have positive size", rect));
        }
        if !(distance.is_finite() && *distance >= 0.0) {
            return Err(format!("patrol distance {} must be non-negative", distance));
        }
        if !velocity.is_finite() {
            return Err(format!("patrol velocity {} must be finite", velocity));
        }
        Ok(())
    }
}

/// Everything needed to construct a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    #[serde(default)]
    pub name: String,
    pub player_start: Vec2,
    pub terrain: Vec<Rect>,
    pub goal: Rect,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    pub x_max: f32,
    pub y_max: f32,
}

impl LevelSpec {
    /// Check the invariants that `build` would otherwise assert on
    pub fn validate(&self) -> Result<(), LoadError> {
        let invalid = |msg: String| LoadError::Invalid(format!("{}: {}", self.name, msg));

        if !self.player_start.is_finite() {
            return Err(invalid(format!("player start {} is not finite", self.player_start)));
        }
        if !(self.x_max > 0.0 && self.y_max > 0.0) {
            return Err(invalid(format!(
                "bounds {}x{} must be positive",
                self.x_max, self.y_max
            )));
        }
        if let Some(rect) = self.terrain.iter().find(|r| !r.is_valid()) {
            return Err(invalid(format!("terrain {:?} must have positive size", rect)));
        }
        if !self.goal.is_valid() {
            return Err(invalid(format!("goal {:?} must have positive size", self.goal)));
        }
        for enemy in &self.enemies {
            enemy.validate().map_err(invalid)?;
        }
        Ok(())
    }

    /// Build a fresh attempt at this level
    pub fn build(&self, physics: &PhysicsConfig) -> Level {
        Level::new(
            self.player_start,
            self.terrain.clone(),
            self.goal,
            self.enemies.iter().map(EnemySpec::build).collect(),
            Vec2::new(self.x_max, self.y_max),
            *physics,
        )
    }
}

/// Parse and validate a JSON array of level specs
pub fn from_json(json: &str) -> Result<Vec<LevelSpec>, LoadError> {
    let specs: Vec<LevelSpec> = serde_json::from_str(json)?;
    if specs.is_empty() {
        return Err(LoadError::Invalid("level pack is empty".to_string()));
    }
    for spec in &specs {
        spec.validate()?;
    }
    Ok(specs)
}

/// Read a JSON level pack from disk
pub fn load(path: &Path) -> Result<Vec<LevelSpec>, LoadError> {
    let json = std::fs::read_to_string(path)?;
    let specs = from_json(&json)?;
    log::info!("Loaded {} levels from {}", specs.len(), path.display());
    Ok(specs)
}

/// `n` platforms, each offset from the previous by `(hdist, vdist)`
pub fn ascending_stairs(
    x0: f32,
    y0: f32,
    hdist: f32,
    vdist: f32,
    w: f32,
    h: f32,
    n: usize,
) -> Vec<Rect> {
    (0..n)
        .map(|i| {
            let i = i as f32;
            Rect::new(x0 + hdist * i, y0 + vdist * i, w, h)
        })
        .collect()
}

/// Five vertical patrollers climbing diagonally across the sky
pub fn birdies() -> Vec<EnemySpec> {
    (0..5)
        .map(|i| {
            let i = i as f32;
            EnemySpec::vertical(160.0 + 200.0 * i, 650.0 - 80.0 * i, 20.0, 20.0, 120.0, 4.0)
        })
        .collect()
}

pub fn level_one() -> LevelSpec {
    LevelSpec {
        name: "level 1".to_string(),
        player_start: Vec2::ZERO,
        terrain: vec![
            Rect::new(0.0, 200.0, 150.0, 10.0),
            Rect::new(400.0, 200.0, 1000.0, 10.0),
            Rect::new(200.0, 178.0, 50.0, 10.0),
            Rect::new(300.0, 150.0, 50.0, 10.0),
        ],
        goal: Rect::new(900.0, 150.0, 20.0, 20.0),
        enemies: vec![
            EnemySpec::horizontal(0.0, 180.0, 20.0, 20.0, 130.0, 2.0),
            EnemySpec::horizontal(200.0, 158.0, 20.0, 20.0, 30.0, 1.0),
            EnemySpec::horizontal(300.0, 130.0, 20.0, 20.0, 30.0, 1.0),
            EnemySpec::horizontal(400.0, 180.0, 20.0, 20.0, 180.0, 3.0),
        ],
        x_max: 1000.0,
        y_max: 400.0,
    }
}

pub fn level_two() -> LevelSpec {
    let mut enemies = vec![
        EnemySpec::horizontal(0.0, 180.0, 20.0, 20.0, 580.0, 4.0),
        EnemySpec::horizontal(0.0, 140.0, 20.0, 20.0, 580.0, 8.0),
    ];
    enemies.extend(
        (1..=7).map(|i| EnemySpec::vertical(50.0 * i as f32, 125.0, 20.0, 20.0, 54.0, 3.0)),
    );
    LevelSpec {
        name: "level 2".to_string(),
        player_start: Vec2::ZERO,
        terrain: vec![Rect::new(0.0, 200.0, 600.0, 10.0)],
        goal: Rect::new(500.0, 150.0, 20.0, 20.0),
        enemies,
        x_max: 600.0,
        y_max: 400.0,
    }
}

pub fn level_three() -> LevelSpec {
    let mut terrain = ascending_stairs(100.0, 760.0, 100.0, -40.0, 50.0, 10.0, 10);
    terrain.push(Rect::new(0.0, 800.0, 50.0, 200.0));
    LevelSpec {
        name: "level 3".to_string(),
        player_start: Vec2::new(0.0, 750.0),
        terrain,
        goal: Rect::new(1100.0, 950.0, 20.0, 20.0),
        enemies: birdies(),
        x_max: 2000.0,
        y_max: 1000.0,
    }
}

/// The built-in levels in play order
pub fn campaign() -> Vec<LevelSpec> {
    vec![level_one(), level_two(), level_three()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameRecorder;
    use crate::sim::{DeathCause, LevelEvent, LevelPhase};

    #[test]
    fn test_campaign_is_valid() {
        let levels = campaign();
        assert_eq!(levels.len(), 3);
        for spec in &levels {
            spec.validate().unwrap();
        }
        assert_eq!(levels[1].enemies.len(), 9);
        assert_eq!(levels[2].terrain.len(), 11);
    }

    #[test]
    fn test_stairs_and_birdies_layout() {
        let stairs = ascending_stairs(100.0, 760.0, 100.0, -40.0, 50.0, 10.0, 10);
        assert_eq!(stairs[0], Rect::new(100.0, 760.0, 50.0, 10.0));
        assert_eq!(stairs[9], Rect::new(1000.0, 400.0, 50.0, 10.0));

        let birds = birdies();
        assert_eq!(birds.len(), 5);
        assert_eq!(birds[4], EnemySpec::vertical(960.0, 330.0, 20.0, 20.0, 120.0, 4.0));
    }

    #[test]
    fn test_build_resets_state() {
        let spec = level_one();
        let physics = PhysicsConfig::default();
        let mut first = spec.build(&physics);
        let mut sink = FrameRecorder::new(600.0, 400.0);
        for _ in 0..10 {
            first.tick(&mut sink);
        }
        let second = spec.build(&physics);
        assert_eq!(second.player.rect.top_left(), Vec2::ZERO);
        assert_eq!(second.enemies.len(), 4);
        assert_eq!(second.ticks(), 0);
        assert_ne!(first.enemies[0].rect().x, second.enemies[0].rect().x);
    }

    #[test]
    fn test_idle_player_is_eventually_caught() {
        let mut level = level_two().build(&PhysicsConfig::default());
        let mut sink = FrameRecorder::new(600.0, 400.0);
        for _ in 0..1000 {
            if level.tick(&mut sink) != LevelPhase::Running {
                break;
            }
        }
        assert_eq!(
            level.take_events(),
            vec![LevelEvent::PlayerDied(DeathCause::Enemy)]
        );
    }

    #[test]
    fn test_json_pack() {
        let json = r#"[{
            "name": "tiny",
            "player_start": [0.0, 0.0],
            "terrain": [{"x": 0.0, "y": 200.0, "w": 150.0, "h": 10.0}],
            "goal": {"x": 100.0, "y": 180.0, "w": 20.0, "h": 20.0},
            "enemies": [
                {"kind": "vertical", "rect": {"x": 50.0, "y": 100.0, "w": 20.0, "h": 20.0},
                 "distance": 40.0, "velocity": 2.0}
            ],
            "x_max": 600.0,
            "y_max": 400.0
        }]"#;
        let specs = from_json(json).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(
            specs[0].enemies[0],
            EnemySpec::vertical(50.0, 100.0, 20.0, 20.0, 40.0, 2.0)
        );
    }

    #[test]
    #[should_panic(expected = "terrain rect must have positive size")]
    fn test_build_rejects_unchecked_zero_width_terrain() {
        // Deserializing directly skips `validate`, so `build` must still refuse it
        let spec: LevelSpec = serde_json::from_str(
            r#"{
                "player_start": [0.0, 0.0],
                "terrain": [{"x": 0.0, "y": 200.0, "w": 0.0, "h": 10.0}],
                "goal": {"x": 100.0, "y": 180.0, "w": 20.0, "h": 20.0},
                "x_max": 600.0,
                "y_max": 400.0
            }"#,
        )
        .unwrap();
        let _ = spec.build(&PhysicsConfig::default());
    }

    #[test]
    #[should_panic(expected = "goal rect must have positive size")]
    fn test_build_rejects_negative_goal() {
        let mut spec = level_one();
        spec.goal = Rect {
            x: 100.0,
            y: 180.0,
            w: -5.0,
            h: 20.0,
        };
        let _ = spec.build(&PhysicsConfig::default());
    }

    #[test]
    fn test_invalid_pack_is_rejected() {
        let json = r#"[{
            "player_start": [0.0, 0.0],
            "terrain": [{"x": 0.0, "y": 200.0, "w": 0.0, "h": 10.0}],
            "goal": {"x": 100.0, "y": 180.0, "w": 20.0, "h": 20.0},
            "x_max": 600.0,
            "y_max": 400.0
        }]"#;
        assert!(matches!(from_json(json), Err(LoadError::Invalid(_))));
        assert!(matches!(from_json("[]"), Err(LoadError::Invalid(_))));
        assert!(matches!(from_json("{"), Err(LoadError::Parse(_))));
    }
}
