//! Level sequencing
//!
//! Drives the current level at a fixed tick period, rebuilds it from its spec
//! when the player dies, and moves on when it is completed. Outcome events are
//! drained from the level's queue after every tick.

use crate::consts::MAX_SUBSTEPS;
use crate::levels::LevelSpec;
use crate::render::RenderSink;
use crate::sim::{DeathCause, InputEvent, Level, LevelEvent, PhysicsConfig};

/// Overall progress through the campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// A level is being played
    Playing,
    /// Every level has been completed
    Victory,
}

/// Campaign state: the level list and the attempt in progress
pub struct Game {
    levels: Vec<LevelSpec>,
    physics: PhysicsConfig,
    level_index: usize,
    current: Option<Level>,
    phase: GamePhase,
    deaths: u32,
    accumulator_ms: f32,
}

impl Game {
    pub fn new(levels: Vec<LevelSpec>, physics: PhysicsConfig) -> Self {
        assert!(!levels.is_empty(), "a game needs at least one level");
        let current = levels[0].build(&physics);
        log::info!("Starting {} ({} levels)", levels[0].name, levels.len());
        Self {
            levels,
            physics,
            level_index: 0,
            current: Some(current),
            phase: GamePhase::Playing,
            deaths: 0,
            accumulator_ms: 0.0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Index of the level being played (equals the level count after victory)
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Human-readable campaign progress for status lines
    pub fn progress(&self) -> String {
        match self.phase {
            GamePhase::Victory => "campaign completed".to_string(),
            GamePhase::Playing => {
                format!("on level {} of {}", self.level_index + 1, self.levels.len())
            }
        }
    }

    /// Total deaths across the campaign
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// The current attempt, if the campaign is not over
    pub fn level(&self) -> Option<&Level> {
        self.current.as_ref()
    }

    /// Draw the opening frame of the current level
    pub fn start(&self, sink: &mut impl RenderSink) {
        match &self.current {
            Some(level) => level.draw(sink),
            None => sink.victory(),
        }
    }

    /// Forward input to the current level; ignored after victory
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(level) = &mut self.current {
            level.handle_input(event);
        }
    }

    /// Run as many fixed ticks as `elapsed_ms` of wall time covers.
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, elapsed_ms: f32, sink: &mut impl RenderSink) -> u32 {
        // NaN, negative and zero deltas never advance time
        if !(elapsed_ms > 0.0) {
            return 0;
        }
        let period = self.physics.frame_period_ms as f32;
        self.accumulator_ms += elapsed_ms.min(period * MAX_SUBSTEPS as f32);

        let mut substeps = 0;
        while self.accumulator_ms >= period && substeps < MAX_SUBSTEPS {
            self.accumulator_ms -= period;
            if self.phase == GamePhase::Victory {
                continue;
            }
            self.tick(sink);
            substeps += 1;
        }
        substeps
    }

    /// Advance the current level by exactly one tick
    pub fn tick(&mut self, sink: &mut impl RenderSink) -> GamePhase {
        let Some(level) = self.current.as_mut() else {
            return self.phase;
        };
        level.tick(sink);
        let events = level.take_events();

        for event in events {
            match event {
                LevelEvent::PlayerDied(cause) => self.restart(cause, sink),
                LevelEvent::LevelCompleted => self.advance(sink),
            }
        }
        self.phase
    }

    fn restart(&mut self, cause: DeathCause, sink: &mut impl RenderSink) {
        self.deaths += 1;
        log::info!(
            "Player died ({:?}) on {}, restarting (deaths: {})",
            cause,
            self.levels[self.level_index].name,
            self.deaths
        );
        let level = self.levels[self.level_index].build(&self.physics);
        level.draw(sink);
        self.current = Some(level);
    }

    fn advance(&mut self, sink: &mut impl RenderSink) {
        self.level_index += 1;
        match self.levels.get(self.level_index) {
            Some(spec) => {
                log::info!("Level complete, starting {}", spec.name);
                let level = spec.build(&self.physics);
                level.draw(sink);
                self.current = Some(level);
            }
            None => {
                log::info!("Campaign complete with {} deaths", self.deaths);
                self.current = None;
                self.phase = GamePhase::Victory;
                sink.victory();
            }
        }
    }
}
