//! Blockhop headless runner
//!
//! Plays the campaign with seeded pseudo-random input and logs the result.
//!
//! Usage: `blockhop [settings.json] [levels.json]`

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use blockhop::sim::InputEvent;
use blockhop::{FrameRecorder, Game, GamePhase, Settings, levels};

/// Two minutes of play at the default frame period
const MAX_TICKS: u32 = 2 * 60 * 60;

/// Demo-mode player: mostly runs right, turns around now and then, and
/// jumps at random.
struct DemoPilot {
    rng: Pcg32,
    left: bool,
    right: bool,
}

impl DemoPilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            left: false,
            right: false,
        }
    }

    fn next_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.rng.random_bool(0.05) {
            let want_right = self.rng.random_bool(0.8);
            if want_right != self.right {
                self.right = want_right;
                events.push(if want_right {
                    InputEvent::MoveRightStart
                } else {
                    InputEvent::MoveRightEnd
                });
            }
            let want_left = !want_right && self.rng.random_bool(0.5);
            if want_left != self.left {
                self.left = want_left;
                events.push(if want_left {
                    InputEvent::MoveLeftStart
                } else {
                    InputEvent::MoveLeftEnd
                });
            }
        }
        if self.rng.random_bool(0.08) {
            events.push(InputEvent::JumpRequested);
        }
        events
    }
}

fn main() {
    env_logger::init();
    log::info!("Blockhop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let specs = match args.next() {
        Some(path) => match levels::load(Path::new(&path)) {
            Ok(specs) => specs,
            Err(e) => {
                log::warn!("Falling back to built-in levels: {}", e);
                levels::campaign()
            }
        },
        None => levels::campaign(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Demo input seeded with: {}", seed);

    let mut sink = FrameRecorder::new(settings.canvas_width, settings.canvas_height);
    let mut game = Game::new(specs, settings.physics);
    let mut pilot = DemoPilot::new(seed);
    game.start(&mut sink);

    let mut ticks = 0;
    while ticks < MAX_TICKS && game.phase() == GamePhase::Playing {
        for event in pilot.next_events() {
            game.handle_input(event);
        }
        game.tick(&mut sink);
        ticks += 1;
    }

    log::info!(
        "Finished after {} ticks: {}, {} deaths, {} frames drawn",
        ticks,
        game.progress(),
        game.deaths(),
        sink.frames
    );
    log::debug!("Last frame: {}", sink.summary());
}
