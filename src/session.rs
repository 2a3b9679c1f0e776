//! Game session lifecycle
//!
//! A `Session` owns exactly one `SessionState` and is the only writer of the
//! ball. Control input, shake resets and ticks all go through `&mut self`, so
//! a host that receives device events on another thread has to funnel them
//! through whoever owns the session.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::settings::Settings;
use crate::sim::{ControlInput, Outcome, Phase, SessionState, ShakeDetector, TickInput};

/// Summary handed to the host when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    pub elapsed_secs: f32,
    pub seed: u64,
}

impl SessionReport {
    /// Elapsed time, only for a win
    pub fn winning_time(&self) -> Option<f32> {
        (self.outcome == Outcome::Win).then_some(self.elapsed_secs)
    }
}

/// One play-through of one maze
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    tilt_sensitivity: f32,
    shake_to_reset: bool,
    shake: ShakeDetector,
}

impl Session {
    /// Generate a maze and start playing it
    pub fn start(
        difficulty: Difficulty,
        width: f32,
        height: f32,
        seed: u64,
        settings: &Settings,
    ) -> Result<Self> {
        let state = new_state(difficulty, width, height, seed)?;
        log::info!(
            "Session started: {} on {}x{} (seed {})",
            difficulty,
            width,
            height,
            seed
        );
        Ok(Self {
            state,
            tilt_sensitivity: settings.tilt_sensitivity,
            shake_to_reset: settings.shake_to_reset,
            shake: ShakeDetector::new(settings.shake_threshold),
        })
    }

    /// Start from a difficulty key such as `"hard"`
    pub fn start_named(
        key: &str,
        width: f32,
        height: f32,
        seed: u64,
        settings: &Settings,
    ) -> Result<Self> {
        Self::start(key.parse()?, width, height, seed, settings)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.maze.difficulty
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == Phase::Playing
    }

    /// Advance one tick with the given control input
    pub fn tick(&mut self, control: ControlInput) -> Outcome {
        let input = TickInput {
            control,
            tilt_sensitivity: self.tilt_sensitivity,
        };
        let was_running = self.is_running();
        let outcome = crate::sim::tick(&mut self.state, &input);
        if was_running && outcome.is_terminal() {
            log::info!(
                "Session finished: {:?} after {:.2}s",
                outcome,
                self.state.elapsed_secs()
            );
        }
        outcome
    }

    /// Feed a device-motion sample. Returns true if it reset the ball.
    pub fn on_motion(&mut self, accel: Vec3) -> bool {
        let shaken = self.shake.observe(accel);
        if shaken && self.shake_to_reset && self.is_running() {
            log::debug!("Shake detected, ball back to start");
            self.state.reset_ball();
            return true;
        }
        false
    }

    /// End the session. A session that already finished keeps its outcome;
    /// stopping a running one with `Continue` marks it abandoned.
    pub fn stop(&mut self, outcome: Outcome) -> SessionReport {
        if self.is_running() {
            self.state.phase = Phase::Finished(outcome);
            log::info!("Session stopped by host: {:?}", outcome);
        }
        self.report()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            difficulty: self.difficulty(),
            outcome: self.state.outcome(),
            elapsed_secs: self.state.elapsed_secs(),
            seed: self.state.rng_state.seed,
        }
    }

    /// New maze of the same difficulty and canvas, clock back to zero
    pub fn restart(&mut self) -> Result<()> {
        let seed = self.state.rng_state.next_seed();
        let canvas = self.state.maze.canvas;
        self.state = new_state(self.difficulty(), canvas.x, canvas.y, seed)?;
        log::info!("Session restarted: {} (seed {})", self.difficulty(), seed);
        Ok(())
    }
}

fn new_state(difficulty: Difficulty, width: f32, height: f32, seed: u64) -> Result<SessionState> {
    let rng_state = crate::sim::RngState::new(seed);
    let maze = crate::sim::generate_with_rng(difficulty, width, height, &mut rng_state.to_rng())?;
    Ok(SessionState::new(maze, seed))
}
