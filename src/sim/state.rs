//! Session state and core simulation types
//!
//! All state the tick touches lives here. There is no process-wide game
//! state: a `SessionState` is owned by its session and passed explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use crate::consts::*;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Keep ticking
    Continue,
    /// Ball reached the end point
    Win,
    /// Ball fell into a hole
    Loss,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ticks are advancing the ball
    Playing,
    /// Ended; ball mutation has stopped
    Finished(Outcome),
}

/// The ball - the only mutable physics entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at rest at `pos`
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Move back to `pos` and stop
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }

    /// Seed for the next maze in a run (restart)
    pub fn next_seed(&self) -> u64 {
        self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Seed the maze was generated from
    pub rng_state: RngState,
    /// Static maze data
    pub maze: Maze,
    pub ball: Ball,
    pub phase: Phase,
    /// Ticks advanced while playing
    pub time_ticks: u64,
}

impl SessionState {
    /// Wrap a maze generated from `seed` and place the ball at its start
    pub fn new(maze: Maze, seed: u64) -> Self {
        let ball = maze.spawn_ball();
        Self {
            rng_state: RngState::new(seed),
            maze,
            ball,
            phase: Phase::Playing,
            time_ticks: 0,
        }
    }

    /// Elapsed play time in seconds (tick count times tick interval)
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * TICK_MS as f32 / 1000.0
    }

    /// Last outcome: `Continue` while playing
    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::Playing => Outcome::Continue,
            Phase::Finished(outcome) => outcome,
        }
    }

    /// Return the ball to the start, keep the clock running
    pub fn reset_ball(&mut self) {
        let start = self.maze.start;
        self.ball.reset(start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::maze::generate;

    #[test]
    fn test_new_session_state() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 4).unwrap();
        let state = SessionState::new(maze, 4);
        assert_eq!(state.ball.pos, Vec2::new(60.0, 60.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.outcome(), Outcome::Continue);
    }

    #[test]
    fn test_elapsed_from_ticks() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 4).unwrap();
        let mut state = SessionState::new(maze, 4);
        state.time_ticks = 125;
        assert!((state.elapsed_secs() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_ball() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 4).unwrap();
        let mut state = SessionState::new(maze, 4);

        state.ball.pos = Vec2::new(300.0, 200.0);
        state.ball.vel = Vec2::new(3.0, -1.0);
        state.reset_ball();
        assert_eq!(state.ball, Ball::at(Vec2::new(60.0, 60.0)));
    }

    #[test]
    fn test_next_seed_changes() {
        let rng = RngState::new(1);
        assert_ne!(rng.next_seed(), 1);
        assert_eq!(rng.next_seed(), RngState::new(1).next_seed());
    }
}
