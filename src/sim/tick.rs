//! Fixed cadence simulation tick
//!
//! One tick: apply control override, damp, integrate, clamp to the world,
//! resolve walls, then test holes and the end point.

use glam::Vec2;

use super::collision::{ball_hole_collision, ball_reached_end, resolve_wall};
use super::geometry::{Hole, Wall};
use super::input::ControlInput;
use super::maze::Maze;
use super::state::{Ball, Outcome, Phase, SessionState};
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Control source for this tick
    pub control: ControlInput,
    /// Tilt degrees to velocity scale
    pub tilt_sensitivity: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            control: ControlInput::None,
            tilt_sensitivity: TILT_SENSITIVITY,
        }
    }
}

/// Borrowed view of everything the ball can touch
#[derive(Debug, Clone, Copy)]
pub struct Arena<'a> {
    pub walls: &'a [Wall],
    pub holes: &'a [Hole],
    pub end: Vec2,
    pub canvas: Vec2,
}

impl<'a> Arena<'a> {
    pub fn of(maze: &'a Maze) -> Self {
        Self {
            walls: &maze.walls,
            holes: &maze.holes,
            end: maze.end,
            canvas: maze.canvas,
        }
    }
}

/// Range the ball center may occupy on a canvas
#[inline]
pub fn world_bounds(canvas: Vec2, radius: f32) -> (Vec2, Vec2) {
    let r = Vec2::splat(radius);
    (r, (canvas - r).max(r))
}

/// Advance one ball by one tick against an arena
pub fn step(ball: &mut Ball, arena: &Arena<'_>, control: Option<Vec2>) -> Outcome {
    // A device that drops an axis reports NaN; treat it as no input
    if let Some(vel) = control.filter(|v| v.is_finite()) {
        ball.vel = vel;
    }

    ball.vel *= FRICTION;
    if ball.vel.length() < REST_EPSILON {
        ball.vel = Vec2::ZERO;
    }

    ball.pos += ball.vel;

    let (lo, hi) = world_bounds(arena.canvas, ball.radius);
    ball.pos = ball.pos.clamp(lo, hi);

    for wall in arena.walls {
        resolve_wall(ball, wall, (lo, hi));
    }
    // A wall push may not leave the world either
    ball.pos = ball.pos.clamp(lo, hi);

    if arena
        .holes
        .iter()
        .any(|hole| ball_hole_collision(ball.pos, ball.radius, hole))
    {
        return Outcome::Loss;
    }

    if ball_reached_end(ball.pos, ball.radius, arena.end) {
        return Outcome::Win;
    }

    Outcome::Continue
}

/// Advance the session state by one tick.
///
/// Does nothing once the session has finished; the final outcome is
/// returned again.
pub fn tick(state: &mut SessionState, input: &TickInput) -> Outcome {
    if let Phase::Finished(outcome) = state.phase {
        return outcome;
    }

    let control = input.control.velocity(input.tilt_sensitivity);
    let outcome = step(&mut state.ball, &Arena::of(&state.maze), control);
    state.time_ticks += 1;

    if outcome.is_terminal() {
        state.phase = Phase::Finished(outcome);
    }
    outcome
}
