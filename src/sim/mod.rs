//! Deterministic simulation module
//!
//! Maze generation and ball physics live here. This module must be pure and
//! deterministic:
//! - Fixed tick cadence only
//! - Seeded RNG only
//! - Walls resolved in generation order
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod maze;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, ball_wall_collision, ball_wall_collision_within, resolve_wall,
};
pub use geometry::{Hole, Wall};
pub use grid::{Cell, Grid};
pub use input::{ControlInput, ShakeDetector};
pub use maze::{Maze, generate, generate_with_rng};
pub use state::{Ball, Outcome, Phase, RngState, SessionState};
pub use tick::{Arena, TickInput, step, tick};
