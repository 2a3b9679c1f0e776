//! Gravitrip - A tilt-controlled marble maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, ball physics, collisions)
//! - `session`: Game session lifecycle (start, tick, stop, restart)
//! - `renderer`: Renderer-agnostic scene output (vertices, ASCII)
//! - `platform`: Browser binding (wasm32 only)
//! - `best_times` / `settings`: Persisted player data

pub mod best_times;
pub mod difficulty;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_times::BestTimes;
pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{GameError, Result};
pub use session::{Session, SessionReport};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of one maze grid cell (canvas units)
    pub const CELL_SIZE: f32 = 40.0;
    /// Thickness of the four rectangles sealing the maze boundary
    pub const BORDER_THICKNESS: f32 = 20.0;
    /// Smallest grid (in cells, per axis) that still holds a carvable maze
    pub const MIN_GRID_CELLS: usize = 3;
    /// Upper limit on `cols * rows`
    pub const MAX_GRID_CELLS: usize = 1 << 20;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const HOLE_RADIUS: f32 = 15.0;
    /// Extra reach around the end point that counts as arriving
    pub const WIN_MARGIN: f32 = 10.0;

    /// Fixed tick interval (~60 Hz)
    pub const TICK_MS: u32 = 16;
    /// Per-tick multiplicative velocity damping
    pub const FRICTION: f32 = 0.98;
    /// Velocity scale applied (with sign flip) on wall contact
    pub const BOUNCE: f32 = 0.5;
    /// Speeds below this snap to exact rest
    pub const REST_EPSILON: f32 = 1e-3;

    /// Tilt degrees to velocity units per tick
    pub const TILT_SENSITIVITY: f32 = 0.1;
    /// Per-axis acceleration delta that counts as a shake
    pub const SHAKE_THRESHOLD: f32 = 15.0;

    /// Hole chance per dead end is `HOLE_CHANCE_BASE * hole_count / HOLE_CHANCE_DIVISOR`
    pub const HOLE_CHANCE_BASE: f32 = 0.3;
    pub const HOLE_CHANCE_DIVISOR: f32 = 8.0;
}

/// Center of the grid cell at (col, row) in canvas units
#[inline]
pub fn cell_center(col: usize, row: usize) -> Vec2 {
    use consts::CELL_SIZE;
    Vec2::new(
        col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    )
}

/// Grid cell (col, row) containing a canvas point, if the point is non-negative
#[inline]
pub fn cell_at(pos: Vec2) -> Option<(usize, usize)> {
    use consts::CELL_SIZE;
    if pos.x < 0.0 || pos.y < 0.0 || !pos.is_finite() {
        return None;
    }
    Some(((pos.x / CELL_SIZE) as usize, (pos.y / CELL_SIZE) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center_and_back() {
        let c = cell_center(1, 1);
        assert_eq!(c, Vec2::new(60.0, 60.0));
        assert_eq!(cell_at(c), Some((1, 1)));
        assert_eq!(cell_at(Vec2::new(-1.0, 5.0)), None);
    }
}
