//! Procedural maze generation
//!
//! A maze is carved once per session and never changes afterwards. Only the
//! ball moves; everything produced here is read-only input to `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Hole, Wall};
use super::grid::{Cell, Grid};
use super::state::Ball;
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::{GameError, Result};
use crate::{cell_at, cell_center};

/// Generated maze: static obstacles plus start and end markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    pub difficulty: Difficulty,
    /// Canvas the maze was generated for (world bounds for the ball)
    pub canvas: Vec2,
    /// Carved grid, kept for solving and rendering
    pub grid: Grid,
    pub walls: Vec<Wall>,
    pub holes: Vec<Hole>,
    pub start_cell: (usize, usize),
    pub end_cell: (usize, usize),
    /// Ball spawn point (center of the start cell)
    pub start: Vec2,
    /// Reaching this point wins
    pub end: Vec2,
}

/// Grid size for a profile on a canvas, or `MazeTooSmall` / `MazeTooLarge`
pub fn grid_dimensions(profile: &DifficultyProfile, width: f32, height: f32) -> Result<(usize, usize)> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(GameError::MazeTooSmall { cols: 0, rows: 0 });
    }
    // `as` saturates, so an absurd canvas lands on usize::MAX and fails below
    let cols = (width * profile.maze_size / CELL_SIZE).floor() as usize;
    let rows = (height * profile.maze_size / CELL_SIZE).floor() as usize;
    if cols < MIN_GRID_CELLS || rows < MIN_GRID_CELLS {
        return Err(GameError::MazeTooSmall { cols, rows });
    }
    match cols.checked_mul(rows) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok((cols, rows)),
        _ => Err(GameError::MazeTooLarge { cols, rows }),
    }
}

/// Last carvable node along an axis of `n` cells (always odd)
fn last_node(n: usize) -> usize {
    let last = n - 2;
    if last % 2 == 1 { last } else { last - 1 }
}

/// Generate a maze from a seed
pub fn generate(difficulty: Difficulty, width: f32, height: f32, seed: u64) -> Result<Maze> {
    let mut rng = Pcg32::seed_from_u64(seed);
    generate_with_rng(difficulty, width, height, &mut rng)
}

/// Generate a maze drawing all randomness from `rng`
pub fn generate_with_rng<R: Rng + ?Sized>(
    difficulty: Difficulty,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Result<Maze> {
    let profile = difficulty.profile();
    let (cols, rows) = grid_dimensions(&profile, width, height)?;

    let mut grid = Grid::filled(cols, rows);
    grid.carve(rng);

    let mut walls: Vec<Wall> = grid
        .iter()
        .filter(|&(_, _, cell)| cell == Cell::Wall)
        .map(|(col, row, _)| {
            Wall::new(col as f32 * CELL_SIZE, row as f32 * CELL_SIZE, CELL_SIZE, CELL_SIZE)
        })
        .collect();
    walls.extend(border_walls(cols, rows));

    let start_cell = (1, 1);
    let end_cell = (last_node(cols), last_node(rows));

    // Bernoulli draw per dead end; density is statistical, not an exact count.
    // Start and end are dead ends like any other, see `is_solvable`.
    let hole_chance = HOLE_CHANCE_BASE * profile.hole_count as f32 / HOLE_CHANCE_DIVISOR;
    let mut holes = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if grid.is_dead_end(col, row) && rng.random::<f32>() < hole_chance {
                holes.push(Hole::new(cell_center(col, row)));
            }
        }
    }

    let maze = Maze {
        difficulty,
        canvas: Vec2::new(width, height),
        grid,
        walls,
        holes,
        start_cell,
        end_cell,
        start: cell_center(start_cell.0, start_cell.1),
        end: cell_center(end_cell.0, end_cell.1),
    };

    log::info!(
        "Generated {} maze: {}x{} cells, {} walls, {} holes",
        difficulty,
        cols,
        rows,
        maze.walls.len(),
        maze.holes.len()
    );
    if !maze.is_solvable() {
        log::warn!("{} maze has no hole-free path from start to end", difficulty);
    }

    Ok(maze)
}

/// Four strips sealing the grid extent
fn border_walls(cols: usize, rows: usize) -> [Wall; 4] {
    let w = cols as f32 * CELL_SIZE;
    let h = rows as f32 * CELL_SIZE;
    [
        Wall::new(0.0, 0.0, w, BORDER_THICKNESS),
        Wall::new(0.0, 0.0, BORDER_THICKNESS, h),
        Wall::new(w - BORDER_THICKNESS, 0.0, BORDER_THICKNESS, h),
        Wall::new(0.0, h - BORDER_THICKNESS, w, BORDER_THICKNESS),
    ]
}

impl Maze {
    /// Fresh ball resting at the start point
    pub fn spawn_ball(&self) -> Ball {
        Ball::at(self.start)
    }

    pub fn cols(&self) -> usize {
        self.grid.cols
    }

    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    /// Grid cells occupied by a hole
    pub fn hole_cells(&self) -> Vec<(usize, usize)> {
        self.holes.iter().filter_map(|h| cell_at(h.pos)).collect()
    }

    /// Cell path from start to end avoiding hole cells
    pub fn solution_path(&self) -> Option<Vec<(usize, usize)>> {
        let holes = self.hole_cells();
        self.grid
            .shortest_path(self.start_cell, self.end_cell, |c, r| holes.contains(&(c, r)))
    }

    /// Whether the end can be reached without crossing a hole.
    /// Holes are never moved to make this true.
    pub fn is_solvable(&self) -> bool {
        self.solution_path().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_800x600_scenario() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 1).unwrap();
        assert_eq!((maze.cols(), maze.rows()), (14, 10));
        assert_eq!(maze.start, Vec2::new(60.0, 60.0));
        assert_eq!(maze.end_cell, (11, 7));

        for p in [maze.start, maze.end] {
            assert!(p.x > 0.0 && p.x < 800.0 && p.y > 0.0 && p.y < 600.0);
            assert!(
                maze.walls.iter().all(|w| !w.contains(p)),
                "{p:?} lies inside a wall"
            );
        }
    }

    #[test]
    fn test_end_is_last_interior_cell_when_odd() {
        // expert uses the full canvas: 600/40 = 15 cols, 440/40 = 11 rows
        let maze = generate(Difficulty::Expert, 600.0, 440.0, 9).unwrap();
        assert_eq!(maze.end_cell, (13, 9));
        assert_eq!(maze.end_cell, (maze.cols() - 2, maze.rows() - 2));
    }

    #[test]
    fn test_maze_too_small() {
        let err = generate(Difficulty::Easy, 100.0, 600.0, 0).unwrap_err();
        assert!(matches!(err, GameError::MazeTooSmall { cols: 1, .. }));

        let err = generate(Difficulty::Easy, 0.0, 600.0, 0).unwrap_err();
        assert!(matches!(err, GameError::MazeTooSmall { .. }));

        let err = generate(Difficulty::Easy, f32::NAN, 600.0, 0).unwrap_err();
        assert!(matches!(err, GameError::MazeTooSmall { .. }));
    }

    #[test]
    fn test_maze_too_large() {
        let err = generate(Difficulty::Expert, 1e30, 600.0, 0).unwrap_err();
        assert!(matches!(err, GameError::MazeTooLarge { .. }));

        let err = generate(Difficulty::Expert, 1e30, 1e30, 0).unwrap_err();
        assert!(matches!(err, GameError::MazeTooLarge { .. }));

        // 1025 x 1025 cells is just past the limit
        let err = generate(Difficulty::Expert, 41_000.0, 41_000.0, 0).unwrap_err();
        assert!(matches!(err, GameError::MazeTooLarge { cols: 1025, rows: 1025 }));
    }

    #[test]
    fn test_smallest_valid_maze() {
        // 3x3 cells on expert
        let maze = generate(Difficulty::Expert, 120.0, 120.0, 5).unwrap();
        assert_eq!(maze.start_cell, maze.end_cell);
        assert_eq!(maze.walls.len(), 8 + 4);
    }

    #[test]
    fn test_single_cell_maze_can_hold_a_hole() {
        // (1, 1) is the only open cell and a dead end: 0.45 chance per maze
        let holes: usize = (0..200)
            .map(|seed| generate(Difficulty::Expert, 120.0, 120.0, seed).unwrap())
            .inspect(|maze| assert_eq!(maze.is_solvable(), maze.holes.is_empty()))
            .map(|maze| maze.holes.len())
            .sum();
        assert!((50..=130).contains(&holes), "{holes} holes over 200 mazes");
    }

    #[test]
    fn test_determinism_under_seed() {
        let a = generate(Difficulty::Hard, 1024.0, 768.0, 99).unwrap();
        let b = generate(Difficulty::Hard, 1024.0, 768.0, 99).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.walls, b.walls);
        assert_eq!(a.holes, b.holes);
        assert_eq!(a.end, b.end);
    }

    #[test]
    fn test_walls_cover_closed_cells_plus_border() {
        let maze = generate(Difficulty::Normal, 900.0, 700.0, 11).unwrap();
        let closed = maze.grid.iter().filter(|&(_, _, c)| c == Cell::Wall).count();
        assert_eq!(maze.walls.len(), closed + 4);
    }

    #[test]
    fn test_holes_only_on_dead_ends() {
        for seed in 0..20 {
            let maze = generate(Difficulty::Expert, 1200.0, 900.0, seed).unwrap();
            for (col, row) in maze.hole_cells() {
                assert!(maze.grid.is_dead_end(col, row));
            }
            let blocked = maze.hole_cells().contains(&maze.start_cell)
                || maze.hole_cells().contains(&maze.end_cell);
            if blocked {
                assert!(!maze.is_solvable());
            }
        }
    }

    #[test]
    fn test_hole_rate_tracks_density() {
        // Expert: 0.3 * 12 / 8 = 0.45 per dead end
        let mut dead_ends = 0usize;
        let mut holes = 0usize;
        for seed in 0..200 {
            let maze = generate(Difficulty::Expert, 1200.0, 900.0, seed).unwrap();
            dead_ends += maze
                .grid
                .open_cells()
                .filter(|&(c, r)| maze.grid.is_dead_end(c, r))
                .count();
            holes += maze.holes.len();
        }
        let rate = holes as f32 / dead_ends as f32;
        assert!((rate - 0.45).abs() < 0.05, "hole rate {rate}");
    }

    #[test]
    fn test_solution_path_connects_start_and_end() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 3).unwrap();
        if let Some(path) = maze.solution_path() {
            assert_eq!(path.first(), Some(&maze.start_cell));
            assert_eq!(path.last(), Some(&maze.end_cell));
            assert!(path.windows(2).all(|w| {
                let (a, b) = (w[0], w[1]);
                a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
            }));
        }
        // Without holes the path always exists
        assert!(
            maze.grid
                .shortest_path(maze.start_cell, maze.end_cell, |_, _| false)
                .is_some()
        );
    }
}
