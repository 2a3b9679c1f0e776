//! Transient cell grid used while carving a maze
//!
//! The grid uses the "thick wall" layout: carvable nodes sit on odd
//! coordinates, and the cell between two connected nodes is opened when the
//! carver moves from one to the other. Nothing here survives past generation
//! except the read-only copy kept on `Maze` for solving and rendering.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Carver moves between nodes two cells apart
const NODE_STEPS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];
/// Orthogonal neighbors
const ADJACENT: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Path,
}

/// Row-major grid of cells, `cols` wide and `rows` tall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-wall grid
    pub fn filled(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Wall; cols * rows],
        }
    }

    /// Cell at (col, row), `None` outside the grid
    pub fn get(&self, col: isize, row: isize) -> Option<Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols + col as usize])
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        let idx = row * self.cols + col;
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn is_open(&self, col: isize, row: isize) -> bool {
        self.get(col, row) == Some(Cell::Path)
    }

    /// Iterate (col, row, cell) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % self.cols, i / self.cols, cell))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|&(_, _, cell)| cell == Cell::Path)
            .map(|(col, row, _)| (col, row))
    }

    /// A node is carvable when it lies strictly inside the outer ring
    fn is_interior(&self, col: isize, row: isize) -> bool {
        col > 0 && row > 0 && (col as usize) < self.cols - 1 && (row as usize) < self.rows - 1
    }

    /// Randomized iterative depth-first carving from (1, 1).
    ///
    /// Every node reachable in steps of two is visited exactly once, and each
    /// visit opens the cell between it and its parent, so the open cells form
    /// a spanning tree. Grids smaller than 3x3 have no node and stay solid.
    pub fn carve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.cols < 3 || self.rows < 3 {
            return;
        }
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(self.cols * self.rows / 4);
        self.set(1, 1, Cell::Path);
        stack.push((1, 1));

        while let Some((col, row)) = stack.pop() {
            let mut options = [(0usize, 0usize); 4];
            let mut count = 0;
            for (dc, dr) in NODE_STEPS {
                let nc = col as isize + dc;
                let nr = row as isize + dr;
                if self.is_interior(nc, nr) && self.get(nc, nr) == Some(Cell::Wall) {
                    options[count] = (nc as usize, nr as usize);
                    count += 1;
                }
            }

            if count > 0 {
                stack.push((col, row));
                let (nc, nr) = options[rng.random_range(0..count)];
                self.set((col + nc) / 2, (row + nr) / 2, Cell::Path);
                self.set(nc, nr, Cell::Path);
                stack.push((nc, nr));
            }
        }
    }

    /// Number of open orthogonal neighbors
    pub fn open_neighbors(&self, col: usize, row: usize) -> usize {
        ADJACENT
            .iter()
            .filter(|(dc, dr)| self.is_open(col as isize + dc, row as isize + dr))
            .count()
    }

    /// Open cell with at most one open orthogonal neighbor
    pub fn is_dead_end(&self, col: usize, row: usize) -> bool {
        self.is_open(col as isize, row as isize) && self.open_neighbors(col, row) <= 1
    }

    /// Number of adjacent open-open pairs (each edge counted once)
    pub fn open_edge_count(&self) -> usize {
        self.open_cells()
            .map(|(col, row)| {
                usize::from(self.is_open(col as isize + 1, row as isize))
                    + usize::from(self.is_open(col as isize, row as isize + 1))
            })
            .sum()
    }

    /// Open cells reachable from `start`, as a row-major mask.
    /// Explicit worklist; no recursion.
    pub fn flood_fill(&self, start: (usize, usize)) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.is_open(start.0 as isize, start.1 as isize) {
            return seen;
        }
        let mut work = vec![start];
        seen[start.1 * self.cols + start.0] = true;

        while let Some((col, row)) = work.pop() {
            for (dc, dr) in ADJACENT {
                let nc = col as isize + dc;
                let nr = row as isize + dr;
                if self.is_open(nc, nr) {
                    let idx = nr as usize * self.cols + nc as usize;
                    if !seen[idx] {
                        seen[idx] = true;
                        work.push((nc as usize, nr as usize));
                    }
                }
            }
        }
        seen
    }

    /// Breadth-first shortest path over open cells, skipping cells for which
    /// `blocked` returns true. Includes both endpoints.
    pub fn shortest_path<F>(
        &self,
        start: (usize, usize),
        goal: (usize, usize),
        blocked: F,
    ) -> Option<Vec<(usize, usize)>>
    where
        F: Fn(usize, usize) -> bool,
    {
        let open = |c: usize, r: usize| self.is_open(c as isize, r as isize) && !blocked(c, r);
        if !open(start.0, start.1) || !open(goal.0, goal.1) {
            return None;
        }

        let mut parent: Vec<Option<usize>> = vec![None; self.cells.len()];
        let start_idx = start.1 * self.cols + start.0;
        parent[start_idx] = Some(start_idx);
        let mut queue = VecDeque::from([start]);

        while let Some((col, row)) = queue.pop_front() {
            if (col, row) == goal {
                let mut path = vec![goal];
                let mut idx = row * self.cols + col;
                while idx != start_idx {
                    idx = parent[idx]?;
                    path.push((idx % self.cols, idx / self.cols));
                }
                path.reverse();
                return Some(path);
            }
            let here = row * self.cols + col;
            for (dc, dr) in ADJACENT {
                let nc = col as isize + dc;
                let nr = row as isize + dr;
                if nc < 0 || nr < 0 || !open(nc as usize, nr as usize) {
                    continue;
                }
                let idx = nr as usize * self.cols + nc as usize;
                if parent[idx].is_none() {
                    parent[idx] = Some(here);
                    queue.push_back((nc as usize, nr as usize));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn carved(cols: usize, rows: usize, seed: u64) -> Grid {
        let mut grid = Grid::filled(cols, rows);
        grid.carve(&mut Pcg32::seed_from_u64(seed));
        grid
    }

    #[test]
    fn test_carve_visits_every_node() {
        let grid = carved(14, 10, 7);
        for row in (1..9).step_by(2) {
            for col in (1..13).step_by(2) {
                assert!(grid.is_open(col as isize, row as isize), "node ({col},{row}) closed");
            }
        }
    }

    #[test]
    fn test_outer_ring_stays_wall() {
        let grid = carved(15, 11, 3);
        for col in 0..15 {
            assert_eq!(grid.get(col, 0), Some(Cell::Wall));
            assert_eq!(grid.get(col, 10), Some(Cell::Wall));
        }
        for row in 0..11 {
            assert_eq!(grid.get(0, row), Some(Cell::Wall));
            assert_eq!(grid.get(14, row), Some(Cell::Wall));
        }
    }

    #[test]
    fn test_perfect_maze_is_a_tree() {
        let grid = carved(21, 17, 42);
        let open: Vec<_> = grid.open_cells().collect();
        let reach = grid.flood_fill((1, 1));
        assert_eq!(reach.iter().filter(|&&r| r).count(), open.len());
        assert_eq!(grid.open_edge_count(), open.len() - 1);
    }

    proptest::proptest! {
        #[test]
        fn prop_carved_grid_is_spanning_tree(
            cols in 3usize..40,
            rows in 3usize..30,
            seed in proptest::prelude::any::<u64>(),
        ) {
            let grid = carved(cols, rows, seed);
            let open = grid.open_cells().count();
            let reach = grid.flood_fill((1, 1));
            proptest::prop_assert_eq!(reach.iter().filter(|&&r| r).count(), open);
            proptest::prop_assert_eq!(grid.open_edge_count(), open - 1);
        }
    }

    #[test]
    fn test_minimal_grid_single_cell() {
        let grid = carved(3, 3, 0);
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![(1, 1)]);
        assert!(grid.is_dead_end(1, 1));
    }

    #[test]
    fn test_carve_leaves_tiny_grids_solid() {
        for (cols, rows) in [(0, 0), (2, 2), (1, 5), (5, 2)] {
            let grid = carved(cols, rows, 1);
            assert_eq!(grid.open_cells().count(), 0, "{cols}x{rows}");
        }
    }

    #[test]
    fn test_dead_end_classification() {
        let mut grid = Grid::filled(5, 3);
        for col in 1..4 {
            grid.set(col, 1, Cell::Path);
        }
        assert!(grid.is_dead_end(1, 1));
        assert!(!grid.is_dead_end(2, 1));
        assert!(grid.is_dead_end(3, 1));
        assert!(!grid.is_dead_end(0, 0));
    }

    #[test]
    fn test_shortest_path_and_blocking() {
        let mut grid = Grid::filled(5, 3);
        for col in 1..4 {
            grid.set(col, 1, Cell::Path);
        }
        let path = grid.shortest_path((1, 1), (3, 1), |_, _| false).unwrap();
        assert_eq!(path, vec![(1, 1), (2, 1), (3, 1)]);
        assert!(grid.shortest_path((1, 1), (3, 1), |c, _| c == 2).is_none());
    }
}
