//! Terminal view of a session, one character per grid cell

use crate::cell_at;
use crate::sim::{Cell, SessionState};

pub const WALL: char = '#';
pub const PATH: char = ' ';
pub const HOLE: char = 'O';
pub const START: char = 'S';
pub const END: char = 'E';
pub const BALL: char = '@';
/// Marks cells of a highlighted route
pub const ROUTE: char = '.';

/// Render the maze grid. Later markers win: route, start, end, holes, ball.
pub fn render(state: &SessionState, route: Option<&[(usize, usize)]>) -> String {
    let maze = &state.maze;
    let grid = &maze.grid;
    let mut rows: Vec<Vec<char>> = (0..grid.rows)
        .map(|row| {
            (0..grid.cols)
                .map(|col| match grid.get(col as isize, row as isize) {
                    Some(Cell::Path) => PATH,
                    _ => WALL,
                })
                .collect()
        })
        .collect();

    let mut mark = |(col, row): (usize, usize), ch: char| {
        if let Some(slot) = rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = ch;
        }
    };

    for &cell in route.unwrap_or_default() {
        mark(cell, ROUTE);
    }
    mark(maze.start_cell, START);
    mark(maze.end_cell, END);
    for cell in maze.hole_cells() {
        mark(cell, HOLE);
    }
    if let Some(cell) = cell_at(state.ball.pos) {
        mark(cell, BALL);
    }

    rows.into_iter()
        .map(|r| r.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::generate;

    #[test]
    fn test_render_dimensions_and_markers() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 6).unwrap();
        let (cols, rows) = (maze.cols(), maze.rows());
        let state = SessionState::new(maze, 6);
        let text = render(&state, None);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), rows);
        assert!(lines.iter().all(|l| l.chars().count() == cols));
        // Ball sits on the start cell
        assert_eq!(lines[1].chars().nth(1), Some(BALL));
        let end_holed = state.maze.hole_cells().contains(&state.maze.end_cell);
        assert!(text.contains(END) != end_holed);
        assert!(lines[0].chars().all(|c| c == WALL));
    }

    #[test]
    fn test_render_route() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 6).unwrap();
        let route = maze
            .grid
            .shortest_path(maze.start_cell, maze.end_cell, |_, _| false)
            .unwrap();
        let state = SessionState::new(maze, 6);
        let text = render(&state, Some(&route));
        if route.len() > 2 {
            assert!(text.contains(ROUTE));
        }
    }
}
