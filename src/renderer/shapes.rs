//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{SessionState, Wall};

/// Segments used for holes and the ball
const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(wall: &Wall, color: [f32; 4]) -> [Vertex; 6] {
    let (min, max) = (wall.min(), wall.max());
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(theta.cos(), theta.sin()) * r;

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (inner1, outer1) = (at(inner_radius, theta1), at(outer_radius, theta1));
        let (inner2, outer2) = (at(inner_radius, theta2), at(outer_radius, theta2));

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Whole frame as a triangle list, back to front:
/// board, walls, holes, end marker, ball
pub fn scene(state: &SessionState) -> Vec<Vertex> {
    let maze = &state.maze;
    let board = Wall::new(0.0, 0.0, maze.canvas.x, maze.canvas.y);

    let mut vertices = Vec::with_capacity(
        (maze.walls.len() + 1) * 6 + (maze.holes.len() + 1) * CIRCLE_SEGMENTS as usize * 3,
    );
    vertices.extend(rect(&board, colors::BACKGROUND));
    for wall in &maze.walls {
        vertices.extend(rect(wall, colors::WALL));
    }
    for hole in &maze.holes {
        vertices.extend(circle(hole.pos, hole.radius, colors::HOLE, CIRCLE_SEGMENTS));
    }
    let ball = &state.ball;
    vertices.extend(ring(maze.end, ball.radius, ball.radius + 4.0, colors::END, CIRCLE_SEGMENTS));
    vertices.extend(circle(ball.pos, ball.radius, colors::BALL, CIRCLE_SEGMENTS));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::generate;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(&Wall::new(10.0, 20.0, 30.0, 40.0), colors::WALL);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_vertices_on_radius() {
        let verts = circle(Vec2::new(5.0, 5.0), 10.0, colors::HOLE, 8);
        assert_eq!(verts.len(), 24);
        for tri in verts.chunks(3) {
            let edge = Vec2::from(tri[1].position);
            assert!((edge.distance(Vec2::new(5.0, 5.0)) - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_scene_ends_with_ball() {
        let maze = generate(Difficulty::Easy, 800.0, 600.0, 2).unwrap();
        let state = SessionState::new(maze, 2);
        let verts = scene(&state);

        let expected = (state.maze.walls.len() + 1) * 6
            + state.maze.holes.len() * 72
            + 24 * 6
            + 72;
        assert_eq!(verts.len(), expected);
        assert_eq!(verts[0].color, colors::BACKGROUND);
        let last = verts.last().unwrap();
        assert_eq!(last.color, colors::BALL);
    }
}
