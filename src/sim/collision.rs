//! Collision detection and response for the ball against maze geometry
//!
//! Walls are resolved one at a time in the order given, so a ball touching
//! several walls in one tick ends up wherever the last push leaves it.

use glam::Vec2;

use super::geometry::{Hole, Wall};
use super::state::Ball;
use crate::consts::{BOUNCE, WIN_MARGIN};

/// Rounding allowance when checking an exit point against the world bounds
const BOUNDS_SLACK: f32 = 1e-3;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the wall surface (if hit)
    pub point: Vec2,
    /// Unit normal pointing from the wall toward where the ball must go
    pub normal: Vec2,
    /// Distance the ball must move along `normal` to just touch the wall
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a wall rectangle
///
/// Uses the closest point on the rectangle to the ball center. When the
/// center is inside the rectangle (or exactly on its edge) the closest point
/// is the center itself and has no direction, so the ball exits through the
/// nearest face instead.
pub fn ball_wall_collision(ball_pos: Vec2, ball_radius: f32, wall: &Wall) -> CollisionResult {
    ball_wall_collision_within(ball_pos, ball_radius, wall, (Vec2::NEG_INFINITY, Vec2::INFINITY))
}

/// Like `ball_wall_collision`, but a ball whose center is inside the wall
/// only exits through a face that leaves it within `bounds` (min, max of the
/// ball center). Falls back to the nearest face when none does.
pub fn ball_wall_collision_within(
    ball_pos: Vec2,
    ball_radius: f32,
    wall: &Wall,
    bounds: (Vec2, Vec2),
) -> CollisionResult {
    let closest = wall.closest_point(ball_pos);
    let delta = ball_pos - closest;
    let dist = delta.length();

    if dist >= ball_radius {
        return CollisionResult::miss();
    }

    if dist > f32::EPSILON {
        return CollisionResult {
            hit: true,
            point: closest,
            normal: delta / dist,
            penetration: ball_radius - dist,
        };
    }

    let (depth, normal) = nearest_face(ball_pos, ball_radius, wall, bounds);
    CollisionResult {
        hit: true,
        point: ball_pos + normal * depth,
        normal,
        penetration: ball_radius + depth,
    }
}

/// Distance to and outward normal of the face nearest an interior point,
/// preferring faces whose exit keeps the center inside `bounds`.
/// Ties go left, right, top, bottom.
fn nearest_face(p: Vec2, radius: f32, wall: &Wall, bounds: (Vec2, Vec2)) -> (f32, Vec2) {
    let (min, max) = (wall.min(), wall.max());
    let faces = [
        (p.x - min.x, Vec2::NEG_X),
        (max.x - p.x, Vec2::X),
        (p.y - min.y, Vec2::NEG_Y),
        (max.y - p.y, Vec2::Y),
    ];

    let (lo, hi) = (bounds.0 - BOUNDS_SLACK, bounds.1 + BOUNDS_SLACK);
    let stays_inside = |&(depth, normal): &(f32, Vec2)| {
        let exit = p + normal * (depth.max(0.0) + radius);
        exit.cmpge(lo).all() && exit.cmple(hi).all()
    };

    let closest = |best: Option<(f32, Vec2)>, face: &(f32, Vec2)| match best {
        Some(b) if b.0 <= face.0 => Some(b),
        _ => Some(*face),
    };
    let best = faces
        .iter()
        .filter(|face| stays_inside(*face))
        .fold(None, closest)
        .or_else(|| faces.iter().fold(None, closest))
        .unwrap_or(faces[0]);
    (best.0.max(0.0), best.1)
}

/// Push the ball out of a wall and bounce it. Returns true on contact.
///
/// `bounds` is the range the ball center may occupy; a ball buried in a wall
/// is never pushed out of it.
pub fn resolve_wall(ball: &mut Ball, wall: &Wall, bounds: (Vec2, Vec2)) -> bool {
    let result = ball_wall_collision_within(ball.pos, ball.radius, wall, bounds);
    if !result.hit {
        return false;
    }
    ball.pos += result.normal * result.penetration;
    ball.vel = -ball.vel * BOUNCE;
    true
}

/// Check if the ball overlaps a hole
#[inline]
pub fn ball_hole_collision(ball_pos: Vec2, ball_radius: f32, hole: &Hole) -> bool {
    ball_pos.distance(hole.pos) < hole.radius + ball_radius
}

/// Check if the ball is close enough to the end point to win
#[inline]
pub fn ball_reached_end(ball_pos: Vec2, ball_radius: f32, end: Vec2) -> bool {
    ball_pos.distance(end) < ball_radius + WIN_MARGIN
}
