//! Collision detection and response for the bot against maze walls
//!
//! The bot is a circle; walls are line segments stored in a flat
//! `[x1, y1, x2, y2, ...]` buffer. Response is position correction only: the bot is
//! pushed out of any wall it overlaps, which turns a head-on push into a slide along
//! the wall.

use glam::Vec2;

use super::wall::{WALL_STRIDE, closest_point_on_segment};
use crate::consts::{COLLISION_EPSILON, COLLISION_PASSES};

/// Result of a circle/segment overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circle overlaps the segment
    pub hit: bool,
    /// Closest point on the segment
    pub point: Vec2,
    /// Unit vector from the segment toward the circle center
    pub normal: Vec2,
    /// How far the circle must move along `normal` to stop overlapping
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

/// Check a circle against the segment `a`-`b`.
///
/// A center lying (within epsilon) exactly on the segment reports a miss, since no
/// push direction exists.
#[inline]
pub fn circle_segment_collision(center: Vec2, radius: f32, a: Vec2, b: Vec2) -> CollisionResult {
    let closest = closest_point_on_segment(center, a, b);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq < radius * radius && dist_sq > COLLISION_EPSILON {
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    CollisionResult::miss()
}

/// Push a circle centered at `pos` out of every wall in `walls`.
///
/// Runs a fixed number of passes so that a correction against one wall which pushes
/// the circle into a neighbouring wall (corners) is itself corrected.
pub fn resolve_collisions(pos: Vec2, walls: &[f32], radius: f32) -> Vec2 {
    let mut p = pos;

    for _ in 0..COLLISION_PASSES {
        for wall in walls.chunks_exact(WALL_STRIDE) {
            let a = Vec2::new(wall[0], wall[1]);
            let b = Vec2::new(wall[2], wall[3]);
            let result = circle_segment_collision(p, radius, a, b);
            if result.hit {
                p += result.normal * result.penetration;
            }
        }
    }

    p
}

/// Move from `pos` by `delta`, resolving collisions along the way.
///
/// Displacements longer than `max_step` are split into equal sub-steps of at most
/// `max_step`, each resolved in turn, so a fast tick cannot carry the bot through a
/// wall. Short displacements resolve in a single step.
pub fn move_with_collision(
    pos: Vec2,
    delta: Vec2,
    walls: &[f32],
    radius: f32,
    max_step: f32,
) -> Vec2 {
    let distance = delta.length();
    if max_step <= 0.0 || distance <= max_step {
        return resolve_collisions(pos + delta, walls, radius);
    }

    let steps = (distance / max_step).ceil();
    let step = delta / steps;
    let mut p = pos;
    for _ in 0..steps as u32 {
        p = resolve_collisions(p + step, walls, radius);
    }
    p
}
