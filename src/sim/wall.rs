//! Wall segment geometry
//!
//! A wall is an axis-aligned line between two canvas-space points. Walls are laid out
//! as `#[repr(C)]` plain old data so a `&[Wall]` can be viewed as a flat
//! `[x1, y1, x2, y2, ...]` buffer for the per-tick collision loop.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of floats per wall in the flat buffer
pub const WALL_STRIDE: usize = 4;

/// A line segment `(x1, y1)-(x2, y2)` in canvas pixels
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Wall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f32 {
        (self.end() - self.start()).length()
    }

    /// Zero-length walls act as point obstacles
    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    /// Closest point on the segment to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        closest_point_on_segment(p, self.start(), self.end())
    }

    /// Distance from `p` to the segment
    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p)).length()
    }
}

/// View a wall list as the flat buffer the collision loop consumes
#[inline]
pub fn flatten(walls: &[Wall]) -> &[f32] {
    bytemuck::cast_slice(walls)
}

/// Closest point on segment `a`-`b` to `p`.
///
/// The projection parameter is clamped to [0, 1]; a zero-length segment projects every
/// point onto `a`.
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let edge = b - a;
    let len_sq = edge.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(edge) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    a + edge * t
}

/// Distance from `p` to segment `a`-`b`
#[inline]
pub fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}
