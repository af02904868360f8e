//! Collision geometry and small numeric helpers
//!
//! Everything in the play-field is an axis-aligned rectangle anchored at its
//! top-left corner, so a single overlap test covers every collision pass.

use glam::Vec2;
use rand::Rng;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_pos(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(width, height),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: an inverted range collapses to
/// `min` and NaN collapses to `min`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() || max < min {
        return min;
    }
    value.max(min).min(max)
}

/// Uniform draw in `[min, max)`; degenerate ranges return `min`
pub fn random_between<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min.is_nan() || max.is_nan() || max <= min {
        return min;
    }
    rng.random_range(min..max)
}
