//! Axis-aligned hitboxes and the overlap test
//!
//! All collision in the runner reduces to one AABB check: world-space
//! rectangles, strict inequalities, so touching edges never count as a hit.

use serde::{Deserialize, Serialize};

/// A world-space axis-aligned rectangle. Width and height are non-negative;
/// owning entities translate their local offsets before handing one out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Check whether two hitboxes overlap.
///
/// Strictly exclusive on touching edges: two rectangles sharing an edge are
/// adjacent, not colliding. Symmetric and O(1).
pub fn overlaps(a: &Hitbox, b: &Hitbox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
