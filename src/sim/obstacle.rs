//! Obstacle entities
//!
//! Obstacles spawn just past the right screen edge, scroll left at the world
//! scroll speed and retire once fully off the left edge. Ground obstacles
//! collide over their whole footprint; aerial obstacles (pole-mounted street
//! furniture) collide only with the head at the top of the pole.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ObstacleSpec;
use crate::sim::hitbox::Hitbox;

/// Which part of the lane an obstacle threatens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Blocks the ground lane; hits any non-grounded-safe pose
    Ground,
    /// Head-height hazard; only an airborne player can reach it
    Aerial,
}

/// Obstacle visual identity, drawn from the static type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObstacleKind {
    TrashCan,
    Cone,
    Car,
    Streetlight,
    Sign,
    ShopSign,
}

/// A single scrolling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    kind: ObstacleKind,
    category: Category,
    width: f32,
    height: f32,
    /// Aerial head box, `(width, height)`; ground kinds use the full bounds
    head_hitbox: Option<(f32, f32)>,
    active: bool,
}

impl Obstacle {
    /// Place a new obstacle with its base on the ground line.
    pub fn new(x: f32, ground_y: f32, spec: &ObstacleSpec, scroll_speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - spec.height),
            vel: Vec2::new(-scroll_speed, 0.0),
            kind: spec.kind,
            category: spec.category,
            width: spec.width,
            height: spec.height,
            head_hitbox: spec.hitbox_width.zip(spec.hitbox_height),
            active: true,
        }
    }

    /// Advance leftward; retire once the right edge clears the left screen
    /// edge.
    pub fn update(&mut self, dt: f32) {
        self.pos.x += self.vel.x * dt;

        if self.pos.x < -self.width {
            self.active = false;
        }
    }

    /// World-space collision box. Aerial kinds expose only the head region,
    /// horizontally centered on the visual footprint and anchored at the top.
    pub fn hitbox(&self) -> Hitbox {
        match self.head_hitbox {
            Some((hw, hh)) => Hitbox::new(self.pos.x + (self.width - hw) / 2.0, self.pos.y, hw, hh),
            None => Hitbox::new(self.pos.x, self.pos.y, self.width, self.height),
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
