//! Gameplay tuning
//!
//! Every tunable number lives in one immutable [`Config`] value constructed at
//! startup and passed by reference into the simulation. Tests build alternate
//! configs instead of patching globals. The whole tree is serde-serializable
//! so a tuning file can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::obstacle::{Category, ObstacleKind};

/// Vertical physics for the player character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, px/s²
    pub gravity: f32,
    /// Velocity applied by a tap jump, px/s (negative = up)
    pub min_jump_velocity: f32,
    /// Velocity ceiling for a fully held jump, px/s (most negative allowed)
    pub max_jump_velocity: f32,
    /// Upward acceleration while the jump button is held, px/s²
    pub jump_hold_force: f32,
    /// Hold time after which hold force stops applying, milliseconds
    pub max_jump_hold_ms: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            min_jump_velocity: -400.0,
            max_jump_velocity: -700.0,
            jump_hold_force: 2800.0,
            max_jump_hold_ms: 180.0,
        }
    }
}

/// Player dimensions and presentation timers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub hitbox_offset_x: f32,
    pub hitbox_offset_y: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    /// Run-cycle period in seconds (leg animation phase)
    pub run_cycle_duration: f32,
    /// Landing squash duration in seconds (purely visual)
    pub squash_duration: f32,
    pub squash_scale_x: f32,
    pub squash_scale_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 60.0,
            hitbox_offset_x: 5.0,
            hitbox_offset_y: 0.0,
            hitbox_width: 30.0,
            hitbox_height: 60.0,
            run_cycle_duration: 0.2,
            squash_duration: 0.05,
            squash_scale_x: 1.2,
            squash_scale_y: 0.8,
        }
    }
}

/// One entry of the obstacle type table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    /// Relative spawn weight (table sums to 1.0 in the default tuning)
    pub weight: f32,
    pub category: Category,
    /// Aerial kinds collide only with a head-sized box, not the full pole
    pub hitbox_width: Option<f32>,
    pub hitbox_height: Option<f32>,
}

impl ObstacleSpec {
    fn ground(kind: ObstacleKind, width: f32, height: f32, weight: f32) -> Self {
        Self {
            kind,
            width,
            height,
            weight,
            category: Category::Ground,
            hitbox_width: None,
            hitbox_height: None,
        }
    }

    fn aerial(
        kind: ObstacleKind,
        width: f32,
        height: f32,
        weight: f32,
        hitbox_width: f32,
        hitbox_height: f32,
    ) -> Self {
        Self {
            kind,
            width,
            height,
            weight,
            category: Category::Aerial,
            hitbox_width: Some(hitbox_width),
            hitbox_height: Some(hitbox_height),
        }
    }
}

/// Obstacle spawning and scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Horizontal scroll speed applied to every obstacle, px/s
    pub scroll_speed: f32,
    /// Distance past the right screen edge where obstacles appear, px
    pub spawn_margin: f32,
    /// The type table; weighted draw picks from here
    pub types: Vec<ObstacleSpec>,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 300.0,
            spawn_margin: 50.0,
            types: vec![
                ObstacleSpec::ground(ObstacleKind::TrashCan, 30.0, 50.0, 0.28),
                ObstacleSpec::ground(ObstacleKind::Cone, 25.0, 40.0, 0.28),
                ObstacleSpec::ground(ObstacleKind::Car, 100.0, 45.0, 0.14),
                ObstacleSpec::aerial(ObstacleKind::Streetlight, 15.0, 120.0, 0.10, 40.0, 25.0),
                ObstacleSpec::aerial(ObstacleKind::Sign, 10.0, 100.0, 0.10, 50.0, 35.0),
                ObstacleSpec::aerial(ObstacleKind::ShopSign, 8.0, 90.0, 0.10, 60.0, 30.0),
            ],
        }
    }
}

/// Minimum pixel gaps between consecutive spawns of conflicting categories.
/// The aerial→ground gap is intentionally larger: landing after an aerial
/// dodge takes longer than reacting to a new low obstacle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    pub min_ground_to_aerial_gap: f32,
    pub min_aerial_to_ground_gap: f32,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            min_ground_to_aerial_gap: 150.0,
            min_aerial_to_ground_gap: 200.0,
        }
    }
}

/// Spawn-interval ramp from easy to hard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub initial_min_interval: f32,
    pub initial_max_interval: f32,
    pub final_min_interval: f32,
    pub final_max_interval: f32,
    /// Seconds of play after which difficulty stops increasing
    pub plateau_time: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_min_interval: 2.0,
            initial_max_interval: 3.5,
            final_min_interval: 0.8,
            final_max_interval: 1.5,
            plateau_time: 60.0,
        }
    }
}

/// Attract-mode autopilot tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPlayerConfig {
    /// Distance at which the autopilot decides to jump, px
    pub jump_threshold: f32,
    /// Chance per decision to not jump, simulating imperfection
    pub miss_chance: f32,
    /// How long the autopilot keeps the jump button held, seconds
    pub jump_hold_duration: f32,
}

impl Default for AutoPlayerConfig {
    fn default() -> Self {
        Self {
            jump_threshold: 150.0,
            miss_chance: 0.02,
            jump_hold_duration: 0.15,
        }
    }
}

/// Scoring and collision feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub points_per_second: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            points_per_second: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Red-flash overlay duration on hit, seconds
    pub flash_duration: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            flash_duration: 0.2,
        }
    }
}

/// Viewport-derived anchor lines, as fractions of the canvas size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub ground_y_percent: f32,
    pub player_x_percent: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            ground_y_percent: 0.85,
            player_x_percent: 0.2,
        }
    }
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub spawn_rules: SpawnRules,
    pub difficulty: DifficultyConfig,
    pub auto_player: AutoPlayerConfig,
    pub score: ScoreConfig,
    pub collision: CollisionConfig,
    pub viewport: ViewportConfig,
}

impl Config {
    /// Parse a tuning override from JSON; missing sections keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
