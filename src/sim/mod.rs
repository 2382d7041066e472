//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One synchronous tick per frame, fixed update order within the tick
//! - Seeded RNG only; every random draw goes through an injected generator
//! - No rendering or platform dependencies
//!
//! Per-frame data flow: the orchestrator receives the elapsed delta, advances
//! scrolling and the collision-flash timer unconditionally, then runs the
//! phase-gated subsystems (autopilot or input routing, player physics,
//! obstacle spawning and motion, collision scan).

pub mod autopilot;
pub mod difficulty;
pub mod game;
pub mod hitbox;
pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;

pub use autopilot::{AutoPlayerInput, distance_to_nearest_obstacle_ahead, should_jump};
pub use difficulty::{SpawnInterval, random_spawn_time, spawn_interval};
pub use game::{CollisionEvent, Game, ObstacleView, PlayerView, Snapshot, TickInput, Viewport};
pub use hitbox::{Hitbox, overlaps};
pub use obstacle::{Category, Obstacle, ObstacleKind};
pub use player::{Player, PlayerState};
pub use spawner::Spawner;
pub use state::{Phase, StateMachine};
