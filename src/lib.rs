//! Jump Runner - an endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacles, spawning,
//!   collisions, game state)
//! - `config`: Data-driven gameplay tuning
//!
//! Rendering, input devices and persistence are external collaborators: the
//! simulation consumes an abstract action stream, exposes read-only snapshots
//! and never calls out.

pub mod config;
pub mod sim;

pub use config::Config;
pub use sim::{Game, Phase, Snapshot, TickInput, Viewport};
