//! Time-based difficulty curve
//!
//! Maps elapsed play time to the spawn-interval range. Linear interpolation
//! from the initial (easy) bounds down to the final (hard) bounds, pinned at
//! the final values once `plateau_time` is reached.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DifficultyConfig;

/// Spawn-interval bounds in seconds at some point on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnInterval {
    pub min: f32,
    pub max: f32,
}

/// Spawn-interval bounds after `elapsed` seconds of play.
///
/// Monotonic non-increasing for `elapsed >= 0`. Progress is clamped at the
/// plateau but not at zero: negative elapsed time yields intervals wider than
/// the initial bounds. Normal play never goes there; callers feeding raw
/// clocks get the permissive extrapolation rather than an error.
pub fn spawn_interval(cfg: &DifficultyConfig, elapsed: f32) -> SpawnInterval {
    let progress = (elapsed / cfg.plateau_time).min(1.0);

    SpawnInterval {
        min: cfg.initial_min_interval
            + (cfg.final_min_interval - cfg.initial_min_interval) * progress,
        max: cfg.initial_max_interval
            + (cfg.final_max_interval - cfg.initial_max_interval) * progress,
    }
}

/// Draw the next spawn delay, uniform in `[min, max)` at the current
/// difficulty.
pub fn random_spawn_time<R: Rng>(cfg: &DifficultyConfig, elapsed: f32, rng: &mut R) -> f32 {
    let interval = spawn_interval(cfg, elapsed);
    interval.min + rng.random::<f32>() * (interval.max - interval.min)
}
