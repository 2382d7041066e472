//! Attract-mode autopilot
//!
//! A small heuristic that plays the game while nobody is at the controls:
//! jump when the nearest obstacle ahead comes within the jump threshold, with
//! a configured chance to miss so the demo looks fallible. The miss roll is
//! drawn fresh on every call, so the effective miss rate compounds over the
//! ticks an obstacle stays in range.

use rand::Rng;

use crate::config::AutoPlayerConfig;
use crate::sim::hitbox::Hitbox;

/// Everything the heuristic looks at for one decision
#[derive(Debug, Clone)]
pub struct AutoPlayerInput<'a> {
    pub player: Hitbox,
    pub on_ground: bool,
    pub obstacles: &'a [Hitbox],
}

/// Nearest obstacle whose right edge is strictly ahead of the player's right
/// edge; obstacles already passed (or overlapping from behind) are ignored.
fn nearest_obstacle_ahead<'a>(input: &'a AutoPlayerInput) -> Option<&'a Hitbox> {
    let player_right = input.player.right();

    input
        .obstacles
        .iter()
        .filter(|o| o.right() > player_right)
        .min_by(|a, b| (a.x - player_right).total_cmp(&(b.x - player_right)))
}

/// Decide whether the autopilot should jump this tick.
pub fn should_jump<R: Rng>(input: &AutoPlayerInput, rng: &mut R, cfg: &AutoPlayerConfig) -> bool {
    // Never trigger a double jump
    if !input.on_ground {
        return false;
    }

    let Some(nearest) = nearest_obstacle_ahead(input) else {
        return false;
    };

    let distance = nearest.x - input.player.right();
    if distance <= 0.0 || distance > cfg.jump_threshold {
        return false;
    }

    // Imperfection: occasionally fail to react
    if rng.random::<f32>() < cfg.miss_chance {
        return false;
    }

    true
}

/// Distance to the nearest obstacle ahead, for diagnostics. No randomness.
pub fn distance_to_nearest_obstacle_ahead(input: &AutoPlayerInput) -> Option<f32> {
    nearest_obstacle_ahead(input).map(|o| o.x - input.player.right())
}
