//! Obstacle spawn controller
//!
//! Decides when and which obstacle type to spawn. Timing comes from the
//! difficulty curve; the type is a weighted draw over the static table, with
//! pattern-fairness rules that veto unreachable category sequences: a fresh
//! aerial obstacle right behind a ground one (or vice versa) would leave no
//! window to land and re-jump. The gap is measured in pixels the previous
//! obstacle has already traveled.

use log::debug;
use rand::Rng;

use crate::config::{Config, ObstacleSpec};
use crate::sim::difficulty::random_spawn_time;
use crate::sim::obstacle::{Category, Obstacle};

/// Spawn timing and fairness state. Reset whenever gameplay resets.
#[derive(Debug, Clone)]
pub struct Spawner {
    spawn_timer: f32,
    next_spawn_time: f32,
    last_category: Option<Category>,
    time_since_last_spawn: f32,
}

impl Spawner {
    pub fn new<R: Rng>(cfg: &Config, rng: &mut R) -> Self {
        Self {
            spawn_timer: 0.0,
            next_spawn_time: random_spawn_time(&cfg.difficulty, 0.0, rng),
            last_category: None,
            time_since_last_spawn: 0.0,
        }
    }

    /// Zero all timing state and draw a fresh first spawn delay.
    pub fn reset<R: Rng>(&mut self, cfg: &Config, rng: &mut R) {
        *self = Self::new(cfg, rng);
    }

    /// Advance timers and spawn at most one obstacle when due. Call only in
    /// phases where spawning is enabled; the gap clock must not run while
    /// spawning is suppressed.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        game_time: f32,
        screen_width: f32,
        ground_y: f32,
        obstacles: &mut Vec<Obstacle>,
        rng: &mut R,
        cfg: &Config,
    ) {
        self.spawn_timer += dt;
        self.time_since_last_spawn += dt;

        if self.spawn_timer >= self.next_spawn_time {
            self.spawn(game_time, screen_width, ground_y, obstacles, rng, cfg);
        }
    }

    fn spawn<R: Rng>(
        &mut self,
        game_time: f32,
        screen_width: f32,
        ground_y: f32,
        obstacles: &mut Vec<Obstacle>,
        rng: &mut R,
        cfg: &Config,
    ) {
        let Some(candidate) = draw_spec(&cfg.obstacles.types, rng, None) else {
            // Empty type table; re-arm the timer so we don't spin
            self.spawn_timer = 0.0;
            self.next_spawn_time = random_spawn_time(&cfg.difficulty, game_time, rng);
            return;
        };

        let spec = self.apply_fairness(candidate, rng, cfg);

        let x = screen_width + cfg.obstacles.spawn_margin;
        obstacles.push(Obstacle::new(x, ground_y, spec, cfg.obstacles.scroll_speed));
        debug!(
            "spawned {:?} ({:?}) at x={:.0}, t={:.2}s",
            spec.kind, spec.category, x, game_time
        );

        self.last_category = Some(spec.category);
        self.time_since_last_spawn = 0.0;
        self.spawn_timer = 0.0;
        self.next_spawn_time = random_spawn_time(&cfg.difficulty, game_time, rng);
    }

    /// Veto category sequences the player cannot survive, forcing a redraw
    /// restricted to the previous category's side. First spawn of a round is
    /// accepted unconditionally.
    fn apply_fairness<'a, R: Rng>(
        &self,
        candidate: &'a ObstacleSpec,
        rng: &mut R,
        cfg: &'a Config,
    ) -> &'a ObstacleSpec {
        let Some(prev) = self.last_category else {
            return candidate;
        };

        let gap = self.time_since_last_spawn * cfg.obstacles.scroll_speed;

        let forced = match (prev, candidate.category) {
            (Category::Ground, Category::Aerial)
                if gap < cfg.spawn_rules.min_ground_to_aerial_gap =>
            {
                Some(Category::Ground)
            }
            (Category::Aerial, Category::Ground)
                if gap < cfg.spawn_rules.min_aerial_to_ground_gap =>
            {
                Some(Category::Aerial)
            }
            _ => None,
        };

        match forced {
            Some(category) => {
                debug!(
                    "fairness veto: {:?} after {:?} with gap {:.0}px, forcing {:?}",
                    candidate.category, prev, gap, category
                );
                draw_spec(&cfg.obstacles.types, rng, Some(category)).unwrap_or(candidate)
            }
            None => candidate,
        }
    }

    pub fn last_category(&self) -> Option<Category> {
        self.last_category
    }

    pub fn time_since_last_spawn(&self) -> f32 {
        self.time_since_last_spawn
    }

    pub fn next_spawn_time(&self) -> f32 {
        self.next_spawn_time
    }
}

/// Weighted cumulative draw over the type table, optionally restricted to one
/// category. `None` only when the (restricted) table is empty.
fn draw_spec<'a, R: Rng>(
    types: &'a [ObstacleSpec],
    rng: &mut R,
    category: Option<Category>,
) -> Option<&'a ObstacleSpec> {
    let matches = |spec: &&ObstacleSpec| category.is_none_or(|c| spec.category == c);

    let total: f32 = types.iter().filter(matches).map(|s| s.weight).sum();
    let mut roll = rng.random::<f32>() * total;

    let mut chosen = None;
    for spec in types.iter().filter(matches) {
        chosen = Some(spec);
        if roll < spec.weight {
            break;
        }
        roll -= spec.weight;
    }
    chosen
}
