//! Game orchestrator
//!
//! Owns the frame tick and composes the whole simulation: state machine,
//! player controller, spawner, obstacle list, difficulty, scoring, collision.
//! Update order within a tick is a contract other pieces rely on: scroll
//! bookkeeping and the collision-flash countdown run in every phase, then
//! input is routed, then the phase-gated subsystems run. Spawn-gap math and
//! collision outcomes depend on that order.

use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::Config;
use crate::sim::autopilot::{self, AutoPlayerInput};
use crate::sim::difficulty::{SpawnInterval, spawn_interval};
use crate::sim::hitbox::{Hitbox, overlaps};
use crate::sim::obstacle::{Category, Obstacle, ObstacleKind};
use crate::sim::player::{Player, PlayerState};
use crate::sim::spawner::Spawner;
use crate::sim::state::{Phase, StateMachine};

/// Current canvas size, provided by the host. The ground line and the
/// player's lane position are fixed fractions of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn ground_y(&self, cfg: &Config) -> f32 {
        self.height * cfg.viewport.ground_y_percent
    }

    pub fn player_start_x(&self, cfg: &Config) -> f32 {
        self.width * cfg.viewport.player_x_percent
    }
}

/// Abstract per-tick action stream. The host translates whatever devices it
/// has into these three flags; the core never sees raw events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump action started this tick
    pub jump_pressed: bool,
    /// Jump action is currently held down
    pub jump_held: bool,
    /// Jump action ended this tick
    pub jump_released: bool,
}

/// Payload handed to the external collision sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionEvent {
    pub player_hitbox: Hitbox,
    pub obstacle_hitbox: Hitbox,
}

type CollisionHook = Box<dyn FnMut(&CollisionEvent)>;

/// Everything the enter/exit hooks need to mutate; the state machine passes
/// it back into the orchestrator on each transition.
struct Session {
    config: Config,
    viewport: Viewport,
    player: Player,
    obstacles: Vec<Obstacle>,
    spawner: Spawner,
    rng: Pcg32,
    game_time: f32,
    score: f32,
    final_score: u64,
    flash_timer: f32,
    scroll_offset: f32,
    auto_hold_timer: f32,
    on_collision: Option<CollisionHook>,
}

impl Session {
    /// Fresh round: zero every gameplay counter and put the player back on
    /// the ground. Runs on entering attract or playing.
    fn reset_round(&mut self) {
        let ground_y = self.viewport.ground_y(&self.config);
        self.game_time = 0.0;
        self.score = 0.0;
        self.flash_timer = 0.0;
        self.auto_hold_timer = 0.0;
        self.obstacles.clear();
        self.spawner.reset(&self.config, &mut self.rng);
        self.player
            .set_start_x(self.viewport.player_start_x(&self.config));
        self.player.reset(ground_y, &self.config);
        info!("round reset (ground_y={ground_y:.0})");
    }

    /// Entering game over: snapshot the score and hide the player. The
    /// deactivation only suppresses rendering; obstacles keep scrolling.
    fn freeze(&mut self) {
        self.final_score = self.score.floor() as u64;
        self.player.deactivate();
        info!("game over, final score {}", self.final_score);
    }

    fn tick_attract(&mut self, dt: f32) {
        let obstacle_boxes: Vec<Hitbox> = self
            .obstacles
            .iter()
            .map(|o| Hitbox::new(o.pos.x, o.pos.y, o.width(), o.height()))
            .collect();
        let decision = autopilot::should_jump(
            &AutoPlayerInput {
                player: self.player.hitbox(&self.config),
                on_ground: self.player.state().is_grounded(),
                obstacles: &obstacle_boxes,
            },
            &mut self.rng,
            &self.config.auto_player,
        );
        if decision {
            self.player.jump(&self.config);
            // Keep the button "held" for a while to approximate a charged jump
            self.auto_hold_timer = self.config.auto_player.jump_hold_duration;
        }
        if self.auto_hold_timer > 0.0 {
            self.player.hold_jump(dt, &self.config);
            self.auto_hold_timer -= dt;
            if self.auto_hold_timer <= 0.0 {
                self.player.release_jump();
            }
        }

        self.player.update(dt, &self.config);
        self.advance_spawning(dt);
        self.advance_obstacles(dt);
    }

    /// Returns true if the player hit something this tick.
    fn tick_playing(&mut self, dt: f32, input: &TickInput) -> bool {
        self.game_time += dt;
        self.score += self.config.score.points_per_second * dt;

        if input.jump_held {
            self.player.hold_jump(dt, &self.config);
        }

        self.player.update(dt, &self.config);
        self.advance_spawning(dt);
        self.advance_obstacles(dt);

        if let Some(event) = self.scan_collisions() {
            self.flash_timer = self.config.collision.flash_duration;
            if let Some(hook) = &mut self.on_collision {
                hook(&event);
            }
            return true;
        }
        false
    }

    /// Game over: obstacles keep moving and retiring, spawning is suppressed
    /// (the spawner's gap clock must not run here).
    fn tick_game_over(&mut self, dt: f32) {
        self.advance_obstacles(dt);
    }

    fn advance_spawning(&mut self, dt: f32) {
        self.spawner.update(
            dt,
            self.game_time,
            self.viewport.width,
            self.viewport.ground_y(&self.config),
            &mut self.obstacles,
            &mut self.rng,
            &self.config,
        );
    }

    fn advance_obstacles(&mut self, dt: f32) {
        // Update all first, then drop the retired ones
        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }
        self.obstacles.retain(Obstacle::is_active);
    }

    /// First hit wins, in obstacle insertion order. Aerial obstacles are
    /// skipped while the player is grounded: a grounded pose cannot reach a
    /// head-height hazard.
    fn scan_collisions(&self) -> Option<CollisionEvent> {
        let player_hitbox = self.player.hitbox(&self.config);
        let grounded = self.player.state().is_grounded();

        for obstacle in &self.obstacles {
            if grounded && obstacle.category() == Category::Aerial {
                continue;
            }
            let obstacle_hitbox = obstacle.hitbox();
            if overlaps(&player_hitbox, &obstacle_hitbox) {
                return Some(CollisionEvent {
                    player_hitbox,
                    obstacle_hitbox,
                });
            }
        }
        None
    }
}

/// The composed game. One [`tick`](Game::tick) per animation frame; reads go
/// through [`snapshot`](Game::snapshot).
pub struct Game {
    machine: StateMachine<Session>,
    session: Session,
}

impl Game {
    pub fn new(config: Config, viewport: Viewport, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ground_y = viewport.ground_y(&config);
        let start_x = viewport.player_start_x(&config);

        let session = Session {
            player: Player::new(start_x, ground_y, &config),
            obstacles: Vec::new(),
            spawner: Spawner::new(&config, &mut rng),
            rng,
            game_time: 0.0,
            score: 0.0,
            final_score: 0,
            flash_timer: 0.0,
            scroll_offset: 0.0,
            auto_hold_timer: 0.0,
            on_collision: None,
            config,
            viewport,
        };

        let mut machine = StateMachine::new();
        machine.on_enter(Phase::Attract, Session::reset_round);
        machine.on_enter(Phase::Playing, Session::reset_round);
        machine.on_enter(Phase::GameOver, Session::freeze);

        Self { machine, session }
    }

    /// Register the external collision sink, invoked once per collision with
    /// both world-space hitboxes.
    pub fn set_collision_hook(&mut self, hook: impl FnMut(&CollisionEvent) + 'static) {
        self.session.on_collision = Some(Box::new(hook));
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: &TickInput) {
        let session = &mut self.session;

        // Phase-independent bookkeeping, always in this order
        session.scroll_offset += session.config.obstacles.scroll_speed * dt;
        session.flash_timer = (session.flash_timer - dt).max(0.0);

        // Route the action stream
        if input.jump_pressed {
            match self.machine.current() {
                Phase::Attract => {
                    self.machine.transition(Phase::Playing, &mut self.session);
                }
                Phase::Playing => self.session.player.jump(&self.session.config),
                Phase::GameOver => {
                    self.machine.transition(Phase::Attract, &mut self.session);
                }
            }
        }
        if input.jump_released && self.machine.is(Phase::Playing) {
            self.session.player.release_jump();
        }

        match self.machine.current() {
            Phase::Attract => self.session.tick_attract(dt),
            Phase::Playing => {
                if self.session.tick_playing(dt, input) {
                    self.machine.transition(Phase::GameOver, &mut self.session);
                }
            }
            Phase::GameOver => self.session.tick_game_over(dt),
        }
    }

    /// Re-anchor to a new canvas size. The ground line is always derived
    /// outside the player controller and handed back in.
    pub fn resize(&mut self, viewport: Viewport) {
        let session = &mut self.session;
        session.viewport = viewport;
        session
            .player
            .set_start_x(viewport.player_start_x(&session.config));
        session
            .player
            .set_ground_y(viewport.ground_y(&session.config), &session.config);
    }

    pub fn phase(&self) -> Phase {
        self.machine.current()
    }

    pub fn score(&self) -> f32 {
        self.session.score
    }

    pub fn final_score(&self) -> u64 {
        self.session.final_score
    }

    pub fn config(&self) -> &Config {
        &self.session.config
    }

    /// Read-only view for an external renderer; the core never draws.
    pub fn snapshot(&self) -> Snapshot {
        let session = &self.session;
        Snapshot {
            phase: self.machine.current(),
            game_time: session.game_time,
            score: session.score,
            final_score: session.final_score,
            flash_timer: session.flash_timer,
            scroll_offset: session.scroll_offset,
            spawn_interval: spawn_interval(&session.config.difficulty, session.game_time),
            player: PlayerView {
                pos: session.player.pos,
                state: session.player.state(),
                hitbox: session.player.hitbox(&session.config),
                active: session.player.is_active(),
                run_phase: session.player.run_phase(&session.config),
                squash_scale: session.player.squash_scale(&session.config),
            },
            obstacles: session
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    kind: o.kind(),
                    category: o.category(),
                    width: o.width(),
                    height: o.height(),
                    hitbox: o.hitbox(),
                })
                .collect(),
        }
    }
}

/// Renderable player state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub state: PlayerState,
    pub hitbox: Hitbox,
    pub active: bool,
    pub run_phase: f32,
    pub squash_scale: (f32, f32),
}

/// Renderable obstacle state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub kind: ObstacleKind,
    pub category: Category,
    pub width: f32,
    pub height: f32,
    pub hitbox: Hitbox,
}

/// Full read-only frame snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub game_time: f32,
    pub score: f32,
    pub final_score: u64,
    pub flash_timer: f32,
    pub scroll_offset: f32,
    pub spawn_interval: SpawnInterval,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObstacleSpec;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 120.0;

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    fn game() -> Game {
        Game::new(Config::default(), viewport(), 42)
    }

    fn press() -> TickInput {
        TickInput {
            jump_pressed: true,
            jump_held: true,
            jump_released: false,
        }
    }

    fn spec_for(category: Category) -> ObstacleSpec {
        Config::default()
            .obstacles
            .types
            .iter()
            .find(|s| s.category == category)
            .cloned()
            .unwrap()
    }

    /// Park an obstacle right on top of the player.
    fn plant_obstacle(game: &mut Game, category: Category) {
        let cfg = game.session.config.clone();
        let ground_y = game.session.viewport.ground_y(&cfg);
        let spec = spec_for(category);
        let x = game.session.player.pos.x;
        game.session
            .obstacles
            .push(Obstacle::new(x, ground_y, &spec, cfg.obstacles.scroll_speed));
    }

    #[test]
    fn starts_in_attract() {
        assert_eq!(game().phase(), Phase::Attract);
    }

    #[test]
    fn jump_press_starts_a_round() {
        let mut g = game();
        g.tick(DT, &press());
        assert_eq!(g.phase(), Phase::Playing);
        assert_eq!(g.final_score(), 0);
    }

    #[test]
    fn jump_press_while_playing_jumps() {
        let mut g = game();
        g.tick(DT, &press());
        g.tick(DT, &TickInput::default());
        g.tick(DT, &press());
        assert_eq!(g.snapshot().player.state, PlayerState::Jumping);
    }

    #[test]
    fn score_accumulates_only_while_playing() {
        let mut g = game();
        for _ in 0..120 {
            g.tick(DT, &TickInput::default());
        }
        assert_eq!(g.score(), 0.0); // Attract never scores

        g.tick(DT, &press());
        for _ in 0..120 {
            g.tick(DT, &TickInput::default());
        }
        let pps = g.config().score.points_per_second;
        assert!((g.score() - pps).abs() < 0.2); // ~1 second of play
    }

    #[test]
    fn collision_forces_game_over_and_snapshots_score() {
        let mut g = game();
        g.tick(DT, &press());
        for _ in 0..240 {
            g.tick(DT, &TickInput::default());
            if g.phase() != Phase::Playing {
                break;
            }
        }
        if g.phase() == Phase::Playing {
            plant_obstacle(&mut g, Category::Ground);
            g.tick(DT, &TickInput::default());
        }
        assert_eq!(g.phase(), Phase::GameOver);
        assert_eq!(g.final_score(), g.score().floor() as u64);
        assert!(g.snapshot().flash_timer > 0.0);
    }

    #[test]
    fn collision_hook_receives_both_hitboxes() {
        let events: Rc<RefCell<Vec<CollisionEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut g = game();
        g.set_collision_hook(move |e| sink.borrow_mut().push(*e));

        g.tick(DT, &press());
        plant_obstacle(&mut g, Category::Ground);
        g.tick(DT, &TickInput::default());

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].player_hitbox.width > 0.0);
        assert!(overlaps(&events[0].player_hitbox, &events[0].obstacle_hitbox));
    }

    #[test]
    fn grounded_player_ignores_aerial_obstacles() {
        let mut g = game();
        g.tick(DT, &press());
        plant_obstacle(&mut g, Category::Aerial);
        for _ in 0..10 {
            g.tick(DT, &TickInput::default());
        }
        // Idle the whole time: the streetlight head passes overhead
        assert_eq!(g.phase(), Phase::Playing);
    }

    #[test]
    fn airborne_player_hits_aerial_obstacles() {
        let mut g = game();
        g.tick(DT, &press()); // start the round
        g.tick(DT, &press()); // jump

        // Get airborne first, then park an aerial head on the player
        for _ in 0..20 {
            g.tick(DT, &TickInput { jump_held: true, ..Default::default() });
        }
        assert!(!g.snapshot().player.state.is_grounded());

        let cfg = g.session.config.clone();
        let spec = spec_for(Category::Aerial);
        // Anchor so the head box lands on the player's current y
        let ground_y = g.session.player.pos.y + spec.height;
        let x = g.session.player.pos.x;
        g.session
            .obstacles
            .push(Obstacle::new(x, ground_y, &spec, cfg.obstacles.scroll_speed));

        g.tick(DT, &TickInput { jump_held: true, ..Default::default() });
        assert_eq!(g.phase(), Phase::GameOver);
    }

    #[test]
    fn game_over_suppresses_spawning_but_keeps_scrolling() {
        let mut g = game();
        g.tick(DT, &press());
        plant_obstacle(&mut g, Category::Ground);
        g.tick(DT, &TickInput::default());
        assert_eq!(g.phase(), Phase::GameOver);

        let obstacle_x = g.snapshot().obstacles[0].pos.x;
        let count = g.snapshot().obstacles.len();
        for _ in 0..120 {
            g.tick(DT, &TickInput::default());
        }
        let snap = g.snapshot();
        assert!(snap.obstacles.len() <= count); // Retired, never spawned
        if let Some(first) = snap.obstacles.first() {
            assert!(first.pos.x < obstacle_x);
        }
    }

    #[test]
    fn game_over_press_returns_to_attract_reset() {
        let mut g = game();
        g.tick(DT, &press());
        plant_obstacle(&mut g, Category::Ground);
        g.tick(DT, &TickInput::default());
        assert_eq!(g.phase(), Phase::GameOver);

        g.tick(DT, &press());
        let snap = g.snapshot();
        assert_eq!(snap.phase, Phase::Attract);
        assert!(snap.player.active);
        assert_eq!(snap.score, 0.0);
        assert!(snap.game_time < 1.0);
    }

    #[test]
    fn flash_counts_down_in_every_phase() {
        let mut g = game();
        g.tick(DT, &press());
        plant_obstacle(&mut g, Category::Ground);
        g.tick(DT, &TickInput::default());

        let flash = g.snapshot().flash_timer;
        assert!(flash > 0.0);
        g.tick(DT, &TickInput::default()); // Now in GameOver
        assert!(g.snapshot().flash_timer < flash);
    }

    #[test]
    fn release_routes_to_player_only_while_playing() {
        let mut g = game();
        g.tick(DT, &press());
        g.tick(DT, &press());
        assert!(g.session.player.is_jump_held());
        g.tick(
            DT,
            &TickInput {
                jump_released: true,
                ..Default::default()
            },
        );
        assert!(!g.session.player.is_jump_held());
    }

    #[test]
    fn resize_moves_the_ground_line() {
        let mut g = game();
        g.resize(Viewport {
            width: 1200.0,
            height: 900.0,
        });
        let cfg = g.config();
        let expected_ground = 900.0 * cfg.viewport.ground_y_percent;
        let expected_x = 1200.0 * cfg.viewport.player_x_percent;
        let snap = g.snapshot();
        assert_eq!(snap.player.pos.y, expected_ground - cfg.player.height);
        assert_eq!(snap.player.pos.x, expected_x);
    }

    #[test]
    fn attract_autopilot_keeps_the_demo_running() {
        let mut g = game();
        let mut jumped = false;
        for _ in 0..(30.0 / DT) as usize {
            g.tick(DT, &TickInput::default());
            if g.snapshot().player.state == PlayerState::Jumping {
                jumped = true;
            }
        }
        assert_eq!(g.phase(), Phase::Attract);
        assert!(jumped);
    }

    #[test]
    fn scroll_offset_advances_in_all_phases() {
        let mut g = game();
        let before = g.snapshot().scroll_offset;
        g.tick(DT, &TickInput::default());
        assert!(g.snapshot().scroll_offset > before);
    }
}
