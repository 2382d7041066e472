//! Player controller
//!
//! 1D vertical kinematics with a variable-height jump: a tap applies the
//! minimum jump velocity, holding the button feeds extra upward acceleration
//! until the hold cap, clamped so a charged jump can never exceed the
//! configured maximum. The ground line is supplied from outside (viewport
//! resize recomputes it); the controller clamps to it on landing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::sim::hitbox::Hitbox;

/// Player pose state machine: `Idle → Jumping → Falling → Landing → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Jumping,
    Falling,
    Landing,
}

impl PlayerState {
    /// Grounded poses cannot reach head-height hazards.
    pub fn is_grounded(self) -> bool {
        matches!(self, PlayerState::Idle | PlayerState::Landing)
    }
}

/// The controlled character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    state: PlayerState,
    ground_y: f32,
    start_x: f32,
    /// Accumulated hold time for the current jump, seconds
    jump_hold_time: f32,
    holding_jump: bool,
    /// Presentation only: run-cycle phase while idle
    run_timer: f32,
    /// Presentation only: landing squash countdown
    squash_timer: f32,
    active: bool,
}

impl Player {
    pub fn new(start_x: f32, ground_y: f32, cfg: &Config) -> Self {
        Self {
            pos: Vec2::new(start_x, ground_y - cfg.player.height),
            vel: Vec2::ZERO,
            state: PlayerState::Idle,
            ground_y,
            start_x,
            jump_hold_time: 0.0,
            holding_jump: false,
            run_timer: 0.0,
            squash_timer: 0.0,
            active: true,
        }
    }

    /// Advance physics by one tick.
    pub fn update(&mut self, dt: f32, cfg: &Config) {
        match self.state {
            PlayerState::Jumping | PlayerState::Falling => {
                self.vel.y += cfg.physics.gravity * dt;
                self.pos.y += self.vel.y * dt;

                // Apex: upward velocity has run out
                if self.vel.y > 0.0 && self.state == PlayerState::Jumping {
                    self.state = PlayerState::Falling;
                }

                if self.pos.y >= self.ground_y - cfg.player.height {
                    self.land(cfg);
                }
            }
            PlayerState::Landing => {
                self.squash_timer -= dt;
                if self.squash_timer <= 0.0 {
                    self.squash_timer = 0.0;
                    self.state = PlayerState::Idle;
                }
            }
            PlayerState::Idle => {
                self.run_timer += dt;
            }
        }
    }

    /// Start a jump. No-op while airborne.
    pub fn jump(&mut self, cfg: &Config) {
        if self.state.is_grounded() {
            self.vel.y = cfg.physics.min_jump_velocity;
            self.state = PlayerState::Jumping;
            self.holding_jump = true;
            self.jump_hold_time = 0.0;
            self.squash_timer = 0.0;
        }
    }

    /// Feed hold force while the jump button stays pressed. Effective only
    /// during the ascent, while the hold cap has not been reached and the
    /// button was never released; velocity is clamped to the configured
    /// maximum jump velocity.
    pub fn hold_jump(&mut self, dt: f32, cfg: &Config) {
        if self.state == PlayerState::Jumping && self.holding_jump {
            let hold_ms = self.jump_hold_time * 1000.0;
            if hold_ms < cfg.physics.max_jump_hold_ms {
                self.vel.y -= cfg.physics.jump_hold_force * dt;
                self.jump_hold_time += dt;

                if self.vel.y < cfg.physics.max_jump_velocity {
                    self.vel.y = cfg.physics.max_jump_velocity;
                }
            }
        }
    }

    /// Release the jump button; further hold calls stop feeding velocity.
    pub fn release_jump(&mut self) {
        self.holding_jump = false;
    }

    fn land(&mut self, cfg: &Config) {
        self.pos.y = self.ground_y - cfg.player.height;
        self.vel.y = 0.0;
        self.state = PlayerState::Landing;
        self.squash_timer = cfg.player.squash_duration;
    }

    /// Reinitialize for a new round on a possibly updated ground line.
    pub fn reset(&mut self, ground_y: f32, cfg: &Config) {
        self.ground_y = ground_y;
        self.pos = Vec2::new(self.start_x, ground_y - cfg.player.height);
        self.vel = Vec2::ZERO;
        self.state = PlayerState::Idle;
        self.active = true;
        self.jump_hold_time = 0.0;
        self.holding_jump = false;
        self.run_timer = 0.0;
        self.squash_timer = 0.0;
    }

    /// Re-anchor the lane position after a viewport resize. The player never
    /// moves horizontally on its own.
    pub fn set_start_x(&mut self, x: f32) {
        self.start_x = x;
        self.pos.x = x;
    }

    /// Re-anchor to a new ground line after a viewport resize.
    pub fn set_ground_y(&mut self, ground_y: f32, cfg: &Config) {
        self.ground_y = ground_y;
        if self.state.is_grounded() {
            self.pos.y = ground_y - cfg.player.height;
        }
    }

    pub fn hitbox(&self, cfg: &Config) -> Hitbox {
        Hitbox::new(
            self.pos.x + cfg.player.hitbox_offset_x,
            self.pos.y + cfg.player.hitbox_offset_y,
            cfg.player.hitbox_width,
            cfg.player.hitbox_height,
        )
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_jump_held(&self) -> bool {
        self.holding_jump
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Hide the character; suppresses rendering only, never physics.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Run-cycle phase in `[0, 1)`, for leg animation. Zero while airborne or
    /// landing.
    pub fn run_phase(&self, cfg: &Config) -> f32 {
        if self.state != PlayerState::Idle {
            return 0.0;
        }
        (self.run_timer % cfg.player.run_cycle_duration) / cfg.player.run_cycle_duration
    }

    /// Landing squash scale `(x, y)`, interpolating back to `(1, 1)` over the
    /// squash duration.
    pub fn squash_scale(&self, cfg: &Config) -> (f32, f32) {
        if self.state != PlayerState::Landing || self.squash_timer <= 0.0 {
            return (1.0, 1.0);
        }
        let progress = 1.0 - self.squash_timer / cfg.player.squash_duration;
        (
            cfg.player.squash_scale_x + (1.0 - cfg.player.squash_scale_x) * progress,
            cfg.player.squash_scale_y + (1.0 - cfg.player.squash_scale_y) * progress,
        )
    }
}
