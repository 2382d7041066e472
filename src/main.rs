//! Jump Runner entry point
//!
//! Headless demo run: steps the simulation at a fixed timestep with the
//! attract-mode autopilot at the controls, then dumps a JSON snapshot. A real
//! host wires a renderer and an input source around the same `Game` API.

use std::time::Instant;

use jump_runner::{Config, Game, Phase, TickInput, Viewport};

const SIM_DT: f32 = 1.0 / 120.0;
const DEMO_SECONDS: f32 = 30.0;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("cannot read tuning file {path}: {e}");
                std::process::exit(1);
            });
            Config::from_json(&json).unwrap_or_else(|e| {
                eprintln!("invalid tuning file {path}: {e}");
                std::process::exit(1);
            })
        }
        None => Config::default(),
    };

    let viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };
    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    log::info!("Jump Runner headless demo, seed {seed}");

    let mut game = Game::new(config, viewport, seed);
    game.set_collision_hook(|event| {
        log::warn!(
            "collision: player at ({:.0},{:.0}) vs obstacle at ({:.0},{:.0})",
            event.player_hitbox.x,
            event.player_hitbox.y,
            event.obstacle_hitbox.x,
            event.obstacle_hitbox.y
        );
    });

    let started = Instant::now();
    let ticks = (DEMO_SECONDS / SIM_DT) as usize;
    for tick in 0..ticks {
        game.tick(SIM_DT, &TickInput::default());

        if tick % (ticks / 10).max(1) == 0 {
            let snap = game.snapshot();
            log::info!(
                "t={:5.1}s phase={:?} obstacles={} player={:?}",
                tick as f32 * SIM_DT,
                snap.phase,
                snap.obstacles.len(),
                snap.player.state
            );
        }
    }

    log::info!(
        "simulated {DEMO_SECONDS}s in {:.1}ms",
        started.elapsed().as_secs_f64() * 1000.0
    );

    // The attract loop never ends a round on its own; show where it got to.
    let snapshot = game.snapshot();
    debug_assert_eq!(snapshot.phase, Phase::Attract);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("snapshot serialization failed: {e}"),
    }
}
