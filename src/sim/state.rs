//! Game phase state machine
//!
//! Three phases linked in one directed cycle: attract/demo → playing → game
//! over → attract. Nothing else, including self-transitions, is legal. Each
//! phase may carry enter/exit hooks registered once at composition time; the
//! hooks receive a mutable context so the orchestrator can reset gameplay
//! state without the machine knowing what that state is.

use log::info;
use serde::{Deserialize, Serialize};

/// High-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Attract,
    Playing,
    GameOver,
}

impl Phase {
    /// The only phase reachable from `self`.
    fn successor(self) -> Phase {
        match self {
            Phase::Attract => Phase::Playing,
            Phase::Playing => Phase::GameOver,
            Phase::GameOver => Phase::Attract,
        }
    }

    fn index(self) -> usize {
        match self {
            Phase::Attract => 0,
            Phase::Playing => 1,
            Phase::GameOver => 2,
        }
    }
}

type Hook<C> = Box<dyn FnMut(&mut C)>;

struct PhaseHooks<C> {
    on_enter: Option<Hook<C>>,
    on_exit: Option<Hook<C>>,
}

// Manual impl; the derive would bound `C: Default`.
impl<C> Default for PhaseHooks<C> {
    fn default() -> Self {
        Self {
            on_enter: None,
            on_exit: None,
        }
    }
}

/// Phase machine with per-phase enter/exit hooks over a context `C`.
pub struct StateMachine<C> {
    current: Phase,
    hooks: [PhaseHooks<C>; 3],
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> StateMachine<C> {
    pub fn new() -> Self {
        Self {
            current: Phase::Attract,
            hooks: [
                PhaseHooks::default(),
                PhaseHooks::default(),
                PhaseHooks::default(),
            ],
        }
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn is(&self, phase: Phase) -> bool {
        self.current == phase
    }

    /// Register the enter hook for a phase, replacing any previous one.
    pub fn on_enter(&mut self, phase: Phase, hook: impl FnMut(&mut C) + 'static) {
        self.hooks[phase.index()].on_enter = Some(Box::new(hook));
    }

    /// Register the exit hook for a phase, replacing any previous one.
    pub fn on_exit(&mut self, phase: Phase, hook: impl FnMut(&mut C) + 'static) {
        self.hooks[phase.index()].on_exit = Some(Box::new(hook));
    }

    /// Attempt a transition. Illegal targets are rejected with `false` and no
    /// hook fires. On success the current phase's exit hook runs strictly
    /// before the target's enter hook.
    pub fn transition(&mut self, to: Phase, ctx: &mut C) -> bool {
        if self.current.successor() != to {
            return false;
        }

        if let Some(on_exit) = &mut self.hooks[self.current.index()].on_exit {
            on_exit(ctx);
        }

        info!("phase {:?} -> {:?}", self.current, to);
        self.current = to;

        if let Some(on_enter) = &mut self.hooks[to.index()].on_enter {
            on_enter(ctx);
        }

        true
    }

    /// Hard reset back to attract. Fires no hooks; not part of normal flow.
    pub fn reset(&mut self) {
        self.current = Phase::Attract;
    }
}
