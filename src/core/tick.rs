//! The per-frame orchestration function.
//!
//! `game_tick()` runs one simulation frame: generator, physics, scoring,
//! cleanup, then the collision check that may end the run. It returns a
//! [`TickResult`] describing what happened so the front end can play sounds
//! and update the HUD without the simulation depending on either.

use super::game_state::{GamePhase, GameState};
use crate::game::{obstacles, physics, scoring};
use rand::Rng;

/// A single event produced by a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// A new pipe entered from the right.
    PipeSpawned,
    /// The bird cleared a pipe. `score` is the total after this point.
    PointScored { score: u32 },
    /// Pipes that scrolled off the left edge were dropped.
    PipesCleared { count: usize },
    /// The bird hit a pipe or a screen bound. The run is over.
    Collision { final_score: u32 },
}

/// Everything that happened during one tick, in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn collided(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::Collision { .. }))
    }

    pub fn points_scored(&self) -> u32 {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::PointScored { .. }))
            .count() as u32
    }
}

/// Advance the simulation by one frame. Does nothing unless running.
///
/// `now_ms` is wall-clock time in milliseconds and only drives the spawn
/// timer. Motion is per frame.
pub fn game_tick<R: Rng + ?Sized>(state: &mut GameState, now_ms: u64, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();
    if state.phase != GamePhase::Running {
        return result;
    }

    // 1. Obstacle generator
    if obstacles::maybe_spawn(state, now_ms, rng) {
        result.events.push(TickEvent::PipeSpawned);
    }

    // 2. Physics
    physics::step(state);

    // 3. Scoring
    let before = state.score;
    let awarded = scoring::award_passed_pipes(state);
    for i in 1..=awarded {
        result.events.push(TickEvent::PointScored { score: before + i });
    }

    // 4. Off-screen cleanup
    let cleared = obstacles::despawn_offscreen(state);
    if cleared > 0 {
        result.events.push(TickEvent::PipesCleared { count: cleared });
    }

    // 5. Collision ends the run
    if physics::check_collision(&state.bird, &state.pipes, state.world.height) {
        state.phase = GamePhase::GameOver;
        tracing::debug!(score = state.score, "collision, run over");
        result.events.push(TickEvent::Collision {
            final_score: state.score,
        });
    }

    result
}
