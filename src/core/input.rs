//! Player input and the phase transitions it drives.

use super::game_state::{GamePhase, GameState};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Space, Up, Enter or a mouse press. Restarts when the run is over.
    Flap,
    /// Explicit restart, available in every phase.
    Restart,
}

/// What an input did, for the front end to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// First flap of a run: idle became running.
    Started,
    Flapped,
    Restarted,
}

/// Set the bird's velocity to the flap impulse. Starts an idle run.
/// Ignored once the run is over.
pub fn flap(state: &mut GameState) -> Option<InputEvent> {
    match state.phase {
        GamePhase::GameOver => None,
        GamePhase::Idle => {
            state.bird.vel_y = state.rules.flap_velocity;
            state.phase = GamePhase::Running;
            Some(InputEvent::Started)
        }
        GamePhase::Running => {
            state.bird.vel_y = state.rules.flap_velocity;
            Some(InputEvent::Flapped)
        }
    }
}

/// Reset the run back to idle from any phase.
pub fn restart(state: &mut GameState, now_ms: u64) -> InputEvent {
    state.reset(now_ms);
    InputEvent::Restarted
}

/// Dispatch an input against the current phase.
pub fn process_input(state: &mut GameState, input: GameInput, now_ms: u64) -> Option<InputEvent> {
    match input {
        GameInput::Flap if state.is_game_over() => Some(restart(state, now_ms)),
        GameInput::Flap => flap(state),
        GameInput::Restart => Some(restart(state, now_ms)),
    }
}
