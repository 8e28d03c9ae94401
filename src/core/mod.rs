//! Core game state, input handling and the per-frame tick.

pub mod constants;
pub mod game_state;
pub mod input;
pub mod tick;

pub use game_state::{GamePhase, GameRules, GameState};
pub use input::{process_input, GameInput, InputEvent};
pub use tick::{game_tick, TickEvent, TickResult};
