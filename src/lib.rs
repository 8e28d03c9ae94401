//! Flapper - a terminal Flappy Bird with swappable art and audio.
//!
//! This library holds the simulation and asset handling so they can be
//! tested without a terminal. The binary adds rendering and input.

pub mod assets;
pub mod audio;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod logging;
pub mod utils;

pub use crate::core::{game_tick, process_input, GameInput, GamePhase, GameState, TickEvent};
pub use error::{FlapperError, Result};
