//! Simulation pieces: entities, pipe generation, physics and scoring.
//!
//! Each stage operates on [`crate::core::GameState`] and knows nothing about
//! the terminal, so the whole game runs headless in tests.

pub mod obstacles;
pub mod physics;
pub mod scoring;
pub mod types;

pub use physics::{bird_tilt, check_collision, circle_rect_collision};
pub use types::{Bird, Pipe, Rect, WorldSize};
