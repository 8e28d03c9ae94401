//! Entities of the simulation: the bird, the pipes and the play-field size.

use crate::core::constants::{BIRD_X_FRACTION, BIRD_Y_FRACTION};
use serde::{Deserialize, Serialize};

/// Play-field dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f64,
    pub height: f64,
}

impl WorldSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// World size covered by a terminal area of `cols` x `rows` cells.
    pub fn from_cells(cols: u16, rows: u16, cell_width: f64, cell_height: f64) -> Self {
        Self {
            width: cols as f64 * cell_width,
            height: rows as f64 * cell_height,
        }
    }
}

/// The player's bird. `x` only changes on reset or resize.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in units/frame (positive = downward).
    pub vel_y: f64,
    pub radius: f64,
}

impl Bird {
    pub fn new(world: WorldSize, radius: f64) -> Self {
        Self {
            x: world.width * BIRD_X_FRACTION,
            y: world.height * BIRD_Y_FRACTION,
            vel_y: 0.0,
            radius,
        }
    }

    /// Put the bird back at its start position with zero velocity.
    pub fn reset(&mut self, world: WorldSize) {
        self.x = world.width * BIRD_X_FRACTION;
        self.y = world.height * BIRD_Y_FRACTION;
        self.vel_y = 0.0;
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A pipe pair: a top segment from the ceiling, a gap, and a bottom segment
/// down to the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge (float for smooth scrolling).
    pub x: f64,
    pub width: f64,
    /// Height of the top segment, which is also the gap's upper edge.
    pub top: f64,
    /// Vertical size of the gap.
    pub gap: f64,
    /// Whether the bird has passed this pipe.
    pub scored: bool,
}

impl Pipe {
    pub fn right_edge(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_bottom(&self) -> f64 {
        self.top + self.gap
    }

    pub fn top_rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: 0.0,
            w: self.width,
            h: self.top,
        }
    }

    pub fn bottom_rect(&self, world_height: f64) -> Rect {
        let y = self.gap_bottom();
        Rect {
            x: self.x,
            y,
            w: self.width,
            h: world_height - y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_starts_left_of_center() {
        let bird = Bird::new(WorldSize::new(800.0, 600.0), 18.0);
        assert!((bird.x - 160.0).abs() < f64::EPSILON);
        assert!((bird.y - 300.0).abs() < f64::EPSILON);
        assert_eq!(bird.vel_y, 0.0);
    }

    #[test]
    fn test_pipe_segments_cover_everything_but_the_gap() {
        let pipe = Pipe {
            x: 100.0,
            width: 90.0,
            top: 120.0,
            gap: 150.0,
            scored: false,
        };
        let top = pipe.top_rect();
        let bottom = pipe.bottom_rect(600.0);
        assert_eq!(top.y, 0.0);
        assert_eq!(top.h, 120.0);
        assert_eq!(bottom.y, 270.0);
        assert_eq!(bottom.y + bottom.h, 600.0);
        assert_eq!(pipe.right_edge(), 190.0);
    }

    #[test]
    fn test_world_from_cells() {
        let world = WorldSize::from_cells(100, 30, 8.0, 16.0);
        assert_eq!(world, WorldSize::new(800.0, 480.0));
    }
}
