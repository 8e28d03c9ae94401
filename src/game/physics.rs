//! Bird integration, pipe scrolling and collision tests.

use super::types::{Bird, Pipe, Rect};
use crate::core::constants::{MAX_TILT_DOWN, MAX_TILT_UP, TILT_PER_VELOCITY};
use crate::core::game_state::GameState;

/// One integration step: gravity into velocity, velocity into position,
/// and every pipe scrolls left.
pub fn step(state: &mut GameState) {
    state.bird.vel_y += state.rules.gravity;
    state.bird.y += state.bird.vel_y;

    let speed = state.rules.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }
}

/// Exact circle vs axis-aligned rectangle overlap. Touching counts.
pub fn circle_rect_collision(cx: f64, cy: f64, r: f64, rect: &Rect) -> bool {
    let nearest_x = cx.clamp(rect.x, rect.x + rect.w);
    let nearest_y = cy.clamp(rect.y, rect.y + rect.h);
    let dx = cx - nearest_x;
    let dy = cy - nearest_y;
    dx * dx + dy * dy <= r * r
}

/// Whether the bird's vertical extent touches or leaves `[0, height]`.
pub fn out_of_bounds(bird: &Bird, height: f64) -> bool {
    bird.y - bird.radius <= 0.0 || bird.y + bird.radius >= height
}

/// Full collision test against the screen bounds and every pipe segment.
pub fn check_collision(bird: &Bird, pipes: &[Pipe], height: f64) -> bool {
    if out_of_bounds(bird, height) {
        return true;
    }
    pipes.iter().any(|p| {
        circle_rect_collision(bird.x, bird.y, bird.radius, &p.top_rect())
            || circle_rect_collision(bird.x, bird.y, bird.radius, &p.bottom_rect(height))
    })
}

/// Sprite rotation in radians for a given vertical velocity: nose up while
/// rising, down while falling.
pub fn bird_tilt(vel_y: f64) -> f64 {
    (vel_y * TILT_PER_VELOCITY).clamp(MAX_TILT_UP, MAX_TILT_DOWN)
}
