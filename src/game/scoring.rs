//! Point tracking: one point per pipe the bird gets past.

use crate::core::game_state::GameState;

/// Mark every pipe whose right edge is now left of the bird and count it.
/// Returns the number of points awarded in this call.
pub fn award_passed_pipes(state: &mut GameState) -> u32 {
    let bird_x = state.bird.x;
    let mut awarded = 0;
    for pipe in &mut state.pipes {
        if !pipe.scored && pipe.right_edge() < bird_x {
            pipe.scored = true;
            awarded += 1;
        }
    }
    state.score += awarded;
    awarded
}
