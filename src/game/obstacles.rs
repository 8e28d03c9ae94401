//! Pipe generation on a wall-clock interval.

use super::types::{Pipe, WorldSize};
use crate::core::game_state::{GameRules, GameState};
use rand::Rng;

/// Uniform integer in `[lo, hi)`. Collapses to `lo` when the range is empty,
/// which happens on play fields too short for the margins.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> i64 {
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..hi)
}

/// Build a pipe just off the right edge with a random gap.
pub fn create_pipe<R: Rng + ?Sized>(rules: &GameRules, world: WorldSize, rng: &mut R) -> Pipe {
    let gap = random_range(rng, rules.min_gap, rules.max_gap);
    // Gap rows are whole pixels; a fractional height rounds down.
    let top_limit = world.height.floor() as i64 - rules.gap_bottom_margin - gap;
    let top = random_range(rng, rules.gap_top_margin, top_limit);

    Pipe {
        x: world.width + rules.spawn_offset,
        width: rules.pipe_width,
        top: top as f64,
        gap: gap as f64,
        scored: false,
    }
}

/// Whether strictly more than `interval_ms` has elapsed since `last_spawn_ms`.
/// A spawn time in the future counts as no time elapsed.
pub fn spawn_due(last_spawn_ms: u64, now_ms: u64, interval_ms: u64) -> bool {
    now_ms.saturating_sub(last_spawn_ms) > interval_ms
}

/// Spawn at most one pipe if the interval has elapsed. Returns true on spawn.
pub fn maybe_spawn<R: Rng + ?Sized>(state: &mut GameState, now_ms: u64, rng: &mut R) -> bool {
    if !spawn_due(state.last_spawn_ms, now_ms, state.rules.spawn_interval_ms) {
        return false;
    }
    let pipe = create_pipe(&state.rules, state.world, rng);
    state.pipes.push(pipe);
    state.last_spawn_ms = now_ms;
    true
}

/// Drop pipes from the front once they are fully past the left margin.
/// Returns how many were removed.
pub fn despawn_offscreen(state: &mut GameState) -> usize {
    let limit = -state.rules.despawn_margin;
    let gone = state
        .pipes
        .iter()
        .take_while(|p| p.right_edge() < limit)
        .count();
    state.pipes.drain(..gone);
    gone
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state(height: f64) -> GameState {
        GameState::new(GameRules::default(), WorldSize::new(800.0, height), 0)
    }

    #[test]
    fn test_random_range_stays_half_open() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let v = random_range(&mut rng, 130, 220);
            assert!((130..220).contains(&v));
        }
    }

    #[test]
    fn test_random_range_empty_returns_low() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(random_range(&mut rng, 80, 80), 80);
        assert_eq!(random_range(&mut rng, 80, 10), 80);
    }

    #[test]
    fn test_gap_fits_with_margins_at_600() {
        let rules = GameRules::default();
        let world = WorldSize::new(800.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let pipe = create_pipe(&rules, world, &mut rng);
            assert!(pipe.gap >= 130.0 && pipe.gap < 220.0);
            assert!(pipe.top >= 80.0);
            assert!(pipe.top < 600.0 - 200.0 - pipe.gap);
            assert!(pipe.gap_bottom() <= 400.0);
            assert!((pipe.x - 840.0).abs() < f64::EPSILON);
            assert!(!pipe.scored);
        }
    }

    #[test]
    fn test_fractional_height_rounds_down() {
        let rules = GameRules {
            min_gap: 150,
            max_gap: 150,
            ..GameRules::default()
        };
        let world = WorldSize::new(800.0, 600.9);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..500 {
            let pipe = create_pipe(&rules, world, &mut rng);
            assert_eq!(pipe.gap, 150.0);
            assert!(pipe.top >= 80.0 && pipe.top < 250.0, "top {}", pipe.top);
        }
    }

    #[test]
    fn test_spawn_due_is_strict() {
        assert!(!spawn_due(0, 1600, 1600));
        assert!(spawn_due(0, 1601, 1600));
        assert!(!spawn_due(5000, 100, 1600));
    }

    #[test]
    fn test_maybe_spawn_once_per_interval() {
        let mut s = state(600.0);
        s.last_spawn_ms = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(maybe_spawn(&mut s, 1700, &mut rng));
        assert!(!maybe_spawn(&mut s, 1700, &mut rng));
        assert!(!maybe_spawn(&mut s, 3300, &mut rng));
        assert!(maybe_spawn(&mut s, 3301, &mut rng));
        assert_eq!(s.pipes.len(), 2);
        assert_eq!(s.last_spawn_ms, 3301);
    }

    #[test]
    fn test_despawn_removes_only_leading_offscreen() {
        let mut s = state(600.0);
        for x in [-300.0, -191.0, -150.0, 400.0] {
            s.pipes.push(Pipe {
                x,
                width: 90.0,
                top: 100.0,
                gap: 150.0,
                scored: true,
            });
        }
        assert_eq!(despawn_offscreen(&mut s), 2);
        assert_eq!(s.pipes.len(), 2);
        assert_eq!(s.pipes[0].x, -150.0);
    }
}
