//! The explicit game state threaded through every input and tick.

use super::constants::*;
use crate::game::types::{Bird, Pipe, WorldSize};
use serde::{Deserialize, Serialize};

/// Tunable simulation constants. The defaults reproduce the classic feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub gravity: f64,
    pub flap_velocity: f64,
    pub pipe_speed: f64,
    pub bird_radius: f64,
    pub pipe_width: f64,
    pub spawn_interval_ms: u64,
    pub initial_spawn_delay_ms: u64,
    pub min_gap: i64,
    pub max_gap: i64,
    pub gap_top_margin: i64,
    pub gap_bottom_margin: i64,
    pub spawn_offset: f64,
    pub despawn_margin: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            pipe_speed: PIPE_SPEED,
            bird_radius: BIRD_RADIUS,
            pipe_width: PIPE_WIDTH,
            spawn_interval_ms: PIPE_INTERVAL_MS,
            initial_spawn_delay_ms: INITIAL_SPAWN_DELAY_MS,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            gap_top_margin: GAP_TOP_MARGIN,
            gap_bottom_margin: GAP_BOTTOM_MARGIN,
            spawn_offset: PIPE_SPAWN_OFFSET,
            despawn_margin: PIPE_DESPAWN_MARGIN,
        }
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first flap. Physics is frozen.
    Idle,
    Running,
    /// Crashed. Only a restart leaves this phase.
    GameOver,
}

/// Complete simulation state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub rules: GameRules,
    pub world: WorldSize,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Pipes in spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Wall-clock time (ms) of the last spawn. Set into the future on reset
    /// to delay the first pipe.
    pub last_spawn_ms: u64,
}

impl GameState {
    /// Create an idle game. `now_ms` anchors the spawn timer.
    pub fn new(rules: GameRules, world: WorldSize, now_ms: u64) -> Self {
        let bird = Bird::new(world, rules.bird_radius);
        let last_spawn_ms = now_ms.saturating_add(rules.initial_spawn_delay_ms);
        Self {
            rules,
            world,
            phase: GamePhase::Idle,
            bird,
            pipes: Vec::new(),
            score: 0,
            last_spawn_ms,
        }
    }

    /// Clear pipes and score, re-place the bird and go back to idle.
    pub fn reset(&mut self, now_ms: u64) {
        self.pipes.clear();
        self.bird.reset(self.world);
        self.score = 0;
        self.phase = GamePhase::Idle;
        self.last_spawn_ms = now_ms.saturating_add(self.rules.initial_spawn_delay_ms);
    }

    /// Follow a viewport change. The run keeps going; only the bounds move.
    pub fn resize(&mut self, world: WorldSize) {
        self.world = world;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldSize {
        WorldSize::new(800.0, 600.0)
    }

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(GameRules::default(), world(), 1000);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.last_spawn_ms, 1800);
        assert!((state.bird.radius - BIRD_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut state = GameState::new(GameRules::default(), world(), 0);
        state.phase = GamePhase::GameOver;
        state.score = 7;
        state.bird.y = 12.0;
        state.bird.vel_y = 9.0;
        state.pipes.push(Pipe {
            x: 10.0,
            width: 90.0,
            top: 100.0,
            gap: 150.0,
            scored: true,
        });

        state.reset(5000);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.y, 300.0);
        assert_eq!(state.bird.vel_y, 0.0);
        assert_eq!(state.last_spawn_ms, 5800);
    }

    #[test]
    fn test_huge_spawn_delay_saturates() {
        let rules = GameRules {
            initial_spawn_delay_ms: u64::MAX,
            ..GameRules::default()
        };
        let mut state = GameState::new(rules, world(), 1000);
        assert_eq!(state.last_spawn_ms, u64::MAX);
        state.reset(5000);
        assert_eq!(state.last_spawn_ms, u64::MAX);
    }

    #[test]
    fn test_resize_keeps_phase() {
        let mut state = GameState::new(GameRules::default(), world(), 0);
        state.phase = GamePhase::Running;
        state.resize(WorldSize::new(400.0, 300.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.world.height, 300.0);
    }

    #[test]
    fn test_rules_fill_missing_fields_from_defaults() {
        let rules: GameRules = serde_json::from_str(r#"{ "gravity": 0.5 }"#).unwrap();
        assert_eq!(rules.gravity, 0.5);
        assert_eq!(rules.spawn_interval_ms, PIPE_INTERVAL_MS);
        assert_eq!(rules.pipe_width, PIPE_WIDTH);
    }
}
