//! Score and difficulty
//!
//! Score is kept in integer tenths of a point. Threshold effects (speed
//! ramp, power-up expiry) fire when the score crosses a multiple of their
//! period, so no floating-point modulo is involved and no step is skipped.

use super::player;
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Accumulated score and world speed for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreKeeper {
    tenths: u64,
    speed: f32,
}

/// Threshold multiples crossed by one score increase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crossings {
    pub speed_steps: u64,
    pub shield: bool,
    pub speed_boost: bool,
    pub double_points: bool,
}

/// Number of multiples of `every_points` in `(prev, next]`, both in tenths
fn crossed(prev: u64, next: u64, every_points: u32) -> u64 {
    let period = every_points as u64 * 10;
    next / period - prev / period
}

impl ScoreKeeper {
    pub fn new(base_speed: f32) -> Self {
        Self {
            tenths: 0,
            speed: base_speed,
        }
    }

    /// Score as displayed (0.1 resolution)
    pub fn score(&self) -> f64 {
        self.tenths as f64 / 10.0
    }

    /// Whole points, as persisted to the high score
    pub fn points(&self) -> u64 {
        self.tenths / 10
    }

    pub fn tenths(&self) -> u64 {
        self.tenths
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Overwrite the score without firing thresholds
    pub fn set_score(&mut self, score: f64) {
        self.tenths = (score.max(0.0) * 10.0).round() as u64;
    }

    /// Add score and report which thresholds were crossed
    pub fn add_tenths(&mut self, delta: u64, tuning: &Tuning) -> Crossings {
        let prev = self.tenths;
        let next = prev.saturating_add(delta);
        self.tenths = next;

        Crossings {
            speed_steps: crossed(prev, next, tuning.speed_ramp_every),
            shield: crossed(prev, next, tuning.shield_expiry_every) > 0,
            speed_boost: crossed(prev, next, tuning.boost_expiry_every) > 0,
            double_points: crossed(prev, next, tuning.double_points_expiry_every) > 0,
        }
    }

    pub fn add_speed(&mut self, amount: f32) {
        self.speed += amount;
    }

    /// Remove speed without dropping below `floor`
    pub fn remove_speed(&mut self, amount: f32, floor: f32) {
        self.speed = (self.speed - amount).max(floor);
    }

    pub fn reset(&mut self, base_speed: f32) {
        self.tenths = 0;
        self.speed = base_speed;
    }
}

/// Score gained by one running tick
pub fn tick_tenths(state: &GameState) -> u64 {
    let tuning = &state.tuning;
    if state.player.power_ups.double_points {
        (tuning.score_per_tick * tuning.double_points_factor * 10.0).round() as u64
    } else {
        tuning.score_tenths_per_tick()
    }
}

/// Add score, ramp speed and expire power-ups whose threshold was crossed
pub fn add_score(state: &mut GameState, delta_tenths: u64) {
    let crossings = state.score.add_tenths(delta_tenths, &state.tuning);

    if crossings.speed_steps > 0 {
        let bump = state.tuning.speed_ramp * crossings.speed_steps as f32;
        state.score.add_speed(bump);
        log::debug!(
            "Speed up to {:.1} at score {:.1}",
            state.score.speed(),
            state.score.score()
        );
        state.events.push(GameEvent::SpeedIncreased {
            speed: state.score.speed(),
        });
    }

    player::expire_power_ups(state, &crossings);
}

/// Per-tick scoring step
pub fn advance(state: &mut GameState) {
    let delta = tick_tenths(state);
    add_score(state, delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PowerUpKind;
    use proptest::prelude::*;

    #[test]
    fn test_crossing_counts() {
        assert_eq!(crossed(999, 1000, 100), 1);
        assert_eq!(crossed(1000, 1001, 100), 0);
        assert_eq!(crossed(0, 3000, 30), 10);
        assert_eq!(crossed(299, 300, 30), 1);
    }

    #[test]
    fn test_speed_ramps_every_30_points() {
        let mut state = GameState::new(1);
        state.score.set_score(29.9);
        advance(&mut state);
        assert!((state.speed() - 5.2).abs() < 1e-5);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::SpeedIncreased { .. })));

        // No further bump until the next multiple
        for _ in 0..299 {
            advance(&mut state);
        }
        assert!((state.speed() - 5.2).abs() < 1e-5);
        advance(&mut state);
        assert!((state.speed() - 5.4).abs() < 1e-5);
    }

    #[test]
    fn test_ramp_reached_from_zero() {
        let mut state = GameState::new(1);
        for _ in 0..300 {
            advance(&mut state);
        }
        assert_eq!(state.score.tenths(), 300);
        assert!((state.speed() - 5.2).abs() < 1e-5);
    }

    #[test]
    fn test_double_points() {
        let mut state = GameState::new(1);
        state.player.power_ups.set(PowerUpKind::DoublePoints, true);
        advance(&mut state);
        assert_eq!(state.score.tenths(), 2);
        assert!((state.score() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_large_jump_counts_every_step() {
        let mut state = GameState::new(1);
        add_score(&mut state, 1000);
        // 100 points crosses 30, 60 and 90
        assert!((state.speed() - 5.6).abs() < 1e-5);
    }

    #[test]
    fn test_remove_speed_floor() {
        let mut keeper = ScoreKeeper::new(5.0);
        keeper.add_speed(1.0);
        keeper.remove_speed(2.0, 5.0);
        assert_eq!(keeper.speed(), 5.0);
    }

    proptest! {
        #[test]
        fn score_never_decreases(deltas in proptest::collection::vec(0u64..50, 1..200)) {
            let tuning = Tuning::default();
            let mut keeper = ScoreKeeper::new(tuning.base_speed);
            let mut last = keeper.score();
            for delta in deltas {
                keeper.add_tenths(delta, &tuning);
                prop_assert!(keeper.score() >= last);
                last = keeper.score();
            }
        }
    }
}
