//! Procedural obstacle and power-up spawning
//!
//! Both gates are time-based. The obstacle interval shrinks with speed down
//! to a floor; power-ups also need a lucky roll once their interval passed.

use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};

/// Roll a random obstacle entering at `x`
pub fn random_obstacle(rng: &mut impl Rng, x: f32) -> Obstacle {
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let lanes = kind.lanes();
    let y = if lanes.len() > 1 {
        lanes[rng.random_range(0..lanes.len())]
    } else {
        lanes[0]
    };
    Obstacle::new(kind, x, y)
}

/// Roll a random power-up entering at `x`
pub fn random_power_up(rng: &mut impl Rng, x: f32) -> PowerUp {
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    PowerUp::new(kind, x)
}

fn elapsed_since(now: f64, last: Option<f64>) -> f64 {
    last.map_or(f64::INFINITY, |t| now - t)
}

/// Spawn an obstacle if its interval has passed
pub fn spawn_obstacle(state: &mut GameState) -> bool {
    let interval = state.tuning.obstacle_interval(state.speed());
    if elapsed_since(state.clock_ms, state.last_obstacle_ms) <= interval {
        return false;
    }

    let obstacle = random_obstacle(&mut state.rng, state.tuning.world_width);
    state.events.push(GameEvent::ObstacleSpawned(obstacle.kind));
    state.obstacles.push(obstacle);
    state.last_obstacle_ms = Some(state.clock_ms);
    true
}

/// Spawn a power-up if its interval has passed and the roll succeeds
pub fn spawn_power_up(state: &mut GameState) -> bool {
    if elapsed_since(state.clock_ms, state.last_power_up_ms) <= state.tuning.powerup_interval_ms {
        return false;
    }
    // Roll only once the interval has passed
    if state.rng.random::<f64>() <= state.tuning.powerup_roll_threshold {
        return false;
    }

    let power_up = random_power_up(&mut state.rng, state.tuning.world_width);
    state.events.push(GameEvent::PowerUpSpawned(power_up.kind));
    state.power_ups.push(power_up);
    state.last_power_up_ms = Some(state.clock_ms);
    true
}
