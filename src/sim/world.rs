//! World stepper
//!
//! Scrolls obstacles, power-ups and clouds, resolves player collisions and
//! removes whatever left the screen. Collections are walked back to front so
//! removing the current element never skips the next one.

use super::collision::overlaps;
use super::player;
use super::state::{Cloud, GameEvent, GameState, ObstacleKind};

/// Scroll obstacles and resolve hits.
///
/// Returns the kind of the obstacle that ended the run, if any. Processing
/// stops at the fatal hit; the remaining obstacles are left untouched.
pub fn step_obstacles(state: &mut GameState) -> Option<ObstacleKind> {
    let speed = if state.player.power_ups.speed_boost {
        state.speed() * state.tuning.boost_obstacle_factor
    } else {
        state.speed()
    };

    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= speed;

        if obstacle.pos.x + obstacle.size.x < 0.0 {
            state.obstacles.remove(i);
            continue;
        }

        if !overlaps(&state.player, &state.obstacles[i]) {
            continue;
        }

        let kind = state.obstacles[i].kind;
        if state.player.power_ups.shield {
            state.player.power_ups.shield = false;
            state.obstacles.remove(i);
            log::info!("Shield absorbed a {}", kind.as_str());
            state.events.push(GameEvent::ShieldAbsorbed(kind));
        } else {
            return Some(kind);
        }
    }

    None
}

/// Scroll power-ups at world speed and collect any the player touches
pub fn step_power_ups(state: &mut GameState) {
    let speed = state.speed();

    for i in (0..state.power_ups.len()).rev() {
        let power_up = &mut state.power_ups[i];
        power_up.pos.x -= speed;

        if power_up.pos.x + power_up.size.x < 0.0 {
            state.power_ups.remove(i);
            continue;
        }

        if overlaps(&state.player, &state.power_ups[i]) {
            let kind = state.power_ups.remove(i).kind;
            player::collect(state, kind);
        }
    }
}

/// Drift clouds left, wrapping them back to the right edge
pub fn step_clouds(state: &mut GameState) {
    let world_width = state.tuning.world_width;

    for i in (0..state.clouds.len()).rev() {
        let cloud = &mut state.clouds[i];
        cloud.pos.x -= cloud.speed;

        if cloud.pos.x + cloud.size.x < 0.0 {
            cloud.pos.x = world_width;
            cloud.pos.y = Cloud::random_y(&mut state.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ActivePowerUps, Obstacle, PowerUp, PowerUpKind};

    fn grounded_state() -> GameState {
        let mut state = GameState::new(1);
        state.player.pos.y = state.tuning.ground_y;
        state
    }

    #[test]
    fn test_obstacles_scroll_at_world_speed() {
        let mut state = grounded_state();
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 800.0, 320.0));
        assert_eq!(step_obstacles(&mut state), None);
        assert_eq!(state.obstacles[0].pos.x, 795.0);
    }

    #[test]
    fn test_speed_boost_scrolls_obstacles_faster() {
        let mut state = grounded_state();
        state.player.power_ups.speed_boost = true;
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 800.0, 320.0));
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, 800.0));
        step_obstacles(&mut state);
        step_power_ups(&mut state);
        assert_eq!(state.obstacles[0].pos.x, 792.5);
        // Power-ups ignore the boost multiplier
        assert_eq!(state.power_ups[0].pos.x, 795.0);
    }

    #[test]
    fn test_offscreen_obstacle_removed() {
        let mut state = grounded_state();
        state.obstacles.push(Obstacle::new(ObstacleKind::Pit, -76.0, 320.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::Bird, 400.0, 250.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::Pit, -74.0, 320.0));
        let score = state.score.tenths();

        assert_eq!(step_obstacles(&mut state), None);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].kind, ObstacleKind::Bird);
        assert_eq!(state.obstacles[1].kind, ObstacleKind::Pit);
        assert_eq!(state.score.tenths(), score);
    }

    #[test]
    fn test_offscreen_power_up_removed() {
        let mut state = grounded_state();
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, -26.0));
        state.power_ups.push(PowerUp::new(PowerUpKind::DoublePoints, 400.0));
        state.power_ups.push(PowerUp::new(PowerUpKind::SpeedBoost, -24.0));

        step_power_ups(&mut state);

        let kinds: Vec<_> = state.power_ups.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PowerUpKind::DoublePoints, PowerUpKind::SpeedBoost]);
        assert_eq!(state.power_ups[1].pos.x, -29.0);
        assert_eq!(state.player.power_ups, ActivePowerUps::default());
        assert_eq!(state.speed(), 5.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_unshielded_hit_is_fatal() {
        let mut state = grounded_state();
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 85.0, 320.0));
        assert_eq!(step_obstacles(&mut state), Some(ObstacleKind::Spike));
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_fatal_hit_stops_processing() {
        let mut state = grounded_state();
        state.obstacles.push(Obstacle::new(ObstacleKind::Bird, 600.0, 250.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 85.0, 320.0));
        step_obstacles(&mut state);
        // Earlier obstacle was never reached in the reverse walk
        assert_eq!(state.obstacles[0].pos.x, 600.0);
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut state = grounded_state();
        state.player.power_ups.shield = true;
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 85.0, 320.0));
        assert_eq!(step_obstacles(&mut state), None);
        assert!(state.obstacles.is_empty());
        assert!(!state.player.power_ups.shield);
        assert_eq!(
            state.events,
            vec![GameEvent::ShieldAbsorbed(ObstacleKind::Spike)]
        );
    }

    #[test]
    fn test_shield_absorbs_only_one_hit() {
        let mut state = grounded_state();
        state.player.power_ups.shield = true;
        state.obstacles.push(Obstacle::new(ObstacleKind::Spike, 70.0, 320.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::Pit, 60.0, 320.0));
        assert_eq!(step_obstacles(&mut state), Some(ObstacleKind::Spike));
    }

    #[test]
    fn test_collect_power_up() {
        let mut state = grounded_state();
        state.player.pos.y = 260.0;
        state.power_ups.push(PowerUp::new(PowerUpKind::DoublePoints, 60.0));
        step_power_ups(&mut state);
        assert!(state.power_ups.is_empty());
        assert!(state.player.power_ups.double_points);
        assert_eq!(
            state.events,
            vec![GameEvent::PowerUpCollected(PowerUpKind::DoublePoints)]
        );
    }

    #[test]
    fn test_grounded_player_misses_floating_power_up() {
        let mut state = grounded_state();
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, 60.0));
        step_power_ups(&mut state);
        assert_eq!(state.power_ups.len(), 1);
        assert!(!state.player.power_ups.shield);
    }

    #[test]
    fn test_clouds_wrap() {
        let mut state = grounded_state();
        let count = state.clouds.len();
        state.clouds[0].pos.x = -79.9;
        state.clouds[0].speed = 1.0;
        step_clouds(&mut state);
        assert_eq!(state.clouds.len(), count);
        assert_eq!(state.clouds[0].pos.x, state.tuning.world_width);
        assert!(state.clouds[0].pos.y >= 20.0 && state.clouds[0].pos.y < 120.0);
    }
}
