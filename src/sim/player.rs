//! Player state machine
//!
//! Running -> Jumping on jump input, back to Running on landing.
//! Running -> Sliding on slide input, back to Running after the slide timer.

use glam::Vec2;

use super::score::Crossings;
use super::state::{ActivePowerUps, GameEvent, GameState, Player, PlayerState, PowerUpKind};
use crate::tuning::Tuning;

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, tuning.player_start_y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            jump_power: tuning.jump_power,
            gravity: tuning.gravity,
            state: PlayerState::Running,
            slide_ticks: 0,
            power_ups: ActivePowerUps::default(),
            crouch_inset: tuning.slide_crouch_inset,
        }
    }

    /// Back to the starting position with no power-ups
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    pub fn is_jumping(&self) -> bool {
        self.state == PlayerState::Jumping
    }

    pub fn is_sliding(&self) -> bool {
        self.state == PlayerState::Sliding
    }

    /// Start a jump. Ignored while jumping or sliding.
    pub fn try_jump(&mut self) -> bool {
        if self.state != PlayerState::Running {
            return false;
        }
        self.state = PlayerState::Jumping;
        self.vel_y = -self.jump_power;
        true
    }

    /// Start a slide. Ignored while jumping or already sliding.
    pub fn try_slide(&mut self) -> bool {
        if self.state != PlayerState::Running {
            return false;
        }
        self.state = PlayerState::Sliding;
        self.slide_ticks = 0;
        true
    }

    /// Gravity, ground clamp and slide timer for one tick
    pub fn step(&mut self, ground_y: f32, slide_duration: u32) {
        self.vel_y += self.gravity;
        self.pos.y += self.vel_y;

        if self.pos.y > ground_y {
            self.pos.y = ground_y;
            self.vel_y = 0.0;
            if self.state == PlayerState::Jumping {
                self.state = PlayerState::Running;
            }
        }

        if self.state == PlayerState::Sliding {
            self.slide_ticks += 1;
            if self.slide_ticks > slide_duration {
                self.state = PlayerState::Running;
                self.slide_ticks = 0;
            }
        }
    }
}

/// Grant a collected power-up
pub fn collect(state: &mut GameState, kind: PowerUpKind) {
    state.player.power_ups.set(kind, true);
    if kind == PowerUpKind::SpeedBoost {
        state.score.add_speed(state.tuning.boost_speed);
    }
    log::info!("Collected {} at score {:.1}", kind.as_str(), state.score());
    state.events.push(GameEvent::PowerUpCollected(kind));
}

/// Drop power-ups whose score threshold was just crossed
pub fn expire_power_ups(state: &mut GameState, crossings: &Crossings) {
    let expiring = [
        (PowerUpKind::Shield, crossings.shield),
        (PowerUpKind::SpeedBoost, crossings.speed_boost),
        (PowerUpKind::DoublePoints, crossings.double_points),
    ];

    for (kind, crossed) in expiring {
        if !crossed || !state.player.power_ups.is_active(kind) {
            continue;
        }
        state.player.power_ups.set(kind, false);
        if kind == PowerUpKind::SpeedBoost {
            let floor = state.tuning.base_speed;
            state.score.remove_speed(state.tuning.boost_speed, floor);
        }
        log::debug!("{} expired at score {:.1}", kind.as_str(), state.score());
        state.events.push(GameEvent::PowerUpExpired(kind));
    }
}
