//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be rebalanced from JSON
//! without touching the simulation. `Tuning::default()` is the shipped game.

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::ConfigError;

/// Balance constants for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Right edge where entities spawn
    pub world_width: f32,
    pub world_height: f32,
    /// Lowest y the player's top edge may reach
    pub ground_y: f32,
    /// Number of ambient clouds
    pub cloud_count: usize,

    // === Player ===
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Upward velocity applied on jump (pixels/tick)
    pub jump_power: f32,
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    /// Slide ends once the slide counter exceeds this many ticks
    pub slide_ticks: u32,
    /// How far the sprite crouches while sliding (no effect on collisions)
    pub slide_crouch_inset: f32,

    // === Speed ===
    pub base_speed: f32,
    /// Speed added every `speed_ramp_every` points
    pub speed_ramp: f32,
    pub speed_ramp_every: u32,
    /// Speed added when a SpeedBoost is collected (removed on expiry)
    pub boost_speed: f32,
    /// Obstacle speed multiplier while SpeedBoost is active
    pub boost_obstacle_factor: f32,

    // === Spawning (milliseconds of simulated time) ===
    pub obstacle_interval_ms: f64,
    /// Interval shrinks by this much per unit of speed
    pub obstacle_interval_per_speed: f64,
    /// Floor for the obstacle interval at high speed
    pub min_obstacle_interval_ms: f64,
    pub powerup_interval_ms: f64,
    /// Uniform draw must exceed this for an eligible power-up to spawn
    pub powerup_roll_threshold: f64,

    // === Scoring ===
    pub score_per_tick: f64,
    /// Score multiplier while DoublePoints is active
    pub double_points_factor: f64,
    /// Power-ups expire when score crosses a multiple of these
    pub shield_expiry_every: u32,
    pub boost_expiry_every: u32,
    pub double_points_expiry_every: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: CANVAS_WIDTH,
            world_height: CANVAS_HEIGHT,
            ground_y: 320.0,
            cloud_count: 5,

            player_start_x: 50.0,
            player_start_y: 300.0,
            player_width: 60.0,
            player_height: 80.0,
            jump_power: 15.0,
            gravity: 0.8,
            slide_ticks: 30,
            slide_crouch_inset: 20.0,

            base_speed: 5.0,
            speed_ramp: 0.2,
            speed_ramp_every: 30,
            boost_speed: 2.0,
            boost_obstacle_factor: 1.5,

            obstacle_interval_ms: 1500.0,
            obstacle_interval_per_speed: 10.0,
            min_obstacle_interval_ms: 100.0,
            powerup_interval_ms: 10_000.0,
            powerup_roll_threshold: 0.7,

            score_per_tick: 0.1,
            double_points_factor: 2.0,
            shield_expiry_every: 100,
            boost_expiry_every: 150,
            double_points_expiry_every: 200,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidTuning {
                    field,
                    reason: "must be positive",
                })
            }
        }

        positive("world_width", self.world_width as f64)?;
        positive("gravity", self.gravity as f64)?;
        positive("jump_power", self.jump_power as f64)?;
        positive("base_speed", self.base_speed as f64)?;
        positive("min_obstacle_interval_ms", self.min_obstacle_interval_ms)?;
        positive("powerup_interval_ms", self.powerup_interval_ms)?;
        positive("score_per_tick", self.score_per_tick)?;

        if self.score_tenths_per_tick() == 0 {
            return Err(ConfigError::InvalidTuning {
                field: "score_per_tick",
                reason: "must be at least 0.1",
            });
        }

        let thresholds = [
            ("speed_ramp_every", self.speed_ramp_every),
            ("shield_expiry_every", self.shield_expiry_every),
            ("boost_expiry_every", self.boost_expiry_every),
            ("double_points_expiry_every", self.double_points_expiry_every),
        ];
        for (field, every) in thresholds {
            if every == 0 {
                return Err(ConfigError::InvalidTuning {
                    field,
                    reason: "must be non-zero",
                });
            }
        }

        if !(0.0..1.0).contains(&self.powerup_roll_threshold) {
            return Err(ConfigError::InvalidTuning {
                field: "powerup_roll_threshold",
                reason: "must be in [0, 1)",
            });
        }

        Ok(())
    }

    /// Obstacle spawn interval at the given speed, clamped to the floor
    pub fn obstacle_interval(&self, speed: f32) -> f64 {
        let interval = self.obstacle_interval_ms - self.obstacle_interval_per_speed * speed as f64;
        interval.max(self.min_obstacle_interval_ms)
    }

    /// Score gained per tick, in tenths of a point
    pub fn score_tenths_per_tick(&self) -> u64 {
        (self.score_per_tick * 10.0).round() as u64
    }
}
