//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod player;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Bounds, Rect, intersects};
pub use score::ScoreKeeper;
pub use state::{
    ActivePowerUps, Animations, Cloud, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    Player, PlayerState, PowerUp, PowerUpKind, Skin,
};
pub use tick::{Cheat, TickInput, tick};
