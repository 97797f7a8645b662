//! Run or Die - a single-screen side-scrolling runner
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (player physics, spawning, collisions, scoring)
//! - `input`: Key mapping for the input source
//! - `render`: Read-only frame view handed to the render sink
//! - `audio`: Sound cues derived from simulation events
//! - `highscores`: Persisted best score
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::{HighScoreStore, LocalHighScore, MemoryHighScore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, one tick per display frame)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
}
