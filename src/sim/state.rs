//! Game state and core simulation types
//!
//! `GameState` is the whole session: one player, one world, the RNG and the
//! clocks. Nothing outside it is mutated by the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use super::score::ScoreKeeper;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart input
    GameOver,
}

impl GamePhase {
    /// Whether the frame scheduler should keep requesting ticks
    pub fn wants_frames(&self) -> bool {
        !matches!(self, GamePhase::GameOver)
    }
}

/// Movement state of the player. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Running,
    Jumping,
    Sliding,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    DoublePoints,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::DoublePoints,
        PowerUpKind::SpeedBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::DoublePoints => "doublePoints",
            PowerUpKind::SpeedBoost => "speedBoost",
        }
    }
}

/// Power-up flags currently held by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUps {
    pub shield: bool,
    pub double_points: bool,
    pub speed_boost: bool,
}

impl ActivePowerUps {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::Shield => self.shield,
            PowerUpKind::DoublePoints => self.double_points,
            PowerUpKind::SpeedBoost => self.speed_boost,
        }
    }

    pub fn set(&mut self, kind: PowerUpKind, active: bool) {
        match kind {
            PowerUpKind::Shield => self.shield = active,
            PowerUpKind::DoublePoints => self.double_points = active,
            PowerUpKind::SpeedBoost => self.speed_boost = active,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, negative = up)
    pub vel_y: f32,
    pub jump_power: f32,
    pub gravity: f32,
    pub state: PlayerState,
    /// Ticks spent in the current slide
    pub slide_ticks: u32,
    pub power_ups: ActivePowerUps,
    /// Sprite top inset while sliding (drawing only)
    pub crouch_inset: f32,
}

/// Full box in every state; sliding only changes how the player is drawn
impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Bird,
    Pit,
    Arrow,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Spike,
        ObstacleKind::Bird,
        ObstacleKind::Pit,
        ObstacleKind::Arrow,
    ];

    /// Width and height fixed by kind
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Spike => Vec2::new(40.0, 30.0),
            ObstacleKind::Bird => Vec2::new(50.0, 30.0),
            ObstacleKind::Pit => Vec2::new(80.0, 10.0),
            ObstacleKind::Arrow => Vec2::new(60.0, 10.0),
        }
    }

    /// Possible spawn heights (top edge); arrows fly high or low
    pub fn lanes(&self) -> &'static [f32] {
        match self {
            ObstacleKind::Spike => &[320.0],
            ObstacleKind::Bird => &[250.0],
            ObstacleKind::Pit => &[320.0],
            ObstacleKind::Arrow => &[270.0, 310.0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Bird => "bird",
            ObstacleKind::Pit => "pit",
            ObstacleKind::Arrow => "arrow",
        }
    }
}

/// A hazard scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            size: kind.size(),
        }
    }
}

impl Bounds for Obstacle {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Power-up pickup size (square)
pub const POWER_UP_SIZE: f32 = 30.0;
/// Power-up spawn height (top edge)
pub const POWER_UP_Y: f32 = 280.0;

/// A collectible scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, POWER_UP_Y),
            size: Vec2::splat(POWER_UP_SIZE),
        }
    }
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Ambient background cloud (no collision)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward drift (pixels/tick)
    pub speed: f32,
}

impl Cloud {
    pub const WIDTH: f32 = 80.0;
    pub const HEIGHT: f32 = 40.0;

    /// Random vertical offset for a (re)entering cloud
    pub fn random_y(rng: &mut impl Rng) -> f32 {
        rng.random::<f32>() * 100.0 + 20.0
    }

    /// Cloud placed anywhere across the sky
    pub fn random(rng: &mut impl Rng, world_width: f32) -> Self {
        let x = rng.random::<f32>() * world_width;
        let y = Self::random_y(rng);
        let speed = rng.random::<f32>() + 0.5;
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(Self::WIDTH, Self::HEIGHT),
            speed,
        }
    }
}

/// Cosmetic character skin (render-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Default,
    Ninja,
    Robot,
}

impl Skin {
    pub const ALL: [Skin; 3] = [Skin::Default, Skin::Ninja, Skin::Robot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Default => "default",
            Skin::Ninja => "ninja",
            Skin::Robot => "robot",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Skin::Default),
            "ninja" => Some(Skin::Ninja),
            "robot" => Some(Skin::Robot),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Skin {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Skin::from_str(s).ok_or_else(|| ConfigError::UnknownSkin(s.to_string()))
    }
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Jumped,
    Slid,
    ObstacleSpawned(ObstacleKind),
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    /// Shield consumed by an obstacle
    ShieldAbsorbed(ObstacleKind),
    SpeedIncreased { speed: f32 },
    GameOver { score: u64, new_high_score: bool },
}

/// Sprite animation counters (render-only, no gameplay effect)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Animations {
    pub run_frame: u32,
    run_counter: u32,
    pub cloud_frame: u32,
    cloud_counter: u32,
}

impl Animations {
    pub const RUN_FRAMES: u32 = 4;
    const RUN_FRAME_TICKS: u32 = 8;
    pub const CLOUD_FRAMES: u32 = 2;
    const CLOUD_FRAME_TICKS: u32 = 15;

    pub fn advance(&mut self, player_state: PlayerState) {
        if player_state == PlayerState::Running {
            self.run_counter += 1;
            if self.run_counter >= Self::RUN_FRAME_TICKS {
                self.run_frame = (self.run_frame + 1) % Self::RUN_FRAMES;
                self.run_counter = 0;
            }
        }

        self.cloud_counter += 1;
        if self.cloud_counter >= Self::CLOUD_FRAME_TICKS {
            self.cloud_frame = (self.cloud_frame + 1) % Self::CLOUD_FRAMES;
            self.cloud_counter = 0;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Power-ups in spawn order
    pub power_ups: Vec<PowerUp>,
    /// Fixed cloud population, survives restarts
    pub clouds: Vec<Cloud>,
    /// Score and world speed
    pub score: ScoreKeeper,
    /// Simulated milliseconds since the run started
    pub clock_ms: f64,
    /// When the last obstacle spawned (None = never, gate open)
    pub last_obstacle_ms: Option<f64>,
    /// When the last power-up spawned (None = never, gate open)
    pub last_power_up_ms: Option<f64>,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub skin: Skin,
    pub animations: Animations,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with custom balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..tuning.cloud_count)
            .map(|_| Cloud::random(&mut rng, tuning.world_width))
            .collect();

        Self {
            seed,
            rng,
            phase: GamePhase::NotStarted,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            clouds,
            score: ScoreKeeper::new(tuning.base_speed),
            clock_ms: 0.0,
            last_obstacle_ms: None,
            last_power_up_ms: None,
            time_ticks: 0,
            skin: Skin::default(),
            animations: Animations::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Current score (tenths resolution)
    pub fn score(&self) -> f64 {
        self.score.score()
    }

    /// Current world scroll speed
    pub fn speed(&self) -> f32 {
        self.score.speed()
    }

    /// Select a cosmetic skin; no gameplay effect
    pub fn set_skin(&mut self, skin: Skin) {
        self.skin = skin;
    }

    /// Select a skin by name, rejecting unknown names
    pub fn select_skin(&mut self, name: &str) -> Result<(), ConfigError> {
        self.skin = Skin::try_from(name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::overlaps;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.player.state, PlayerState::Running);
        assert_eq!(state.clouds.len(), 5);
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.score(), 0.0);
        assert_eq!(state.speed(), 5.0);
    }

    #[test]
    fn test_clouds_start_in_sky() {
        let state = GameState::new(3);
        for cloud in &state.clouds {
            assert!(cloud.pos.x >= 0.0 && cloud.pos.x < state.tuning.world_width);
            assert!(cloud.pos.y >= 20.0 && cloud.pos.y < 120.0);
            assert!(cloud.speed >= 0.5 && cloud.speed < 1.5);
        }
    }

    #[test]
    fn test_obstacle_geometry_table() {
        let spike = Obstacle::new(ObstacleKind::Spike, 800.0, 320.0);
        assert_eq!(spike.size, Vec2::new(40.0, 30.0));
        assert_eq!(ObstacleKind::Bird.size(), Vec2::new(50.0, 30.0));
        assert_eq!(ObstacleKind::Pit.size(), Vec2::new(80.0, 10.0));
        assert_eq!(ObstacleKind::Arrow.size(), Vec2::new(60.0, 10.0));
        assert_eq!(ObstacleKind::Arrow.lanes(), &[270.0, 310.0]);
    }

    #[test]
    fn test_power_up_geometry() {
        let p = PowerUp::new(PowerUpKind::Shield, 800.0);
        assert_eq!(p.pos, Vec2::new(800.0, 280.0));
        assert_eq!(p.size, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_sliding_keeps_full_hitbox() {
        let mut player = Player::new(&Tuning::default());
        player.pos.y = 320.0;
        let standing = player.bounds();
        player.state = PlayerState::Sliding;
        assert_eq!(player.bounds(), standing);
        assert_eq!(standing, Rect::new(50.0, 320.0, 60.0, 80.0));

        let pit = Obstacle::new(ObstacleKind::Pit, 75.0, 320.0);
        assert!(overlaps(&player, &pit));
    }

    #[test]
    fn test_skin_parsing() {
        assert_eq!(Skin::from_str("Ninja"), Some(Skin::Ninja));
        assert_eq!(Skin::try_from("robot").unwrap(), Skin::Robot);
        assert!(matches!(
            Skin::try_from("pirate"),
            Err(ConfigError::UnknownSkin(name)) if name == "pirate"
        ));
    }

    #[test]
    fn test_select_skin_keeps_previous_on_error() {
        let mut state = GameState::new(1);
        state.select_skin("ninja").unwrap();
        assert!(state.select_skin("wizard").is_err());
        assert_eq!(state.skin, Skin::Ninja);
    }

    #[test]
    fn test_animation_frames() {
        let mut anim = Animations::default();
        for _ in 0..8 {
            anim.advance(PlayerState::Running);
        }
        assert_eq!(anim.run_frame, 1);

        // Jumping freezes the run cycle but clouds keep moving
        for _ in 0..8 {
            anim.advance(PlayerState::Jumping);
        }
        assert_eq!(anim.run_frame, 1);
        assert_eq!(anim.cloud_frame, 1);
    }

    #[test]
    fn test_wants_frames() {
        assert!(GamePhase::NotStarted.wants_frames());
        assert!(GamePhase::Running.wants_frames());
        assert!(!GamePhase::GameOver.wants_frames());
    }
}
