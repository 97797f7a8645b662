//! Read-only view of a frame for the render sink
//!
//! The renderer never touches `GameState` directly; it gets a `FrameView`
//! once per tick and cannot feed anything back into the simulation.

use glam::Vec2;

use crate::sim::{
    ActivePowerUps, Animations, Cloud, GamePhase, GameState, Obstacle, ObstacleKind, Player,
    PlayerState, PowerUp, PowerUpKind, Skin,
};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [PowerUp],
    pub clouds: &'a [Cloud],
    pub score: f64,
    pub high_score: u64,
    pub skin: Skin,
    pub animations: Animations,
}

impl<'a> FrameView<'a> {
    pub fn capture(state: &'a GameState, high_score: u64) -> Self {
        Self {
            phase: state.phase,
            player: &state.player,
            obstacles: &state.obstacles,
            power_ups: &state.power_ups,
            clouds: &state.clouds,
            score: state.score(),
            high_score,
            skin: state.skin,
            animations: state.animations,
        }
    }

    /// Score as shown in the HUD
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn active_power_ups(&self) -> ActivePowerUps {
        self.player.power_ups
    }

    /// Player sprite rectangle; sliding crouches by the crouch inset
    pub fn player_sprite_rect(&self) -> (Vec2, Vec2) {
        let p = self.player;
        if p.state == PlayerState::Sliding {
            let inset = p.crouch_inset.min(p.size.y);
            (p.pos + Vec2::new(0.0, inset), p.size - Vec2::new(0.0, inset))
        } else {
            (p.pos, p.size)
        }
    }

    /// Decorative chaser drifting behind the player
    pub fn enemy_pos(&self) -> Vec2 {
        let sway = (self.score / 20.0).sin() as f32 * 30.0;
        Vec2::new(self.player.pos.x - 200.0 + sway, 310.0)
    }
}

/// Consumer of frames (canvas, terminal, recorder)
pub trait RenderSink {
    fn present(&mut self, frame: &FrameView<'_>);
}

/// Per-skin colors for a flat-shaded renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub run: &'static str,
    pub jump: &'static str,
    pub slide: &'static str,
}

impl Palette {
    pub fn for_skin(skin: Skin) -> Self {
        match skin {
            Skin::Default => Self {
                background: "#87ceeb",
                run: "#1e5bd8",
                jump: "#2f7bff",
                slide: "#163f99",
            },
            Skin::Ninja => Self {
                background: "#2b2b3a",
                run: "#111111",
                jump: "#333333",
                slide: "#000000",
            },
            Skin::Robot => Self {
                background: "#c9d1d9",
                run: "#8a8f98",
                jump: "#a9b0ba",
                slide: "#5f646c",
            },
        }
    }

    pub fn player(&self, state: PlayerState) -> &'static str {
        match state {
            PlayerState::Running => self.run,
            PlayerState::Jumping => self.jump,
            PlayerState::Sliding => self.slide,
        }
    }
}

pub fn obstacle_color(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Spike => "#b22222",
        ObstacleKind::Bird => "#6b4226",
        ObstacleKind::Pit => "#222222",
        ObstacleKind::Arrow => "#8b5a2b",
    }
}

pub fn power_up_color(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Shield => "rgba(0, 150, 255, 0.8)",
        PowerUpKind::DoublePoints => "rgba(255, 215, 0, 0.8)",
        PowerUpKind::SpeedBoost => "rgba(50, 205, 50, 0.8)",
    }
}
