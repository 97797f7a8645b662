//! Keyboard mapping for the input source
//!
//! Space is the single action key: it starts, restarts or jumps depending on
//! the phase. Arrow keys jump and slide; digits are debug cheats.

use crate::sim::{Cheat, GamePhase, PowerUpKind, TickInput};

/// A discrete input event delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    Jump,
    Slide,
    Restart,
    Cheat(Cheat),
}

/// Translate a `KeyboardEvent.code` into an input event
pub fn map_key(code: &str, phase: GamePhase, cheats_enabled: bool) -> Option<InputEvent> {
    match code {
        "Space" => Some(match phase {
            GamePhase::NotStarted => InputEvent::Start,
            GamePhase::GameOver => InputEvent::Restart,
            GamePhase::Running => InputEvent::Jump,
        }),
        "ArrowUp" if phase == GamePhase::Running => Some(InputEvent::Jump),
        "ArrowDown" if phase == GamePhase::Running => Some(InputEvent::Slide),
        _ if cheats_enabled && phase == GamePhase::Running => {
            map_cheat(code).map(InputEvent::Cheat)
        }
        _ => None,
    }
}

fn map_cheat(code: &str) -> Option<Cheat> {
    match code {
        "Digit1" => Some(Cheat::Grant(PowerUpKind::Shield)),
        "Digit2" => Some(Cheat::Grant(PowerUpKind::DoublePoints)),
        "Digit3" => Some(Cheat::Grant(PowerUpKind::SpeedBoost)),
        "Digit0" => Some(Cheat::AddScore),
        _ => None,
    }
}

impl TickInput {
    /// Queue an event for the next tick
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Start => self.start = true,
            InputEvent::Jump => self.jump = true,
            InputEvent::Slide => self.slide = true,
            InputEvent::Restart => self.restart = true,
            InputEvent::Cheat(cheat) => self.cheat = Some(cheat),
        }
    }

    /// Clear one-shot inputs after a tick consumed them
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
