//! Fixed timestep simulation tick and run lifecycle
//!
//! NotStarted -> Running on start, Running -> GameOver on an unshielded hit,
//! GameOver -> Running on restart.

use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};
use super::{score, spawn, world};
use crate::highscores::HighScoreStore;

/// Debug shortcuts delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cheat {
    /// Grant a power-up flag (SpeedBoost without its speed bonus)
    Grant(PowerUpKind),
    /// Add 100 points
    AddScore,
}

/// Input events gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the title screen
    pub start: bool,
    pub jump: bool,
    pub slide: bool,
    /// Begin a new run after game over
    pub restart: bool,
    pub cheat: Option<Cheat>,
}

impl GameState {
    /// Begin the first run. Ignored unless on the title screen.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {})", self.seed);
        self.events.push(GameEvent::Started);
        true
    }

    /// Begin a new run after game over. Clouds and skin carry over.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.player.reset(&self.tuning);
        self.obstacles.clear();
        self.power_ups.clear();
        self.score.reset(self.tuning.base_speed);
        self.clock_ms = 0.0;
        self.last_obstacle_ms = None;
        self.last_power_up_ms = None;
        self.time_ticks = 0;
        self.animations = Default::default();
        self.phase = GamePhase::Running;
        log::info!("Run restarted");
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Jump input; ignored outside a run or while jumping/sliding
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running || !self.player.try_jump() {
            return false;
        }
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Slide input; ignored outside a run or while jumping/sliding
    pub fn slide(&mut self) -> bool {
        if self.phase != GamePhase::Running || !self.player.try_slide() {
            return false;
        }
        self.events.push(GameEvent::Slid);
        true
    }

    /// Apply a debug shortcut during a run
    pub fn apply_cheat(&mut self, cheat: Cheat) {
        if self.phase != GamePhase::Running {
            return;
        }
        log::debug!("Cheat: {:?}", cheat);
        match cheat {
            Cheat::Grant(kind) => self.player.power_ups.set(kind, true),
            Cheat::AddScore => score::add_score(self, 1000),
        }
    }

    /// End the run and persist a new best score
    fn end_run(&mut self, scores: &mut impl HighScoreStore) {
        self.phase = GamePhase::GameOver;

        let final_score = self.score.points();
        let best = scores.get();
        let new_high_score = final_score > best;
        if new_high_score {
            scores.set(final_score);
            log::info!("New high score: {} (was {})", final_score, best);
        }

        log::info!("Game over - score {}", final_score);
        self.events.push(GameEvent::GameOver {
            score: final_score,
            new_high_score,
        });
    }
}

/// Advance the game by one fixed timestep of `dt_ms` simulated milliseconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f64,
    scores: &mut impl HighScoreStore,
) {
    state.events.clear();

    // Lifecycle transitions take the whole tick
    if input.restart && state.restart() {
        return;
    }
    if input.start && state.start() {
        return;
    }

    if state.phase != GamePhase::Running {
        return;
    }

    if let Some(cheat) = input.cheat {
        state.apply_cheat(cheat);
    }
    if input.jump {
        state.jump();
    }
    if input.slide {
        state.slide();
    }

    state.time_ticks += 1;
    state.clock_ms += dt_ms;

    state
        .player
        .step(state.tuning.ground_y, state.tuning.slide_ticks);

    spawn::spawn_obstacle(state);
    spawn::spawn_power_up(state);

    if let Some(kind) = world::step_obstacles(state) {
        log::debug!("Hit a {} at tick {}", kind.as_str(), state.time_ticks);
        state.end_run(scores);
        return;
    }
    world::step_power_ups(state);
    world::step_clouds(state);

    state.animations.advance(state.player.state);

    score::advance(state);
}
