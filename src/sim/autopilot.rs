//! Demo mode - the game plays itself
//!
//! Jumps over the nearest hazard in the running lane. Hazards that pass
//! overhead get a duck for show, as long as the slide cannot run into the
//! next ground hazard.

use super::collision::{Bounds, Rect, intersects};
use super::state::{GamePhase, GameState, Obstacle};
use super::tick::TickInput;

/// Ticks of warning before a jump (enough height to clear a spike)
const JUMP_LEAD_TICKS: f32 = 8.0;
/// Ticks of warning before a duck
const SLIDE_LEAD_TICKS: f32 = 2.0;
/// How far above the player an obstacle still counts as overhead
const OVERHEAD_BAND: f32 = 80.0;

/// What the autopilot wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    Jump,
    Slide,
}

/// Player box if it stayed at ground level
fn lane_box(state: &GameState) -> Rect {
    let mut ghost = state.player.bounds();
    ghost.pos.y = state.tuning.ground_y;
    ghost
}

/// Vertical overlap only: would this obstacle hit a player standing under it?
fn blocks_lane(lane: &Rect, obstacle: &Obstacle) -> bool {
    let column = Rect::new(lane.left(), obstacle.pos.y, lane.size.x, obstacle.size.y);
    intersects(lane, &column)
}

fn passes_overhead(lane: &Rect, obstacle: &Obstacle) -> bool {
    let bottom = obstacle.pos.y + obstacle.size.y;
    bottom <= lane.top() && bottom > lane.top() - OVERHEAD_BAND
}

/// Decide how to handle the obstacles ahead
pub fn plan(state: &GameState) -> Option<Maneuver> {
    if state.phase != GamePhase::Running
        || state.player.is_jumping()
        || state.player.is_sliding()
    {
        return None;
    }

    let lane = lane_box(state);
    let speed = state.speed().max(f32::EPSILON);
    let ahead = || {
        state
            .obstacles
            .iter()
            .filter(move |o| o.pos.x + o.size.x > lane.left())
    };
    let gap = |o: &Obstacle| o.pos.x - lane.right();

    let threat = ahead()
        .filter(|o| blocks_lane(&lane, o))
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(threat) = threat {
        if gap(threat) <= speed * JUMP_LEAD_TICKS {
            return Some(Maneuver::Jump);
        }
        // A duck now must end before the jump is due
        let slide_span = speed * (state.tuning.slide_ticks as f32 + 1.0 + JUMP_LEAD_TICKS);
        if gap(threat) <= slide_span {
            return None;
        }
    }

    ahead()
        .filter(|o| passes_overhead(&lane, o))
        .any(|o| gap(o) <= speed * SLIDE_LEAD_TICKS)
        .then_some(Maneuver::Slide)
}

/// Fill jump/slide on `input` from the current plan
pub fn steer(state: &GameState, input: &mut TickInput) {
    match plan(state) {
        Some(Maneuver::Jump) => input.jump = true,
        Some(Maneuver::Slide) => input.slide = true,
        None => {}
    }
}
