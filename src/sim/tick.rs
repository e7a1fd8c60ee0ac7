//! Per-frame session advance
//!
//! One tick moves the countdown, the spawn timer, and every live stone,
//! then resolves at most one session outcome. The floor check runs before
//! the time-exhaustion check: a stone reaching the ground on the same frame
//! the countdown expires is a failure, not a clear.

use super::spawn::spawn_stone;
use super::state::{Phase, Session, SessionOutcome};

/// Advance the session by dt seconds (pre-clamped by the driver).
///
/// Returns the outcome on the frame the session ends; `None` while it keeps
/// running. Non-running sessions are left untouched.
pub fn tick(session: &mut Session, dt: f32) -> Option<SessionOutcome> {
    if session.phase != Phase::Running {
        return None;
    }

    session.elapsed += dt;
    let multiplier = session.speed_multiplier();

    // Spawn cadence speeds up with the global multiplier
    session.spawn_timer_ms += dt * 1000.0;
    if session.spawn_timer_ms >= session.spawn_interval_ms / multiplier {
        session.spawn_timer_ms = 0.0;
        spawn_stone(session);
    }

    // The multiplier scales simulation time itself, so gravity and drift
    // speed up together
    let scaled_dt = dt * multiplier;
    let gravity = session.gravity;
    let mut grounded = false;
    for stone in &mut session.stones {
        stone.update(scaled_dt, gravity);
        if stone.below_floor(session.height) {
            grounded = true;
        }
    }

    if grounded {
        session.phase = Phase::Ended;
        return Some(SessionOutcome::Failed);
    }
    if session.time_left() <= 0.0 {
        session.phase = Phase::Ended;
        return Some(SessionOutcome::Cleared);
    }
    None
}
