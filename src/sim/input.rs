//! Pointer hit-testing
//!
//! The driver converts device coordinates into canvas space before calling
//! in here; the sim only ever sees canvas-space points.

use super::state::{Phase, Session};

/// A destroyed stone, echoed back so the driver can paint the burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    /// Center of the destroyed stone (canvas space)
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: &'static str,
    /// Points this hit was worth
    pub points: u32,
}

/// Hit-test a tap against the live stones and destroy at most one.
///
/// Stones are tested newest-first, so where two overlap the one painted on
/// top wins. No-op unless the session is running.
pub fn handle_pointer(session: &mut Session, x: f32, y: f32) -> Option<PointerHit> {
    if session.phase != Phase::Running {
        return None;
    }

    let idx = session.stones.iter().rposition(|s| s.contains(x, y))?;
    let stone = session.stones.remove(idx);
    let points = session.hit_score();
    session.score += points;

    Some(PointerHit {
        x: stone.pos.x,
        y: stone.pos.y,
        size: stone.size,
        color: stone.color,
        points,
    })
}
