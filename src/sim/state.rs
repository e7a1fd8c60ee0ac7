//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session in progress (startup, or after a reset)
    Idle,
    /// Active gameplay, ticking every frame
    Running,
    /// Run ended; counters already settled
    Ended,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The countdown reached zero with every stone still airborne
    Cleared,
    /// A stone crossed the bottom boundary
    Failed,
}

/// A falling stone
#[derive(Debug, Clone)]
pub struct Stone {
    /// Center position (canvas-space px)
    pub pos: Vec2,
    /// Edge length of the square body (px, always > 0)
    pub size: f32,
    /// Fill color, drawn from the level palette
    pub color: &'static str,
    /// Velocity (px/s)
    pub vel: Vec2,
    /// Rotation (radians)
    pub rotation: f32,
}

impl Stone {
    /// Half the edge length; the square extent is `pos ± half` on both axes
    #[inline]
    pub fn half(&self) -> f32 {
        self.size / 2.0
    }

    /// Advance by dt seconds under the given gravity
    pub fn update(&mut self, dt: f32, gravity: f32) {
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
        self.rotation += STONE_SPIN_RATE * dt;
    }

    /// Axis-aligned point-in-square test. Rotation is ignored on purpose:
    /// taps land on the stone's unrotated extent.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let h = self.half();
        x >= self.pos.x - h && x <= self.pos.x + h && y >= self.pos.y - h && y <= self.pos.y + h
    }

    /// True once the bottom edge is past the playfield floor
    #[inline]
    pub fn below_floor(&self, height: f32) -> bool {
        self.pos.y + self.half() > height
    }
}

/// One timed play attempt
///
/// Everything a frame mutates lives in this one value; the driver owns it
/// exclusively (see `game::Game`).
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    /// Difficulty level the session was started at
    pub level: u32,
    /// Seconds of session time consumed so far
    pub elapsed: f32,
    /// Points earned this session; only ever increases
    pub score: u32,
    /// Gravity for this session (px/s^2), fixed at start from the level
    pub gravity: f32,
    /// Base spawn interval (ms), fixed at start from the level
    pub spawn_interval_ms: f32,
    /// Frame time (ms) accumulated toward the next spawn
    pub spawn_timer_ms: f32,
    /// Live stones; insertion order is spawn order
    pub stones: Vec<Stone>,
    /// Playfield size (canvas backing px)
    pub width: f32,
    pub height: f32,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// An idle placeholder; nothing ticks until `begin` replaces it
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            level: 1,
            elapsed: 0.0,
            score: 0,
            gravity: level_gravity(1),
            spawn_interval_ms: level_spawn_interval_ms(1),
            spawn_timer_ms: 0.0,
            stones: Vec::new(),
            width: 0.0,
            height: 0.0,
            rng: Pcg32::seed_from_u64(0),
        }
    }

    /// Start a fresh run at the given level on a width x height playfield
    pub fn begin(level: u32, width: f32, height: f32, seed: u64) -> Self {
        Self {
            phase: Phase::Running,
            level,
            elapsed: 0.0,
            score: 0,
            gravity: level_gravity(level),
            spawn_interval_ms: level_spawn_interval_ms(level),
            spawn_timer_ms: 0.0,
            stones: Vec::new(),
            width,
            height,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seconds left on the countdown; never negative
    pub fn time_left(&self) -> f32 {
        (SESSION_SECS - self.elapsed).max(0.0)
    }

    /// The step-function scalar applied to simulation time this frame
    pub fn speed_multiplier(&self) -> f32 {
        speed_multiplier(self.elapsed)
    }

    /// Points awarded per destroyed stone at this session's level
    pub fn hit_score(&self) -> u32 {
        1 + self.level / 2
    }

    /// Adopt new playfield dimensions after a canvas re-fit. Live stones
    /// keep their absolute coordinates; only spawning and the floor check
    /// see the new size.
    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

/// Gravity for a level: base plus 8 px/s^2 per level past the first
pub fn level_gravity(level: u32) -> f32 {
    BASE_GRAVITY + level.saturating_sub(1) as f32 * GRAVITY_PER_LEVEL
}

/// Spawn interval for a level, floor-clamped at 220 ms
pub fn level_spawn_interval_ms(level: u32) -> f32 {
    (BASE_SPAWN_INTERVAL_MS - level.saturating_sub(1) as f32 * SPAWN_STEP_MS)
        .max(MIN_SPAWN_INTERVAL_MS)
}

/// 1.0 plus 0.05 per whole 5-second block of elapsed time, uncapped
pub fn speed_multiplier(elapsed: f32) -> f32 {
    1.0 + (elapsed / SPEED_STEP_SECS).floor() * SPEED_STEP_GAIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gravity_curve_matches_level() {
        assert_eq!(level_gravity(1), 80.0);
        assert_eq!(level_gravity(2), 88.0);
        assert_eq!(level_gravity(10), 152.0);
    }

    #[test]
    fn spawn_interval_clamps_at_floor() {
        assert_eq!(level_spawn_interval_ms(1), 800.0);
        assert_eq!(level_spawn_interval_ms(5), 560.0);
        // 800 - 10*60 would be 200; the floor wins
        assert_eq!(level_spawn_interval_ms(11), 220.0);
        assert_eq!(level_spawn_interval_ms(100), 220.0);
    }

    #[test]
    fn speed_multiplier_steps_every_five_seconds() {
        assert_eq!(speed_multiplier(0.0), 1.0);
        assert_eq!(speed_multiplier(4.99), 1.0);
        assert_eq!(speed_multiplier(5.0), 1.05);
        assert_eq!(speed_multiplier(17.3), 1.15);
        // No cap: 55s into a session is the 11th step
        assert!((speed_multiplier(55.0) - 1.55).abs() < 1e-6);
    }

    #[test]
    fn time_left_never_negative() {
        let mut session = Session::begin(1, 800.0, 1200.0, 7);
        session.elapsed = 59.0;
        assert!((session.time_left() - 1.0).abs() < 1e-6);
        session.elapsed = 72.5;
        assert_eq!(session.time_left(), 0.0);
    }

    #[test]
    fn hit_score_grows_with_level() {
        assert_eq!(Session::begin(1, 100.0, 150.0, 0).hit_score(), 1);
        assert_eq!(Session::begin(2, 100.0, 150.0, 0).hit_score(), 2);
        assert_eq!(Session::begin(3, 100.0, 150.0, 0).hit_score(), 2);
        assert_eq!(Session::begin(9, 100.0, 150.0, 0).hit_score(), 5);
    }

    #[test]
    fn begin_derives_difficulty_from_level() {
        let session = Session::begin(4, 600.0, 900.0, 42);
        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.gravity, level_gravity(4));
        assert_eq!(session.spawn_interval_ms, level_spawn_interval_ms(4));
        assert_eq!(session.score, 0);
        assert!(session.stones.is_empty());
    }

    #[test]
    fn stone_contains_is_axis_aligned() {
        let stone = Stone {
            pos: glam::Vec2::new(100.0, 100.0),
            size: 40.0,
            color: "#8B5CF6",
            vel: glam::Vec2::ZERO,
            rotation: 0.4,
        };
        assert!(stone.contains(100.0, 100.0));
        assert!(stone.contains(80.0, 120.0));
        assert!(!stone.contains(79.9, 100.0));
        assert!(!stone.contains(100.0, 120.1));
    }

    proptest! {
        #[test]
        fn difficulty_laws_hold(level in 1u32..10_000) {
            let g = level_gravity(level);
            prop_assert!(g >= BASE_GRAVITY);
            let expected = BASE_GRAVITY + (level - 1) as f32 * GRAVITY_PER_LEVEL;
            prop_assert!((g - expected).abs() < 1e-3);

            let interval = level_spawn_interval_ms(level);
            prop_assert!(interval >= MIN_SPAWN_INTERVAL_MS);
            prop_assert!(interval <= BASE_SPAWN_INTERVAL_MS);
        }

        #[test]
        fn elapsed_plus_remaining_covers_session(elapsed in 0.0f32..120.0) {
            let mut session = Session::begin(1, 400.0, 600.0, 1);
            session.elapsed = elapsed;
            let left = session.time_left();
            prop_assert!(left >= 0.0);
            prop_assert!((left - (SESSION_SECS - elapsed).max(0.0)).abs() < 1e-4);
        }
    }
}
