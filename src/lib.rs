//! Stone Tap - a falling-stone tap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling motion, hit-testing)
//! - `game`: Session controller tying the sim to the player profile
//! - `profile`: Durable coin/level counters over browser LocalStorage
//! - `renderer`: 2D canvas drawing
//! - `notify`: Best-effort level-up reports to a Telegram WebApp host

pub mod game;
pub mod notify;
pub mod profile;
pub mod renderer;
pub mod sim;

pub use game::{Game, StartError};
pub use profile::{MemoryStore, Profile, ProfileStore};

/// Game configuration constants
pub mod consts {
    /// Session length (seconds)
    pub const SESSION_SECS: f32 = 60.0;
    /// The speed multiplier steps up once per this many elapsed seconds
    pub const SPEED_STEP_SECS: f32 = 5.0;
    /// Speed multiplier gain per step (uncapped)
    pub const SPEED_STEP_GAIN: f32 = 0.05;

    /// Spawn interval at level 1 (milliseconds)
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 800.0;
    /// Spawn interval reduction per level (milliseconds)
    pub const SPAWN_STEP_MS: f32 = 60.0;
    /// Spawn interval floor (milliseconds)
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 220.0;

    /// Gravity at level 1 (px/s^2)
    pub const BASE_GRAVITY: f32 = 80.0;
    /// Gravity gain per level (px/s^2)
    pub const GRAVITY_PER_LEVEL: f32 = 8.0;

    /// Stone edge length range, as fractions of playfield width
    pub const STONE_MIN_FRAC: f32 = 0.08;
    pub const STONE_MAX_FRAC: f32 = 0.17;
    /// Horizontal drift range at spawn (px/s, symmetric)
    pub const STONE_DRIFT: f32 = 30.0;
    /// Initial fall speed range at spawn (px/s)
    pub const STONE_FALL_MIN: f32 = 20.0;
    pub const STONE_FALL_MAX: f32 = 80.0;
    /// Spin rate while falling (radians per scaled second)
    pub const STONE_SPIN_RATE: f32 = 1.2;

    /// Maximum simulation step (seconds); bounds tunnelling through the
    /// floor after a stalled or backgrounded tab
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Coins consumed per session start
    pub const SESSION_COST: u32 = 1;
    /// Coins granted by the one-time reward claim
    pub const AD_REWARD_COINS: u32 = 10;
    /// External reward link opened by the "get coins" action
    pub const REWARD_URL: &str = "https://ads.example.com/stonetap";
}
