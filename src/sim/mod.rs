//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and platform
//! free:
//! - Seeded RNG only (one `Pcg32` per session)
//! - dt arrives from the driver, already clamped
//! - Canvas-space coordinates only; no DOM or rendering dependencies

pub mod input;
pub mod spawn;
pub mod state;
pub mod style;
pub mod tick;

pub use input::{PointerHit, handle_pointer};
pub use spawn::spawn_stone;
pub use state::{
    Phase, Session, SessionOutcome, Stone, level_gravity, level_spawn_interval_ms,
    speed_multiplier,
};
pub use style::{LevelStyle, style_for_level};
pub use tick::tick;
