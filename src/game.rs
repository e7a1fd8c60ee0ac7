//! Session controller
//!
//! One `Game` value owns the session, the player profile, and the profile's
//! backing store; every state mutation (frame ticks, pointer hits, button
//! actions) goes through it. In the browser that single owner sits behind
//! an `Rc<RefCell<_>>` and the event model guarantees callbacks never
//! interleave mid-execution. A port to a runtime with real threads must
//! keep the same discipline: one exclusive owner (a dedicated game-loop
//! task), not per-field locking.

use crate::notify;
use crate::profile::{AdReward, Profile, ProfileStore};
use crate::sim::{Phase, PointerHit, Session, SessionOutcome, handle_pointer, tick};

/// Why a session could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// No coins left; the reward link is the way to get more
    InsufficientCoins,
    /// A session is already in progress
    AlreadyRunning,
}

impl std::fmt::Display for StartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartError::InsufficientCoins => {
                write!(f, "Not enough coins - claim the reward link to get more.")
            }
            StartError::AlreadyRunning => write!(f, "A session is already running."),
        }
    }
}

impl std::error::Error for StartError {}

/// The single owner of all mutable game state
pub struct Game<S: ProfileStore> {
    pub session: Session,
    pub profile: Profile,
    store: S,
}

impl<S: ProfileStore> Game<S> {
    /// Load the profile out of the store and start idle
    pub fn new(store: S) -> Self {
        let profile = Profile::load(&store);
        log::info!(
            "profile loaded: {} coins, level {}",
            profile.coins,
            profile.level
        );
        Self {
            session: Session::idle(),
            profile,
            store,
        }
    }

    /// The profile's backing store (read-only; mutation goes through the
    /// profile methods)
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a session. Costs one coin, persisted before the first tick;
    /// on error nothing changes.
    pub fn start(&mut self, width: f32, height: f32, seed: u64) -> Result<(), StartError> {
        if self.session.phase == Phase::Running {
            return Err(StartError::AlreadyRunning);
        }
        if !self.profile.spend_coin(&mut self.store) {
            return Err(StartError::InsufficientCoins);
        }
        self.session = Session::begin(self.profile.level, width, height, seed);
        log::info!(
            "session started at level {} on a {:.0}x{:.0} playfield",
            self.profile.level,
            width,
            height
        );
        Ok(())
    }

    /// Advance by one (pre-clamped) frame step. A cleared session bumps the
    /// level, persists it, and pings the host notifier; a failed one leaves
    /// every counter alone. The outcome is returned either way so the
    /// driver can surface it.
    pub fn frame(&mut self, dt: f32) -> Option<SessionOutcome> {
        let outcome = tick(&mut self.session, dt)?;
        match outcome {
            SessionOutcome::Cleared => {
                self.profile.level_up(&mut self.store);
                notify::notify_level_up(self.profile.level, self.session.score);
                log::info!(
                    "session cleared with score {}, now level {}",
                    self.session.score,
                    self.profile.level
                );
            }
            SessionOutcome::Failed => {
                log::info!(
                    "session failed at {:.1}s with score {}",
                    self.session.elapsed,
                    self.session.score
                );
            }
        }
        Some(outcome)
    }

    /// Route a canvas-space tap into the session
    pub fn pointer(&mut self, x: f32, y: f32) -> Option<PointerHit> {
        handle_pointer(&mut self.session, x, y)
    }

    /// One-time reward crediting. Deliberately not gated on the reward
    /// link actually loading; see DESIGN.md.
    pub fn claim_ad_reward(&mut self) -> AdReward {
        self.profile.claim_ad_reward(&mut self.store)
    }

    /// Wipe progression back to defaults and drop any session
    pub fn reset_progress(&mut self) {
        self.profile.reset(&mut self.store);
        self.session = Session::idle();
        log::info!("progress reset");
    }
}
