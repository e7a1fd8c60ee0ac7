//! Durable player profile: coins, level, and the one-time reward flag
//!
//! Three independent string-encoded keys in a per-browser key-value store,
//! read once at startup and written through on every change. Reads fall
//! back to safe defaults on absent or unparseable values; nothing in here
//! is ever fatal.

use crate::consts::{AD_REWARD_COINS, SESSION_COST};

/// Storage keys. Values are plain decimal strings; the reward flag is "1".
pub const COINS_KEY: &str = "stonetap_coins_v1";
pub const LEVEL_KEY: &str = "stonetap_level_v1";
pub const USED_AD_KEY: &str = "stonetap_used_ad_v1";

/// Flat key-value storage seam. LocalStorage in the browser; an in-memory
/// map in tests and the native build.
pub trait ProfileStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and the native stub build
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(std::collections::HashMap<String, String>);

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

/// Browser LocalStorage (WASM only). Storage lookups that fail - private
/// browsing, disabled storage - degrade to the in-memory defaults.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ProfileStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Outcome of a "get coins" claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdReward {
    /// First claim: coins were credited
    Granted,
    /// The one-time reward was already used in this browser
    AlreadyClaimed,
}

/// The persistent player profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Currency gating session starts; never negative
    pub coins: u32,
    /// Difficulty/progress counter; starts at 1
    pub level: u32,
    /// Whether the one-time reward was claimed
    pub ad_claimed: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            coins: 0,
            level: 1,
            ad_claimed: false,
        }
    }
}

impl Profile {
    /// Read all three counters, substituting defaults for anything absent
    /// or unparseable
    pub fn load(store: &impl ProfileStore) -> Self {
        let coins = store
            .get(COINS_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let level = store
            .get(LEVEL_KEY)
            .and_then(|v| v.parse().ok())
            .filter(|&level| level >= 1)
            .unwrap_or(1);
        let ad_claimed = store.get(USED_AD_KEY).as_deref() == Some("1");
        Self {
            coins,
            level,
            ad_claimed,
        }
    }

    /// Write the coin and level counters through to the store
    pub fn save(&self, store: &mut impl ProfileStore) {
        store.set(COINS_KEY, &self.coins.to_string());
        store.set(LEVEL_KEY, &self.level.to_string());
    }

    /// Spend the session fee; persisted immediately.
    /// Returns false (and changes nothing) when the purse can't cover it.
    pub fn spend_coin(&mut self, store: &mut impl ProfileStore) -> bool {
        if self.coins < SESSION_COST {
            return false;
        }
        self.coins -= SESSION_COST;
        self.save(store);
        true
    }

    /// Record a cleared session; persisted immediately
    pub fn level_up(&mut self, store: &mut impl ProfileStore) {
        self.level += 1;
        self.save(store);
    }

    /// The one-time reward: credits coins and latches the flag on first
    /// claim, a reported no-op afterwards
    pub fn claim_ad_reward(&mut self, store: &mut impl ProfileStore) -> AdReward {
        if self.ad_claimed {
            return AdReward::AlreadyClaimed;
        }
        self.coins += AD_REWARD_COINS;
        self.ad_claimed = true;
        store.set(USED_AD_KEY, "1");
        self.save(store);
        AdReward::Granted
    }

    /// Clear everything back to defaults. All three keys are rewritten in
    /// one synchronous pass, so no caller observes a partial reset.
    pub fn reset(&mut self, store: &mut impl ProfileStore) {
        store.remove(COINS_KEY);
        store.remove(LEVEL_KEY);
        store.remove(USED_AD_KEY);
        *self = Self::default();
        self.save(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let store = MemoryStore::default();
        assert_eq!(Profile::load(&store), Profile::default());
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let mut store = MemoryStore::default();
        store.set(COINS_KEY, "not-a-number");
        store.set(LEVEL_KEY, "0");
        store.set(USED_AD_KEY, "yes");

        let profile = Profile::load(&store);
        assert_eq!(profile.coins, 0);
        assert_eq!(profile.level, 1);
        assert!(!profile.ad_claimed);
    }

    #[test]
    fn spend_coin_persists_across_a_reload() {
        let mut store = MemoryStore::default();
        let mut profile = Profile {
            coins: 5,
            ..Profile::default()
        };
        profile.save(&mut store);

        assert!(profile.spend_coin(&mut store));
        assert_eq!(profile.coins, 4);

        // Simulated reload: a fresh read of the same store
        let reloaded = Profile::load(&store);
        assert_eq!(reloaded.coins, 4);
    }

    #[test]
    fn spend_coin_refuses_an_empty_purse() {
        let mut store = MemoryStore::default();
        let mut profile = Profile::default();
        assert!(!profile.spend_coin(&mut store));
        assert_eq!(profile.coins, 0);
        // Nothing was written
        assert!(store.get(COINS_KEY).is_none());
    }

    #[test]
    fn level_up_persists() {
        let mut store = MemoryStore::default();
        let mut profile = Profile::default();
        profile.level_up(&mut store);
        assert_eq!(profile.level, 2);
        assert_eq!(Profile::load(&store).level, 2);
    }

    #[test]
    fn ad_reward_is_granted_exactly_once() {
        let mut store = MemoryStore::default();
        let mut profile = Profile::default();

        assert_eq!(profile.claim_ad_reward(&mut store), AdReward::Granted);
        assert_eq!(profile.coins, AD_REWARD_COINS);
        assert!(profile.ad_claimed);

        assert_eq!(profile.claim_ad_reward(&mut store), AdReward::AlreadyClaimed);
        assert_eq!(profile.coins, AD_REWARD_COINS);

        // The latch survives a reload
        let mut reloaded = Profile::load(&store);
        assert!(reloaded.ad_claimed);
        assert_eq!(reloaded.claim_ad_reward(&mut store), AdReward::AlreadyClaimed);
    }

    #[test]
    fn reset_restores_defaults_atomically() {
        let mut store = MemoryStore::default();
        let mut profile = Profile {
            coins: 17,
            level: 6,
            ad_claimed: true,
        };
        profile.save(&mut store);
        store.set(USED_AD_KEY, "1");

        profile.reset(&mut store);
        assert_eq!(profile, Profile::default());

        // A subsequent read sees only the defaulted state
        let reloaded = Profile::load(&store);
        assert_eq!(reloaded.coins, 0);
        assert_eq!(reloaded.level, 1);
        assert!(!reloaded.ad_claimed);
    }
}
