//! Tracker settings and preferences
//!
//! Persisted separately from the roster, under its own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::{
    FINAL_SHUFFLE_DELAY_MS, MAX_SHUFFLE_DELAY_MS, MAX_SHUFFLE_ITERATIONS, ROSTER_STORAGE_KEY,
    SETTINGS_STORAGE_KEY, SHUFFLE_ITERATIONS, SHUFFLE_TICK_MS,
};
use crate::platform::KeyValueStore;
use crate::shuffle::ShuffleTiming;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    Portuguese,
    English,
}

/// Tracker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Storage key of the roster
    pub roster_key: String,
    /// Interface language
    pub locale: Locale,

    // === Shuffle ===
    /// Animated permutations per shuffle
    pub shuffle_iterations: u32,
    /// Delay between animated permutations (ms)
    pub shuffle_tick_ms: u64,
    /// Delay from shuffle start to the settling permutation (ms)
    pub final_shuffle_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster_key: ROSTER_STORAGE_KEY.to_string(),
            locale: Locale::Portuguese,

            shuffle_iterations: SHUFFLE_ITERATIONS,
            shuffle_tick_ms: SHUFFLE_TICK_MS,
            final_shuffle_delay_ms: FINAL_SHUFFLE_DELAY_MS,
        }
    }
}

impl Settings {
    /// Shuffle cadence derived from these settings, clamped to sane bounds
    pub fn shuffle_timing(&self) -> ShuffleTiming {
        ShuffleTiming {
            iterations: self.shuffle_iterations.min(MAX_SHUFFLE_ITERATIONS),
            tick_ms: self.shuffle_tick_ms.min(MAX_SHUFFLE_DELAY_MS),
            final_delay_ms: self.final_shuffle_delay_ms.min(MAX_SHUFFLE_DELAY_MS),
        }
    }

    /// Load settings, falling back to defaults for missing or corrupt data
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        if let Ok(Some(json)) = storage.get(SETTINGS_STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings, writing the defaults on first run so they can be
    /// edited in storage afterwards
    pub fn load_or_init<S: KeyValueStore + ?Sized>(storage: &mut S) -> Self {
        let settings = Self::load(storage);
        if matches!(storage.get(SETTINGS_STORAGE_KEY), Ok(None)) {
            settings.save(storage);
        }
        settings
    }

    /// Save settings; failures are logged and ignored
    pub fn save<S: KeyValueStore + ?Sized>(&self, storage: &mut S) {
        if let Ok(json) = serde_json::to_string(self) {
            match storage.set(SETTINGS_STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults_match_game_rules() {
        let settings = Settings::default();
        assert_eq!(settings.roster_key, "skatePlayers");
        assert_eq!(settings.shuffle_timing(), ShuffleTiming::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let storage = MemoryStore::with_entry(
            SETTINGS_STORAGE_KEY,
            r#"{"locale":"English","shuffle_tick_ms":50}"#,
        );
        let settings = Settings::load(&storage);
        assert_eq!(settings.locale, Locale::English);
        assert_eq!(settings.shuffle_tick_ms, 50);
        assert_eq!(settings.shuffle_iterations, SHUFFLE_ITERATIONS);
        assert_eq!(settings.roster_key, ROSTER_STORAGE_KEY);
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let storage = MemoryStore::with_entry(SETTINGS_STORAGE_KEY, "[oops");
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_save_load() {
        let mut storage = MemoryStore::new();
        let settings = Settings {
            locale: Locale::English,
            shuffle_iterations: 4,
            ..Default::default()
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let mut storage = MemoryStore::new();
        assert_eq!(Settings::load_or_init(&mut storage), Settings::default());
        assert!(storage.get(SETTINGS_STORAGE_KEY).unwrap().is_some());
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_existing_settings_are_not_overwritten() {
        let json = r#"{"locale":"English"}"#;
        let mut storage = MemoryStore::with_entry(SETTINGS_STORAGE_KEY, json);
        assert_eq!(Settings::load_or_init(&mut storage).locale, Locale::English);
        assert_eq!(storage.get(SETTINGS_STORAGE_KEY).unwrap().as_deref(), Some(json));

        // Corrupt entries are left in place too
        let mut storage = MemoryStore::with_entry(SETTINGS_STORAGE_KEY, "[oops");
        assert_eq!(Settings::load_or_init(&mut storage), Settings::default());
        assert_eq!(storage.get(SETTINGS_STORAGE_KEY).unwrap().as_deref(), Some("[oops"));
    }

    #[test]
    fn test_stored_timing_is_clamped() {
        let storage = MemoryStore::with_entry(
            SETTINGS_STORAGE_KEY,
            r#"{"shuffle_iterations":4294967295,"shuffle_tick_ms":18446744073709551615,"final_shuffle_delay_ms":18446744073709551615}"#,
        );
        let timing = Settings::load(&storage).shuffle_timing();
        assert_eq!(timing.iterations, MAX_SHUFFLE_ITERATIONS);
        assert_eq!(timing.tick_ms, MAX_SHUFFLE_DELAY_MS);
        assert_eq!(timing.final_delay_ms, MAX_SHUFFLE_DELAY_MS);
    }

    #[test]
    fn test_huge_tick_setting_shuffles_without_panic() {
        use crate::roster::RosterStore;
        use crate::shuffle::ShuffleEngine;

        let storage = MemoryStore::with_entry(
            SETTINGS_STORAGE_KEY,
            r#"{"shuffle_tick_ms":18446744073709551615}"#,
        );
        let settings = Settings::load(&storage);
        let mut engine = ShuffleEngine::seeded(1, settings.shuffle_timing());
        let mut store = RosterStore::open(MemoryStore::new(), ROSTER_STORAGE_KEY);
        store.add_player("Ana");
        store.add_player("Bruno");

        assert!(engine.trigger(&store, 1_000));
        assert_eq!(engine.next_deadline(), Some(1_000 + MAX_SHUFFLE_DELAY_MS));
        let steps = engine.finish(&mut store);
        assert_eq!(steps, SHUFFLE_ITERATIONS as usize + 1);
        assert!(!engine.is_shuffling());
    }
}
