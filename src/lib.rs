//! Skate Tracker - Game of S.K.A.T.E. roster in the browser
//!
//! Core modules:
//! - `roster`: Players, letter penalties and the persisted roster store
//! - `shuffle`: Fisher-Yates permutation and the timed shuffle sequence
//! - `persistence`: Roster JSON encoding with corrupt-data fallback
//! - `platform`: Browser/native abstraction (key-value storage, clock)
//! - `settings`: Timing and storage configuration
//! - `ui`: Display model consumed by the DOM layer

pub mod persistence;
pub mod platform;
pub mod roster;
pub mod settings;
pub mod shuffle;
pub mod ui;

pub use roster::{Letter, LetterSlot, Player, PlayerId, RosterError, RosterEvent, RosterStore};
pub use settings::Settings;
pub use shuffle::{ShuffleEngine, ShufflePhase, fisher_yates};

/// Game configuration constants
pub mod consts {
    /// Storage key holding the serialized roster
    pub const ROSTER_STORAGE_KEY: &str = "skatePlayers";
    /// Storage key holding the serialized settings
    pub const SETTINGS_STORAGE_KEY: &str = "skate_settings";

    /// Letters per player, in penalty order
    pub const LETTER_COUNT: usize = 5;

    /// Minimum roster size for a shuffle to start
    pub const MIN_SHUFFLE_PLAYERS: usize = 2;
    /// Animated permutations per shuffle sequence
    pub const SHUFFLE_ITERATIONS: u32 = 10;
    /// Delay between animated permutations (ms)
    pub const SHUFFLE_TICK_MS: u64 = 200;
    /// Delay from shuffle start to the settling permutation (ms)
    pub const FINAL_SHUFFLE_DELAY_MS: u64 = 4000;
    /// Upper bound on configured iterations per shuffle
    pub const MAX_SHUFFLE_ITERATIONS: u32 = 1000;
    /// Upper bound on any configured shuffle delay (ms)
    pub const MAX_SHUFFLE_DELAY_MS: u64 = 60_000;
}
