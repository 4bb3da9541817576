//! Player and letter-penalty types
//!
//! The serialized shape of these types is the persisted roster format, so
//! field names and representations must stay stable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::LETTER_COUNT;

/// Unique identifier for a player (creation timestamp in ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Roster errors that callers can trigger through the public API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("letter index {0} out of range (expected 0..5)")]
    LetterIndexOutOfRange(usize),
}

/// One of the five penalty letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    S,
    K,
    A,
    T,
    E,
}

impl Letter {
    /// All letters in penalty order
    pub const ALL: [Letter; LETTER_COUNT] = [Letter::S, Letter::K, Letter::A, Letter::T, Letter::E];

    /// Position of this letter within a player's slots
    pub fn index(self) -> usize {
        match self {
            Letter::S => 0,
            Letter::K => 1,
            Letter::A => 2,
            Letter::T => 3,
            Letter::E => 4,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::S => 'S',
            Letter::K => 'K',
            Letter::A => 'A',
            Letter::T => 'T',
            Letter::E => 'E',
        }
    }
}

impl TryFrom<usize> for Letter {
    type Error = RosterError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Letter::ALL
            .get(index)
            .copied()
            .ok_or(RosterError::LetterIndexOutOfRange(index))
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single letter penalty and whether it has been earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSlot {
    pub letter: Letter,
    pub failed: bool,
}

/// A skater in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Always S, K, A, T, E in that order
    pub letters: [LetterSlot; LETTER_COUNT],
}

impl Player {
    /// Create a player with a clean S-K-A-T-E card
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            letters: Letter::ALL.map(|letter| LetterSlot {
                letter,
                failed: false,
            }),
        }
    }

    /// Flip one letter and return its new state
    pub fn toggle(&mut self, letter: Letter) -> bool {
        let slot = &mut self.letters[letter.index()];
        slot.failed = !slot.failed;
        slot.failed
    }

    pub fn is_failed(&self, letter: Letter) -> bool {
        self.letters[letter.index()].failed
    }

    /// Number of letters earned so far
    pub fn failed_count(&self) -> usize {
        self.letters.iter().filter(|slot| slot.failed).count()
    }

    /// Out of the game once every letter is failed
    pub fn is_eliminated(&self) -> bool {
        self.letters.iter().all(|slot| slot.failed)
    }
}

/// Free-function form of [`Player::is_eliminated`]
pub fn is_eliminated(player: &Player) -> bool {
    player.is_eliminated()
}
