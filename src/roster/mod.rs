//! Roster of players and their letter penalties
//!
//! The roster is the only game state: an ordered list of players where order
//! is turn order. All mutations go through [`RosterStore`], which persists
//! and notifies after every change.

pub mod player;
pub mod store;

pub use player::{Letter, LetterSlot, Player, PlayerId, RosterError, is_eliminated};
pub use store::{RosterEvent, RosterStore, SubscriptionId};
