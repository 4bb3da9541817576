//! Persisted, observable roster
//!
//! Every successful mutation follows the same path: change the in-memory
//! list, overwrite the stored roster, then notify subscribers. Operations
//! addressed at unknown players are silent no-ops.

use rand::Rng;

use super::player::{Letter, Player, PlayerId};
use crate::persistence::{load_roster, save_roster};
use crate::platform::{KeyValueStore, now_ms};
use crate::shuffle::fisher_yates;

/// What changed in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterEvent {
    PlayerAdded(PlayerId),
    LetterToggled {
        id: PlayerId,
        letter: Letter,
        failed: bool,
    },
    PlayerRemoved(PlayerId),
    /// Order changed (shuffle); membership did not
    Reordered,
}

/// Handle returned by [`RosterStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RosterEvent, &[Player])>;

/// The ordered player list plus its storage backend
pub struct RosterStore<S: KeyValueStore> {
    players: Vec<Player>,
    storage: S,
    key: String,
    clock: fn() -> u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Load the roster stored under `key`, or start empty
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let players = load_roster(&storage, &key);
        Self {
            players,
            storage,
            key,
            clock: now_ms,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replace the id clock (milliseconds since epoch)
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The last skater standing, once everyone else is out
    pub fn standing(&self) -> Option<&Player> {
        if self.players.len() < 2 {
            return None;
        }
        let mut active = self.players.iter().filter(|p| !p.is_eliminated());
        match (active.next(), active.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    /// Append a new player; blank names are ignored
    ///
    /// The name is stored as typed, surrounding whitespace included.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        if name.trim().is_empty() {
            return None;
        }

        let id = self.fresh_id();
        self.players.push(Player::new(id, name));
        log::info!("Added player {} ({})", name, id);
        self.commit(RosterEvent::PlayerAdded(id));
        Some(id)
    }

    /// Flip one letter of one player, returning its new state
    ///
    /// Eliminated players can still be toggled, including back to not failed.
    pub fn toggle_letter(&mut self, id: PlayerId, letter: Letter) -> Option<bool> {
        let player = self.players.iter_mut().find(|p| p.id == id)?;
        let failed = player.toggle(letter);
        if player.is_eliminated() {
            log::info!("{} is out", player.name);
        }
        self.commit(RosterEvent::LetterToggled { id, letter, failed });
        Some(failed)
    }

    /// Remove a player, keeping everyone else in order
    pub fn delete_player(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return false;
        }
        log::info!("Removed player {}", id);
        self.commit(RosterEvent::PlayerRemoved(id));
        true
    }

    /// Apply one uniform random permutation to the turn order
    pub fn reorder_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        fisher_yates(&mut self.players, rng);
        self.commit(RosterEvent::Reordered);
    }

    /// Register a change listener, called after each persisted mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&RosterEvent, &[Player]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Timestamp id, bumped past existing ids when the clock collides
    fn fresh_id(&self) -> PlayerId {
        let now = (self.clock)();
        let Some(max) = self.players.iter().map(|p| p.id.0).max() else {
            return PlayerId(now);
        };
        if now > max {
            return PlayerId(now);
        }
        if let Some(next) = max.checked_add(1) {
            return PlayerId(next);
        }

        // Top of the id space is taken: use the lowest free id
        let mut used: Vec<u64> = self.players.iter().map(|p| p.id.0).collect();
        used.sort_unstable();
        used.dedup();
        let free = used
            .iter()
            .enumerate()
            .find(|(i, id)| **id != *i as u64)
            .map_or(used.len() as u64, |(i, _)| i as u64);
        PlayerId(free)
    }

    fn commit(&mut self, event: RosterEvent) {
        save_roster(&mut self.storage, &self.key, &self.players);
        for (_, listener) in &mut self.listeners {
            listener(&event, &self.players);
        }
    }
}
