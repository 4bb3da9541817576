//! Timed shuffle sequence
//!
//! A shuffle runs `iterations` animated permutations spaced `tick_ms` apart,
//! then one settling permutation `final_delay_ms` after the start. The engine
//! never sleeps: the host asks [`ShuffleEngine::next_deadline`] when to come
//! back and calls [`ShuffleEngine::poll`] with the current time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{
    FINAL_SHUFFLE_DELAY_MS, MIN_SHUFFLE_PLAYERS, SHUFFLE_ITERATIONS, SHUFFLE_TICK_MS,
};
use crate::platform::KeyValueStore;
use crate::roster::RosterStore;

/// Whether a shuffle sequence is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShufflePhase {
    #[default]
    Idle,
    Shuffling,
}

/// Cadence of a shuffle sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleTiming {
    /// Animated permutations before the settling one
    pub iterations: u32,
    /// Delay between animated permutations (ms)
    pub tick_ms: u64,
    /// Delay from start to the settling permutation (ms)
    pub final_delay_ms: u64,
}

impl Default for ShuffleTiming {
    fn default() -> Self {
        Self {
            iterations: SHUFFLE_ITERATIONS,
            tick_ms: SHUFFLE_TICK_MS,
            final_delay_ms: FINAL_SHUFFLE_DELAY_MS,
        }
    }
}

impl ShuffleTiming {
    /// Offset of the settling permutation from the start; never before
    /// the last animated one
    pub fn final_offset_ms(&self) -> u64 {
        self.final_delay_ms
            .max(self.tick_ms.saturating_mul(u64::from(self.iterations)))
    }
}

/// Shuffle state machine: `Idle -> Shuffling -> Idle`
#[derive(Debug, Clone)]
pub struct ShuffleEngine<R = Pcg32> {
    rng: R,
    timing: ShuffleTiming,
    phase: ShufflePhase,
    started_at: u64,
    /// Animated permutations applied in the current (or last) sequence
    iterations_done: u32,
    /// Animated permutations applied since creation
    total_iterations: u64,
}

impl ShuffleEngine<Pcg32> {
    /// Engine with a PCG generator seeded from `seed`
    pub fn seeded(seed: u64, timing: ShuffleTiming) -> Self {
        Self::new(Pcg32::seed_from_u64(seed), timing)
    }
}

impl<R: Rng> ShuffleEngine<R> {
    pub fn new(rng: R, timing: ShuffleTiming) -> Self {
        Self {
            rng,
            timing,
            phase: ShufflePhase::Idle,
            started_at: 0,
            iterations_done: 0,
            total_iterations: 0,
        }
    }

    pub fn phase(&self) -> ShufflePhase {
        self.phase
    }

    pub fn is_shuffling(&self) -> bool {
        self.phase == ShufflePhase::Shuffling
    }

    pub fn timing(&self) -> ShuffleTiming {
        self.timing
    }

    pub fn iterations_completed(&self) -> u32 {
        self.iterations_done
    }

    pub fn total_iterations(&self) -> u64 {
        self.total_iterations
    }

    /// A shuffle may start with enough players and none already running
    pub fn can_trigger(&self, roster_len: usize) -> bool {
        self.phase == ShufflePhase::Idle && roster_len >= MIN_SHUFFLE_PLAYERS
    }

    /// Start a sequence at `now_ms`; returns false if rejected
    pub fn trigger<S: KeyValueStore>(&mut self, store: &RosterStore<S>, now_ms: u64) -> bool {
        if !self.can_trigger(store.len()) {
            log::debug!(
                "Shuffle rejected ({:?}, {} players)",
                self.phase,
                store.len()
            );
            return false;
        }

        self.phase = ShufflePhase::Shuffling;
        self.started_at = now_ms;
        self.iterations_done = 0;
        log::info!("Shuffling {} players", store.len());
        true
    }

    /// When the next step is due, or `None` while idle
    pub fn next_deadline(&self) -> Option<u64> {
        if self.phase == ShufflePhase::Idle {
            return None;
        }
        let offset = if self.iterations_done < self.timing.iterations {
            self.timing
                .tick_ms
                .saturating_mul(u64::from(self.iterations_done) + 1)
        } else {
            self.timing.final_offset_ms()
        };
        Some(self.started_at.saturating_add(offset))
    }

    /// Apply every step due at `now_ms`, in order; returns how many ran
    pub fn poll<S: KeyValueStore>(&mut self, store: &mut RosterStore<S>, now_ms: u64) -> usize {
        let mut steps = 0;
        while let Some(deadline) = self.next_deadline() {
            if deadline > now_ms {
                break;
            }
            self.step(store);
            steps += 1;
        }
        steps
    }

    /// Drive the current sequence to the end without waiting
    pub fn finish<S: KeyValueStore>(&mut self, store: &mut RosterStore<S>) -> usize {
        let mut steps = 0;
        while let Some(deadline) = self.next_deadline() {
            steps += self.poll(store, deadline);
        }
        steps
    }

    fn step<S: KeyValueStore>(&mut self, store: &mut RosterStore<S>) {
        store.reorder_with(&mut self.rng);
        if self.iterations_done < self.timing.iterations {
            self.iterations_done += 1;
            self.total_iterations += 1;
            log::debug!(
                "Shuffle iteration {}/{}",
                self.iterations_done,
                self.timing.iterations
            );
        } else {
            self.phase = ShufflePhase::Idle;
            log::info!("Shuffle settled");
        }
    }
}
