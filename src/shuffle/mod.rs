//! Play-order randomization
//!
//! `permute` holds the Fisher-Yates shuffle; `engine` runs it on a timed
//! schedule to animate the roster before settling on a final order.

pub mod engine;
pub mod permute;

pub use engine::{ShuffleEngine, ShufflePhase, ShuffleTiming};
pub use permute::fisher_yates;
