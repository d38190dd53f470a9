//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use dicebayes::prelude::*;
//! ```

pub use crate::bayesian::{
    compute_bayes_estimator, compute_map_estimator, compute_posterior, DiePosterior,
};
pub use crate::config::DiceConfig;
pub use crate::faces::{counts_as_f64, BIASED_WEIGHTS, NUM_FACES, UNIFORM_WEIGHTS};
pub use crate::frequency::{compute_probabilities, tally};
pub use crate::report::Analysis;
pub use crate::sampler::{create_sampler, CumulativeDistribution, DiceMode, Sampler};
pub use crate::session::{DiceSession, SharedTally};
