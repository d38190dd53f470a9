//! dicebayes: biased and unbiased die simulation with Dirichlet-multinomial
//! Bayesian estimation.
//!
//! Roll a die through a [`Sampler`], accumulate face counts, then turn a
//! Dirichlet prior plus those counts into a posterior and two point
//! estimates of the face probabilities.
//!
//! # Quick Start
//!
//! ```
//! use dicebayes::prelude::*;
//!
//! // Roll the biased die (face 6 comes up 30% of the time)
//! let mut die = Sampler::seeded(DiceMode::Biased, 42);
//! let counts = tally(&die.roll_many(10_000)).unwrap();
//!
//! // Uniform prior, one pseudo-roll spread over the faces
//! let prior = [1.0 / 6.0; 6];
//! let observed = counts_as_f64(&counts);
//!
//! let posterior = compute_posterior(&prior, &observed).unwrap();
//! let mean = compute_bayes_estimator(&posterior).unwrap();
//! let map = compute_map_estimator(&prior, &observed).unwrap();
//!
//! assert!((mean[5] - 0.30).abs() < 0.02);
//! assert!((map[5] - 0.30).abs() < 0.02);
//! ```
//!
//! # Modules
//!
//! - [`sampler`]: Distribution factory, weighted and uniform die samplers
//! - [`frequency`]: Empirical face probabilities from counts
//! - [`bayesian`]: Posterior, Bayes (mean) and MAP estimators, Dirichlet model
//! - [`session`]: Per-die roll histories and concurrent tallies
//! - [`report`]: Combined per-die analysis
//! - [`config`]: Weights, priors, theme and seed as explicit configuration
//! - [`cli`]: The `dicebayes` command-line interface
//! - [`logging`]: Tracing subscriber setup for the binary

pub mod bayesian;
pub mod cli;
pub mod config;
pub mod error;
pub mod faces;
pub mod frequency;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod sampler;
pub mod session;

pub use error::{DiceError, Result};
pub use faces::NUM_FACES;
pub use sampler::{create_sampler, DiceMode, Sampler};
