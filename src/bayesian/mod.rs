//! Dirichlet-multinomial inference over the six face probabilities.
//!
//! The prior is a vector of Dirichlet pseudo-counts, one per face. Observing
//! roll counts turns it into a posterior by elementwise addition, from which
//! two point estimators follow in closed form:
//!
//! - the posterior mean (Bayes estimator) `αᵢ / Σαⱼ`
//! - the posterior mode (MAP estimator) `max(0, αᵢ - 1) / max(1, Σαⱼ - 6)`
//!
//! The free functions operate on plain slices and never mutate their inputs.
//! [`DiePosterior`] wraps the same arithmetic in a stateful model that also
//! reports posterior variance and credible intervals.
//!
//! # Example: free functions
//!
//! ```
//! use dicebayes::bayesian::{compute_bayes_estimator, compute_map_estimator, compute_posterior};
//!
//! let prior = [1.0 / 6.0; 6];
//! let observed = [10.0, 0.0, 0.0, 0.0, 0.0, 0.0];
//!
//! let posterior = compute_posterior(&prior, &observed).expect("six entries each");
//! let mean = compute_bayes_estimator(&posterior).expect("six entries");
//! assert!((mean.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! assert!(mean[0] > mean[5]);
//!
//! let map = compute_map_estimator(&prior, &observed).expect("six entries each");
//! assert!(map[0] > 0.0);
//! ```
//!
//! # Example: stateful model
//!
//! ```
//! use dicebayes::bayesian::DiePosterior;
//!
//! let mut model = DiePosterior::uniform();
//! model.update(&[3, 2, 4, 1, 2, 12]).expect("six counts");
//!
//! let mean = model.posterior_mean();
//! assert!(mean[5] > mean[0]);
//! ```

mod dirichlet;
mod estimators;
mod normal;

pub use dirichlet::DiePosterior;
pub use estimators::{compute_bayes_estimator, compute_map_estimator, compute_posterior};
