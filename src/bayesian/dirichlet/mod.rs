//! Stateful Dirichlet posterior over the six face probabilities.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::estimators::{dirichlet_clipped_mode, dirichlet_mean};
use super::normal::two_sided_z;
use crate::error::{DiceError, Result};
use crate::faces::{check_face_vector, counts_as_f64, NUM_FACES};

/// Dirichlet-multinomial conjugate model for die faces.
///
/// Models face probabilities θ₁, ..., θ₆ with Σθᵢ = 1.
///
/// **Prior**: Dirichlet(α₁, ..., α₆)
/// **Likelihood**: Multinomial(n, θ₁, ..., θ₆)
/// **Posterior**: Dirichlet(α₁ + n₁, ..., α₆ + n₆)
///
/// # Mathematical Foundation
///
/// Given roll counts n₁, ..., n₆:
/// - Prior: p(θ) = Dirichlet(α) ∝ ∏θᵢ^(αᵢ-1)
/// - Likelihood: p(n|θ) = Multinomial(n|θ) ∝ ∏θᵢ^nᵢ
/// - Posterior: p(θ|n) = Dirichlet(α + n)
///
/// # Example
///
/// ```
/// use dicebayes::bayesian::DiePosterior;
///
/// let mut model = DiePosterior::uniform();
///
/// // 10 ones, 5 twos, 3 sixes
/// model.update(&[10, 5, 0, 0, 0, 3]).expect("six counts");
///
/// let probs = model.posterior_mean();
/// assert!((probs[0] - 11.0 / 24.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiePosterior {
    /// Concentration parameters α₁, ..., α₆ (pseudo-counts for each face)
    alphas: Vec<f64>,
}

impl DiePosterior {
    /// Creates a uniform prior Dirichlet(1, ..., 1).
    ///
    /// Every face is equally likely and the prior carries six pseudo-rolls.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::bayesian::DiePosterior;
    ///
    /// let prior = DiePosterior::uniform();
    /// assert_eq!(prior.alphas(), &[1.0; 6]);
    /// ```
    #[must_use]
    pub fn uniform() -> Self {
        Self {
            alphas: vec![1.0; NUM_FACES],
        }
    }

    /// Creates an informative prior Dirichlet(α₁, ..., α₆).
    ///
    /// # Interpretation
    ///
    /// - αᵢ: Pseudo-count for face i
    /// - Σαⱼ: Total pseudo-count (strength of prior belief)
    /// - αᵢ / Σαⱼ: Prior mean probability for face i
    ///
    /// # Errors
    ///
    /// Returns error if there are not exactly six parameters or any αᵢ ≤ 0.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::bayesian::DiePosterior;
    ///
    /// let prior = DiePosterior::new(&[1.0, 1.0, 1.0, 1.0, 1.0, 5.0]).expect("valid concentration");
    /// assert!((prior.posterior_mean()[5] - 0.5).abs() < 1e-12);
    /// ```
    pub fn new(alphas: &[f64]) -> Result<Self> {
        check_face_vector("alphas", alphas)?;

        if alphas.iter().any(|&a| a <= 0.0) {
            return Err(DiceError::invalid_input(
                "alphas",
                format!("{alphas:?}"),
                "all > 0",
            ));
        }

        Ok(Self {
            alphas: alphas.to_vec(),
        })
    }

    /// Creates a model from prior pseudo-counts that may contain zeros.
    ///
    /// This is the permissive form used for user-supplied priors: entries only
    /// need to be finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns error if there are not exactly six entries or any is negative.
    pub fn from_prior(prior: &[f64]) -> Result<Self> {
        check_face_vector("prior", prior)?;
        Ok(Self {
            alphas: prior.to_vec(),
        })
    }

    /// Returns the current concentration parameters.
    #[must_use]
    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    /// Returns Σαᵢ, the prior pseudo-counts plus every observed roll.
    #[must_use]
    pub fn total_concentration(&self) -> f64 {
        self.alphas.iter().sum()
    }

    /// Updates the posterior with observed face counts (Bayesian update).
    ///
    /// # Errors
    ///
    /// Returns error if `counts` does not have six entries; the model is left
    /// unchanged in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::bayesian::DiePosterior;
    ///
    /// let mut model = DiePosterior::uniform();
    /// model.update(&[10, 5, 3, 0, 0, 0]).expect("six counts");
    ///
    /// // Posterior is Dirichlet(11, 6, 4, 1, 1, 1)
    /// assert_eq!(model.alphas()[0], 11.0);
    /// ```
    pub fn update(&mut self, counts: &[u64]) -> Result<()> {
        if counts.len() != NUM_FACES {
            return Err(DiceError::length_mismatch("counts", counts.len()));
        }

        for (alpha, count) in self.alphas.iter_mut().zip(counts_as_f64(counts)) {
            *alpha += count;
        }
        trace!(alphas = ?self.alphas, "updated dirichlet posterior");
        Ok(())
    }

    /// Computes the posterior mean E[θ|data] for all faces.
    ///
    /// Element i is E[θᵢ|data] = αᵢ / Σαⱼ. A model with no mass at all
    /// returns zeros.
    #[must_use]
    pub fn posterior_mean(&self) -> Vec<f64> {
        dirichlet_mean(&self.alphas)
    }

    /// Computes the clipped posterior mode (MAP estimate) for all faces.
    ///
    /// Element i is max(0, αᵢ - 1) / max(1, Σαⱼ - 6). This is the exact mode
    /// when [`has_interior_mode`](Self::has_interior_mode) holds.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::bayesian::DiePosterior;
    ///
    /// let mut model = DiePosterior::new(&[2.0; 6]).expect("valid concentration");
    /// model.update(&[10, 5, 3, 0, 0, 0]).expect("six counts");
    ///
    /// let mode = model.posterior_mode();
    /// assert!((mode[0] - 11.0 / 24.0).abs() < 1e-12); // (12-1)/(30-6)
    /// ```
    #[must_use]
    pub fn posterior_mode(&self) -> Vec<f64> {
        dirichlet_clipped_mode(&self.alphas)
    }

    /// Whether every αᵢ > 1, i.e. the Dirichlet has a unique interior mode.
    #[must_use]
    pub fn has_interior_mode(&self) -> bool {
        self.alphas.iter().all(|&a| a > 1.0)
    }

    /// Computes the posterior variance `Var[θᵢ|data]` for all faces.
    ///
    /// Element i is `αᵢ(α₀ - αᵢ) / (α₀²(α₀ + 1))` where `α₀ = Σαⱼ`, evaluated
    /// as `mᵢ(1 - mᵢ) / (α₀ + 1)` with `mᵢ` the posterior mean.
    #[must_use]
    pub fn posterior_variance(&self) -> Vec<f64> {
        let sum = self.total_concentration();
        if sum <= 0.0 {
            return vec![0.0; NUM_FACES];
        }
        self.posterior_mean()
            .into_iter()
            .map(|m| m * (1.0 - m) / (sum + 1.0))
            .collect()
    }

    /// Probability of each face on the next roll, which equals the posterior mean.
    #[must_use]
    pub fn posterior_predictive(&self) -> Vec<f64> {
        self.posterior_mean()
    }

    /// Computes central credible intervals for all face probabilities.
    ///
    /// Uses a normal approximation to each marginal, clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns error if `confidence` is not strictly between 0 and 1.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::bayesian::DiePosterior;
    ///
    /// let mut model = DiePosterior::uniform();
    /// model.update(&[10, 5, 3, 4, 6, 20]).expect("six counts");
    ///
    /// let intervals = model.credible_intervals(0.95).expect("valid confidence level");
    /// let mean = model.posterior_mean();
    /// for i in 0..6 {
    ///     assert!(intervals[i].0 < mean[i] && mean[i] < intervals[i].1);
    /// }
    /// ```
    pub fn credible_intervals(&self, confidence: f64) -> Result<Vec<(f64, f64)>> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(DiceError::invalid_input(
                "confidence",
                confidence.to_string(),
                "in (0, 1)",
            ));
        }

        let z = two_sided_z(confidence);
        let intervals = self
            .posterior_mean()
            .into_iter()
            .zip(self.posterior_variance())
            .map(|(mean, var)| {
                let std = var.sqrt();
                ((mean - z * std).max(0.0), (mean + z * std).min(1.0))
            })
            .collect();

        Ok(intervals)
    }
}

impl Default for DiePosterior {
    fn default() -> Self {
        Self::uniform()
    }
}
