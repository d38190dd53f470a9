//! Pure posterior, Bayes and MAP computations on face vectors.

use tracing::trace;

use crate::error::Result;
use crate::faces::{check_face_vector, NUM_FACES};

/// Adds observation counts to prior pseudo-counts, elementwise.
///
/// The result is the posterior Dirichlet concentration vector; it is not
/// normalized.
///
/// # Errors
///
/// Returns [`crate::DiceError::InvalidInput`] if either vector does not have
/// six finite, non-negative entries, or if an entry of the sum overflows.
pub fn compute_posterior(prior: &[f64], observations: &[f64]) -> Result<Vec<f64>> {
    check_face_vector("prior", prior)?;
    check_face_vector("observations", observations)?;

    let posterior: Vec<f64> = prior
        .iter()
        .zip(observations.iter())
        .map(|(&p, &o)| p + o)
        .collect();
    check_face_vector("posterior", &posterior)?;
    Ok(posterior)
}

/// Normalizes a posterior concentration vector into its mean, `αᵢ / Σαⱼ`.
///
/// A posterior with zero total mass yields six zeros.
///
/// # Errors
///
/// Returns [`crate::DiceError::InvalidInput`] if `posterior` does not have six
/// finite, non-negative entries.
pub fn compute_bayes_estimator(posterior: &[f64]) -> Result<Vec<f64>> {
    check_face_vector("posterior", posterior)?;
    Ok(dirichlet_mean(posterior))
}

/// Computes the clipped posterior mode from a prior and observations.
///
/// With `α = prior + observations`, entry `i` is
/// `max(0, αᵢ - 1) / max(1, Σα - 6)`. The clipping is only the true mode when
/// every `αᵢ > 1`; otherwise it is a bounded fallback and the entries may not
/// sum to one.
///
/// # Errors
///
/// Returns [`crate::DiceError::InvalidInput`] if either vector does not have
/// six finite, non-negative entries.
pub fn compute_map_estimator(prior: &[f64], observations: &[f64]) -> Result<Vec<f64>> {
    let alpha = compute_posterior(prior, observations)?;
    Ok(dirichlet_clipped_mode(&alpha))
}

/// Divisor that keeps `Σα` finite: 1 unless the plain sum overflows, in which
/// case the largest entry.
fn mass_scale(alpha: &[f64]) -> f64 {
    let sum: f64 = alpha.iter().sum();
    if sum.is_finite() {
        1.0
    } else {
        trace!("concentration sum overflows, rescaling by the largest entry");
        alpha.iter().copied().fold(0.0, f64::max)
    }
}

pub(crate) fn dirichlet_mean(alpha: &[f64]) -> Vec<f64> {
    let scale = mass_scale(alpha);
    let sum: f64 = alpha.iter().map(|&a| a / scale).sum();
    if sum <= 0.0 {
        trace!("posterior has no mass, mean falls back to zeros");
        return vec![0.0; alpha.len()];
    }
    alpha.iter().map(|&a| a / scale / sum).collect()
}

pub(crate) fn dirichlet_clipped_mode(alpha: &[f64]) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let k = NUM_FACES as f64;
    let scale = mass_scale(alpha);
    let sum: f64 = alpha.iter().map(|&a| a / scale).sum();
    let denominator = (sum - k / scale).max(1.0 / scale);
    alpha
        .iter()
        .map(|&a| (a - 1.0).max(0.0) / scale / denominator)
        .collect()
}
