//! Empirical face frequencies from observed rolls.

use crate::error::{DiceError, Result};
use crate::faces::{check_face, NUM_FACES};

/// Converts a count vector into empirical probabilities `count[i] / total`.
///
/// With no observations (`total == 0`) every probability is zero.
///
/// # Errors
///
/// Returns [`DiceError::InvalidInput`] if `counts` does not have six entries.
///
/// # Example
///
/// ```
/// use dicebayes::frequency::compute_probabilities;
///
/// let probs = compute_probabilities(&[1, 2, 3, 4, 5, 5]).expect("six counts");
/// assert!((probs[0] - 0.05).abs() < 1e-12);
/// assert_eq!(compute_probabilities(&[0; 6]).expect("six counts"), vec![0.0; 6]);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn compute_probabilities(counts: &[u64]) -> Result<Vec<f64>> {
    if counts.len() != NUM_FACES {
        return Err(DiceError::length_mismatch("counts", counts.len()));
    }

    let total: f64 = counts.iter().map(|&c| c as f64).sum();
    if total == 0.0 {
        return Ok(vec![0.0; NUM_FACES]);
    }

    Ok(counts.iter().map(|&c| c as f64 / total).collect())
}

/// Tallies a roll history into per-face counts.
///
/// # Errors
///
/// Returns [`DiceError::InvalidInput`] if any roll is outside `1..=6`.
pub fn tally(rolls: &[u8]) -> Result<[u64; NUM_FACES]> {
    let mut counts = [0u64; NUM_FACES];
    for &face in rolls {
        check_face(face)?;
        counts[usize::from(face) - 1] += 1;
    }
    Ok(counts)
}
