//! Face indexing and face-vector validation shared by every module.
//!
//! A face vector has one entry per die face: index 0 holds face 1, index 5
//! holds face 6.

use crate::error::{DiceError, Result};

/// Number of faces on the die.
pub const NUM_FACES: usize = 6;

/// Uniform face distribution `[1/6; 6]`, also the default prior for both dice.
pub const UNIFORM_WEIGHTS: [f64; NUM_FACES] = [1.0 / 6.0; NUM_FACES];

/// Weights of the biased die: faces 1-5 equally likely, face 6 favored.
pub const BIASED_WEIGHTS: [f64; NUM_FACES] = [0.14, 0.14, 0.14, 0.14, 0.14, 0.30];

/// Check that `values` is a length-6 vector of finite, non-negative reals.
pub(crate) fn check_face_vector(param: &str, values: &[f64]) -> Result<()> {
    if values.len() != NUM_FACES {
        return Err(DiceError::length_mismatch(param, values.len()));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(DiceError::invalid_input(
            param,
            format!("{values:?}"),
            "finite entries",
        ));
    }

    if values.iter().any(|&v| v < 0.0) {
        return Err(DiceError::invalid_input(
            param,
            format!("{values:?}"),
            "non-negative entries",
        ));
    }

    Ok(())
}

/// Check that `face` is a valid roll outcome in `1..=6`.
pub(crate) fn check_face(face: u8) -> Result<()> {
    if (1..=NUM_FACES as u8).contains(&face) {
        Ok(())
    } else {
        Err(DiceError::invalid_input(
            "face",
            face.to_string(),
            "a face in 1..=6",
        ))
    }
}

/// Total of a count vector.
///
/// # Errors
///
/// Returns [`DiceError::InvalidInput`] if the total does not fit in a `u64`.
pub(crate) fn checked_total(counts: &[u64]) -> Result<u64> {
    counts
        .iter()
        .try_fold(0u64, |acc, &c| acc.checked_add(c))
        .ok_or_else(|| {
            DiceError::invalid_input("counts", format!("{counts:?}"), "a total that fits in u64")
        })
}

/// Total of a count vector, saturating at `u64::MAX`.
#[must_use]
pub(crate) fn saturating_total(counts: &[u64]) -> u64 {
    counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
}

/// Widen an integer count vector to reals (observations are pseudo-counts).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn counts_as_f64(counts: &[u64]) -> Vec<f64> {
    counts.iter().map(|&c| c as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_face_vector_accepts_valid() {
        assert!(check_face_vector("w", &BIASED_WEIGHTS).is_ok());
        assert!(check_face_vector("w", &[0.0; 6]).is_ok());
    }

    #[test]
    fn test_check_face_vector_rejects_wrong_length() {
        let err = check_face_vector("prior", &[1.0; 5]).unwrap_err();
        assert!(matches!(err, DiceError::InvalidInput { .. }));
        assert!(check_face_vector("prior", &[1.0; 7]).is_err());
        assert!(check_face_vector("prior", &[]).is_err());
    }

    #[test]
    fn test_check_face_vector_rejects_negative_and_nan() {
        assert!(check_face_vector("w", &[0.2, 0.2, 0.2, 0.2, 0.3, -0.1]).is_err());
        assert!(check_face_vector("w", &[f64::NAN, 0.2, 0.2, 0.2, 0.2, 0.2]).is_err());
        assert!(check_face_vector("w", &[f64::INFINITY, 0.0, 0.0, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_check_face() {
        for face in 1..=6 {
            assert!(check_face(face).is_ok());
        }
        assert!(check_face(0).is_err());
        assert!(check_face(7).is_err());
    }

    #[test]
    fn test_totals_near_u64_max() {
        let counts = [u64::MAX, 1, 0, 0, 0, 0];
        assert!(matches!(
            checked_total(&counts),
            Err(DiceError::InvalidInput { .. })
        ));
        assert_eq!(saturating_total(&counts), u64::MAX);
        assert_eq!(checked_total(&[u64::MAX, 0, 0, 0, 0, 0]).expect("fits"), u64::MAX);
        assert_eq!(checked_total(&[1, 2, 3, 4, 5, 6]).expect("fits"), 21);
    }

    #[test]
    fn test_biased_weights_sum_to_one() {
        let sum: f64 = BIASED_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        let sum: f64 = UNIFORM_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
