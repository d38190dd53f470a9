//! Per-die analysis reports.
//!
//! An [`Analysis`] bundles everything the estimator can say about one set of
//! roll counts: the empirical frequencies, the posterior, both point
//! estimators and a per-face credible interval.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bayesian::{
    compute_bayes_estimator, compute_map_estimator, compute_posterior, DiePosterior,
};
use crate::error::Result;
use crate::faces::{checked_total, counts_as_f64, NUM_FACES};
use crate::frequency::compute_probabilities;
use crate::sampler::DiceMode;

/// Coverage of the credible intervals in a report.
pub const CREDIBLE_LEVEL: f64 = 0.95;

/// Estimates for one die given a prior and observed counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Die the counts came from, if known.
    pub mode: Option<DiceMode>,
    /// Number of observed rolls.
    pub total_rolls: u64,
    /// Observed count per face.
    pub counts: Vec<u64>,
    /// `counts / total_rolls`, zeros before the first roll.
    pub empirical: Vec<f64>,
    /// Prior pseudo-counts.
    pub prior: Vec<f64>,
    /// Prior plus counts.
    pub posterior: Vec<f64>,
    /// Posterior mean.
    pub bayes_estimate: Vec<f64>,
    /// Clipped posterior mode.
    pub map_estimate: Vec<f64>,
    /// Marginal posterior variance per face.
    pub posterior_variance: Vec<f64>,
    /// [`CREDIBLE_LEVEL`] credible interval per face.
    pub credible_intervals: Vec<(f64, f64)>,
    /// Distribution the rolls were drawn from, when simulated.
    pub true_weights: Option<Vec<f64>>,
}

impl Analysis {
    /// Runs every estimator on `counts` under `prior`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiceError::InvalidInput`] if either vector is not a
    /// valid six-entry face vector, or if the counts total more than
    /// `u64::MAX` rolls.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::report::Analysis;
    ///
    /// let analysis = Analysis::from_counts(&[1.0; 6], &[2, 2, 2, 2, 2, 10]).expect("valid input");
    /// assert_eq!(analysis.total_rolls, 20);
    /// assert_eq!(analysis.most_likely_face(), 6);
    /// ```
    pub fn from_counts(prior: &[f64], counts: &[u64]) -> Result<Self> {
        let empirical = compute_probabilities(counts)?;
        let total_rolls = checked_total(counts)?;
        let observations = counts_as_f64(counts);
        let posterior = compute_posterior(prior, &observations)?;
        let bayes_estimate = compute_bayes_estimator(&posterior)?;
        let map_estimate = compute_map_estimator(prior, &observations)?;

        let mut model = DiePosterior::from_prior(prior)?;
        model.update(counts)?;

        Ok(Self {
            mode: None,
            total_rolls,
            counts: counts.to_vec(),
            empirical,
            prior: prior.to_vec(),
            posterior,
            bayes_estimate,
            map_estimate,
            posterior_variance: model.posterior_variance(),
            credible_intervals: model.credible_intervals(CREDIBLE_LEVEL)?,
            true_weights: None,
        })
    }

    /// Tags the report with the die it describes.
    #[must_use]
    pub fn with_mode(mut self, mode: DiceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Records the distribution the rolls were drawn from.
    #[must_use]
    pub fn with_true_weights(mut self, weights: &[f64]) -> Self {
        self.true_weights = Some(weights.to_vec());
        self
    }

    /// Face (1-6) with the largest posterior mean; ties go to the lower face.
    #[must_use]
    pub fn most_likely_face(&self) -> u8 {
        let mut best = 0;
        for (i, &p) in self.bayes_estimate.iter().enumerate() {
            if p > self.bayes_estimate[best] {
                best = i;
            }
        }
        (best + 1) as u8
    }

    /// Largest absolute gap between the posterior mean and the true weights.
    #[must_use]
    pub fn max_abs_error(&self) -> Option<f64> {
        let truth = self.true_weights.as_ref()?;
        Some(
            self.bayes_estimate
                .iter()
                .zip(truth.iter())
                .map(|(e, t)| (e - t).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Some(mode) => writeln!(f, "{mode} die, {} rolls", self.total_rolls)?,
            None => writeln!(f, "{} rolls", self.total_rolls)?,
        }
        writeln!(
            f,
            "{:>4} {:>8} {:>9} {:>9} {:>9} {:>19}",
            "face", "count", "observed", "bayes", "map", "95% interval"
        )?;
        for i in 0..NUM_FACES {
            let (lo, hi) = self.credible_intervals[i];
            writeln!(
                f,
                "{:>4} {:>8} {:>9.4} {:>9.4} {:>9.4}   [{lo:.4}, {hi:.4}]",
                i + 1,
                self.counts[i],
                self.empirical[i],
                self.bayes_estimate[i],
                self.map_estimate[i],
            )?;
        }
        if let Some(err) = self.max_abs_error() {
            writeln!(f, "max |bayes - true| = {err:.4}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiceError;
    use crate::faces::{BIASED_WEIGHTS, UNIFORM_WEIGHTS};

    #[test]
    fn test_analysis_without_rolls() {
        let analysis = Analysis::from_counts(&UNIFORM_WEIGHTS, &[0; 6]).expect("valid input");
        assert_eq!(analysis.total_rolls, 0);
        assert_eq!(analysis.empirical, vec![0.0; 6]);
        assert_eq!(analysis.posterior, UNIFORM_WEIGHTS.to_vec());
        for p in &analysis.bayes_estimate {
            assert!((p - 1.0 / 6.0).abs() < 1e-12);
        }
        // alpha = 1/6 everywhere, so every face is clipped
        assert_eq!(analysis.map_estimate, vec![0.0; 6]);
    }

    #[test]
    fn test_analysis_fields_consistent() {
        let counts = [14, 15, 13, 14, 14, 30];
        let analysis = Analysis::from_counts(&[1.0; 6], &counts).expect("valid input");

        assert_eq!(analysis.total_rolls, 100);
        assert_eq!(analysis.counts, counts.to_vec());
        assert_eq!(analysis.posterior[5], 31.0);
        assert!((analysis.bayes_estimate.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(analysis.credible_intervals.len(), 6);
        assert_eq!(analysis.most_likely_face(), 6);
        assert!(analysis.mode.is_none());
        assert!(analysis.max_abs_error().is_none());
    }

    #[test]
    fn test_max_abs_error_against_truth() {
        let analysis = Analysis::from_counts(&[1.0; 6], &[14, 14, 14, 14, 14, 30])
            .expect("valid input")
            .with_mode(DiceMode::Biased)
            .with_true_weights(&BIASED_WEIGHTS);
        let err = analysis.max_abs_error().expect("truth recorded");
        assert!(err < 0.02, "error {err}");
    }

    #[test]
    fn test_most_likely_face_tie_goes_low() {
        let analysis = Analysis::from_counts(&[1.0; 6], &[0; 6]).expect("valid input");
        assert_eq!(analysis.most_likely_face(), 1);
    }

    #[test]
    fn test_display_lists_every_face() {
        let analysis = Analysis::from_counts(&[1.0; 6], &[1, 2, 3, 4, 5, 6])
            .expect("valid input")
            .with_mode(DiceMode::Unbiased);
        let text = analysis.to_string();
        assert!(text.starts_with("unbiased die, 21 rolls"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(Analysis::from_counts(&[1.0; 5], &[0; 6]).is_err());
        assert!(Analysis::from_counts(&[1.0; 6], &[0; 4]).is_err());
    }

    #[test]
    fn test_counts_overflowing_total_rejected() {
        let err =
            Analysis::from_counts(&UNIFORM_WEIGHTS, &[u64::MAX, 1, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, DiceError::InvalidInput { .. }));
    }

    #[test]
    fn test_counts_at_u64_max_analyzed() {
        let analysis =
            Analysis::from_counts(&UNIFORM_WEIGHTS, &[u64::MAX, 0, 0, 0, 0, 0]).expect("fits");
        assert_eq!(analysis.total_rolls, u64::MAX);
        assert_eq!(analysis.most_likely_face(), 1);
        assert!((analysis.bayes_estimate.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_roundtrip() {
        let analysis = Analysis::from_counts(&[0.5; 6], &[3, 1, 4, 1, 5, 9])
            .expect("valid input")
            .with_mode(DiceMode::Biased);
        let json = serde_json::to_string(&analysis).expect("serializable");
        let back: Analysis = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, analysis);
    }
}
