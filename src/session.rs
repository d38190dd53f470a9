//! Roll sessions: per-die histories, counts and priors.
//!
//! A [`DiceSession`] is the single owner that accumulates rolls of both dice
//! between estimator calls. For several producers feeding one tally, use
//! [`SharedTally`], which counts with atomic increments.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiceConfig;
use crate::error::Result;
use crate::faces::{check_face, check_face_vector, saturating_total, NUM_FACES};
use crate::report::Analysis;
use crate::sampler::{DiceMode, Sampler};

/// Roll history of one die.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRecord {
    /// Every face rolled, oldest first.
    pub throws: Vec<u8>,
    /// Count per face; `counts[i]` is the number of times face `i + 1` came up.
    pub counts: [u64; NUM_FACES],
}

impl DieRecord {
    fn push(&mut self, face: u8) {
        self.throws.push(face);
        self.counts[usize::from(face) - 1] += 1;
    }

    /// Total number of rolls, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        saturating_total(&self.counts)
    }

    /// Most recent roll.
    #[must_use]
    pub fn last_throw(&self) -> Option<u8> {
        self.throws.last().copied()
    }
}

#[derive(Debug)]
struct DieState {
    sampler: Sampler,
    record: DieRecord,
    prior: Vec<f64>,
}

/// Interactive state for a biased and an unbiased die.
///
/// # Example
///
/// ```
/// use dicebayes::config::DiceConfig;
/// use dicebayes::sampler::DiceMode;
/// use dicebayes::session::DiceSession;
///
/// let mut session = DiceSession::new(DiceConfig::default().with_seed(1)).expect("valid config");
/// session.roll(DiceMode::Biased, 600);
///
/// let analysis = session.analyze(DiceMode::Biased).expect("valid prior");
/// assert_eq!(analysis.total_rolls, 600);
/// ```
#[derive(Debug)]
pub struct DiceSession {
    config: DiceConfig,
    biased: DieState,
    unbiased: DieState,
}

impl DiceSession {
    /// Creates a session with empty histories and the configured priors.
    ///
    /// # Errors
    ///
    /// Returns the [`DiceConfig::validate`] error if the config is invalid.
    pub fn new(config: DiceConfig) -> Result<Self> {
        config.validate()?;
        let state = |mode| -> Result<DieState> {
            Ok(DieState {
                sampler: config.sampler(mode)?,
                record: DieRecord::default(),
                prior: config.priors.for_mode(mode).to_vec(),
            })
        };
        let biased = state(DiceMode::Biased)?;
        let unbiased = state(DiceMode::Unbiased)?;
        debug!(seed = ?config.seed, "started dice session");

        Ok(Self {
            config,
            biased,
            unbiased,
        })
    }

    fn state(&self, mode: DiceMode) -> &DieState {
        match mode {
            DiceMode::Biased => &self.biased,
            DiceMode::Unbiased => &self.unbiased,
        }
    }

    fn state_mut(&mut self, mode: DiceMode) -> &mut DieState {
        match mode {
            DiceMode::Biased => &mut self.biased,
            DiceMode::Unbiased => &mut self.unbiased,
        }
    }

    /// The configuration the session was built from.
    #[must_use]
    pub fn config(&self) -> &DiceConfig {
        &self.config
    }

    /// Rolls one die `n` times and records the results, returning the new faces.
    pub fn roll(&mut self, mode: DiceMode, n: usize) -> Vec<u8> {
        let state = self.state_mut(mode);
        let faces = state.sampler.roll_many(n);
        for &face in &faces {
            state.record.push(face);
        }
        debug!(%mode, n, total = state.record.total(), "rolled dice");
        faces
    }

    /// Records a face observed outside the session's own sampler.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiceError::InvalidInput`] if `face` is not in `1..=6`.
    pub fn record(&mut self, mode: DiceMode, face: u8) -> Result<()> {
        check_face(face)?;
        self.state_mut(mode).record.push(face);
        Ok(())
    }

    /// History and counts of one die.
    #[must_use]
    pub fn record_of(&self, mode: DiceMode) -> &DieRecord {
        &self.state(mode).record
    }

    /// Clears the history of one die. The prior is kept.
    pub fn reset(&mut self, mode: DiceMode) {
        self.state_mut(mode).record = DieRecord::default();
        debug!(%mode, "reset die history");
    }

    /// Clears both histories.
    pub fn reset_all(&mut self) {
        for mode in DiceMode::ALL {
            self.reset(mode);
        }
    }

    /// Prior pseudo-counts of one die.
    #[must_use]
    pub fn prior(&self, mode: DiceMode) -> &[f64] {
        &self.state(mode).prior
    }

    /// Replaces the prior of one die.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiceError::InvalidInput`] unless `prior` has six
    /// finite, non-negative entries; the old prior is kept in that case.
    pub fn set_prior(&mut self, mode: DiceMode, prior: &[f64]) -> Result<()> {
        check_face_vector("prior", prior)?;
        self.state_mut(mode).prior = prior.to_vec();
        Ok(())
    }

    /// Runs the estimators on one die's counts and prior.
    ///
    /// # Errors
    ///
    /// Propagates [`Analysis::from_counts`] errors.
    pub fn analyze(&self, mode: DiceMode) -> Result<Analysis> {
        let state = self.state(mode);
        Ok(Analysis::from_counts(&state.prior, &state.record.counts)?
            .with_mode(mode)
            .with_true_weights(&state.sampler.weights()))
    }
}

/// Face counts that several threads can add to concurrently.
///
/// # Example
///
/// ```
/// use dicebayes::session::SharedTally;
///
/// let tally = SharedTally::new();
/// std::thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| tally.record(6).expect("valid face"));
///     }
/// });
/// assert_eq!(tally.snapshot(), [0, 0, 0, 0, 0, 4]);
/// ```
#[derive(Debug, Default)]
pub struct SharedTally {
    counts: [AtomicU64; NUM_FACES],
}

impl SharedTally {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one roll of `face`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiceError::InvalidInput`] if `face` is not in `1..=6`.
    pub fn record(&self, face: u8) -> Result<()> {
        check_face(face)?;
        self.counts[usize::from(face) - 1].fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Current counts. Rolls recorded concurrently with the call may or may
    /// not be included.
    #[must_use]
    pub fn snapshot(&self) -> [u64; NUM_FACES] {
        std::array::from_fn(|i| self.counts[i].load(Ordering::Relaxed))
    }

    /// Total rolls recorded so far, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        saturating_total(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::{BIASED_WEIGHTS, UNIFORM_WEIGHTS};

    fn session(seed: u64) -> DiceSession {
        DiceSession::new(DiceConfig::default().with_seed(seed)).expect("valid config")
    }

    #[test]
    fn test_new_session_is_empty() {
        let s = session(0);
        for mode in DiceMode::ALL {
            assert_eq!(s.record_of(mode), &DieRecord::default());
            assert_eq!(s.prior(mode), &UNIFORM_WEIGHTS);
        }
    }

    #[test]
    fn test_roll_accumulates_counts_and_history() {
        let mut s = session(1);
        let first = s.roll(DiceMode::Biased, 50);
        let second = s.roll(DiceMode::Biased, 25);

        let record = s.record_of(DiceMode::Biased);
        assert_eq!(record.total(), 75);
        assert_eq!(record.throws.len(), 75);
        assert_eq!(&record.throws[..50], first.as_slice());
        assert_eq!(record.last_throw(), second.last().copied());
        assert_eq!(
            crate::frequency::tally(&record.throws).expect("valid faces"),
            record.counts
        );
        assert_eq!(s.record_of(DiceMode::Unbiased).total(), 0);
    }

    #[test]
    fn test_record_and_reset() {
        let mut s = session(2);
        s.record(DiceMode::Unbiased, 3).expect("valid face");
        s.record(DiceMode::Unbiased, 3).expect("valid face");
        assert_eq!(s.record_of(DiceMode::Unbiased).counts, [0, 0, 2, 0, 0, 0]);
        assert!(s.record(DiceMode::Unbiased, 9).is_err());

        s.roll(DiceMode::Biased, 10);
        s.reset(DiceMode::Unbiased);
        assert_eq!(s.record_of(DiceMode::Unbiased).total(), 0);
        assert_eq!(s.record_of(DiceMode::Biased).total(), 10);

        s.reset_all();
        assert_eq!(s.record_of(DiceMode::Biased).total(), 0);
    }

    #[test]
    fn test_set_prior() {
        let mut s = session(3);
        s.set_prior(DiceMode::Biased, &[2.0; 6]).expect("valid prior");
        assert_eq!(s.prior(DiceMode::Biased), &[2.0; 6]);

        assert!(s.set_prior(DiceMode::Biased, &[1.0; 4]).is_err());
        assert_eq!(s.prior(DiceMode::Biased), &[2.0; 6]);
    }

    #[test]
    fn test_analysis_recovers_biased_weights() {
        let mut s = session(4);
        s.roll(DiceMode::Biased, 50_000);
        let analysis = s.analyze(DiceMode::Biased).expect("valid prior");

        assert_eq!(analysis.mode, Some(DiceMode::Biased));
        assert_eq!(analysis.true_weights.as_deref(), Some(&BIASED_WEIGHTS[..]));
        assert_eq!(analysis.most_likely_face(), 6);
        assert!(analysis.max_abs_error().expect("truth recorded") < 0.02);
    }

    #[test]
    fn test_sessions_with_same_seed_agree() {
        let mut a = session(5);
        let mut b = session(5);
        for mode in DiceMode::ALL {
            assert_eq!(a.roll(mode, 100), b.roll(mode, 100));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DiceConfig::default().with_prior(DiceMode::Unbiased, vec![1.0; 3]);
        assert!(DiceSession::new(config).is_err());
    }

    #[test]
    fn test_shared_tally_across_threads() {
        let tally = SharedTally::new();
        std::thread::scope(|scope| {
            for seed in 0..4 {
                let tally = &tally;
                scope.spawn(move || {
                    let mut sampler = Sampler::seeded(DiceMode::Unbiased, seed);
                    for _ in 0..10_000 {
                        tally.record(sampler.roll()).expect("valid face");
                    }
                });
            }
        });
        assert_eq!(tally.total(), 40_000);
        assert!(tally.snapshot().iter().all(|&c| c > 6_000));
    }

    #[test]
    fn test_shared_tally_rejects_bad_face() {
        let tally = SharedTally::new();
        assert!(tally.record(0).is_err());
        assert_eq!(tally.total(), 0);
    }
}
