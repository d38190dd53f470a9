//! Weighted die samplers (the distribution factory).
//!
//! A [`Sampler`] produces one face in `1..=6` per call. Unbiased samplers draw
//! faces uniformly; weighted samplers invert a [`CumulativeDistribution`]
//! built once at construction time.
//!
//! # Example
//!
//! ```
//! use dicebayes::sampler::{DiceMode, Sampler};
//!
//! let mut sampler = Sampler::seeded(DiceMode::Biased, 7);
//! let rolls = sampler.roll_many(1_000);
//! assert!(rolls.iter().all(|&face| (1..=6).contains(&face)));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DiceError, Result};
use crate::faces::{check_face_vector, BIASED_WEIGHTS, NUM_FACES, UNIFORM_WEIGHTS};

/// Tolerance used to decide whether weights already sum to one.
const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Which die is being rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceMode {
    /// Skewed die, face 6 favored.
    Biased,
    /// Fair die, every face has probability 1/6.
    Unbiased,
}

impl DiceMode {
    /// Both modes, biased first.
    pub const ALL: [DiceMode; 2] = [DiceMode::Biased, DiceMode::Unbiased];

    /// Lowercase name used on the command line and in JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DiceMode::Biased => "biased",
            DiceMode::Unbiased => "unbiased",
        }
    }
}

impl fmt::Display for DiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiceMode {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "biased" => Ok(DiceMode::Biased),
            "unbiased" => Ok(DiceMode::Unbiased),
            _ => Err(DiceError::invalid_input(
                "mode",
                s,
                "one of \"biased\", \"unbiased\"",
            )),
        }
    }
}

/// Running-sum transform of a face distribution, used for inverse-CDF sampling.
///
/// `values()[i]` is the probability of rolling a face `<= i + 1`. The sequence
/// is non-decreasing and its last element is 1 up to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistribution {
    weights: [f64; NUM_FACES],
    cumulative: [f64; NUM_FACES],
}

impl CumulativeDistribution {
    /// Builds the cumulative distribution from six face weights.
    ///
    /// Weights that do not already sum to one are normalized first.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::InvalidInput`] if there are not exactly six weights,
    /// if any weight is negative or non-finite, or if every weight is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use dicebayes::sampler::CumulativeDistribution;
    ///
    /// let cdf = CumulativeDistribution::from_weights(&[1.0, 1.0, 1.0, 1.0, 1.0, 5.0])
    ///     .expect("valid weights");
    /// assert!((cdf.weights()[5] - 0.5).abs() < 1e-12);
    /// assert!((cdf.values()[4] - 0.5).abs() < 1e-12);
    /// ```
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        check_face_vector("weights", weights)?;

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(DiceError::invalid_input(
                "weights",
                format!("{weights:?}"),
                "at least one positive weight",
            ));
        }

        let mut normalized = [0.0; NUM_FACES];
        normalized.copy_from_slice(weights);
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            trace!(total, "normalizing face weights");
            for w in &mut normalized {
                *w /= total;
            }
        }

        Ok(Self::from_normalized(normalized))
    }

    fn from_normalized(weights: [f64; NUM_FACES]) -> Self {
        let mut cumulative = [0.0; NUM_FACES];
        let mut running = 0.0;
        for (c, &w) in cumulative.iter_mut().zip(weights.iter()) {
            running += w;
            *c = running;
        }

        Self {
            weights,
            cumulative,
        }
    }

    /// The normalized face distribution.
    #[must_use]
    pub fn weights(&self) -> &[f64; NUM_FACES] {
        &self.weights
    }

    /// The cumulative values `C[i] = weights[0] + ... + weights[i]`.
    #[must_use]
    pub fn values(&self) -> &[f64; NUM_FACES] {
        &self.cumulative
    }

    /// Maps a uniform draw `r` to a face.
    ///
    /// Returns `i + 1` for the first `i` with `r <= C[i]`. When rounding leaves
    /// `r` above every cumulative value the last face is returned.
    #[must_use]
    pub fn search(&self, r: f64) -> u8 {
        for (i, &c) in self.cumulative.iter().enumerate() {
            if r <= c {
                return (i + 1) as u8;
            }
        }
        NUM_FACES as u8
    }
}

#[derive(Debug)]
enum SamplerKind {
    Uniform,
    Weighted(CumulativeDistribution),
}

impl SamplerKind {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        match self {
            SamplerKind::Uniform => rng.random_range(1..=NUM_FACES as u8),
            SamplerKind::Weighted(cdf) => cdf.search(rng.random::<f64>()),
        }
    }
}

/// A die that can be rolled repeatedly.
///
/// Each sampler owns its distribution and its own random number generator, so
/// independent samplers never interfere and a sampler can be moved to another
/// thread.
#[derive(Debug)]
pub struct Sampler {
    kind: SamplerKind,
    rng: StdRng,
}

impl Sampler {
    /// Creates an entropy-seeded sampler for `mode`.
    ///
    /// The biased die uses [`BIASED_WEIGHTS`].
    #[must_use]
    pub fn new(mode: DiceMode) -> Self {
        Self::for_mode(mode, StdRng::from_os_rng())
    }

    /// Creates a reproducible sampler for `mode`.
    #[must_use]
    pub fn seeded(mode: DiceMode, seed: u64) -> Self {
        Self::for_mode(mode, StdRng::seed_from_u64(seed))
    }

    /// Creates an entropy-seeded sampler over arbitrary face weights.
    ///
    /// # Errors
    ///
    /// See [`CumulativeDistribution::from_weights`].
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        Self::weighted(weights, StdRng::from_os_rng())
    }

    /// Creates a reproducible sampler over arbitrary face weights.
    ///
    /// # Errors
    ///
    /// See [`CumulativeDistribution::from_weights`].
    pub fn from_weights_seeded(weights: &[f64], seed: u64) -> Result<Self> {
        Self::weighted(weights, StdRng::seed_from_u64(seed))
    }

    fn for_mode(mode: DiceMode, rng: StdRng) -> Self {
        let kind = match mode {
            DiceMode::Unbiased => SamplerKind::Uniform,
            DiceMode::Biased => {
                SamplerKind::Weighted(CumulativeDistribution::from_normalized(BIASED_WEIGHTS))
            }
        };
        debug!(%mode, "created sampler");
        Self { kind, rng }
    }

    fn weighted(weights: &[f64], rng: StdRng) -> Result<Self> {
        let cdf = CumulativeDistribution::from_weights(weights)?;
        debug!(cumulative = ?cdf.values(), "created weighted sampler");
        Ok(Self {
            kind: SamplerKind::Weighted(cdf),
            rng,
        })
    }

    /// Rolls the die once, returning a face in `1..=6`.
    pub fn roll(&mut self) -> u8 {
        self.kind.draw(&mut self.rng)
    }

    /// Rolls the die `n` times.
    pub fn roll_many(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.roll()).collect()
    }

    /// Rolls the die once using a caller-owned random number generator.
    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        self.kind.draw(rng)
    }

    /// The face distribution this sampler draws from.
    #[must_use]
    pub fn weights(&self) -> [f64; NUM_FACES] {
        match &self.kind {
            SamplerKind::Uniform => UNIFORM_WEIGHTS,
            SamplerKind::Weighted(cdf) => *cdf.weights(),
        }
    }

    /// The cumulative distribution, or `None` for a uniform sampler.
    #[must_use]
    pub fn cumulative(&self) -> Option<&CumulativeDistribution> {
        match &self.kind {
            SamplerKind::Uniform => None,
            SamplerKind::Weighted(cdf) => Some(cdf),
        }
    }
}

/// Creates an entropy-seeded sampler for `mode`.
///
/// # Example
///
/// ```
/// use dicebayes::sampler::{create_sampler, DiceMode};
///
/// let mut die = create_sampler(DiceMode::Unbiased);
/// let face = die.roll();
/// assert!((1..=6).contains(&face));
/// ```
#[must_use]
pub fn create_sampler(mode: DiceMode) -> Sampler {
    Sampler::new(mode)
}
