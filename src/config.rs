//! Simulation configuration.
//!
//! Everything that used to be a process-wide constant next to the engine
//! (biased weights, default priors, display colors, RNG seed) lives in a
//! [`DiceConfig`] value that callers pass explicitly, so independent
//! simulations can run side by side with different settings.
//!
//! Configs are plain JSON; missing fields take their defaults.
//!
//! ```
//! use dicebayes::config::DiceConfig;
//! use dicebayes::sampler::DiceMode;
//!
//! let config = DiceConfig::from_json_str(r##"{ "seed": 42, "theme": { "biased": "#ff0000" } }"##)
//!     .expect("valid config");
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.theme.rgb(DiceMode::Biased).expect("hex color"), (255, 0, 0));
//! assert_eq!(config.theme.color(DiceMode::Unbiased), "#e67e22");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DiceError, Result};
use crate::faces::{check_face_vector, BIASED_WEIGHTS, UNIFORM_WEIGHTS};
use crate::sampler::{CumulativeDistribution, DiceMode, Sampler};

/// Top-level configuration for a dice simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Face weights of the biased die (normalized if they do not sum to 1).
    pub biased_weights: Vec<f64>,
    /// Default Dirichlet prior for each die.
    pub priors: PriorConfig,
    /// Display color of each die.
    pub theme: DiceTheme,
    /// Seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            biased_weights: BIASED_WEIGHTS.to_vec(),
            priors: PriorConfig::default(),
            theme: DiceTheme::default(),
            seed: None,
        }
    }
}

impl DiceConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::Serialization`] for malformed JSON and the
    /// [`validate`](Self::validate) errors for bad values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading dice config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::Serialization`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks weights, priors and theme colors.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::InvalidInput`] for bad weights or priors and
    /// [`DiceError::Config`] for colors that are not `#rrggbb`.
    pub fn validate(&self) -> Result<()> {
        CumulativeDistribution::from_weights(&self.biased_weights)?;
        for mode in DiceMode::ALL {
            check_face_vector("prior", self.priors.for_mode(mode))?;
            self.theme.rgb(mode)?;
        }
        Ok(())
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the biased die's face weights.
    #[must_use]
    pub fn with_biased_weights(mut self, weights: Vec<f64>) -> Self {
        self.biased_weights = weights;
        self
    }

    /// Sets the default prior of one die.
    #[must_use]
    pub fn with_prior(mut self, mode: DiceMode, prior: Vec<f64>) -> Self {
        match mode {
            DiceMode::Biased => self.priors.biased = prior,
            DiceMode::Unbiased => self.priors.unbiased = prior,
        }
        self
    }

    /// Sets the display color of one die.
    #[must_use]
    pub fn with_color(mut self, mode: DiceMode, color: impl Into<String>) -> Self {
        match mode {
            DiceMode::Biased => self.theme.biased = color.into(),
            DiceMode::Unbiased => self.theme.unbiased = color.into(),
        }
        self
    }

    /// Seed for one die, derived from [`seed`](Self::seed).
    ///
    /// The two dice get different streams from the same configured seed.
    #[must_use]
    pub fn seed_for(&self, mode: DiceMode) -> Option<u64> {
        self.seed.map(|seed| match mode {
            DiceMode::Biased => seed,
            DiceMode::Unbiased => seed.wrapping_add(1),
        })
    }

    /// Builds the sampler for one die.
    ///
    /// The biased die uses [`biased_weights`](Self::biased_weights); the
    /// unbiased die is always uniform.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::InvalidInput`] if the biased weights are invalid.
    pub fn sampler(&self, mode: DiceMode) -> Result<Sampler> {
        let seed = self.seed_for(mode);
        match (mode, seed) {
            (DiceMode::Biased, Some(seed)) => {
                Sampler::from_weights_seeded(&self.biased_weights, seed)
            }
            (DiceMode::Biased, None) => Sampler::from_weights(&self.biased_weights),
            (DiceMode::Unbiased, Some(seed)) => Ok(Sampler::seeded(mode, seed)),
            (DiceMode::Unbiased, None) => Ok(Sampler::new(mode)),
        }
    }
}

/// Default Dirichlet prior of each die.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorConfig {
    /// Prior pseudo-counts for the biased die.
    pub biased: Vec<f64>,
    /// Prior pseudo-counts for the unbiased die.
    pub unbiased: Vec<f64>,
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            biased: UNIFORM_WEIGHTS.to_vec(),
            unbiased: UNIFORM_WEIGHTS.to_vec(),
        }
    }
}

impl PriorConfig {
    /// The prior for `mode`.
    #[must_use]
    pub fn for_mode(&self, mode: DiceMode) -> &[f64] {
        match mode {
            DiceMode::Biased => &self.biased,
            DiceMode::Unbiased => &self.unbiased,
        }
    }
}

/// Display colors, as `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceTheme {
    /// Color of the biased die (blue by default).
    pub biased: String,
    /// Color of the unbiased die (orange by default).
    pub unbiased: String,
}

impl Default for DiceTheme {
    fn default() -> Self {
        Self {
            biased: "#068FCB".to_string(),
            unbiased: "#e67e22".to_string(),
        }
    }
}

impl DiceTheme {
    /// The hex color for `mode`.
    #[must_use]
    pub fn color(&self, mode: DiceMode) -> &str {
        match mode {
            DiceMode::Biased => &self.biased,
            DiceMode::Unbiased => &self.unbiased,
        }
    }

    /// The color for `mode` as an RGB triple.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::Config`] if the color is not `#rrggbb`.
    pub fn rgb(&self, mode: DiceMode) -> Result<(u8, u8, u8)> {
        parse_hex_color(self.color(mode))
    }
}

fn parse_hex_color(color: &str) -> Result<(u8, u8, u8)> {
    let invalid = || DiceError::Config(format!("color {color:?} is not of the form #rrggbb"));

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.biased_weights, BIASED_WEIGHTS.to_vec());
        assert_eq!(config.priors.for_mode(DiceMode::Biased), &UNIFORM_WEIGHTS);
        assert_eq!(config.priors.for_mode(DiceMode::Unbiased), &UNIFORM_WEIGHTS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_default_theme_colors() {
        let theme = DiceTheme::default();
        assert_eq!(theme.rgb(DiceMode::Biased).expect("hex"), (0x06, 0x8F, 0xCB));
        assert_eq!(theme.rgb(DiceMode::Unbiased).expect("hex"), (0xe6, 0x7e, 0x22));
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = DiceConfig::from_json_str("{}").expect("valid config");
        assert_eq!(config, DiceConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = DiceConfig::default()
            .with_seed(9)
            .with_prior(DiceMode::Biased, vec![1.0; 6])
            .with_color(DiceMode::Unbiased, "#00ff00");
        let json = config.to_json_pretty().expect("serializable");
        assert_eq!(DiceConfig::from_json_str(&json).expect("valid config"), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(DiceConfig::from_json_str(r#"{ "biased_weights": [1, 2, 3] }"#).is_err());
        assert!(
            DiceConfig::from_json_str(r#"{ "priors": { "biased": [1, 1, 1, 1, 1, -1] } }"#)
                .is_err()
        );
        let err = DiceConfig::from_json_str(r#"{ "theme": { "unbiased": "orange" } }"#)
            .unwrap_err();
        assert!(matches!(err, DiceError::Config(_)));
        let err = DiceConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DiceError::Serialization(_)));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000000").expect("hex"), (0, 0, 0));
        assert_eq!(parse_hex_color("#FFffFF").expect("hex"), (255, 255, 255));
        assert!(parse_hex_color("000000").is_err());
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_seed_for_differs_per_die() {
        let config = DiceConfig::default().with_seed(10);
        assert_eq!(config.seed_for(DiceMode::Biased), Some(10));
        assert_eq!(config.seed_for(DiceMode::Unbiased), Some(11));
        assert_eq!(DiceConfig::default().seed_for(DiceMode::Biased), None);
    }

    #[test]
    fn test_sampler_uses_configured_weights() {
        let weights = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let config = DiceConfig::default()
            .with_seed(1)
            .with_biased_weights(weights.clone());
        let mut sampler = config.sampler(DiceMode::Biased).expect("valid weights");
        assert_eq!(sampler.weights().to_vec(), weights);
        assert!(sampler.roll_many(1_000).iter().all(|&face| face == 6));
    }

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = DiceConfig::default().with_seed(3);
        for mode in DiceMode::ALL {
            let mut a = config.sampler(mode).expect("valid config");
            let mut b = config.sampler(mode).expect("valid config");
            assert_eq!(a.roll_many(200), b.roll_many(200));
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("dice.json");
        std::fs::write(&path, r#"{ "seed": 5 }"#).expect("write config");

        let config = DiceConfig::load(&path).expect("valid config");
        assert_eq!(config.seed, Some(5));

        let missing = DiceConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, DiceError::Io(_)));
    }
}
