//! Error types for dicebayes operations.
//!
//! Malformed inputs (wrong vector length, negative weights or counts, unknown
//! die modes) are reported as [`DiceError::InvalidInput`]. The numeric edge
//! cases of the engine (zero totals, cumulative overrun) are not errors and
//! never reach this type.

use thiserror::Error;

/// Main error type for dicebayes operations.
///
/// # Examples
///
/// ```
/// use dicebayes::error::DiceError;
///
/// let err = DiceError::invalid_input("prior", "[-1.0]", "non-negative entries");
/// assert!(err.to_string().contains("Invalid input"));
/// ```
#[derive(Error, Debug)]
pub enum DiceError {
    /// A vector, weight, face or mode did not satisfy its constraint.
    #[error("Invalid input: {param} = {value}, expected {constraint}")]
    InvalidInput {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Configuration could not be used (bad theme color, bad prior, ...).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DiceError {
    fn from(err: serde_json::Error) -> Self {
        DiceError::Serialization(err.to_string())
    }
}

impl DiceError {
    /// Create an invalid input error with descriptive context
    #[must_use]
    pub fn invalid_input(param: &str, value: impl Into<String>, constraint: &str) -> Self {
        Self::InvalidInput {
            param: param.to_string(),
            value: value.into(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an error for a face vector that does not have one entry per face
    #[must_use]
    pub fn length_mismatch(param: &str, actual: usize) -> Self {
        Self::invalid_input(
            param,
            format!("{actual} entries"),
            &format!("exactly {} entries", crate::NUM_FACES),
        )
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, DiceError>;
