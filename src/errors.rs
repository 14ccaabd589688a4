//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;

/// Top-level error type for the crate.
///
/// Field evaluation and tracing never fail; these variants are only produced
/// by the validating constructors so callers can clamp and retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmRelativityError {
    /// Raised when a speed is not strictly below the speed of light.
    #[error("invalid velocity: |beta| = {beta} must be < 1")]
    InvalidVelocity {
        /// Offending β value.
        beta: Scalar,
    },
    /// Raised when a scenario identifier does not name a preset.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    /// Raised when tracing or sampling options are inconsistent.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Checks that `beta` is a usable speed, returning it unchanged.
pub fn validate_beta(beta: Scalar) -> Result<Scalar, EmRelativityError> {
    if beta.is_finite() && beta.abs() < 1.0 {
        Ok(beta)
    } else {
        Err(EmRelativityError::InvalidVelocity { beta })
    }
}
