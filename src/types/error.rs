//! Error types for the spread optimizer.

use thiserror::Error;

/// Errors produced while configuring the model or evaluating the objective.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MMError {
    /// A configuration parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Numerical integration did not reach the requested tolerance.
    #[error("integration over [{lower}, {upper}] failed: {reason}")]
    IntegrationFailed {
        /// Lower limit of the integral.
        lower: f64,
        /// Upper limit of the integral (may be infinite).
        upper: f64,
        /// Why the quadrature gave up.
        reason: String,
    },

    /// The quote search finished without an acceptable optimum.
    #[error("optimization failed: {0}")]
    OptimizationFailed(String),
}

/// Convenience result alias used across the crate.
pub type MMResult<T> = Result<T, MMError>;
