//! Optimizer configuration parameters.

use crate::types::error::{MMError, MMResult};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Configuration of the quote search.
#[derive(Clone, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Maximum number of simplex iterations, shared across restarts.
    ///
    /// Must be at least 1.
    pub max_iterations: usize,

    /// Convergence threshold on the spread of objective values in the simplex.
    ///
    /// Must be positive.
    pub f_tolerance: f64,

    /// Convergence threshold on the simplex diameter, in price units.
    ///
    /// Must be positive.
    pub x_tolerance: f64,

    /// Number of times the search is restarted from its converged point.
    pub restarts: usize,

    /// Distance of the initial ask and bid from the reference price.
    ///
    /// Must be non-negative.
    pub initial_spread_offset: f64,

    /// The lowest admissible bid is `P0 - bid_search_multiplier * shape`.
    ///
    /// Must be non-negative.
    pub bid_search_multiplier: f64,

    /// Initial simplex edge as a fraction of each starting coordinate.
    ///
    /// Must be positive.
    pub initial_step_fraction: f64,
}

impl OptimizerConfig {
    /// Creates a new optimizer configuration with validation.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - Iteration budget, must be at least 1
    /// * `f_tolerance` - Objective convergence threshold, must be positive
    /// * `x_tolerance` - Simplex size convergence threshold, must be positive
    /// * `restarts` - Number of restarts from the converged point
    ///
    /// The search-region parameters take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if parameters are invalid.
    pub fn new(
        max_iterations: usize,
        f_tolerance: f64,
        x_tolerance: f64,
        restarts: usize,
    ) -> MMResult<Self> {
        let config = Self {
            max_iterations,
            f_tolerance,
            x_tolerance,
            restarts,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the initial distance of the quotes from the reference price.
    #[must_use]
    pub fn with_initial_spread_offset(mut self, offset: f64) -> Self {
        self.initial_spread_offset = offset;
        self
    }

    /// Sets the multiplier of the shape parameter bounding the bid search.
    #[must_use]
    pub fn with_bid_search_multiplier(mut self, multiplier: f64) -> Self {
        self.bid_search_multiplier = multiplier;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` naming the first invalid field.
    pub fn validate(&self) -> MMResult<()> {
        if self.max_iterations == 0 {
            return Err(MMError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if !self.f_tolerance.is_finite() || self.f_tolerance <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "f_tolerance must be positive".to_string(),
            ));
        }

        if !self.x_tolerance.is_finite() || self.x_tolerance <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "x_tolerance must be positive".to_string(),
            ));
        }

        if !self.initial_spread_offset.is_finite() || self.initial_spread_offset < 0.0 {
            return Err(MMError::InvalidConfiguration(
                "initial_spread_offset must be non-negative".to_string(),
            ));
        }

        if !self.bid_search_multiplier.is_finite() || self.bid_search_multiplier < 0.0 {
            return Err(MMError::InvalidConfiguration(
                "bid_search_multiplier must be non-negative".to_string(),
            ));
        }

        if !self.initial_step_fraction.is_finite() || self.initial_step_fraction <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "initial_step_fraction must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            f_tolerance: 1e-8,
            x_tolerance: 1e-6,
            restarts: 2,
            initial_spread_offset: 2.0,
            bid_search_multiplier: 10.0,
            initial_step_fraction: 0.05,
        }
    }
}
