//! Engine configuration: everything a quoting run reads at construction.

use crate::numeric::quadrature::QuadratureConfig;
use crate::order_flow::liquidity::DEFAULT_SENSITIVITY;
use crate::strategy::config::OptimizerConfig;
use crate::types::primitives::{Price, Probability, Scale, Sensitivity, Shape};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Configuration of a [`QuoteEngine`](super::QuoteEngine).
///
/// Validation happens in `QuoteEngine::new`, before any optimization work.
///
/// # Example
///
/// ```rust
/// use spread_optimizer_rs::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_informed_trade_probability(0.2)
///     .with_reference_price(50.0);
/// assert_eq!(config.shape, 10.0);
/// assert_eq!(config.informed_trade_probability, 0.2);
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Weibull shape (k) of the true-price distribution.
    pub shape: Shape,

    /// Weibull scale (λ) of the true-price distribution.
    pub scale: Scale,

    /// Reference price (P0).
    pub reference_price: Price,

    /// Probability that a counterparty is informed (Pi_I).
    pub informed_trade_probability: Probability,

    /// Order-flow sensitivity to quote distance.
    pub sensitivity: Sensitivity,

    /// Quote search settings.
    pub optimizer: OptimizerConfig,

    /// Integration settings for the adverse-selection cost.
    pub quadrature: QuadratureConfig,
}

impl EngineConfig {
    /// Sets the distribution shape.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the distribution scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the reference price.
    #[must_use]
    pub fn with_reference_price(mut self, reference_price: Price) -> Self {
        self.reference_price = reference_price;
        self
    }

    /// Sets the informed-trade probability.
    #[must_use]
    pub fn with_informed_trade_probability(mut self, probability: Probability) -> Self {
        self.informed_trade_probability = probability;
        self
    }

    /// Sets the order-flow sensitivity.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Replaces the optimizer settings.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Replaces the quadrature settings.
    #[must_use]
    pub fn with_quadrature(mut self, quadrature: QuadratureConfig) -> Self {
        self.quadrature = quadrature;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shape: 10.0,
            scale: 50.0,
            reference_price: 51.0,
            informed_trade_probability: 0.4,
            sensitivity: DEFAULT_SENSITIVITY,
            optimizer: OptimizerConfig::default(),
            quadrature: QuadratureConfig::default(),
        }
    }
}
