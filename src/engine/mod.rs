//! Quote engine: the entry point that wires the model together.
//!
//! ```rust
//! use spread_optimizer_rs::engine::{EngineConfig, QuoteEngine};
//!
//! let engine = QuoteEngine::new(EngineConfig::default()).unwrap();
//! let result = engine.compute_optimal_quotes();
//! if let Some(quote) = result.quote() {
//!     assert!(quote.bid <= 51.0 && 51.0 <= quote.ask);
//! }
//! ```

/// Engine configuration.
pub mod config;

pub use config::EngineConfig;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::distribution::{PriceDistribution, WeibullDistribution, WeibullParams};
use crate::market_state::snapshot::MarketState;
use crate::numeric::quadrature::Quadrature;
use crate::order_flow::{OrderFlowModel, OrderFlowParams};
use crate::strategy::objective::{ProfitBreakdown, ProfitObjective};
use crate::strategy::optimizer::{OptimizationResult, QuoteOptimizer};
use crate::strategy::quote::{Quote, QuoteBounds, QuoteCandidate};
use crate::types::error::MMResult;
use crate::types::primitives::Price;

/// Facade owning the market state, distribution and order-flow model.
///
/// Immutable after construction; every call is a pure function of the
/// configuration.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    config: EngineConfig,
    market: MarketState,
    distribution: WeibullDistribution,
    order_flow: OrderFlowModel,
    quadrature: Quadrature,
    optimizer: QuoteOptimizer,
    bounds: QuoteBounds,
}

impl QuoteEngine {
    /// Validates `config` and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` for non-positive shape, scale
    /// or sensitivity, an informed-trade probability outside `[0, 1]`, a
    /// non-positive reference price, or invalid optimizer/quadrature settings.
    pub fn new(config: EngineConfig) -> MMResult<Self> {
        let params = WeibullParams::new(config.shape, config.scale)?;
        let market = MarketState::new(config.reference_price, config.informed_trade_probability)?;
        let flow = OrderFlowParams::new(config.sensitivity)?;

        let distribution = WeibullDistribution::new(params)?;
        let order_flow = OrderFlowModel::new(market.reference_price, flow)?;
        let quadrature = Quadrature::new(config.quadrature)?;
        let optimizer = QuoteOptimizer::new(config.optimizer.clone())?;
        let bounds = QuoteBounds::around_reference(
            market.reference_price,
            config.optimizer.bid_search_multiplier * params.shape,
        )?;

        debug!(
            shape = params.shape,
            scale = params.scale,
            reference_price = market.reference_price,
            informed_trade_probability = market.informed_trade_probability,
            sensitivity = flow.sensitivity,
            "quote engine configured"
        );

        Ok(Self {
            config,
            market,
            distribution,
            order_flow,
            quadrature,
            optimizer,
            bounds,
        })
    }

    /// Configuration the engine was built from.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Market state of this engine.
    #[must_use]
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// Price distribution of this engine.
    #[must_use]
    pub fn distribution(&self) -> &WeibullDistribution {
        &self.distribution
    }

    /// Feasible region of the search: `ask ≥ P0`, `P0 - multiplier * shape ≤ bid ≤ P0`.
    #[must_use]
    pub fn default_bounds(&self) -> QuoteBounds {
        self.bounds
    }

    /// Starting point of the search: `(P0 + offset, P0 - offset)`.
    #[must_use]
    pub fn default_initial_guess(&self) -> QuoteCandidate {
        QuoteCandidate::symmetric(
            self.market.reference_price,
            self.config.optimizer.initial_spread_offset,
        )
    }

    /// The expected-profit objective for this configuration.
    #[must_use]
    pub fn objective(&self) -> ProfitObjective<'_, WeibullDistribution> {
        ProfitObjective::new(self.market, &self.distribution, self.order_flow, self.quadrature)
    }

    /// Searches for the ask/bid pair with the highest expected profit.
    pub fn compute_optimal_quotes(&self) -> OptimizationResult {
        let objective = self.objective();
        let result = self
            .optimizer
            .optimize(&objective, self.default_initial_guess(), &self.bounds);

        if let Some(quote) = result.quote() {
            info!(
                bid = quote.bid,
                ask = quote.ask,
                expected_profit = quote.expected_profit,
                "optimal quotes computed"
            );
        }
        result
    }

    /// Profit components of an arbitrary candidate.
    ///
    /// # Errors
    ///
    /// Returns `MMError::IntegrationFailed` if a cost integral fails.
    pub fn evaluate(&self, candidate: &QuoteCandidate) -> MMResult<ProfitBreakdown> {
        self.objective().breakdown(candidate)
    }

    /// Computes the optimum and rounds it outward onto a tick grid.
    ///
    /// # Errors
    ///
    /// Returns `MMError::OptimizationFailed` if the search fails, or
    /// `MMError::InvalidConfiguration` for a non-positive tick size.
    pub fn publish_quote(&self, tick_size: Decimal) -> MMResult<Quote> {
        let optimum = self.compute_optimal_quotes().into_result()?;
        Quote::from_prices(optimum.bid, optimum.ask, tick_size)
    }

    /// Density of the true-price distribution at `price`.
    #[must_use]
    pub fn density_at(&self, price: Price) -> f64 {
        self.distribution.density(price)
    }

    /// `n` reproducible draws from the true-price distribution.
    #[must_use]
    pub fn sample_distribution(&self, n: usize, seed: u64) -> Vec<Price> {
        self.distribution.sample(n, seed)
    }
}
