//! Expected-profit objective over a quote pair.
//!
//! # Formula
//!
//! ```text
//! income        = (1 - Pi_I) * (pi_LB(K_A) * (K_A - P0) + pi_LS(K_B) * (P0 - K_B))
//! cost_above    = ∫_{K_A}^{∞} (S - K_A) f(S) dS
//! cost_below    = ∫_{0}^{K_B} (K_B - S) f(S) dS
//! profit        = income - Pi_I * (cost_above + cost_below)
//! ```
//!
//! The income term is spread captured from liquidity traders; the cost term is
//! what an informed trader extracts when the true price ends up beyond a quote.
//! Crossed quotes are not special-cased here; the optimizer's bounds keep the
//! search feasible.

use crate::distribution::PriceDistribution;
use crate::market_state::snapshot::MarketState;
use crate::numeric::quadrature::Quadrature;
use crate::order_flow::OrderFlowModel;
use crate::strategy::quote::QuoteCandidate;
use crate::types::error::MMResult;
use crate::types::primitives::Price;

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Anything the quote optimizer can maximize.
pub trait QuoteObjective {
    /// Expected profit of quoting `candidate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be computed reliably.
    fn expected_profit(&self, candidate: &QuoteCandidate) -> MMResult<f64>;

    /// Negated expected profit, the quantity the optimizer minimizes.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`QuoteObjective::expected_profit`].
    fn negated_profit(&self, candidate: &QuoteCandidate) -> MMResult<f64> {
        self.expected_profit(candidate).map(|profit| -profit)
    }
}

/// Components of the expected profit at one candidate.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct ProfitBreakdown {
    /// Liquidity-weighted spread captured on the ask.
    pub buy_side_income: f64,

    /// Liquidity-weighted spread captured on the bid.
    pub sell_side_income: f64,

    /// Total income, `(1 - Pi_I)` times the two sides.
    pub income: f64,

    /// Expected shortfall of the true price above the ask.
    pub cost_above_ask: f64,

    /// Expected shortfall of the true price below the bid.
    pub cost_below_bid: f64,

    /// `Pi_I` times the two shortfalls.
    pub adverse_selection_cost: f64,

    /// `income - adverse_selection_cost`.
    pub expected_profit: f64,
}

/// Expected profit of a quote pair under a price distribution and an
/// order-flow model.
#[derive(Debug, Clone)]
pub struct ProfitObjective<'a, D: PriceDistribution> {
    market: MarketState,
    distribution: &'a D,
    order_flow: OrderFlowModel,
    quadrature: Quadrature,
}

impl<'a, D: PriceDistribution> ProfitObjective<'a, D> {
    /// Creates the objective.
    #[must_use]
    pub fn new(
        market: MarketState,
        distribution: &'a D,
        order_flow: OrderFlowModel,
        quadrature: Quadrature,
    ) -> Self {
        Self {
            market,
            distribution,
            order_flow,
            quadrature,
        }
    }

    /// Market state the objective was built for.
    #[must_use]
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// Expected loss to an informed buyer at `ask`: `E[(S - ask)+]`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::IntegrationFailed` if the tail integral does not
    /// converge.
    pub fn cost_above_ask(&self, ask: Price) -> MMResult<f64> {
        // the density vanishes below zero, so a negative ask integrates from 0
        let lower = ask.max(0.0);
        self.quadrature
            .integrate_to_infinity(|s| (s - ask) * self.distribution.density(s), lower)
    }

    /// Expected loss to an informed seller at `bid`: `E[(bid - S)+]`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::IntegrationFailed` if the integral does not converge.
    pub fn cost_below_bid(&self, bid: Price) -> MMResult<f64> {
        if bid <= 0.0 {
            return Ok(0.0);
        }
        self.quadrature
            .integrate(|s| (bid - s) * self.distribution.density(s), 0.0, bid)
    }

    /// All components of the expected profit at `candidate`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::IntegrationFailed` if either cost integral fails.
    pub fn breakdown(&self, candidate: &QuoteCandidate) -> MMResult<ProfitBreakdown> {
        let p0 = self.market.reference_price;
        let informed = self.market.informed_trade_probability;

        let buy_side_income = self.order_flow.buyer_participation(candidate.ask) * (candidate.ask - p0);
        let sell_side_income = self.order_flow.seller_participation(candidate.bid) * (p0 - candidate.bid);
        let income = self.market.liquidity_trade_probability() * (buy_side_income + sell_side_income);

        let cost_above_ask = self.cost_above_ask(candidate.ask)?;
        let cost_below_bid = self.cost_below_bid(candidate.bid)?;
        let adverse_selection_cost = informed * (cost_above_ask + cost_below_bid);

        Ok(ProfitBreakdown {
            buy_side_income,
            sell_side_income,
            income,
            cost_above_ask,
            cost_below_bid,
            adverse_selection_cost,
            expected_profit: income - adverse_selection_cost,
        })
    }
}

impl<D: PriceDistribution> QuoteObjective for ProfitObjective<'_, D> {
    fn expected_profit(&self, candidate: &QuoteCandidate) -> MMResult<f64> {
        self.breakdown(candidate).map(|b| b.expected_profit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{WeibullDistribution, WeibullParams};
    use crate::order_flow::OrderFlowParams;
    use approx::assert_relative_eq;

    fn distribution() -> WeibullDistribution {
        WeibullDistribution::new(WeibullParams::new(10.0, 50.0).unwrap()).unwrap()
    }

    fn objective(dist: &WeibullDistribution, informed: f64) -> ProfitObjective<'_, WeibullDistribution> {
        let market = MarketState::new(51.0, informed).unwrap();
        let flow = OrderFlowModel::new(51.0, OrderFlowParams::default()).unwrap();
        ProfitObjective::new(market, dist, flow, Quadrature::default())
    }

    #[test]
    fn test_density_integrates_to_one() {
        let dist = distribution();
        let total = Quadrature::default()
            .integrate_to_infinity(|s| dist.density(s), 0.0)
            .unwrap();
        assert_relative_eq!(total, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_negated_profit_mirrors_expected_profit() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        let candidate = QuoteCandidate::new(54.0, 48.0);
        assert_eq!(
            obj.negated_profit(&candidate).unwrap(),
            -obj.expected_profit(&candidate).unwrap()
        );
    }

    #[test]
    fn test_cost_parity() {
        // E[(S-K)+] - E[(K-S)+] = E[S] - K
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        for k in [30.0, 47.0, 51.0, 60.0] {
            let above = obj.cost_above_ask(k).unwrap();
            let below = obj.cost_below_bid(k).unwrap();
            assert_relative_eq!(above - below, dist.mean() - k, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_costs_non_negative_and_monotone() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);

        let mut previous = f64::INFINITY;
        for i in 0..40 {
            let ask = 51.0 + i as f64 * 0.5;
            let cost = obj.cost_above_ask(ask).unwrap();
            assert!(cost >= -1e-12);
            assert!(cost <= previous + 1e-12);
            previous = cost;
        }

        let mut previous = f64::INFINITY;
        for i in 0..40 {
            let bid = 51.0 - i as f64;
            let cost = obj.cost_below_bid(bid).unwrap();
            assert!(cost >= -1e-12);
            assert!(cost <= previous + 1e-12);
            previous = cost;
        }
    }

    #[test]
    fn test_negative_bid_has_no_cost() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        assert_eq!(obj.cost_below_bid(-49.0).unwrap(), 0.0);
        assert_eq!(obj.cost_below_bid(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_ask_cost_is_mean_shift() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        let cost = obj.cost_above_ask(-10.0).unwrap();
        assert_relative_eq!(cost, dist.mean() + 10.0, epsilon = 1e-7);
    }

    #[test]
    fn test_far_ask_has_negligible_cost() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        assert!(obj.cost_above_ask(150.0).unwrap() < 1e-12);
    }

    #[test]
    fn test_breakdown_without_informed_flow() {
        let dist = distribution();
        let obj = objective(&dist, 0.0);
        let b = obj.breakdown(&QuoteCandidate::new(53.0, 49.0)).unwrap();

        // pi = 0.5 - 0.08 * 2 = 0.34 on each side
        assert_relative_eq!(b.buy_side_income, 0.68, epsilon = 1e-12);
        assert_relative_eq!(b.sell_side_income, 0.68, epsilon = 1e-12);
        assert_relative_eq!(b.income, 1.36, epsilon = 1e-12);
        assert_eq!(b.adverse_selection_cost, 0.0);
        assert_relative_eq!(b.expected_profit, 1.36, epsilon = 1e-12);
    }

    #[test]
    fn test_breakdown_composition() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        let b = obj.breakdown(&QuoteCandidate::new(55.0, 45.0)).unwrap();

        assert_relative_eq!(b.income, 0.6 * (b.buy_side_income + b.sell_side_income), epsilon = 1e-12);
        assert_relative_eq!(
            b.adverse_selection_cost,
            0.4 * (b.cost_above_ask + b.cost_below_bid),
            epsilon = 1e-12
        );
        assert_relative_eq!(b.expected_profit, b.income - b.adverse_selection_cost, epsilon = 1e-12);
        assert_relative_eq!(
            obj.expected_profit(&QuoteCandidate::new(55.0, 45.0)).unwrap(),
            b.expected_profit,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_informed_flow_lowers_profit() {
        let dist = distribution();
        let candidate = QuoteCandidate::new(54.0, 48.0);
        let low = objective(&dist, 0.1).expected_profit(&candidate).unwrap();
        let high = objective(&dist, 0.5).expected_profit(&candidate).unwrap();
        assert!(high < low);
    }

    #[test]
    fn test_crossed_quotes_still_evaluate() {
        let dist = distribution();
        let obj = objective(&dist, 0.4);
        let value = obj.expected_profit(&QuoteCandidate::new(49.0, 53.0)).unwrap();
        assert!(value.is_finite());
    }

    #[test]
    fn test_integration_failure_propagates() {
        use crate::numeric::quadrature::QuadratureConfig;
        use crate::types::error::MMError;

        let dist = distribution();
        let market = MarketState::new(51.0, 0.4).unwrap();
        let flow = OrderFlowModel::new(51.0, OrderFlowParams::default()).unwrap();
        let quadrature = Quadrature::new(QuadratureConfig::new(1e-15, 0.0, 1).unwrap()).unwrap();
        let obj = ProfitObjective::new(market, &dist, flow, quadrature);

        let result = obj.expected_profit(&QuoteCandidate::new(53.0, 49.0));
        assert!(matches!(result, Err(MMError::IntegrationFailed { .. })));
    }
}
