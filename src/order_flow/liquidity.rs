//! Clamped linear participation model.
//!
//! ```text
//! pi_LB(K_A) = clamp(0.5 - sensitivity * (K_A - P0), 0, 0.5)
//! pi_LS(K_B) = clamp(0.5 - sensitivity * (P0 - K_B), 0, 0.5)
//! ```

use crate::types::error::{MMError, MMResult};
use crate::types::primitives::{Price, Probability, Sensitivity};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Maximum participation probability of liquidity traders on one side.
pub const LIQUIDITY_CEILING: Probability = 0.5;

/// Default participation lost per unit of distance from the reference price.
pub const DEFAULT_SENSITIVITY: Sensitivity = 0.08;

/// Parameters of the order-flow model.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct OrderFlowParams {
    /// Participation lost per unit of quote distance. Must be positive.
    pub sensitivity: Sensitivity,
}

impl OrderFlowParams {
    /// Creates validated order-flow parameters.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if `sensitivity` is not
    /// strictly positive and finite.
    pub fn new(sensitivity: Sensitivity) -> MMResult<Self> {
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "sensitivity must be positive".to_string(),
            ));
        }
        Ok(Self { sensitivity })
    }
}

impl Default for OrderFlowParams {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// Participation probabilities of liquidity buyers and sellers around a
/// reference price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderFlowModel {
    reference_price: Price,
    sensitivity: Sensitivity,
}

impl OrderFlowModel {
    /// Creates the model centred on `reference_price`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if the parameters are invalid.
    pub fn new(reference_price: Price, params: OrderFlowParams) -> MMResult<Self> {
        let params = OrderFlowParams::new(params.sensitivity)?;
        Ok(Self {
            reference_price,
            sensitivity: params.sensitivity,
        })
    }

    /// Returns the configured sensitivity.
    #[must_use]
    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    /// Returns the reference price the model is centred on.
    #[must_use]
    pub fn reference_price(&self) -> Price {
        self.reference_price
    }

    /// Probability that a liquidity buyer lifts an ask at `ask` (pi_LB).
    #[must_use]
    pub fn buyer_participation(&self, ask: Price) -> Probability {
        self.participation(ask - self.reference_price)
    }

    /// Probability that a liquidity seller hits a bid at `bid` (pi_LS).
    #[must_use]
    pub fn seller_participation(&self, bid: Price) -> Probability {
        self.participation(self.reference_price - bid)
    }

    /// Quote distance at which liquidity participation reaches zero.
    #[must_use]
    pub fn zero_participation_distance(&self) -> Price {
        LIQUIDITY_CEILING / self.sensitivity
    }

    fn participation(&self, distance: Price) -> Probability {
        (LIQUIDITY_CEILING - self.sensitivity * distance).clamp(0.0, LIQUIDITY_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> OrderFlowModel {
        OrderFlowModel::new(51.0, OrderFlowParams::default()).unwrap()
    }

    #[test]
    fn test_default_sensitivity() {
        assert_eq!(OrderFlowParams::default().sensitivity, 0.08);
    }

    #[test]
    fn test_invalid_sensitivity() {
        for s in [0.0, -0.08, f64::NAN] {
            let result = OrderFlowParams::new(s);
            if let Err(MMError::InvalidConfiguration(msg)) = result {
                assert!(msg.contains("sensitivity must be positive"));
            } else {
                panic!("expected InvalidConfiguration for {s}");
            }
        }
        let raw = OrderFlowParams { sensitivity: -1.0 };
        assert!(OrderFlowModel::new(51.0, raw).is_err());
    }

    #[test]
    fn test_at_reference_price() {
        let m = model();
        assert_eq!(m.buyer_participation(51.0), 0.5);
        assert_eq!(m.seller_participation(51.0), 0.5);
    }

    #[test]
    fn test_linear_region() {
        let m = model();
        assert_relative_eq!(m.buyer_participation(53.0), 0.34, epsilon = 1e-12);
        assert_relative_eq!(m.seller_participation(49.0), 0.34, epsilon = 1e-12);
    }

    #[test]
    fn test_clamped_at_zero() {
        let m = model();
        assert_eq!(m.buyer_participation(51.0 + 6.25), 0.0);
        assert_eq!(m.buyer_participation(100.0), 0.0);
        assert_eq!(m.seller_participation(0.0), 0.0);
    }

    #[test]
    fn test_clamped_at_ceiling_for_crossed_quotes() {
        let m = model();
        assert_eq!(m.buyer_participation(40.0), 0.5);
        assert_eq!(m.seller_participation(60.0), 0.5);
    }

    #[test]
    fn test_buyer_participation_bounded_and_non_increasing() {
        let m = model();
        let mut previous = f64::INFINITY;
        for i in 0..=200 {
            let ask = 51.0 + i as f64 * 0.05;
            let p = m.buyer_participation(ask);
            assert!((0.0..=0.5).contains(&p));
            assert!(p <= previous);
            previous = p;
        }
    }

    #[test]
    fn test_seller_participation_bounded_and_non_increasing() {
        let m = model();
        let mut previous = f64::INFINITY;
        for i in 0..=200 {
            let bid = 51.0 - i as f64 * 0.05;
            let p = m.seller_participation(bid);
            assert!((0.0..=0.5).contains(&p));
            assert!(p <= previous);
            previous = p;
        }
    }

    #[test]
    fn test_symmetry() {
        let m = model();
        for d in [0.0, 0.5, 2.0, 4.0, 7.0] {
            assert_eq!(m.buyer_participation(51.0 + d), m.seller_participation(51.0 - d));
        }
    }

    #[test]
    fn test_zero_participation_distance() {
        assert_relative_eq!(model().zero_participation_distance(), 6.25, epsilon = 1e-12);
    }
}
