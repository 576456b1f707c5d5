//! Market state snapshot representation.

use crate::types::error::{MMError, MMResult};
use crate::types::primitives::{Price, Probability};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// Observable state of the market for one optimization run.
///
/// Read-only once constructed; every objective evaluation of a run sees the
/// same snapshot.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct MarketState {
    /// Reference price (P0), the market maker's best estimate of fair value.
    pub reference_price: Price,

    /// Probability (Pi_I) that a counterparty trades on private information.
    pub informed_trade_probability: Probability,
}

impl MarketState {
    /// Creates a new market state snapshot with validation.
    ///
    /// # Arguments
    ///
    /// * `reference_price` - Reference price P0, must be positive and finite
    /// * `informed_trade_probability` - Pi_I, must lie in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if either value is out of range.
    pub fn new(reference_price: Price, informed_trade_probability: Probability) -> MMResult<Self> {
        if !reference_price.is_finite() || reference_price <= 0.0 {
            return Err(MMError::InvalidConfiguration(
                "reference_price must be positive and finite".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&informed_trade_probability) {
            return Err(MMError::InvalidConfiguration(
                "informed_trade_probability must be in [0, 1]".to_string(),
            ));
        }

        Ok(Self {
            reference_price,
            informed_trade_probability,
        })
    }

    /// Probability that a counterparty is liquidity-motivated (1 - Pi_I).
    #[must_use]
    pub fn liquidity_trade_probability(&self) -> Probability {
        1.0 - self.informed_trade_probability
    }
}
