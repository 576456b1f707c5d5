//! Quote types: candidates explored by the optimizer, the feasible box they
//! live in, and the tick-rounded quote that gets published.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::types::error::{MMError, MMResult};
use crate::types::primitives::Price;

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

/// A candidate ask/bid pair (K_A, K_B).
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct QuoteCandidate {
    /// Ask price (K_A), where the market maker sells.
    pub ask: Price,

    /// Bid price (K_B), where the market maker buys.
    pub bid: Price,
}

impl QuoteCandidate {
    /// Creates a candidate from an ask and a bid.
    #[must_use]
    pub fn new(ask: Price, bid: Price) -> Self {
        Self { ask, bid }
    }

    /// Candidate placed `offset` above and below `reference_price`.
    #[must_use]
    pub fn symmetric(reference_price: Price, offset: Price) -> Self {
        Self {
            ask: reference_price + offset,
            bid: reference_price - offset,
        }
    }

    /// Ask minus bid.
    #[must_use]
    pub fn spread(&self) -> Price {
        self.ask - self.bid
    }

    /// Returns true if both prices are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.ask.is_finite() && self.bid.is_finite()
    }
}

/// Box constraint on candidates: `ask ∈ [ask_min, ask_max]`,
/// `bid ∈ [bid_min, bid_max]`. `ask_max` may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteBounds {
    ask_min: Price,
    ask_max: Price,
    bid_min: Price,
    bid_max: Price,
}

impl QuoteBounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if a bound is NaN, a lower
    /// bound exceeds its upper bound, or a lower bound is infinite.
    pub fn new(ask_min: Price, ask_max: Price, bid_min: Price, bid_max: Price) -> MMResult<Self> {
        if [ask_min, ask_max, bid_min, bid_max].iter().any(|b| b.is_nan()) {
            return Err(MMError::InvalidConfiguration(
                "quote bounds must not be NaN".to_string(),
            ));
        }
        if !ask_min.is_finite() || !bid_min.is_finite() || !bid_max.is_finite() {
            return Err(MMError::InvalidConfiguration(
                "only the upper ask bound may be infinite".to_string(),
            ));
        }
        if ask_min > ask_max || bid_min > bid_max {
            return Err(MMError::InvalidConfiguration(
                "quote lower bounds must not exceed upper bounds".to_string(),
            ));
        }
        Ok(Self {
            ask_min,
            ask_max,
            bid_min,
            bid_max,
        })
    }

    /// Feasible region around the reference price:
    /// `ask ∈ [P0, ∞)`, `bid ∈ [P0 - bid_search_width, P0]`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if `bid_search_width` is
    /// negative or not finite.
    pub fn around_reference(reference_price: Price, bid_search_width: Price) -> MMResult<Self> {
        if !bid_search_width.is_finite() || bid_search_width < 0.0 {
            return Err(MMError::InvalidConfiguration(
                "bid_search_width must be non-negative and finite".to_string(),
            ));
        }
        Self::new(
            reference_price,
            f64::INFINITY,
            reference_price - bid_search_width,
            reference_price,
        )
    }

    /// Lowest admissible ask.
    #[must_use]
    pub fn ask_min(&self) -> Price {
        self.ask_min
    }

    /// Highest admissible ask.
    #[must_use]
    pub fn ask_max(&self) -> Price {
        self.ask_max
    }

    /// Lowest admissible bid.
    #[must_use]
    pub fn bid_min(&self) -> Price {
        self.bid_min
    }

    /// Highest admissible bid.
    #[must_use]
    pub fn bid_max(&self) -> Price {
        self.bid_max
    }

    /// Returns true if the candidate lies inside the box.
    #[must_use]
    pub fn contains(&self, candidate: &QuoteCandidate) -> bool {
        (self.ask_min..=self.ask_max).contains(&candidate.ask)
            && (self.bid_min..=self.bid_max).contains(&candidate.bid)
    }

    /// Nearest point of the box to `candidate`.
    #[must_use]
    pub fn project(&self, candidate: QuoteCandidate) -> QuoteCandidate {
        QuoteCandidate {
            ask: candidate.ask.max(self.ask_min).min(self.ask_max),
            bid: candidate.bid.max(self.bid_min).min(self.bid_max),
        }
    }
}

/// A quote ready to publish, on a tick grid.
///
/// The bid is rounded down and the ask up, so rounding never moves a quote
/// across the reference price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    /// Bid price.
    pub bid: Decimal,

    /// Ask price.
    pub ask: Decimal,

    /// Tick size the prices are aligned to.
    pub tick_size: Decimal,
}

impl Quote {
    /// Rounds raw prices outward onto the `tick_size` grid.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if `tick_size` is not positive
    /// or a price cannot be represented as a `Decimal`.
    pub fn from_prices(bid: Price, ask: Price, tick_size: Decimal) -> MMResult<Self> {
        if tick_size <= Decimal::ZERO {
            return Err(MMError::InvalidConfiguration(
                "tick_size must be positive".to_string(),
            ));
        }
        let bid = to_decimal(bid, "bid")?;
        let ask = to_decimal(ask, "ask")?;

        Ok(Self {
            bid: (bid / tick_size).floor() * tick_size,
            ask: (ask / tick_size).ceil() * tick_size,
            tick_size,
        })
    }

    /// Ask minus bid.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Midpoint of bid and ask.
    #[must_use]
    pub fn mid(&self) -> Decimal {
        (self.ask + self.bid) / Decimal::TWO
    }
}

fn to_decimal(price: Price, side: &str) -> MMResult<Decimal> {
    Decimal::from_f64(price).ok_or_else(|| {
        MMError::InvalidConfiguration(format!("{side} price {price} is not representable"))
    })
}
