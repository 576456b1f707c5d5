//! Price distribution module: beliefs about the true price of the asset.
//!
//! The optimizer only needs density evaluations; sampling exists for callers
//! that want to histogram the distribution.

/// Weibull price distribution.
pub mod weibull;

pub use weibull::{WeibullDistribution, WeibullParams};

use crate::types::primitives::{Price, Probability};

/// A continuous distribution over the true price of the asset.
///
/// Implementations must be pure: the same inputs always yield the same
/// outputs, and sampling draws only from the seed it is given.
pub trait PriceDistribution {
    /// Probability density at `price`. Zero for negative prices.
    fn density(&self, price: Price) -> f64;

    /// Cumulative probability that the true price is at most `price`.
    fn cdf(&self, price: Price) -> Probability;

    /// Expected true price.
    fn mean(&self) -> Price;

    /// Draws `n` independent prices from a generator seeded with `seed`.
    fn sample(&self, n: usize, seed: u64) -> Vec<Price>;
}
