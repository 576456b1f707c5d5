//! Primitive type aliases for the quoting domain.

/// Price value in the market, represented as f64.
pub type Price = f64;

/// Probability in `[0, 1]`, represented as f64.
pub type Probability = f64;

/// Weibull shape parameter (k), represented as f64.
pub type Shape = f64;

/// Weibull scale parameter (λ), represented as f64.
pub type Scale = f64;

/// Order-flow sensitivity: participation lost per unit of quote distance.
pub type Sensitivity = f64;
