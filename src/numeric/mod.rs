//! Numerical routines used by the profit objective.

/// Adaptive Gauss–Kronrod quadrature on finite and semi-infinite intervals.
pub mod quadrature;

pub use quadrature::{Quadrature, QuadratureConfig};
