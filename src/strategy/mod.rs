//! Strategy module: what a quote pair is worth and how to find the best one.
//!
//! # Key Formulas
//!
//! ## Liquidity participation
//! ```text
//! pi_LB(K_A) = clamp(0.5 - s * (K_A - P0), 0, 0.5)
//! pi_LS(K_B) = clamp(0.5 - s * (P0 - K_B), 0, 0.5)
//! ```
//!
//! ## Expected profit
//! ```text
//! profit = (1 - Pi_I) * (pi_LB * (K_A - P0) + pi_LS * (P0 - K_B))
//!        - Pi_I * (E[(S - K_A)+] + E[(K_B - S)+])
//! ```
//!
//! With no informed flow each side is maximized at a distance of
//! `0.25 / s` from the reference price.

/// Expected-profit objective.
pub mod objective;

/// Bounded quote search.
pub mod optimizer;

/// Quote candidates, bounds and published quotes.
pub mod quote;

/// Optimizer configuration.
pub mod config;
