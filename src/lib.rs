//! Spread Optimizer Library
//!
//! A Rust library that computes the bid and ask a market maker should post when
//! part of its order flow is informed. The market maker earns the spread from
//! liquidity-motivated counterparties and loses to informed counterparties
//! whenever the true price ends up beyond one of its quotes.
//!
//! # Overview
//!
//! Beliefs about the true price are a Weibull distribution with shape `k` and
//! scale `λ`. Liquidity traders participate less the further a quote sits from
//! the reference price `P0`. For a candidate pair `(K_A, K_B)`:
//!
//! ```text
//! income = (1 - Pi_I) * (pi_LB(K_A) * (K_A - P0) + pi_LS(K_B) * (P0 - K_B))
//! cost   = Pi_I * (E[(S - K_A)+] + E[(K_B - S)+])
//! profit = income - cost
//! ```
//!
//! The adverse-selection cost is computed by adaptive quadrature and the
//! profit is maximized with a bounded Nelder–Mead search over
//! `K_A ∈ [P0, ∞)`, `K_B ∈ [P0 - 10k, P0]`.
//!
//! ## Key Challenges
//!
//! - **Adverse Selection**: Informed traders only trade when the quote is wrong
//! - **Participation**: Wider quotes earn more per trade but attract fewer trades
//! - **Non-smooth Objective**: Participation is clamped, so there are kinks
//!
//! # Modules
//!
//! - [`engine`]: Configuration and the quote computation entry point
//! - [`strategy`]: Profit objective, quote search and quote types
//! - [`distribution`]: True-price distribution
//! - [`order_flow`]: Liquidity trader participation
//! - [`market_state`]: Reference price and informed-trade probability
//! - [`numeric`]: Adaptive quadrature
//! - [`types`]: Common types and error definitions
//!
//! # Examples
//!
//! ```rust
//! use spread_optimizer_rs::prelude::*;
//!
//! let engine = QuoteEngine::new(EngineConfig::default()).unwrap();
//! match engine.compute_optimal_quotes() {
//!     OptimizationResult::Converged(quote) => {
//!         assert!(quote.bid < quote.ask);
//!     }
//!     OptimizationResult::Failed(failure) => panic!("{}", failure.reason),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Quote engine facade.
///
/// This module owns the configuration and exposes:
/// - Optimal quote computation
/// - Density and sampling accessors for plotting
pub mod engine;

/// Strategy module containing the profit objective and quote search.
///
/// This module implements:
/// - Expected profit with adverse-selection cost
/// - Bounded Nelder–Mead optimization
/// - Quote candidates, bounds and tick rounding
pub mod strategy;

/// True-price distribution module.
pub mod distribution;

/// Liquidity order-flow module.
pub mod order_flow;

/// Market state module for the inputs of a quoting run.
pub mod market_state;

/// Numerical integration.
pub mod numeric;

/// Common types and error definitions.
///
/// This module contains:
/// - Error types using thiserror
/// - Type aliases for domain concepts
pub mod types;

/// Convenient re-exports.
pub mod prelude;
