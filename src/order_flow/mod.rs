//! Order-flow module: how liquidity-motivated counterparties react to quotes.
//!
//! Wider quotes attract proportionally fewer liquidity traders. Participation
//! is capped at [`LIQUIDITY_CEILING`] per side and never goes negative.

/// Clamped linear participation model.
pub mod liquidity;

pub use liquidity::{LIQUIDITY_CEILING, OrderFlowModel, OrderFlowParams};
