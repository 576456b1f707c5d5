//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits, and functions
//! from the spread optimizer. Users can import everything they need with:
//!
//! ```rust
//! use spread_optimizer_rs::prelude::*;
//! ```

// Re-export types module
pub use crate::types::error::{MMError, MMResult};
pub use crate::types::primitives::{Price, Probability, Scale, Sensitivity, Shape};

// Re-export decimal helpers
pub use crate::{Decimal, dec};

// Re-export engine types
pub use crate::engine::{EngineConfig, QuoteEngine};

// Re-export strategy types
pub use crate::strategy::config::OptimizerConfig;
pub use crate::strategy::objective::{ProfitBreakdown, ProfitObjective, QuoteObjective};
pub use crate::strategy::optimizer::{
    FailureReason, OptimalQuote, OptimizationFailure, OptimizationResult, QuoteOptimizer,
};
pub use crate::strategy::quote::{Quote, QuoteBounds, QuoteCandidate};

// Re-export model components
pub use crate::distribution::{PriceDistribution, WeibullDistribution, WeibullParams};
pub use crate::market_state::snapshot::MarketState;
pub use crate::numeric::quadrature::{Quadrature, QuadratureConfig};
pub use crate::order_flow::{OrderFlowModel, OrderFlowParams};
