//! Market state module for representing the inputs of one quoting run.
//!
//! This module provides:
//! - The reference price the quotes are centred on
//! - The probability that the next counterparty is informed

/// Market state snapshot representation.
pub mod snapshot;
