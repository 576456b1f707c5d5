//! Common types and error definitions for the spread optimizer.
//!
//! This module contains:
//! - Error types using `thiserror`
//! - Type aliases for domain concepts

/// Error types for the spread optimizer.
pub mod error;

/// Common type aliases for prices and probabilities.
pub mod primitives;
