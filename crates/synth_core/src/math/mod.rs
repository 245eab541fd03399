//! Linear algebra helpers for correlated factor draws.
//!
//! - `correlation`: Validated correlation matrices and lower-triangular Cholesky factors

pub mod correlation;

pub use correlation::{CholeskyFactor, CorrelationMatrix};
