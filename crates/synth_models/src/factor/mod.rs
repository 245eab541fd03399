//! Factor return models.
//!
//! - `params`: Validated single-factor simulation parameters
//! - `simulator`: Single-factor shock path plus per-asset returns
//! - `correlated`: Multi-factor increments with a Cholesky-correlated covariance

pub mod correlated;
pub mod params;
pub mod simulator;

pub use correlated::{CorrelatedFactorParams, CorrelatedFactorPaths, CorrelatedFactorSimulator};
pub use params::FactorModelParams;
pub use simulator::{FactorPathResult, FactorPathSimulator};
