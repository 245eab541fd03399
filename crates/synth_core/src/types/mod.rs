//! Core value types shared by every simulator.
//!
//! - `error`: The `InvalidParameter` taxonomy raised before any simulation work
//! - `matrix`: Owned row-major `PathMatrix` used for factor inputs and path outputs
//!
//! # Re-exports
//!
//! [`SimulationError`], [`ParameterViolation`] and [`PathMatrix`] are re-exported
//! at this module level for convenience.

pub mod error;
pub mod matrix;

pub use error::{ParameterViolation, SimulationError, SimulationResult};
pub use matrix::PathMatrix;
