//! # synth_core: Foundation for Synthetic Return-Path Generation
//!
//! ## Layer 1 (Foundation) Role
//!
//! synth_core is the bottom layer of the workspace, providing:
//! - Error taxonomy: `SimulationError`, `ParameterViolation` (`types::error`)
//! - Owned row-major matrices for paths and factor inputs (`types::matrix`)
//! - Seeded, reproducible random number generation (`rng`)
//! - Correlation matrices and Cholesky factors (`math::correlation`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - rand / rand_distr: Pseudo-random streams and the standard normal sampler
//! - thiserror: Structured error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use synth_core::rng::SimRng;
//! use synth_core::types::PathMatrix;
//!
//! let mut rng = SimRng::from_seed(42);
//! let mut increments = PathMatrix::zeros(3, 1);
//! for t in 0..3 {
//!     increments.set(t, 0, rng.gen_normal());
//! }
//! assert_eq!(increments.nrows(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
