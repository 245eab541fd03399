//! # Synth Models (L2: Business Logic)
//!
//! Stochastic path simulators for synthetic multi-asset return generation.
//!
//! This crate provides:
//! - Single-factor linear return model (`factor::FactorPathSimulator`)
//! - Correlated multi-factor increments (`factor::correlated`)
//! - Heston stochastic-volatility paths driven by exogenous factor increments
//!   (`heston::HestonPathSimulator`)
//! - Multi-stock Heston panels over a loadings matrix (`heston::HestonPanelSimulator`)
//! - In-process composition of factors and Heston paths (`pipeline`)
//!
//! ## Design Principles
//!
//! - **Validate first**: parameter structures check an ordered precondition list at
//!   construction, so simulation never starts on bad input
//! - **Explicit seeds**: every stream is seeded from a [`SeedSource`]; entropy is opt-in
//! - **Named results**: each simulator returns a record with labelled fields
//!
//! ## Example
//!
//! ```
//! use synth_models::factor::{FactorModelParams, FactorPathSimulator};
//! use synth_models::heston::{HestonParams, HestonPathSimulator};
//! use synth_core::rng::SeedSource;
//!
//! let factor = FactorModelParams::new(5, 0.01, 2, vec![1.0, 0.5], 42).unwrap();
//! let paths = FactorPathSimulator::new(factor).simulate();
//!
//! let heston = HestonParams::new(
//!     100.0, 0.04, 1.0, 0.04, 0.2, -0.5, 1.0 / 252.0, vec![1.0], 0.1,
//! ).unwrap();
//! let result = HestonPathSimulator::new(heston)
//!     .simulate(&paths.increments_matrix(), SeedSource::Fixed(7))
//!     .unwrap();
//! assert_eq!(result.prices.len(), 6);
//! ```
//!
//! [`SeedSource`]: synth_core::rng::SeedSource

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod factor;
pub mod heston;
pub mod pipeline;
