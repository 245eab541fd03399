//! # FinData CLI (Service Layer)
//!
//! Command-line front end of the synthetic path generator.
//!
//! ## Commands
//!
//! - `findata factor` - Single-factor paths to CSV
//! - `findata heston` - Heston path over the last column of a factor CSV
//! - `findata simulate` - Factor and Heston in-process, JSON or CSV output
//! - `findata correlated` - Correlated multi-factor increments to CSV
//! - `findata panel` - Heston panel over correlated factors to CSV
//!
//! ## Architecture
//!
//! This crate only moves typed values between files, arguments and the
//! simulators in `synth_models`; it holds no numerical logic of its own.

pub mod commands;
pub mod config;
pub mod error;
pub mod io;

pub use config::CliConfig;
pub use error::{CliError, Result};
