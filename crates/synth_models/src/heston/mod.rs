//! Heston stochastic-volatility paths driven by exogenous factor increments.
//!
//! The model evolves a price/variance pair:
//! ```text
//! dV = kappa * (theta - V) * dt + xi * sqrt(V) * dW_V
//! dS = S * (beta . dF) * dt + sqrt(V) * S * dW_S
//! E[dW_S * dW_V] = rho * dt
//! ```
//! discretised with an Euler step for the variance and a log-Euler step for
//! the price, both floored after every step.
//!
//! - `params`: Validated model parameters and Feller diagnostics
//! - `simulator`: The per-step recursion and its result record
//! - `panel`: The same recursion over a panel of stocks with a loadings matrix

pub mod panel;
pub mod params;
pub mod simulator;

pub use panel::{HestonPanelParams, HestonPanelResult, HestonPanelSimulator};
pub use params::HestonParams;
pub use simulator::{HestonPathResult, HestonPathSimulator, PRICE_FLOOR, VARIANCE_FLOOR};
