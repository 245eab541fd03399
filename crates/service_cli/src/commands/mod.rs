//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod correlated;
pub mod factor;
pub mod heston;
pub mod panel;
pub mod simulate;

pub use correlated::CorrelatedArgs;
pub use factor::{FactorArgs, FactorModelArgs};
pub use heston::{HestonArgs, HestonModelArgs};
pub use panel::PanelArgs;
pub use simulate::{FeedArg, OutputFormat, SimulateArgs};
