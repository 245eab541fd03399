//! Factor command implementation
//!
//! Simulates the single-factor model and writes the factor CSV.

use std::path::{Path, PathBuf};

use clap::Args;
use synth_models::factor::{FactorModelParams, FactorPathResult, FactorPathSimulator};
use tracing::info;

use crate::config::CliConfig;
use crate::io::{create_output, write_factor_csv};
use crate::Result;

/// Single-factor model parameters
#[derive(Args, Debug, Clone)]
pub struct FactorModelArgs {
    /// Number of time steps
    #[arg(short, long, default_value_t = 100)]
    pub duration: usize,

    /// Standard deviation of the common factor shock
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    pub volatility: f64,

    /// Number of assets
    #[arg(short, long, default_value_t = 1)]
    pub assets: usize,

    /// Per-asset betas (comma separated); 1.0 for every asset when omitted
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub betas: Vec<f64>,

    /// Seed of the factor stream
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,
}

impl FactorModelArgs {
    /// Build validated model parameters.
    pub fn to_params(&self) -> Result<FactorModelParams> {
        let params = if self.betas.is_empty() {
            FactorModelParams::with_unit_betas(self.duration, self.volatility, self.assets, self.seed)?
        } else {
            FactorModelParams::new(
                self.duration,
                self.volatility,
                self.assets,
                self.betas.clone(),
                self.seed,
            )?
        };
        Ok(params)
    }
}

/// Arguments of `findata factor`
#[derive(Args, Debug, Clone)]
pub struct FactorArgs {
    #[command(flatten)]
    pub model: FactorModelArgs,

    /// Output CSV path (defaults to `factor_output` under `output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write a factor result to `path`.
pub fn write_result(path: &Path, result: &FactorPathResult, config: &CliConfig) -> Result<()> {
    let file = create_output(path)?;
    write_factor_csv(file, result, config.float_precision)
}

/// Run the factor command
pub fn run(args: &FactorArgs, config: &CliConfig) -> Result<()> {
    let params = args.model.to_params()?;

    info!("Starting factor simulation...");
    info!("  Duration: {}", params.duration());
    info!("  Factor volatility: {}", params.factor_volatility());
    info!("  Assets: {}", params.asset_count());
    info!("  Seed: {}", params.seed());

    let result = FactorPathSimulator::new(params).simulate();

    let path = config.resolve_output(args.output.as_deref(), &config.factor_output);
    write_result(&path, &result, config)?;

    info!("Factor paths written to {}", path.display());
    Ok(())
}
