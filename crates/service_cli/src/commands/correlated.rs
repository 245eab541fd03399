//! Correlated command implementation
//!
//! Simulates correlated multi-factor increments and writes them with their
//! cumulative levels.

use std::path::PathBuf;

use clap::Args;
use synth_core::math::CorrelationMatrix;
use synth_models::factor::{CorrelatedFactorParams, CorrelatedFactorPaths, CorrelatedFactorSimulator};
use tracing::info;

use crate::config::CliConfig;
use crate::io::{create_output, write_correlated_csv};
use crate::{CliError, Result};

/// Arguments of `findata correlated`
#[derive(Args, Debug, Clone)]
pub struct CorrelatedArgs {
    /// Number of time steps
    #[arg(short, long, default_value_t = 100)]
    pub duration: usize,

    /// Per-factor volatilities (comma separated)
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub vols: Vec<f64>,

    /// Correlation matrix entries, row-major (comma separated)
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub correlation: Vec<f64>,

    /// Seed of the factor stream
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV path (defaults to `correlated_output` under `output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Build validated factor parameters from the command-line values.
///
/// # Errors
///
/// `InvalidArgument` when `--correlation` does not hold `vols.len()^2`
/// entries; parameter violations otherwise.
pub fn factor_params(
    duration: usize,
    vols: &[f64],
    correlation: &[f64],
    seed: u64,
) -> Result<CorrelatedFactorParams> {
    let factors = vols.len();
    if correlation.len() != factors * factors {
        return Err(CliError::invalid_argument(format!(
            "--correlation needs {} entries for {} factors, got {}",
            factors * factors,
            factors,
            correlation.len()
        )));
    }

    let matrix = CorrelationMatrix::new(correlation, factors)?;
    Ok(CorrelatedFactorParams::new(duration, vols.to_vec(), matrix, seed)?)
}

/// Build parameters and run the simulator.
pub fn simulate(args: &CorrelatedArgs) -> Result<CorrelatedFactorPaths> {
    let params = factor_params(args.duration, &args.vols, &args.correlation, args.seed)?;
    Ok(CorrelatedFactorSimulator::new(params).simulate())
}

/// Run the correlated command
pub fn run(args: &CorrelatedArgs, config: &CliConfig) -> Result<()> {
    info!("Starting correlated factor simulation...");
    info!("  Duration: {}", args.duration);
    info!("  Factors: {}", args.vols.len());
    info!("  Seed: {}", args.seed);

    let paths = simulate(args)?;

    let path = config.resolve_output(args.output.as_deref(), &config.correlated_output);
    write_correlated_csv(create_output(&path)?, &paths, config.float_precision)?;

    info!("Correlated factors written to {}", path.display());
    Ok(())
}
