//! Heston command implementation
//!
//! Reads the last column of a factor CSV as single-factor increments,
//! simulates a Heston path over it and writes the Heston CSV.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Args;
use synth_core::rng::SeedSource;
use synth_core::types::PathMatrix;
use synth_models::heston::{HestonParams, HestonPathResult, HestonPathSimulator};
use tracing::info;

use crate::config::CliConfig;
use crate::io::{create_output, read_factor_column, write_heston_csv};
use crate::Result;

/// Heston model parameters
#[derive(Args, Debug, Clone)]
pub struct HestonModelArgs {
    /// Initial price
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub initial_price: f64,

    /// Initial variance
    #[arg(long, default_value_t = 0.04, allow_negative_numbers = true)]
    pub initial_variance: f64,

    /// Mean-reversion speed of the variance
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub kappa: f64,

    /// Long-term variance
    #[arg(long, default_value_t = 0.04, allow_negative_numbers = true)]
    pub theta: f64,

    /// Volatility of variance
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub sigma_v: f64,

    /// Correlation between price and variance shocks
    #[arg(long, default_value_t = -0.7, allow_negative_numbers = true)]
    pub rho: f64,

    /// Time-step size
    #[arg(long, default_value_t = 0.01, allow_negative_numbers = true)]
    pub dt: f64,

    /// Idiosyncratic volatility
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub idiosyncratic: f64,

    /// Factor exposures (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "1",
        allow_hyphen_values = true
    )]
    pub exposures: Vec<f64>,
}

impl HestonModelArgs {
    /// Build validated model parameters.
    pub fn to_params(&self) -> Result<HestonParams> {
        Ok(HestonParams::new(
            self.initial_price,
            self.initial_variance,
            self.kappa,
            self.theta,
            self.sigma_v,
            self.rho,
            self.dt,
            self.exposures.clone(),
            self.idiosyncratic,
        )?)
    }
}

/// Arguments of `findata heston`
#[derive(Args, Debug, Clone)]
pub struct HestonArgs {
    #[command(flatten)]
    pub model: HestonModelArgs,

    /// Number of time steps to read from the factor file
    #[arg(short, long, default_value_t = 100)]
    pub duration: usize,

    /// Seed of the Heston stream; drawn from OS entropy when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Factor CSV to read (defaults to `factor_output` under `output_dir`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSV path (defaults to `heston_output` under `output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write a Heston result to `path`.
pub fn write_result(path: &Path, result: &HestonPathResult, config: &CliConfig) -> Result<()> {
    let file = create_output(path)?;
    write_heston_csv(file, result, config.float_precision)
}

/// Run the heston command
pub fn run(args: &HestonArgs, config: &CliConfig) -> Result<()> {
    let params = args.model.to_params()?;
    let input = args.input.clone().unwrap_or_else(|| config.factor_path());

    info!("Starting Heston simulation...");
    info!("  Factor input: {}", input.display());
    info!("  Duration: {}", args.duration);
    info!("  Feller ratio: {:.4}", params.feller_ratio());

    let column = read_factor_column(File::open(&input)?, args.duration)?;
    let increments = PathMatrix::from_column(&column);

    let result = HestonPathSimulator::new(params)
        .simulate(&increments, SeedSource::from(args.seed))?;

    let path = config.resolve_output(args.output.as_deref(), &config.heston_output);
    write_result(&path, &result, config)?;

    info!("Heston path (seed {}) written to {}", result.seed, path.display());
    Ok(())
}
