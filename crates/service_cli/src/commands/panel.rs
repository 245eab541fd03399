//! Panel command implementation
//!
//! Generates correlated factor increments and drives a panel of Heston
//! stocks with them, one loading row per stock.

use std::path::PathBuf;

use clap::Args;
use synth_core::rng::SeedSource;
use synth_core::types::PathMatrix;
use synth_models::heston::HestonPanelParams;
use synth_models::pipeline::{simulate_panel_pipeline, PanelPipelineResult};
use tracing::info;

use super::correlated::factor_params;
use crate::config::CliConfig;
use crate::io::{create_output, write_panel_csv};
use crate::{CliError, Result};

/// Arguments of `findata panel`
#[derive(Args, Debug, Clone)]
pub struct PanelArgs {
    /// Number of time steps
    #[arg(short, long, default_value_t = 100)]
    pub duration: usize,

    /// Per-factor volatilities (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0.01,0.008,0.006",
        allow_hyphen_values = true
    )]
    pub vols: Vec<f64>,

    /// Factor correlation matrix entries, row-major (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "1,0.3,-0.2,0.3,1,0.1,-0.2,0.1,1",
        allow_hyphen_values = true
    )]
    pub correlation: Vec<f64>,

    /// Seed of the factor stream
    #[arg(long, default_value_t = 42)]
    pub factor_seed: u64,

    /// Number of stocks
    #[arg(long, default_value_t = 5)]
    pub stocks: usize,

    /// Loadings, row-major `stocks x factors`; a single value applies to every entry
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0.5",
        allow_hyphen_values = true
    )]
    pub loadings: Vec<f64>,

    /// Initial price of every stock
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub initial_price: f64,

    /// Initial variance of every stock
    #[arg(long, default_value_t = 0.04, allow_negative_numbers = true)]
    pub initial_variance: f64,

    /// Mean-reversion speed of the variance
    #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
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
    #[arg(long, default_value_t = 0.005, allow_negative_numbers = true)]
    pub idiosyncratic: f64,

    /// Seed of the Heston stream; drawn from OS entropy when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output CSV path (defaults to `panel_output` under `output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl PanelArgs {
    /// Expand `--loadings` into a `stocks x factors` matrix.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `--loadings` holds one value or exactly
    /// `stocks * factors` values.
    pub fn loading_matrix(&self) -> Result<PathMatrix> {
        let factors = self.vols.len();
        let expected = self.stocks * factors;
        let data = match self.loadings.as_slice() {
            [value] => vec![*value; expected],
            values if values.len() == expected => values.to_vec(),
            values => {
                return Err(CliError::invalid_argument(format!(
                    "--loadings needs 1 or {} entries ({} stocks x {} factors), got {}",
                    expected,
                    self.stocks,
                    factors,
                    values.len()
                )))
            }
        };
        Ok(PathMatrix::from_vec(self.stocks, factors, data)?)
    }

    /// Build validated panel parameters.
    pub fn to_params(&self) -> Result<HestonPanelParams> {
        Ok(HestonPanelParams::new(
            vec![self.initial_price; self.stocks],
            vec![self.initial_variance; self.stocks],
            self.kappa,
            self.theta,
            self.sigma_v,
            self.rho,
            self.dt,
            self.loading_matrix()?,
            self.idiosyncratic,
        )?)
    }
}

/// Build both parameter sets and run the panel pipeline.
pub fn simulate(args: &PanelArgs) -> Result<PanelPipelineResult> {
    let factors = factor_params(args.duration, &args.vols, &args.correlation, args.factor_seed)?;
    let panel = args.to_params()?;
    Ok(simulate_panel_pipeline(&factors, &panel, SeedSource::from(args.seed))?)
}

/// Run the panel command
pub fn run(args: &PanelArgs, config: &CliConfig) -> Result<()> {
    info!("Starting Heston panel simulation...");
    info!("  Duration: {}", args.duration);
    info!("  Factors: {}", args.vols.len());
    info!("  Stocks: {}", args.stocks);

    let result = simulate(args)?;

    let path = config.resolve_output(args.output.as_deref(), &config.panel_output);
    write_panel_csv(create_output(&path)?, &result.panel, config.float_precision)?;

    info!("Heston panel (seed {}) written to {}", result.panel.seed, path.display());
    Ok(())
}
