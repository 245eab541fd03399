//! Simulate command implementation
//!
//! Runs the factor and Heston simulators in-process and emits the combined
//! result as JSON or as the two CSV files.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use synth_core::rng::SeedSource;
use synth_models::pipeline::{simulate_pipeline, FactorFeed, PipelineResult};
use tracing::info;

use super::factor::{self, FactorModelArgs};
use super::heston::{self, HestonModelArgs};
use crate::config::CliConfig;
use crate::io::create_output;
use crate::Result;

/// Output format of `findata simulate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// Factor and Heston CSV files
    Csv,
}

/// Factor series feeding the Heston drift
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedArg {
    /// Cumulative factor levels
    Levels,
    /// Per-step factor shocks
    Increments,
}

impl From<FeedArg> for FactorFeed {
    fn from(feed: FeedArg) -> Self {
        match feed {
            FeedArg::Levels => FactorFeed::Levels,
            FeedArg::Increments => FactorFeed::Increments,
        }
    }
}

/// Arguments of `findata simulate`
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub factor: FactorModelArgs,

    #[command(flatten)]
    pub heston: HestonModelArgs,

    /// Seed of the Heston stream; drawn from OS entropy when omitted
    #[arg(long)]
    pub heston_seed: Option<u64>,

    /// Factor series used as Heston input
    #[arg(long, value_enum, default_value_t = FeedArg::Levels)]
    pub feed: FeedArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// JSON output path (stdout when omitted); ignored for CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// JSON payload of a pipeline run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationPayload {
    /// Cumulative factor level per step
    pub factor_levels: Vec<f64>,
    /// Heston prices, index 0 = initial price
    pub heston_prices: Vec<f64>,
    /// Heston variances, index 0 = initial variance
    pub heston_variances: Vec<f64>,
}

impl From<&PipelineResult> for SimulationPayload {
    fn from(result: &PipelineResult) -> Self {
        Self {
            factor_levels: result.factor.factor_levels.clone(),
            heston_prices: result.heston.prices.clone(),
            heston_variances: result.heston.variances.clone(),
        }
    }
}

/// Run the pipeline described by `args`.
pub fn simulate(args: &SimulateArgs) -> Result<PipelineResult> {
    let factor_params = args.factor.to_params()?;
    let heston_params = args.heston.to_params()?;

    Ok(simulate_pipeline(
        &factor_params,
        &heston_params,
        args.feed.into(),
        SeedSource::from(args.heston_seed),
    )?)
}

/// Serialise a pipeline result as the JSON payload.
pub fn write_json<W: Write>(writer: W, result: &PipelineResult) -> Result<()> {
    serde_json::to_writer_pretty(writer, &SimulationPayload::from(result))?;
    Ok(())
}

/// Run the simulate command
pub fn run(args: &SimulateArgs, config: &CliConfig) -> Result<()> {
    info!("Starting factor/Heston pipeline...");
    info!("  Duration: {}", args.factor.duration);
    info!("  Feed: {:?}", args.feed);
    info!("  Format: {:?}", args.format);

    let result = simulate(args)?;
    info!("  Heston seed: {}", result.heston.seed);

    match args.format {
        OutputFormat::Json => match &args.output {
            Some(path) => {
                write_json(create_output(path)?, &result)?;
                info!("JSON written to {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                write_json(&mut handle, &result)?;
                writeln!(handle)?;
            }
        },
        OutputFormat::Csv => {
            let factor_path = config.factor_path();
            let heston_path = config.heston_path();
            factor::write_result(&factor_path, &result.factor, config)?;
            heston::write_result(&heston_path, &result.heston, config)?;
            info!(
                "CSV written to {} and {}",
                factor_path.display(),
                heston_path.display()
            );
        }
    }

    info!("Simulation complete");
    Ok(())
}
