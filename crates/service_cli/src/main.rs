//! FinData CLI - synthetic factor and Heston path generation
//!
//! # Commands
//!
//! - `findata factor` - Simulate single-factor paths
//! - `findata heston` - Simulate a Heston path over factor output
//! - `findata simulate` - Run both in one process
//! - `findata correlated` - Simulate correlated multi-factor increments
//! - `findata panel` - Simulate a Heston panel over correlated factors

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use service_cli::commands::{
    self, CorrelatedArgs, FactorArgs, HestonArgs, PanelArgs, SimulateArgs,
};
use service_cli::config::DEFAULT_CONFIG_FILE;
use service_cli::{CliConfig, CliError, Result};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// FinData synthetic path generator CLI
#[derive(Parser)]
#[command(name = "findata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate single-factor asset returns and factor levels
    Factor(FactorArgs),

    /// Simulate a Heston price/variance path driven by a factor CSV
    Heston(HestonArgs),

    /// Run the factor and Heston simulators in one process
    Simulate(SimulateArgs),

    /// Simulate correlated multi-factor increments
    Correlated(CorrelatedArgs),

    /// Simulate a multi-stock Heston panel over correlated factors
    Panel(PanelArgs),
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn dispatch(command: &Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Factor(args) => commands::factor::run(args, config),
        Commands::Heston(args) => commands::heston::run(args, config),
        Commands::Simulate(args) => commands::simulate::run(args, config),
        Commands::Correlated(args) => commands::correlated::run(args, config),
        Commands::Panel(args) => commands::panel::run(args, config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = CliConfig::load_with_env_and_validate(&cli.config);
    let level = match (&loaded, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.log_level.to_lowercase(),
        (Err(_), false) => "info".to_string(),
    };
    init_tracing(&level);

    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    let result = loaded
        .map_err(CliError::from)
        .and_then(|config| dispatch(&cli.command, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
