//! In-process composition of the factor and Heston simulators.
//!
//! The factor simulator runs first; one of its per-step series becomes the
//! single-column increments matrix of the Heston simulator.
//!
//! [`simulate_panel_pipeline`] does the same for a stock panel: correlated
//! factor increments drive every stock through its loadings row.

use synth_core::rng::SeedSource;
use synth_core::types::error::SimulationResult;
use tracing::debug;

use crate::factor::{
    CorrelatedFactorParams, CorrelatedFactorPaths, CorrelatedFactorSimulator, FactorModelParams,
    FactorPathResult, FactorPathSimulator,
};
use crate::heston::{
    HestonPanelParams, HestonPanelResult, HestonPanelSimulator, HestonParams, HestonPathResult,
    HestonPathSimulator,
};

/// Which factor series feeds the Heston drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FactorFeed {
    /// Cumulative factor levels (the last column of the factor CSV).
    #[default]
    Levels,
    /// Per-step factor shocks.
    Increments,
}

/// Combined output of [`simulate_pipeline`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineResult {
    /// Factor-model output
    pub factor: FactorPathResult,
    /// Heston output driven by the selected factor series
    pub heston: HestonPathResult,
    /// Series used as Heston input
    pub feed: FactorFeed,
}

/// Run the factor simulator and feed its output into the Heston simulator.
///
/// Both parameter sets are already validated; the exposure count is checked
/// against the single factor column before either simulator runs.
///
/// # Examples
///
/// ```
/// use synth_core::rng::SeedSource;
/// use synth_models::factor::FactorModelParams;
/// use synth_models::heston::HestonParams;
/// use synth_models::pipeline::{simulate_pipeline, FactorFeed};
///
/// let factor = FactorModelParams::new(10, 0.01, 1, vec![1.0], 42).unwrap();
/// let heston = HestonParams::new(
///     100.0, 0.04, 1.0, 0.04, 0.2, -0.5, 1.0 / 252.0, vec![1.0], 0.1,
/// )
/// .unwrap();
///
/// let result = simulate_pipeline(&factor, &heston, FactorFeed::Levels, SeedSource::Fixed(7)).unwrap();
/// assert_eq!(result.factor.factor_levels.len(), 10);
/// assert_eq!(result.heston.prices.len(), 11);
/// ```
pub fn simulate_pipeline(
    factor_params: &FactorModelParams,
    heston_params: &HestonParams,
    feed: FactorFeed,
    heston_seed: SeedSource,
) -> SimulationResult<PipelineResult> {
    heston_params.check_factor_count(1)?;

    debug!(?feed, duration = factor_params.duration(), "running factor/heston pipeline");

    let factor = FactorPathSimulator::new(factor_params.clone()).simulate();
    let increments = match feed {
        FactorFeed::Levels => factor.levels_matrix(),
        FactorFeed::Increments => factor.increments_matrix(),
    };
    let heston = HestonPathSimulator::new(heston_params.clone()).simulate(&increments, heston_seed)?;

    Ok(PipelineResult {
        factor,
        heston,
        feed,
    })
}

/// Combined output of [`simulate_panel_pipeline`].
#[derive(Clone, Debug, PartialEq)]
pub struct PanelPipelineResult {
    /// Correlated factor increments and levels
    pub factors: CorrelatedFactorPaths,
    /// Panel driven by the factor increments
    pub panel: HestonPanelResult,
}

/// Generate correlated factors and drive a Heston panel with their increments.
///
/// The loading column count is checked against the factor count before
/// either generator runs.
///
/// # Examples
///
/// ```
/// use synth_core::math::CorrelationMatrix;
/// use synth_core::rng::SeedSource;
/// use synth_core::types::PathMatrix;
/// use synth_models::factor::CorrelatedFactorParams;
/// use synth_models::heston::HestonPanelParams;
/// use synth_models::pipeline::simulate_panel_pipeline;
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.3, 0.3, 1.0], 2).unwrap();
/// let factors = CorrelatedFactorParams::new(30, vec![0.01, 0.008], corr, 42).unwrap();
/// let loadings = PathMatrix::from_rows(&[vec![0.5, -0.2], vec![1.0, 0.3]]).unwrap();
/// let panel = HestonPanelParams::new(
///     vec![100.0; 2], vec![0.04; 2], 1.5, 0.04, 0.3, -0.7, 1.0 / 252.0, loadings, 0.005,
/// )
/// .unwrap();
///
/// let result = simulate_panel_pipeline(&factors, &panel, SeedSource::Fixed(7)).unwrap();
/// assert_eq!(result.panel.prices.shape(), (31, 2));
/// ```
pub fn simulate_panel_pipeline(
    factor_params: &CorrelatedFactorParams,
    panel_params: &HestonPanelParams,
    heston_seed: SeedSource,
) -> SimulationResult<PanelPipelineResult> {
    panel_params.check_factor_count(factor_params.factor_count())?;

    debug!(
        duration = factor_params.duration(),
        factors = factor_params.factor_count(),
        stocks = panel_params.stocks(),
        "running correlated factor/heston panel pipeline"
    );

    let factors = CorrelatedFactorSimulator::new(factor_params.clone()).simulate();
    let panel =
        HestonPanelSimulator::new(panel_params.clone()).simulate(&factors.increments, heston_seed)?;

    Ok(PanelPipelineResult { factors, panel })
}
