//! Heston paths for a panel of stocks sharing one set of dynamics.
//!
//! Each stock `i` has its own initial price, initial variance and a row of
//! factor loadings; `kappa`, `theta`, `xi`, `rho`, `dt` and the idiosyncratic
//! scale are shared. The drift of stock `i` at step `t` is
//! `loadings[i] . increments[t]`, and the per-stock update is the same
//! recursion as [`HestonPathSimulator`].
//!
//! ## Draw order
//!
//! Within a step, stocks are visited in index order and each consumes the
//! idiosyncratic draw, `z_v` and `z_s`. A one-stock panel therefore consumes
//! the stream exactly like the single-path simulator.
//!
//! [`HestonPathSimulator`]: super::HestonPathSimulator

use synth_core::rng::{SeedSource, SimRng};
use synth_core::types::error::{first_violation, ParameterViolation, SimulationResult};
use synth_core::types::PathMatrix;
use tracing::{debug, info, warn};

use super::params::{dynamics_preconditions, initial_price_check, initial_variance_check};
use super::simulator::{check_finite_increments, HestonStep, PRICE_FLOOR, VARIANCE_FLOOR};

/// Parameters of a multi-stock Heston panel.
///
/// # Fields
///
/// * `initial_prices` - One initial price per stock (> 0)
/// * `initial_variances` - One initial variance per stock (>= 0)
/// * `loadings` - `stocks x factors` matrix of factor loadings
///
/// The shared scalars carry the same bounds as [`HestonParams`].
///
/// [`HestonParams`]: super::HestonParams
///
/// # Examples
///
/// ```
/// use synth_core::types::PathMatrix;
/// use synth_models::heston::HestonPanelParams;
///
/// let loadings = PathMatrix::from_rows(&[vec![1.0], vec![0.5]]).unwrap();
/// let params = HestonPanelParams::new(
///     vec![100.0, 50.0], vec![0.04, 0.09], 1.0, 0.04, 0.2, -0.5, 1.0 / 252.0, loadings, 0.1,
/// );
/// assert!(params.is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HestonPanelParams {
    initial_prices: Vec<f64>,
    initial_variances: Vec<f64>,
    mean_reversion_speed: f64,
    long_term_variance: f64,
    vol_of_variance: f64,
    correlation: f64,
    time_step: f64,
    loadings: PathMatrix,
    idiosyncratic_volatility: f64,
}

impl HestonPanelParams {
    /// Create validated panel parameters.
    ///
    /// Checks run in this order: time step, mean-reversion speed, long-term
    /// variance, vol-of-variance, correlation, idiosyncratic volatility,
    /// non-empty panel, matching price/variance counts, one loading row per
    /// stock, then per-stock initial price and variance, then finite
    /// loadings.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initial_prices: Vec<f64>,
        initial_variances: Vec<f64>,
        mean_reversion_speed: f64,
        long_term_variance: f64,
        vol_of_variance: f64,
        correlation: f64,
        time_step: f64,
        loadings: PathMatrix,
        idiosyncratic_volatility: f64,
    ) -> SimulationResult<Self> {
        let params = Self {
            initial_prices,
            initial_variances,
            mean_reversion_speed,
            long_term_variance,
            vol_of_variance,
            correlation,
            time_step,
            loadings,
            idiosyncratic_volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-run the precondition list.
    pub fn validate(&self) -> SimulationResult<()> {
        first_violation(dynamics_preconditions(
            self.time_step,
            self.mean_reversion_speed,
            self.long_term_variance,
            self.vol_of_variance,
            self.correlation,
            self.idiosyncratic_volatility,
        ))?;

        let stocks = self.initial_prices.len();
        first_violation([
            (stocks > 0, ParameterViolation::EmptyPanel),
            (
                self.initial_variances.len() == stocks,
                ParameterViolation::PanelLengthMismatch {
                    prices: stocks,
                    variances: self.initial_variances.len(),
                },
            ),
            (
                self.loadings.nrows() == stocks,
                ParameterViolation::LoadingRowsMismatch {
                    stocks,
                    rows: self.loadings.nrows(),
                },
            ),
        ])?;

        first_violation(self.initial_prices.iter().map(|s| initial_price_check(*s)))?;
        first_violation(self.initial_variances.iter().map(|v| initial_variance_check(*v)))?;

        let bad = self.loadings.first_non_finite();
        first_violation([(
            bad.is_none(),
            bad.map_or(ParameterViolation::EmptyPanel, |(stock, factor, value)| {
                ParameterViolation::NonFiniteLoading {
                    stock,
                    factor,
                    value,
                }
            }),
        )])
    }

    /// Check that the loadings have one column per factor.
    pub fn check_factor_count(&self, factors: usize) -> SimulationResult<()> {
        first_violation([(
            self.loadings.ncols() == factors,
            ParameterViolation::ExposureLengthMismatch {
                exposures: self.loadings.ncols(),
                factors,
            },
        )])
    }

    /// Feller condition (2 * kappa * theta > xi^2) on the shared dynamics.
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.mean_reversion_speed * self.long_term_variance
            > self.vol_of_variance * self.vol_of_variance
    }

    /// Number of stocks.
    pub fn stocks(&self) -> usize {
        self.initial_prices.len()
    }

    /// Number of factors the loadings expect.
    pub fn factors(&self) -> usize {
        self.loadings.ncols()
    }

    /// Initial prices.
    pub fn initial_prices(&self) -> &[f64] {
        &self.initial_prices
    }

    /// Initial variances.
    pub fn initial_variances(&self) -> &[f64] {
        &self.initial_variances
    }

    /// Factor loadings, `stocks x factors`.
    pub fn loadings(&self) -> &PathMatrix {
        &self.loadings
    }

    /// Time-step size (dt).
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Idiosyncratic volatility.
    pub fn idiosyncratic_volatility(&self) -> f64 {
        self.idiosyncratic_volatility
    }

    fn step(&self) -> HestonStep {
        HestonStep::new(
            self.time_step,
            self.mean_reversion_speed,
            self.long_term_variance,
            self.vol_of_variance,
            self.correlation,
        )
    }
}

/// Output of one panel simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct HestonPanelResult {
    /// Prices, `(steps + 1) x stocks`; row 0 holds the floored initial prices
    pub prices: PathMatrix,
    /// Variances, `(steps + 1) x stocks`; row 0 holds the floored initial variances
    pub variances: PathMatrix,
    /// Scaled idiosyncratic draws, `steps x stocks`
    pub idiosyncratic_shocks: PathMatrix,
    /// Seed the stream was created with
    pub seed: u64,
}

impl HestonPanelResult {
    /// Number of simulated steps.
    pub fn steps(&self) -> usize {
        self.idiosyncratic_shocks.nrows()
    }

    /// Number of stocks.
    pub fn stocks(&self) -> usize {
        self.prices.ncols()
    }

    /// Price path of one stock.
    pub fn price_path(&self, stock: usize) -> Vec<f64> {
        self.prices.column(stock)
    }

    /// Variance path of one stock.
    pub fn variance_path(&self, stock: usize) -> Vec<f64> {
        self.variances.column(stock)
    }
}

/// Heston simulator for a panel of stocks driven by shared factor increments.
///
/// # Examples
///
/// ```
/// use synth_core::rng::SeedSource;
/// use synth_core::types::PathMatrix;
/// use synth_models::heston::{HestonPanelParams, HestonPanelSimulator};
///
/// let loadings = PathMatrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]]).unwrap();
/// let params = HestonPanelParams::new(
///     vec![100.0; 3], vec![0.04; 3], 1.0, 0.04, 0.2, -0.5, 1.0 / 252.0, loadings, 0.1,
/// )
/// .unwrap();
///
/// let result = HestonPanelSimulator::new(params)
///     .simulate(&PathMatrix::zeros(10, 2), SeedSource::Fixed(1))
///     .unwrap();
/// assert_eq!(result.prices.shape(), (11, 3));
/// ```
#[derive(Clone, Debug)]
pub struct HestonPanelSimulator {
    params: HestonPanelParams,
}

impl HestonPanelSimulator {
    /// Create a simulator over validated parameters.
    pub fn new(params: HestonPanelParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &HestonPanelParams {
        &self.params
    }

    /// Simulate every stock over one step per increments row.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter(ExposureLengthMismatch)` when the increments column
    ///   count differs from the loading column count
    /// - `InvalidParameter(NonFiniteIncrement)` for a NaN or infinite increment
    pub fn simulate(
        &self,
        increments: &PathMatrix,
        seed: SeedSource,
    ) -> SimulationResult<HestonPanelResult> {
        let params = &self.params;
        params.check_factor_count(increments.ncols())?;
        check_finite_increments(increments)?;

        let steps = increments.nrows();
        let stocks = params.stocks();
        let mut rng = SimRng::from_source(seed);

        if !seed.is_reproducible() {
            info!(seed = rng.seed(), "heston panel stream seeded from entropy");
        }
        if !params.satisfies_feller() {
            warn!("Feller condition violated; panel variances will rely on flooring");
        }
        debug!(
            steps,
            stocks,
            factors = increments.ncols(),
            seed = rng.seed(),
            "simulating heston panel"
        );

        let step = params.step();
        let idio_vol = params.idiosyncratic_volatility();
        let loadings = params.loadings();

        let mut prices = PathMatrix::zeros(steps + 1, stocks);
        let mut variances = PathMatrix::zeros(steps + 1, stocks);
        let mut idiosyncratic_shocks = PathMatrix::zeros(steps, stocks);

        for i in 0..stocks {
            prices.set(0, i, params.initial_prices()[i].max(PRICE_FLOOR));
            variances.set(0, i, params.initial_variances()[i].max(VARIANCE_FLOOR));
        }

        for t in 0..steps {
            let row = increments.row(t);
            for i in 0..stocks {
                let drift: f64 = loadings
                    .row(i)
                    .iter()
                    .zip(row)
                    .map(|(loading, increment)| loading * increment)
                    .sum();

                idiosyncratic_shocks.set(t, i, rng.gen_normal_scaled(idio_vol));
                let z_v = rng.gen_normal();
                let z_s = rng.gen_normal();

                let (price, variance) =
                    step.advance(prices.get(t, i), variances.get(t, i), drift, z_v, z_s);
                prices.set(t + 1, i, price);
                variances.set(t + 1, i, variance);
            }
        }

        Ok(HestonPanelResult {
            prices,
            variances,
            idiosyncratic_shocks,
            seed: rng.seed(),
        })
    }
}
