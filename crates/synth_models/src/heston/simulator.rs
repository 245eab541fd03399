//! Euler/log-Euler Heston recursion with flooring.
//!
//! ## Per-step update (t -> t+1)
//!
//! ```text
//! drift   = exposures . increments[t]
//! v       = max(V_t, VARIANCE_FLOOR)
//! dW_S    = rho * z_v + sqrt(1 - rho^2) * z_s
//! V_{t+1} = max(v + kappa * (theta - v) * dt + xi * sqrt(v) * z_v * sqrt(dt), VARIANCE_FLOOR)
//! S_{t+1} = max(S_t * exp((drift - v / 2) * dt + sqrt(v) * dW_S * sqrt(dt)), PRICE_FLOOR)
//! ```
//!
//! ## Draw order
//!
//! Each step consumes three standard normals from the stream: the
//! idiosyncratic draw, the variance shock `z_v`, then the independent price
//! shock `z_s`.

use synth_core::rng::{SeedSource, SimRng};
use synth_core::types::error::{first_violation, ParameterViolation, SimulationResult};
use synth_core::types::PathMatrix;
use tracing::{debug, info, warn};

use super::params::HestonParams;

/// Lower bound applied to every stored variance.
pub const VARIANCE_FLOOR: f64 = 1e-12;

/// Lower bound applied to every stored price.
pub const PRICE_FLOOR: f64 = 1e-8;

/// One Euler/log-Euler update with fixed dynamics.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HestonStep {
    dt: f64,
    sqrt_dt: f64,
    kappa: f64,
    theta: f64,
    xi: f64,
    rho: f64,
    rho_perp: f64,
}

impl HestonStep {
    pub(crate) fn new(dt: f64, kappa: f64, theta: f64, xi: f64, rho: f64) -> Self {
        Self {
            dt,
            sqrt_dt: dt.sqrt(),
            kappa,
            theta,
            xi,
            rho,
            rho_perp: (1.0 - rho * rho).max(0.0).sqrt(),
        }
    }

    /// Advance `(price, variance)` by one step; both outputs are floored.
    #[inline]
    pub(crate) fn advance(
        &self,
        price: f64,
        variance: f64,
        drift: f64,
        z_v: f64,
        z_s: f64,
    ) -> (f64, f64) {
        let v = variance.max(VARIANCE_FLOOR);
        let sqrt_v = v.sqrt();
        let dw_s = self.rho * z_v + self.rho_perp * z_s;

        let next_variance =
            v + self.kappa * (self.theta - v) * self.dt + self.xi * sqrt_v * z_v * self.sqrt_dt;
        let log_step = (drift - 0.5 * v) * self.dt + sqrt_v * dw_s * self.sqrt_dt;

        (
            (price * log_step.exp()).max(PRICE_FLOOR),
            next_variance.max(VARIANCE_FLOOR),
        )
    }
}

/// Reject an increments matrix holding NaN or infinite values.
pub(crate) fn check_finite_increments(increments: &PathMatrix) -> SimulationResult<()> {
    let bad = increments.first_non_finite();
    first_violation([(
        bad.is_none(),
        bad.map_or(ParameterViolation::EmptyFactorSet, |(row, col, value)| {
            ParameterViolation::NonFiniteIncrement { row, col, value }
        }),
    )])
}

/// Output of one Heston simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct HestonPathResult {
    /// Prices, length `steps + 1`; index 0 is the (floored) initial price
    pub prices: Vec<f64>,
    /// Variances, length `steps + 1`; index 0 is the (floored) initial variance
    pub variances: Vec<f64>,
    /// Scaled idiosyncratic draws, one per step
    pub idiosyncratic_shocks: Vec<f64>,
    /// Seed the stream was created with
    pub seed: u64,
}

impl HestonPathResult {
    /// Number of simulated steps.
    pub fn steps(&self) -> usize {
        self.idiosyncratic_shocks.len()
    }

    /// Price at the last step.
    pub fn terminal_price(&self) -> f64 {
        self.prices.last().copied().unwrap_or(PRICE_FLOOR)
    }

    /// Per-step log returns of the price path.
    pub fn log_returns(&self) -> Vec<f64> {
        self.prices
            .windows(2)
            .map(|pair| (pair[1] / pair[0]).ln())
            .collect()
    }
}

/// Heston path simulator driven by exogenous factor increments.
///
/// # Examples
///
/// ```
/// use synth_core::rng::SeedSource;
/// use synth_core::types::PathMatrix;
/// use synth_models::heston::{HestonParams, HestonPathSimulator};
///
/// let params = HestonParams::new(
///     100.0, 0.04, 1.0, 0.04, 0.2, -0.5, 1.0 / 252.0, vec![0.0], 0.1,
/// )
/// .unwrap();
/// let increments = PathMatrix::zeros(5, 1);
///
/// let result = HestonPathSimulator::new(params)
///     .simulate(&increments, SeedSource::Fixed(42))
///     .unwrap();
/// assert_eq!(result.prices.len(), 6);
/// assert_eq!(result.prices[0], 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct HestonPathSimulator {
    params: HestonParams,
}

impl HestonPathSimulator {
    /// Create a simulator over validated parameters.
    pub fn new(params: HestonParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Simulate one price/variance path, one step per increments row.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter(ExposureLengthMismatch)` when the increments column
    ///   count differs from the exposure count
    /// - `InvalidParameter(NonFiniteIncrement)` when an increment is NaN or
    ///   infinite
    ///
    /// Nothing is allocated or drawn before these checks.
    pub fn simulate(
        &self,
        increments: &PathMatrix,
        seed: SeedSource,
    ) -> SimulationResult<HestonPathResult> {
        let params = &self.params;
        params.check_factor_count(increments.ncols())?;
        check_finite_increments(increments)?;

        let steps = increments.nrows();
        let mut rng = SimRng::from_source(seed);

        if !seed.is_reproducible() {
            info!(seed = rng.seed(), "heston stream seeded from entropy");
        }
        if !params.satisfies_feller() {
            warn!(
                feller_ratio = params.feller_ratio(),
                "Feller condition violated; variance will rely on flooring"
            );
        }
        debug!(
            steps,
            factors = increments.ncols(),
            kappa = params.mean_reversion_speed(),
            theta = params.long_term_variance(),
            xi = params.vol_of_variance(),
            rho = params.correlation(),
            dt = params.time_step(),
            seed = rng.seed(),
            "simulating heston path"
        );

        let step = HestonStep::new(
            params.time_step(),
            params.mean_reversion_speed(),
            params.long_term_variance(),
            params.vol_of_variance(),
            params.correlation(),
        );
        let idio_vol = params.idiosyncratic_volatility();

        let mut prices = vec![0.0; steps + 1];
        let mut variances = vec![0.0; steps + 1];
        let mut idiosyncratic_shocks = vec![0.0; steps];

        prices[0] = params.initial_price().max(PRICE_FLOOR);
        variances[0] = params.initial_variance().max(VARIANCE_FLOOR);

        for t in 0..steps {
            let drift: f64 = params
                .exposures()
                .iter()
                .zip(increments.row(t))
                .map(|(exposure, increment)| exposure * increment)
                .sum();

            idiosyncratic_shocks[t] = rng.gen_normal_scaled(idio_vol);
            let z_v = rng.gen_normal();
            let z_s = rng.gen_normal();

            let (price, variance) = step.advance(prices[t], variances[t], drift, z_v, z_s);
            prices[t + 1] = price;
            variances[t + 1] = variance;
        }

        Ok(HestonPathResult {
            prices,
            variances,
            idiosyncratic_shocks,
            seed: rng.seed(),
        })
    }
}
