//! Correlated multi-factor increments.
//!
//! Each step draws `k` independent standard normals `z` and maps them through
//! the Cholesky factor `L` of the factor covariance:
//! ```text
//! Sigma = diag(vols) * C * diag(vols) = L * L^T
//! dF_t  = L * z_t
//! F_t   = F_{t-1} + dF_t,   F_0 = dF_0
//! ```
//!
//! The increments matrix (`duration x k`) can be fed straight into the Heston
//! simulator with a `k`-element exposure vector.

use synth_core::math::{CholeskyFactor, CorrelationMatrix};
use synth_core::rng::SimRng;
use synth_core::types::error::{first_violation, ParameterViolation, SimulationResult};
use synth_core::types::PathMatrix;
use tracing::debug;

/// Parameters of the correlated multi-factor generator.
///
/// # Examples
///
/// ```
/// use synth_core::math::CorrelationMatrix;
/// use synth_models::factor::CorrelatedFactorParams;
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.3, 0.3, 1.0], 2).unwrap();
/// let params = CorrelatedFactorParams::new(100, vec![0.01, 0.008], corr, 42);
/// assert!(params.is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct CorrelatedFactorParams {
    duration: usize,
    volatilities: Vec<f64>,
    correlation: CorrelationMatrix,
    seed: u64,
    cholesky: CholeskyFactor,
}

impl CorrelatedFactorParams {
    /// Create validated parameters and factor the covariance.
    ///
    /// Checks, in order: duration, non-empty factor set, every volatility
    /// positive, correlation dimension, then positive definiteness.
    pub fn new(
        duration: usize,
        volatilities: Vec<f64>,
        correlation: CorrelationMatrix,
        seed: u64,
    ) -> SimulationResult<Self> {
        let first_bad_vol = volatilities
            .iter()
            .enumerate()
            .find(|(_, v)| !(**v > 0.0 && v.is_finite()));

        first_violation([
            (duration > 0, ParameterViolation::NonPositiveDuration),
            (!volatilities.is_empty(), ParameterViolation::EmptyFactorSet),
            (
                first_bad_vol.is_none(),
                first_bad_vol.map_or(ParameterViolation::EmptyFactorSet, |(index, value)| {
                    ParameterViolation::NonPositiveVolatility {
                        index,
                        value: *value,
                    }
                }),
            ),
            (
                correlation.dim() == volatilities.len(),
                ParameterViolation::CorrelationDimensionMismatch {
                    expected: volatilities.len() * volatilities.len(),
                    got: correlation.dim() * correlation.dim(),
                },
            ),
        ])?;

        let cholesky = correlation.covariance_cholesky(&volatilities)?;

        Ok(Self {
            duration,
            volatilities,
            correlation,
            seed,
            cholesky,
        })
    }

    /// Number of time steps.
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Number of factors.
    pub fn factor_count(&self) -> usize {
        self.volatilities.len()
    }

    /// Per-factor volatilities.
    pub fn volatilities(&self) -> &[f64] {
        &self.volatilities
    }

    /// Factor correlation matrix.
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Stream seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Output of the correlated generator.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelatedFactorPaths {
    /// Per-step correlated shocks, shape `duration x factors`
    pub increments: PathMatrix,
    /// Cumulative levels, shape `duration x factors`
    pub levels: PathMatrix,
    /// Seed the stream was created with
    pub seed: u64,
}

/// Generator of correlated factor increments.
#[derive(Clone, Debug)]
pub struct CorrelatedFactorSimulator {
    params: CorrelatedFactorParams,
}

impl CorrelatedFactorSimulator {
    /// Create a simulator over validated parameters.
    pub fn new(params: CorrelatedFactorParams) -> Self {
        Self { params }
    }

    /// Run one forward pass.
    pub fn simulate(&self) -> CorrelatedFactorPaths {
        let params = &self.params;
        let duration = params.duration();
        let factors = params.factor_count();

        debug!(duration, factors, seed = params.seed(), "simulating correlated factors");

        let mut rng = SimRng::from_seed(params.seed());
        let mut increments = PathMatrix::zeros(duration, factors);
        let mut levels = PathMatrix::zeros(duration, factors);
        let mut z = vec![0.0; factors];

        for t in 0..duration {
            rng.fill_normal(&mut z);
            params.cholesky.transform_into(&z, increments.row_mut(t));

            for k in 0..factors {
                let increment = increments.get(t, k);
                let level = if t == 0 {
                    increment
                } else {
                    levels.get(t - 1, k) + increment
                };
                levels.set(t, k, level);
            }
        }

        CorrelatedFactorPaths {
            increments,
            levels,
            seed: params.seed(),
        }
    }
}
