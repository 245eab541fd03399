//! Single-factor linear return model.
//!
//! Every asset's return is a linear function of one shared shock plus noise:
//! ```text
//! f_t       ~ N(0, sigma_f^2)
//! L_t       = L_{t-1} + f_t,        L_0 = f_0
//! r_{i,t}   = beta_i * f_t + eps_{i,t},   eps ~ N(0, 1)
//! ```
//!
//! ## Draw order
//!
//! Per time step the stream yields the factor shock first, then one
//! idiosyncratic draw per asset in index order. Output is bit-for-bit
//! reproducible for a given seed only as long as this order is kept.

use synth_core::rng::SimRng;
use synth_core::types::PathMatrix;
use tracing::debug;

use super::params::FactorModelParams;

/// Output of one factor simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct FactorPathResult {
    /// Per-asset returns, shape `asset_count x duration`
    pub asset_returns: PathMatrix,
    /// Per-step factor shocks (length `duration`)
    pub factor_increments: Vec<f64>,
    /// Cumulative factor level (length `duration`)
    pub factor_levels: Vec<f64>,
    /// Seed the stream was created with
    pub seed: u64,
}

impl FactorPathResult {
    /// Number of time steps.
    pub fn duration(&self) -> usize {
        self.factor_levels.len()
    }

    /// Factor shocks as a `duration x 1` increments matrix.
    pub fn increments_matrix(&self) -> PathMatrix {
        PathMatrix::from_column(&self.factor_increments)
    }

    /// Cumulative factor levels as a `duration x 1` matrix.
    pub fn levels_matrix(&self) -> PathMatrix {
        PathMatrix::from_column(&self.factor_levels)
    }
}

/// Simulator for the single-factor model.
///
/// # Examples
///
/// ```
/// use synth_models::factor::{FactorModelParams, FactorPathSimulator};
///
/// let params = FactorModelParams::new(3, 0.1, 1, vec![1.0], 42).unwrap();
/// let simulator = FactorPathSimulator::new(params);
///
/// let a = simulator.simulate();
/// let b = simulator.simulate();
/// assert_eq!(a, b);
/// assert_eq!(a.asset_returns.nrows(), 1);
/// assert_eq!(a.asset_returns.ncols(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct FactorPathSimulator {
    params: FactorModelParams,
}

impl FactorPathSimulator {
    /// Create a simulator over validated parameters.
    pub fn new(params: FactorModelParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &FactorModelParams {
        &self.params
    }

    /// Run one forward pass.
    ///
    /// Infallible: all preconditions were checked when the parameters were built.
    pub fn simulate(&self) -> FactorPathResult {
        let params = &self.params;
        let duration = params.duration();
        let volatility = params.factor_volatility();

        debug!(
            duration,
            assets = params.asset_count(),
            factor_volatility = volatility,
            seed = params.seed(),
            "simulating factor paths"
        );

        let mut rng = SimRng::from_seed(params.seed());

        let mut factor_increments = vec![0.0; duration];
        let mut factor_levels = vec![0.0; duration];
        let mut asset_returns = PathMatrix::zeros(params.asset_count(), duration);

        for t in 0..duration {
            let shock = rng.gen_normal_scaled(volatility);
            factor_increments[t] = shock;
            factor_levels[t] = if t == 0 {
                shock
            } else {
                factor_levels[t - 1] + shock
            };

            for (asset, beta) in params.betas().iter().enumerate() {
                let epsilon = rng.gen_normal();
                asset_returns.set(asset, t, beta * shock + epsilon);
            }
        }

        FactorPathResult {
            asset_returns,
            factor_increments,
            factor_levels,
            seed: params.seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_a(seed: u64) -> FactorPathResult {
        let params = FactorModelParams::new(3, 0.1, 1, vec![1.0], seed).unwrap();
        FactorPathSimulator::new(params).simulate()
    }

    #[test]
    fn test_shapes() {
        let params = FactorModelParams::new(5, 0.2, 3, vec![1.0, 0.5, -0.5], 1).unwrap();
        let result = FactorPathSimulator::new(params).simulate();

        assert_eq!(result.asset_returns.nrows(), 3);
        assert_eq!(result.asset_returns.ncols(), 5);
        assert_eq!(result.factor_levels.len(), 5);
        assert_eq!(result.factor_increments.len(), 5);
        assert_eq!(result.duration(), 5);
        assert_eq!(result.seed, 1);
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let a = scenario_a(42);
        let b = scenario_a(42);

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.asset_returns.as_slice()), bits(b.asset_returns.as_slice()));
        assert_eq!(bits(&a.factor_levels), bits(&b.factor_levels));
    }

    #[test]
    fn test_different_seed_changes_factor_shocks() {
        let a = scenario_a(42);
        let b = scenario_a(43);
        assert_ne!(a.factor_increments, b.factor_increments);
    }

    #[test]
    fn test_first_level_equals_first_shock() {
        let result = scenario_a(42);
        assert_eq!(result.factor_levels[0], result.factor_increments[0]);
    }

    #[test]
    fn test_draw_order_matches_stream() {
        // factor shock first, then one idiosyncratic draw per asset
        let betas = vec![2.0, -1.0];
        let params = FactorModelParams::new(2, 0.3, 2, betas.clone(), 11).unwrap();
        let result = FactorPathSimulator::new(params).simulate();

        let mut rng = SimRng::from_seed(11);
        for t in 0..2 {
            let shock = 0.3 * rng.gen_normal();
            assert_eq!(result.factor_increments[t], shock);
            for (asset, beta) in betas.iter().enumerate() {
                let eps = rng.gen_normal();
                assert_eq!(result.asset_returns.get(asset, t), beta * shock + eps);
            }
        }
    }

    #[test]
    fn test_zero_beta_returns_are_pure_noise() {
        let params = FactorModelParams::new(4, 0.5, 1, vec![0.0], 3).unwrap();
        let result = FactorPathSimulator::new(params).simulate();

        let mut rng = SimRng::from_seed(3);
        for t in 0..4 {
            let _shock = rng.gen_normal();
            assert_relative_eq!(result.asset_returns.get(0, t), rng.gen_normal());
        }
    }

    #[test]
    fn test_increments_and_levels_matrices() {
        let result = scenario_a(42);
        let inc = result.increments_matrix();
        let lvl = result.levels_matrix();

        assert_eq!((inc.nrows(), inc.ncols()), (3, 1));
        assert_eq!(inc.column(0), result.factor_increments);
        assert_eq!(lvl.column(0), result.factor_levels);
    }

    #[test]
    fn test_factor_volatility_scales_shocks() {
        let small = FactorPathSimulator::new(
            FactorModelParams::new(10, 0.01, 1, vec![1.0], 5).unwrap(),
        )
        .simulate();
        let large = FactorPathSimulator::new(
            FactorModelParams::new(10, 1.0, 1, vec![1.0], 5).unwrap(),
        )
        .simulate();

        for (s, l) in small.factor_increments.iter().zip(&large.factor_increments) {
            assert_relative_eq!(*l, s * 100.0, max_relative = 1e-12);
        }
    }
}
