//! Single-factor model parameters.

use synth_core::types::error::{first_violation, ParameterViolation, SimulationResult};

/// Parameters of the single-factor return model.
///
/// Immutable once constructed; every field is validated by [`FactorModelParams::new`].
///
/// # Fields
///
/// * `duration` - Number of time steps (> 0)
/// * `factor_volatility` - Standard deviation of the common factor shock (> 0)
/// * `asset_count` - Number of assets (> 0)
/// * `betas` - Per-asset exposure to the factor (length == `asset_count`)
/// * `seed` - Seed of the random stream
///
/// # Examples
///
/// ```
/// use synth_models::factor::FactorModelParams;
///
/// let params = FactorModelParams::new(3, 0.1, 1, vec![1.0], 42);
/// assert!(params.is_ok());
///
/// let invalid = FactorModelParams::new(0, 0.1, 1, vec![1.0], 42);
/// assert!(invalid.is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FactorModelParams {
    duration: usize,
    factor_volatility: f64,
    asset_count: usize,
    betas: Vec<f64>,
    seed: u64,
}

impl FactorModelParams {
    /// Create validated parameters.
    ///
    /// Preconditions are checked in order: duration, factor volatility,
    /// asset count, beta vector length, finite betas. The first failing one
    /// is reported.
    pub fn new(
        duration: usize,
        factor_volatility: f64,
        asset_count: usize,
        betas: Vec<f64>,
        seed: u64,
    ) -> SimulationResult<Self> {
        let params = Self {
            duration,
            factor_volatility,
            asset_count,
            betas,
            seed,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters with a unit beta for every asset.
    pub fn with_unit_betas(
        duration: usize,
        factor_volatility: f64,
        asset_count: usize,
        seed: u64,
    ) -> SimulationResult<Self> {
        Self::new(
            duration,
            factor_volatility,
            asset_count,
            vec![1.0; asset_count],
            seed,
        )
    }

    fn preconditions(&self) -> [(bool, ParameterViolation); 5] {
        let first_bad_beta = self
            .betas
            .iter()
            .enumerate()
            .find(|(_, beta)| !beta.is_finite())
            .map(|(index, beta)| ParameterViolation::NonFiniteBeta {
                index,
                value: *beta,
            });

        [
            (self.duration > 0, ParameterViolation::NonPositiveDuration),
            (
                self.factor_volatility > 0.0 && self.factor_volatility.is_finite(),
                ParameterViolation::NonPositiveFactorVolatility(self.factor_volatility),
            ),
            (self.asset_count > 0, ParameterViolation::NonPositiveAssetCount),
            (
                self.betas.len() == self.asset_count,
                ParameterViolation::BetaLengthMismatch {
                    expected: self.asset_count,
                    got: self.betas.len(),
                },
            ),
            (
                first_bad_beta.is_none(),
                first_bad_beta.unwrap_or(ParameterViolation::NonPositiveAssetCount),
            ),
        ]
    }

    /// Re-run the precondition list.
    pub fn validate(&self) -> SimulationResult<()> {
        first_violation(self.preconditions())
    }

    /// Number of time steps.
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Standard deviation of the factor shock.
    pub fn factor_volatility(&self) -> f64 {
        self.factor_volatility
    }

    /// Number of assets.
    pub fn asset_count(&self) -> usize {
        self.asset_count
    }

    /// Per-asset betas.
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Stream seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::types::SimulationError;

    fn violation(result: SimulationResult<FactorModelParams>) -> ParameterViolation {
        match result {
            Err(SimulationError::InvalidParameter(v)) => v,
            Ok(p) => panic!("expected violation, got {:?}", p),
        }
    }

    #[test]
    fn test_valid_params() {
        let p = FactorModelParams::new(3, 0.1, 2, vec![1.0, 0.5], 42).unwrap();
        assert_eq!(p.duration(), 3);
        assert_eq!(p.factor_volatility(), 0.1);
        assert_eq!(p.asset_count(), 2);
        assert_eq!(p.betas(), &[1.0, 0.5]);
        assert_eq!(p.seed(), 42);
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(
            violation(FactorModelParams::new(0, 0.1, 1, vec![1.0], 42)),
            ParameterViolation::NonPositiveDuration
        );
    }

    #[test]
    fn test_negative_volatility() {
        assert_eq!(
            violation(FactorModelParams::new(3, -1.0, 1, vec![1.0], 42)),
            ParameterViolation::NonPositiveFactorVolatility(-1.0)
        );
    }

    #[test]
    fn test_zero_and_nan_volatility() {
        assert_eq!(
            violation(FactorModelParams::new(3, 0.0, 1, vec![1.0], 42)).code(),
            "factor_volatility_not_positive"
        );
        assert_eq!(
            violation(FactorModelParams::new(3, f64::NAN, 1, vec![1.0], 42)).code(),
            "factor_volatility_not_positive"
        );
    }

    #[test]
    fn test_zero_assets() {
        assert_eq!(
            violation(FactorModelParams::new(3, 0.1, 0, vec![], 42)),
            ParameterViolation::NonPositiveAssetCount
        );
    }

    #[test]
    fn test_beta_length_mismatch() {
        assert_eq!(
            violation(FactorModelParams::new(3, 0.1, 2, vec![1.0], 42)),
            ParameterViolation::BetaLengthMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_non_finite_beta() {
        assert_eq!(
            violation(FactorModelParams::new(3, 0.1, 2, vec![1.0, f64::INFINITY], 42)),
            ParameterViolation::NonFiniteBeta {
                index: 1,
                value: f64::INFINITY
            }
        );
        assert_eq!(
            violation(FactorModelParams::new(3, 0.1, 1, vec![f64::NAN], 42)).code(),
            "beta_not_finite"
        );
    }

    #[test]
    fn test_first_failing_check_wins() {
        // duration is checked before volatility
        assert_eq!(
            violation(FactorModelParams::new(0, -1.0, 0, vec![], 1)),
            ParameterViolation::NonPositiveDuration
        );
    }

    #[test]
    fn test_unit_betas() {
        let p = FactorModelParams::with_unit_betas(10, 0.2, 4, 7).unwrap();
        assert_eq!(p.betas(), &[1.0; 4]);
    }
}
