//! Heston model parameters.
//!
//! ## Feller condition
//!
//! The continuous-time variance process stays strictly positive when
//! ```text
//! 2 * kappa * theta > xi^2
//! ```
//! The Euler scheme used here floors the variance instead of relying on it,
//! so a violation is reported as a diagnostic only.

use synth_core::types::error::{first_violation, ParameterViolation, SimulationResult};

/// Checks shared by every Heston parameter set, in evaluation order.
pub(crate) fn dynamics_preconditions(
    time_step: f64,
    mean_reversion_speed: f64,
    long_term_variance: f64,
    vol_of_variance: f64,
    correlation: f64,
    idiosyncratic_volatility: f64,
) -> [(bool, ParameterViolation); 6] {
    let non_negative = |x: f64| x >= 0.0 && x.is_finite();
    [
        (
            time_step > 0.0 && time_step.is_finite(),
            ParameterViolation::NonPositiveTimeStep(time_step),
        ),
        (
            non_negative(mean_reversion_speed),
            ParameterViolation::NegativeMeanReversionSpeed(mean_reversion_speed),
        ),
        (
            non_negative(long_term_variance),
            ParameterViolation::NegativeLongTermVariance(long_term_variance),
        ),
        (
            non_negative(vol_of_variance),
            ParameterViolation::NegativeVolOfVariance(vol_of_variance),
        ),
        (
            (-1.0..=1.0).contains(&correlation),
            ParameterViolation::CorrelationOutOfRange(correlation),
        ),
        (
            non_negative(idiosyncratic_volatility),
            ParameterViolation::NegativeIdiosyncraticVolatility(idiosyncratic_volatility),
        ),
    ]
}

pub(crate) fn initial_price_check(price: f64) -> (bool, ParameterViolation) {
    (
        price > 0.0 && price.is_finite(),
        ParameterViolation::NonPositiveInitialPrice(price),
    )
}

pub(crate) fn initial_variance_check(variance: f64) -> (bool, ParameterViolation) {
    (
        variance >= 0.0 && variance.is_finite(),
        ParameterViolation::NegativeInitialVariance(variance),
    )
}

/// Heston model parameters.
///
/// # Fields
///
/// * `initial_price` - Price at index 0 (> 0)
/// * `initial_variance` - Variance at index 0 (>= 0)
/// * `mean_reversion_speed` - kappa (>= 0)
/// * `long_term_variance` - theta (>= 0)
/// * `vol_of_variance` - xi (>= 0)
/// * `correlation` - rho between price and variance shocks, in [-1, 1]
/// * `time_step` - dt (> 0)
/// * `exposures` - Loading on each factor column of the increments matrix
/// * `idiosyncratic_volatility` - Scale of the per-step idiosyncratic draw (>= 0)
///
/// Every value, exposures included, must be finite.
///
/// # Examples
///
/// ```
/// use synth_models::heston::HestonParams;
///
/// let params = HestonParams::new(
///     100.0, 0.04, 1.0, 0.04, 0.2, -0.5, 1.0 / 252.0, vec![0.0], 0.1,
/// );
/// assert!(params.is_ok());
///
/// // Negative long-term variance is rejected up front
/// let invalid = HestonParams::new(
///     100.0, 0.04, 1.0, -0.01, 0.2, -0.5, 1.0 / 252.0, vec![0.0], 0.1,
/// );
/// assert!(invalid.is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HestonParams {
    initial_price: f64,
    initial_variance: f64,
    mean_reversion_speed: f64,
    long_term_variance: f64,
    vol_of_variance: f64,
    correlation: f64,
    time_step: f64,
    exposures: Vec<f64>,
    idiosyncratic_volatility: f64,
}

impl HestonParams {
    /// Create validated parameters.
    ///
    /// The precondition list is evaluated in this order: time step,
    /// mean-reversion speed, long-term variance, vol-of-variance, correlation,
    /// idiosyncratic volatility, initial price, initial variance, finite
    /// exposures. Every scalar must also be finite.
    /// The exposure/increments shape check needs the increments matrix and
    /// runs at the top of [`HestonPathSimulator::simulate`].
    ///
    /// [`HestonPathSimulator::simulate`]: super::HestonPathSimulator::simulate
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initial_price: f64,
        initial_variance: f64,
        mean_reversion_speed: f64,
        long_term_variance: f64,
        vol_of_variance: f64,
        correlation: f64,
        time_step: f64,
        exposures: Vec<f64>,
        idiosyncratic_volatility: f64,
    ) -> SimulationResult<Self> {
        let params = Self {
            initial_price,
            initial_variance,
            mean_reversion_speed,
            long_term_variance,
            vol_of_variance,
            correlation,
            time_step,
            exposures,
            idiosyncratic_volatility,
        };
        params.validate()?;
        Ok(params)
    }

    fn preconditions(&self) -> impl Iterator<Item = (bool, ParameterViolation)> {
        let first_bad_exposure = self
            .exposures
            .iter()
            .enumerate()
            .find(|(_, e)| !e.is_finite())
            .map(|(index, e)| ParameterViolation::NonFiniteExposure { index, value: *e });

        dynamics_preconditions(
            self.time_step,
            self.mean_reversion_speed,
            self.long_term_variance,
            self.vol_of_variance,
            self.correlation,
            self.idiosyncratic_volatility,
        )
        .into_iter()
        .chain([
            initial_price_check(self.initial_price),
            initial_variance_check(self.initial_variance),
            (
                first_bad_exposure.is_none(),
                first_bad_exposure.unwrap_or(ParameterViolation::EmptyFactorSet),
            ),
        ])
    }

    /// Re-run the precondition list.
    pub fn validate(&self) -> SimulationResult<()> {
        first_violation(self.preconditions())
    }

    /// Check that `exposures` matches the column count of an increments matrix.
    pub fn check_factor_count(&self, factors: usize) -> SimulationResult<()> {
        first_violation([(
            self.exposures.len() == factors,
            ParameterViolation::ExposureLengthMismatch {
                exposures: self.exposures.len(),
                factors,
            },
        )])
    }

    /// Check the Feller condition (2 * kappa * theta > xi^2).
    ///
    /// # Examples
    ///
    /// ```
    /// use synth_models::heston::HestonParams;
    ///
    /// // 2 * 1.5 * 0.04 = 0.12 > 0.3^2 = 0.09
    /// let p = HestonParams::new(100.0, 0.04, 1.5, 0.04, 0.3, -0.7, 0.01, vec![1.0], 0.0).unwrap();
    /// assert!(p.satisfies_feller());
    ///
    /// // 2 * 0.5 * 0.04 = 0.04 < 0.5^2 = 0.25
    /// let p = HestonParams::new(100.0, 0.04, 0.5, 0.04, 0.5, -0.7, 0.01, vec![1.0], 0.0).unwrap();
    /// assert!(!p.satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.mean_reversion_speed * self.long_term_variance
            > self.vol_of_variance * self.vol_of_variance
    }

    /// Feller ratio 2 * kappa * theta / xi^2; infinite when xi is zero.
    pub fn feller_ratio(&self) -> f64 {
        let denominator = self.vol_of_variance * self.vol_of_variance;
        if denominator > 0.0 {
            2.0 * self.mean_reversion_speed * self.long_term_variance / denominator
        } else {
            f64::INFINITY
        }
    }

    /// Initial price.
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Initial variance.
    pub fn initial_variance(&self) -> f64 {
        self.initial_variance
    }

    /// Mean-reversion speed (kappa).
    pub fn mean_reversion_speed(&self) -> f64 {
        self.mean_reversion_speed
    }

    /// Long-term variance (theta).
    pub fn long_term_variance(&self) -> f64 {
        self.long_term_variance
    }

    /// Volatility of variance (xi).
    pub fn vol_of_variance(&self) -> f64 {
        self.vol_of_variance
    }

    /// Price/variance correlation (rho).
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Time-step size (dt).
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Factor exposures.
    pub fn exposures(&self) -> &[f64] {
        &self.exposures
    }

    /// Idiosyncratic volatility.
    pub fn idiosyncratic_volatility(&self) -> f64 {
        self.idiosyncratic_volatility
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::types::SimulationError;

    struct Args {
        s0: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        xi: f64,
        rho: f64,
        dt: f64,
        idio: f64,
    }

    impl Default for Args {
        fn default() -> Self {
            Self {
                s0: 100.0,
                v0: 0.04,
                kappa: 1.0,
                theta: 0.04,
                xi: 0.2,
                rho: -0.5,
                dt: 1.0 / 252.0,
                idio: 0.1,
            }
        }
    }

    fn build(a: Args) -> SimulationResult<HestonParams> {
        HestonParams::new(
            a.s0,
            a.v0,
            a.kappa,
            a.theta,
            a.xi,
            a.rho,
            a.dt,
            vec![0.0],
            a.idio,
        )
    }

    fn violation(a: Args) -> ParameterViolation {
        match build(a) {
            Err(SimulationError::InvalidParameter(v)) => v,
            Ok(p) => panic!("expected violation, got {:?}", p),
        }
    }

    #[test]
    fn test_valid_defaults() {
        assert!(build(Args::default()).is_ok());
    }

    #[test]
    fn test_zero_bounds_accepted() {
        let p = build(Args {
            v0: 0.0,
            kappa: 0.0,
            theta: 0.0,
            xi: 0.0,
            idio: 0.0,
            ..Args::default()
        });
        assert!(p.is_ok());
    }

    #[test]
    fn test_correlation_edges_accepted() {
        assert!(build(Args { rho: 1.0, ..Args::default() }).is_ok());
        assert!(build(Args { rho: -1.0, ..Args::default() }).is_ok());
    }

    #[test]
    fn test_non_positive_time_step() {
        assert_eq!(
            violation(Args { dt: 0.0, ..Args::default() }),
            ParameterViolation::NonPositiveTimeStep(0.0)
        );
        assert_eq!(
            violation(Args { dt: -0.1, ..Args::default() }).code(),
            "time_step_not_positive"
        );
    }

    #[test]
    fn test_negative_kappa() {
        assert_eq!(
            violation(Args { kappa: -1.0, ..Args::default() }),
            ParameterViolation::NegativeMeanReversionSpeed(-1.0)
        );
    }

    #[test]
    fn test_negative_theta() {
        assert_eq!(
            violation(Args { theta: -0.01, ..Args::default() }),
            ParameterViolation::NegativeLongTermVariance(-0.01)
        );
    }

    #[test]
    fn test_negative_xi() {
        assert_eq!(
            violation(Args { xi: -0.2, ..Args::default() }),
            ParameterViolation::NegativeVolOfVariance(-0.2)
        );
    }

    #[test]
    fn test_correlation_out_of_range() {
        assert_eq!(
            violation(Args { rho: 1.5, ..Args::default() }),
            ParameterViolation::CorrelationOutOfRange(1.5)
        );
        assert_eq!(
            violation(Args { rho: -1.0001, ..Args::default() }).code(),
            "correlation_out_of_range"
        );
    }

    #[test]
    fn test_negative_idiosyncratic_volatility() {
        assert_eq!(
            violation(Args { idio: -0.1, ..Args::default() }),
            ParameterViolation::NegativeIdiosyncraticVolatility(-0.1)
        );
    }

    #[test]
    fn test_initial_values() {
        assert_eq!(
            violation(Args { s0: 0.0, ..Args::default() }),
            ParameterViolation::NonPositiveInitialPrice(0.0)
        );
        assert_eq!(
            violation(Args { v0: -0.04, ..Args::default() }),
            ParameterViolation::NegativeInitialVariance(-0.04)
        );
    }

    #[test]
    fn test_nan_rejected() {
        assert_eq!(
            violation(Args { kappa: f64::NAN, ..Args::default() }).code(),
            "mean_reversion_speed_negative"
        );
        assert_eq!(
            violation(Args { rho: f64::NAN, ..Args::default() }).code(),
            "correlation_out_of_range"
        );
    }

    #[test]
    fn test_infinite_scalars_rejected() {
        let inf = f64::INFINITY;
        assert_eq!(
            violation(Args { s0: inf, ..Args::default() }).code(),
            "initial_price_not_positive"
        );
        assert_eq!(
            violation(Args { v0: inf, ..Args::default() }).code(),
            "initial_variance_negative"
        );
        assert_eq!(
            violation(Args { kappa: inf, ..Args::default() }).code(),
            "mean_reversion_speed_negative"
        );
        assert_eq!(
            violation(Args { theta: inf, ..Args::default() }).code(),
            "long_term_variance_negative"
        );
        assert_eq!(
            violation(Args { xi: inf, ..Args::default() }).code(),
            "vol_of_variance_negative"
        );
        assert_eq!(
            violation(Args { idio: inf, ..Args::default() }).code(),
            "idiosyncratic_volatility_negative"
        );
        assert_eq!(
            violation(Args { s0: f64::NAN, ..Args::default() }).code(),
            "initial_price_not_positive"
        );
    }

    #[test]
    fn test_non_finite_exposure_rejected() {
        let err = HestonParams::new(
            100.0,
            0.04,
            1.0,
            0.04,
            0.2,
            -0.5,
            0.01,
            vec![0.5, f64::NAN],
            0.1,
        )
        .unwrap_err();
        assert_eq!(err.violation().code(), "exposure_not_finite");
        assert!(matches!(
            err.violation(),
            ParameterViolation::NonFiniteExposure { index: 1, .. }
        ));

        let err =
            HestonParams::new(100.0, 0.04, 1.0, 0.04, 0.2, -0.5, 0.01, vec![f64::INFINITY], 0.1)
                .unwrap_err();
        assert_eq!(
            err.violation(),
            &ParameterViolation::NonFiniteExposure {
                index: 0,
                value: f64::INFINITY
            }
        );
    }

    #[test]
    fn test_order_time_step_before_kappa() {
        assert_eq!(
            violation(Args {
                dt: 0.0,
                kappa: -1.0,
                ..Args::default()
            })
            .code(),
            "time_step_not_positive"
        );
    }

    #[test]
    fn test_check_factor_count() {
        let p = build(Args::default()).unwrap();
        assert!(p.check_factor_count(1).is_ok());
        assert_eq!(
            p.check_factor_count(3).unwrap_err().violation(),
            &ParameterViolation::ExposureLengthMismatch {
                exposures: 1,
                factors: 3
            }
        );
    }

    #[test]
    fn test_feller_ratio() {
        let p = build(Args::default()).unwrap();
        // 2 * 1.0 * 0.04 / 0.04 = 2.0
        assert!((p.feller_ratio() - 2.0).abs() < 1e-12);
        assert!(p.satisfies_feller());

        let no_vol = build(Args { xi: 0.0, ..Args::default() }).unwrap();
        assert_eq!(no_vol.feller_ratio(), f64::INFINITY);
    }
}
