//! Error types for structured error handling.
//!
//! This module provides:
//! - `SimulationError`: The single failure taxonomy of every simulator
//! - `ParameterViolation`: One named reason per precondition, with the offending values
//!
//! Every precondition is evaluated eagerly when parameters are constructed
//! (or, for shape checks that need two inputs, at the top of `simulate`),
//! so a failure never leaves a partially filled result behind.

use thiserror::Error;

/// Convenience alias for results produced by the simulators.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Simulation failure.
///
/// There is exactly one failure category: a violated input precondition.
/// The wrapped [`ParameterViolation`] names which one.
///
/// # Examples
/// ```
/// use synth_core::types::{ParameterViolation, SimulationError};
///
/// let err = SimulationError::from(ParameterViolation::NonPositiveDuration);
/// assert_eq!(err.violation().code(), "duration_not_positive");
/// assert!(format!("{}", err).starts_with("Invalid parameter"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A precondition on the simulation inputs does not hold.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterViolation),
}

impl SimulationError {
    /// Returns the violated precondition.
    pub fn violation(&self) -> &ParameterViolation {
        match self {
            SimulationError::InvalidParameter(violation) => violation,
        }
    }
}

/// Named precondition failures.
///
/// Each variant corresponds to one entry in a parameter structure's ordered
/// precondition list and carries the value that failed the check.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterViolation {
    // ---- factor model -------------------------------------------------
    /// Duration (number of time steps) must be positive.
    #[error("duration must be a positive number of time steps")]
    NonPositiveDuration,

    /// Factor volatility must be strictly positive and finite.
    #[error("factor volatility must be positive, got {0}")]
    NonPositiveFactorVolatility(f64),

    /// Asset count must be positive.
    #[error("asset count must be positive")]
    NonPositiveAssetCount,

    /// Beta vector length must match the asset count.
    #[error("beta vector length {got} does not match asset count {expected}")]
    BetaLengthMismatch {
        /// Asset count
        expected: usize,
        /// Number of betas supplied
        got: usize,
    },

    /// Every beta must be finite.
    #[error("beta at index {index} must be finite, got {value}")]
    NonFiniteBeta {
        /// Asset index
        index: usize,
        /// Offending beta
        value: f64,
    },

    // ---- correlated factors ------------------------------------------
    /// At least one factor is required.
    #[error("at least one factor volatility is required")]
    EmptyFactorSet,

    /// Every factor volatility must be strictly positive.
    #[error("factor volatility at index {index} must be positive, got {value}")]
    NonPositiveVolatility {
        /// Factor index
        index: usize,
        /// Offending volatility
        value: f64,
    },

    /// Correlation matrix dimension must match the number of factors.
    #[error("correlation matrix has {got} elements, expected {expected}")]
    CorrelationDimensionMismatch {
        /// Expected element count (n * n)
        expected: usize,
        /// Element count supplied
        got: usize,
    },

    /// Correlation diagonal must be 1.
    #[error("correlation diagonal at index {index} is {value}, expected 1.0")]
    InvalidCorrelationDiagonal {
        /// Diagonal index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Correlation matrix must be symmetric.
    #[error("correlation matrix is not symmetric at ({i}, {j})")]
    AsymmetricCorrelation {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Off-diagonal correlations must lie in [-1, 1].
    #[error("correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    CorrelationEntryOutOfRange {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
        /// Offending value
        value: f64,
    },

    /// Covariance matrix admits no Cholesky factor.
    #[error("covariance matrix is not positive definite")]
    NotPositiveDefinite,

    // ---- heston model -------------------------------------------------
    /// Time-step size must be strictly positive.
    #[error("time step must be positive, got {0}")]
    NonPositiveTimeStep(f64),

    /// Mean-reversion speed must be non-negative.
    #[error("mean-reversion speed must be non-negative and finite, got {0}")]
    NegativeMeanReversionSpeed(f64),

    /// Long-term variance must be non-negative.
    #[error("long-term variance must be non-negative and finite, got {0}")]
    NegativeLongTermVariance(f64),

    /// Volatility of variance must be non-negative.
    #[error("volatility of variance must be non-negative and finite, got {0}")]
    NegativeVolOfVariance(f64),

    /// Price/variance correlation must lie in [-1, 1].
    #[error("price-variance correlation must be in [-1, 1], got {0}")]
    CorrelationOutOfRange(f64),

    /// Idiosyncratic volatility must be non-negative.
    #[error("idiosyncratic volatility must be non-negative and finite, got {0}")]
    NegativeIdiosyncraticVolatility(f64),

    /// Initial price must be strictly positive.
    #[error("initial price must be positive and finite, got {0}")]
    NonPositiveInitialPrice(f64),

    /// Initial variance must be non-negative.
    #[error("initial variance must be non-negative and finite, got {0}")]
    NegativeInitialVariance(f64),

    /// Exposure vector length must match the increments column count.
    #[error("exposure vector length {exposures} does not match {factors} factor columns")]
    ExposureLengthMismatch {
        /// Number of exposures
        exposures: usize,
        /// Number of factor columns in the increments matrix
        factors: usize,
    },

    /// Every exposure must be finite.
    #[error("exposure at index {index} must be finite, got {value}")]
    NonFiniteExposure {
        /// Factor index
        index: usize,
        /// Offending exposure
        value: f64,
    },

    /// Every factor increment must be finite.
    #[error("factor increment at step {row}, factor {col} must be finite, got {value}")]
    NonFiniteIncrement {
        /// Time step
        row: usize,
        /// Factor column
        col: usize,
        /// Offending increment
        value: f64,
    },

    // ---- heston panel -------------------------------------------------
    /// A panel needs at least one stock.
    #[error("a panel needs at least one stock")]
    EmptyPanel,

    /// Initial price and initial variance vectors must have equal length.
    #[error("{prices} initial prices but {variances} initial variances")]
    PanelLengthMismatch {
        /// Number of initial prices
        prices: usize,
        /// Number of initial variances
        variances: usize,
    },

    /// The loadings matrix needs one row per stock.
    #[error("loadings matrix has {rows} rows, expected one per stock ({stocks})")]
    LoadingRowsMismatch {
        /// Number of stocks
        stocks: usize,
        /// Rows of the loadings matrix
        rows: usize,
    },

    /// Every factor loading must be finite.
    #[error("loading of stock {stock} on factor {factor} must be finite, got {value}")]
    NonFiniteLoading {
        /// Stock index
        stock: usize,
        /// Factor index
        factor: usize,
        /// Offending loading
        value: f64,
    },

    // ---- matrix shape -------------------------------------------------
    /// Every row of a matrix must have the same width.
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        /// Row index
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        got: usize,
    },

    /// Flat buffer length must equal rows * cols.
    #[error("buffer of length {len} cannot form a {rows}x{cols} matrix")]
    ShapeMismatch {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Buffer length
        len: usize,
    },
}

impl ParameterViolation {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ParameterViolation::NonPositiveDuration => "duration_not_positive",
            ParameterViolation::NonPositiveFactorVolatility(_) => "factor_volatility_not_positive",
            ParameterViolation::NonPositiveAssetCount => "asset_count_not_positive",
            ParameterViolation::BetaLengthMismatch { .. } => "beta_length_mismatch",
            ParameterViolation::NonFiniteBeta { .. } => "beta_not_finite",
            ParameterViolation::EmptyFactorSet => "factor_set_empty",
            ParameterViolation::NonPositiveVolatility { .. } => "volatility_not_positive",
            ParameterViolation::CorrelationDimensionMismatch { .. } => {
                "correlation_dimension_mismatch"
            }
            ParameterViolation::InvalidCorrelationDiagonal { .. } => "correlation_diagonal_invalid",
            ParameterViolation::AsymmetricCorrelation { .. } => "correlation_not_symmetric",
            ParameterViolation::CorrelationEntryOutOfRange { .. } => "correlation_entry_out_of_range",
            ParameterViolation::NotPositiveDefinite => "covariance_not_positive_definite",
            ParameterViolation::NonPositiveTimeStep(_) => "time_step_not_positive",
            ParameterViolation::NegativeMeanReversionSpeed(_) => "mean_reversion_speed_negative",
            ParameterViolation::NegativeLongTermVariance(_) => "long_term_variance_negative",
            ParameterViolation::NegativeVolOfVariance(_) => "vol_of_variance_negative",
            ParameterViolation::CorrelationOutOfRange(_) => "correlation_out_of_range",
            ParameterViolation::NegativeIdiosyncraticVolatility(_) => {
                "idiosyncratic_volatility_negative"
            }
            ParameterViolation::NonPositiveInitialPrice(_) => "initial_price_not_positive",
            ParameterViolation::NegativeInitialVariance(_) => "initial_variance_negative",
            ParameterViolation::ExposureLengthMismatch { .. } => "exposure_length_mismatch",
            ParameterViolation::NonFiniteExposure { .. } => "exposure_not_finite",
            ParameterViolation::NonFiniteIncrement { .. } => "increment_not_finite",
            ParameterViolation::EmptyPanel => "panel_empty",
            ParameterViolation::PanelLengthMismatch { .. } => "panel_length_mismatch",
            ParameterViolation::LoadingRowsMismatch { .. } => "loading_rows_mismatch",
            ParameterViolation::NonFiniteLoading { .. } => "loading_not_finite",
            ParameterViolation::RaggedRows { .. } => "matrix_rows_ragged",
            ParameterViolation::ShapeMismatch { .. } => "matrix_shape_mismatch",
        }
    }
}

/// Returns the first violation in an ordered precondition list.
///
/// Each entry pairs the outcome of a check with the violation to report
/// when it fails. Entries are inspected front to back.
///
/// # Examples
/// ```
/// use synth_core::types::error::{first_violation, ParameterViolation};
///
/// let checks = [
///     (true, ParameterViolation::NonPositiveDuration),
///     (false, ParameterViolation::NonPositiveAssetCount),
/// ];
/// assert!(matches!(
///     first_violation(checks),
///     Err(e) if e.violation() == &ParameterViolation::NonPositiveAssetCount
/// ));
/// ```
pub fn first_violation<I>(checks: I) -> SimulationResult<()>
where
    I: IntoIterator<Item = (bool, ParameterViolation)>,
{
    match checks.into_iter().find(|(holds, _)| !holds) {
        Some((_, violation)) => Err(violation.into()),
        None => Ok(()),
    }
}
