//! Correlation matrices with Cholesky decomposition.
//!
//! ## Mathematical Background
//!
//! Given `n` independent standard normals `Z`, correlated shocks with
//! covariance `Σ = D * C * D` (where `D = diag(vols)`) are obtained as
//!
//! ```text
//! W = L * Z,    Σ = L * L^T
//! ```
//!
//! ## Usage
//!
//! ```
//! use synth_core::math::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::new(&[
//!     1.0, 0.5,
//!     0.5, 1.0,
//! ], 2).unwrap();
//!
//! let chol = corr.covariance_cholesky(&[0.01, 0.02]).unwrap();
//! let w = chol.transform(&[1.0, 0.0]);
//! assert!((w[0] - 0.01).abs() < 1e-15);
//! ```

use crate::types::error::{ParameterViolation, SimulationResult};

/// Tolerance for unit diagonal and symmetry checks.
const CORRELATION_TOLERANCE: f64 = 1e-8;

/// Correlation matrix with validation.
///
/// A correlation matrix must be:
/// - Square, with `dim * dim` elements in row-major order
/// - Unit diagonal and symmetric (within 1e-8)
/// - Off-diagonal elements in [-1, 1]
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order
    data: Vec<f64>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl CorrelationMatrix {
    /// Create a new correlation matrix from a flat row-major array.
    pub fn new(data: &[f64], dim: usize) -> SimulationResult<Self> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(ParameterViolation::CorrelationDimensionMismatch {
                expected,
                got: data.len(),
            }
            .into());
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !((diag - 1.0).abs() <= CORRELATION_TOLERANCE) {
                return Err(ParameterViolation::InvalidCorrelationDiagonal {
                    index: i,
                    value: diag,
                }
                .into());
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if !((val_ij - val_ji).abs() <= CORRELATION_TOLERANCE) {
                    return Err(ParameterViolation::AsymmetricCorrelation { i, j }.into());
                }

                if !(-1.0..=1.0).contains(&val_ij) {
                    return Err(ParameterViolation::CorrelationEntryOutOfRange {
                        i,
                        j,
                        value: val_ij,
                    }
                    .into());
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Identity correlation matrix (independent factors).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Cholesky factor of the correlation matrix itself.
    pub fn cholesky(&self) -> SimulationResult<CholeskyFactor> {
        decompose(&self.data, self.dim)
    }

    /// Cholesky factor of the covariance `diag(vols) * C * diag(vols)`.
    ///
    /// `vols.len()` must equal `dim()`; the caller validates positivity.
    pub fn covariance_cholesky(&self, vols: &[f64]) -> SimulationResult<CholeskyFactor> {
        if vols.len() != self.dim {
            return Err(ParameterViolation::CorrelationDimensionMismatch {
                expected: vols.len() * vols.len(),
                got: self.data.len(),
            }
            .into());
        }
        let n = self.dim;
        let mut covariance = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                covariance[i * n + j] = vols[i] * self.get(i, j) * vols[j];
            }
        }
        decompose(&covariance, n)
    }
}

/// Lower-triangular factorisation of a symmetric positive definite matrix.
fn decompose(matrix: &[f64], n: usize) -> SimulationResult<CholeskyFactor> {
    let mut lower = vec![0.0; n * n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;

            if j == i {
                for k in 0..j {
                    let l_jk = lower[j * n + k];
                    sum += l_jk * l_jk;
                }
                let diag = matrix[j * n + j] - sum;
                if !(diag > 0.0) {
                    return Err(ParameterViolation::NotPositiveDefinite.into());
                }
                lower[j * n + j] = diag.sqrt();
            } else {
                for k in 0..j {
                    sum += lower[i * n + k] * lower[j * n + k];
                }
                lower[i * n + j] = (matrix[i * n + j] - sum) / lower[j * n + j];
            }
        }
    }

    Ok(CholeskyFactor { data: lower, dim: n })
}

/// Lower-triangular Cholesky factor.
///
/// Transforms independent standard normals into correlated shocks.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    /// Lower triangular elements (row-major)
    data: Vec<f64>,
    /// Matrix dimension
    dim: usize,
}

impl CholeskyFactor {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j); zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Computes `W = L * Z`.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform(&self, z: &[f64]) -> Vec<f64> {
        let mut w = vec![0.0; self.dim];
        self.transform_into(z, &mut w);
        w
    }

    /// Computes `W = L * Z` into a caller-owned buffer.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than `self.dim()`.
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        assert!(
            z.len() >= self.dim && out.len() >= self.dim,
            "buffer shorter than matrix dimension {}",
            self.dim
        );

        let n = self.dim;
        for i in 0..n {
            out[i] = (0..=i).map(|j| self.data[i * n + j] * z[j]).sum();
        }
    }
}
