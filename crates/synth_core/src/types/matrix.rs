//! Owned row-major matrix for factor inputs and simulated paths.
//!
//! A `PathMatrix` is a pre-sized flat buffer filled by index during a single
//! forward pass. It never resizes after construction.

use super::error::{ParameterViolation, SimulationResult};

/// Dense row-major `f64` matrix.
///
/// # Examples
///
/// ```
/// use synth_core::types::PathMatrix;
///
/// let m = PathMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m.row(1), &[3.0, 4.0]);
/// assert_eq!(m.column(0), vec![1.0, 3.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    /// Elements in row-major order
    data: Vec<f64>,
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
}

impl PathMatrix {
    /// Creates a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Wraps a row-major buffer.
    ///
    /// Fails with `ShapeMismatch` when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> SimulationResult<Self> {
        if data.len() != rows * cols {
            return Err(ParameterViolation::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            }
            .into());
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from a slice of equally sized rows.
    ///
    /// An empty slice yields a `0 x 0` matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> SimulationResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ParameterViolation::RaggedRows {
                    row: index,
                    expected: cols,
                    got: row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Builds a single-column matrix (`values.len() x 1`).
    pub fn from_column(values: &[f64]) -> Self {
        Self {
            data: values.to_vec(),
            rows: values.len(),
            cols: 1,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// First non-finite element in row-major order, as `(row, col, value)`.
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        if self.cols == 0 {
            return None;
        }
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / self.cols, i % self.cols, self.data[i]))
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        self.data[row * self.cols + col]
    }

    /// Writes the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Borrows one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Mutably borrows one row.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Copies one column out.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.get(row, col)).collect()
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // a zero-width matrix still yields `rows` empty slices
        let cols = self.cols;
        (0..self.rows).map(move |row| &self.data[row * cols..(row + 1) * cols])
    }

    /// Row-major element buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
