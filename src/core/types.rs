//! Core type definitions for hinge loss evaluation

use crate::core::{LossError, Result};
use serde::{Deserialize, Serialize};

/// Dense row-major matrix of `f64` values
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(LossError::ShapeMismatch {
                context: "matrix data length",
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a matrix from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);

        for row in rows {
            if row.len() != n_cols {
                return Err(LossError::ShapeMismatch {
                    context: "matrix row length",
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Check if the matrix holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at (row, col)
    ///
    /// # Panics
    /// Panics if either index is out of bounds
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "Matrix index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Set the value at (row, col)
    ///
    /// # Panics
    /// Panics if either index is out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "Matrix index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Borrow a single row
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Raw row-major data
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Compute `self · otherᵗ`
    ///
    /// Both matrices must share the same column count. The result has shape
    /// `self.rows() × other.rows()`, entry (i, j) being the dot product of
    /// row i of `self` with row j of `other`.
    pub fn matmul_transposed(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.cols {
            return Err(LossError::ShapeMismatch {
                context: "matrix product column count",
                expected: other.cols,
                actual: self.cols,
            });
        }

        let mut data = Vec::with_capacity(self.rows * other.rows);
        for a in self.iter_rows() {
            for b in other.iter_rows() {
                data.push(dot(a, b));
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: other.rows,
            data,
        })
    }

    /// Select column `indices[i]` from each row i
    pub fn gather_columns(&self, indices: &[usize]) -> Result<Vec<f64>> {
        if indices.len() != self.rows {
            return Err(LossError::ShapeMismatch {
                context: "gather index count",
                expected: self.rows,
                actual: indices.len(),
            });
        }

        indices
            .iter()
            .enumerate()
            .map(|(i, &j)| {
                if j >= self.cols {
                    Err(LossError::IndexOutOfRange {
                        index: i,
                        label: j,
                        n_classes: self.cols,
                    })
                } else {
                    Ok(self.data[i * self.cols + j])
                }
            })
            .collect()
    }

    /// Squared Frobenius norm: the sum of every squared entry
    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().map(|&v| v * v).sum()
    }
}

/// Dot product of two equally sized slices
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

/// Parameters of the regularized hinge loss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossConfig {
    /// Minimum required margin between the correct-class score and every other score
    pub margin_delta: f64,
    /// Weight on the L2 penalty term
    pub regularization_strength: f64,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            margin_delta: 1.0,
            regularization_strength: 0.1,
        }
    }
}

impl LossConfig {
    /// Set the margin delta
    pub fn with_margin_delta(mut self, margin_delta: f64) -> Self {
        self.margin_delta = margin_delta;
        self
    }

    /// Set the regularization strength
    pub fn with_regularization_strength(mut self, regularization_strength: f64) -> Self {
        self.regularization_strength = regularization_strength;
        self
    }

    /// Check that both parameters are finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.margin_delta.is_finite() || self.margin_delta < 0.0 {
            return Err(LossError::InvalidParameter(format!(
                "margin_delta must be finite and non-negative, got {}",
                self.margin_delta
            )));
        }
        if !self.regularization_strength.is_finite() || self.regularization_strength < 0.0 {
            return Err(LossError::InvalidParameter(format!(
                "regularization_strength must be finite and non-negative, got {}",
                self.regularization_strength
            )));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LossError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Breakdown of a single loss evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossReport {
    /// Sum of the per-example hinge losses
    pub data_loss: f64,
    /// `regularization_strength × Σ W²`
    pub regularization: f64,
    /// `data_loss + regularization`
    pub total: f64,
    /// Hinge loss of each example, in row order
    pub per_example: Vec<f64>,
}

impl LossReport {
    /// Mean per-example data loss
    pub fn mean_data_loss(&self) -> f64 {
        if self.per_example.is_empty() {
            0.0
        } else {
            self.data_loss / self.per_example.len() as f64
        }
    }
}

/// Feature matrix paired with integer class labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    /// One example per row
    pub features: Matrix,
    /// Class index of each row
    pub labels: Vec<usize>,
}

impl LabeledDataset {
    /// Pair features with labels, checking that the counts agree
    pub fn new(features: Matrix, labels: Vec<usize>) -> Result<Self> {
        if features.rows() != labels.len() {
            return Err(LossError::ShapeMismatch {
                context: "label count",
                expected: features.rows(),
                actual: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_creation() {
        let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);

        assert!(Matrix::new(2, 3, vec![1.0; 5]).is_err());
    }

    #[test]
    fn test_matrix_from_rows() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        let ragged = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            ragged,
            Err(LossError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_matmul_transposed() {
        // X is 2x2, W is 3x2 -> scores 2x3
        let x = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let w = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let s = x.matmul_transposed(&w).unwrap();

        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(s.row(1), &[3.0, 4.0, 7.0]);
    }

    #[test]
    fn test_matmul_transposed_mismatch() {
        let x = Matrix::zeros(2, 3);
        let w = Matrix::zeros(2, 4);
        assert!(matches!(
            x.matmul_transposed(&w),
            Err(LossError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_gather_columns() {
        let s = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(s.gather_columns(&[2, 0]).unwrap(), vec![3.0, 4.0]);

        assert!(matches!(
            s.gather_columns(&[0, 3]),
            Err(LossError::IndexOutOfRange {
                index: 1,
                label: 3,
                n_classes: 3
            })
        ));
        assert!(s.gather_columns(&[0]).is_err());
    }

    #[test]
    fn test_sum_of_squares() {
        let m = Matrix::from_rows(vec![vec![3.0, 0.0], vec![0.0, -4.0]]).unwrap();
        assert_eq!(m.sum_of_squares(), 25.0);
        assert_eq!(Matrix::zeros(3, 3).sum_of_squares(), 0.0);
    }

    #[test]
    fn test_iter_rows_zero_columns() {
        let m = Matrix::zeros(2, 0);
        assert_eq!(m.iter_rows().count(), 2);
        assert!(m.is_empty());

        let s = m.matmul_transposed(&Matrix::zeros(3, 0)).unwrap();
        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s.sum_of_squares(), 0.0);
    }

    #[test]
    fn test_loss_config_default() {
        let config = LossConfig::default();
        assert_eq!(config.margin_delta, 1.0);
        assert_eq!(config.regularization_strength, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_loss_config_validation() {
        assert!(LossConfig::default().with_margin_delta(-1.0).validate().is_err());
        assert!(LossConfig::default()
            .with_regularization_strength(f64::NAN)
            .validate()
            .is_err());
        assert!(LossConfig::default().with_margin_delta(0.0).validate().is_ok());
    }

    #[test]
    fn test_loss_config_json() {
        let config = LossConfig::from_json_str(r#"{"margin_delta": 2.5}"#).unwrap();
        assert_eq!(config.margin_delta, 2.5);
        assert_eq!(config.regularization_strength, 0.1);

        assert!(LossConfig::from_json_str(r#"{"margin_delta": -1.0}"#).is_err());
        assert!(matches!(
            LossConfig::from_json_str("not json"),
            Err(LossError::Parse(_))
        ));
    }

    #[test]
    fn test_labeled_dataset_count_check() {
        let features = Matrix::zeros(3, 2);
        assert!(LabeledDataset::new(features.clone(), vec![0, 1, 2]).is_ok());
        assert!(LabeledDataset::new(features, vec![0, 1]).is_err());
    }
}
