//! Utility functions for preparing loss inputs

use crate::core::{Dataset, LossError, Matrix, Result};

/// Feature preprocessing: mean-centring, constant scaling and the bias trick
pub mod preprocessing {
    use super::*;

    /// Scale applied to mean-centred 8-bit pixel intensities
    pub const DEFAULT_PIXEL_SCALE: f64 = 127.0;

    /// Per-feature means fitted on a training matrix
    #[derive(Debug, Clone, PartialEq)]
    pub struct Preprocessor {
        means: Vec<f64>,
        scale: f64,
    }

    impl Preprocessor {
        /// Fit per-feature means on the given rows
        pub fn fit(features: &Matrix, scale: f64) -> Result<Self> {
            if features.rows() == 0 {
                return Err(LossError::EmptyDataset);
            }
            if !scale.is_finite() || scale == 0.0 {
                return Err(LossError::InvalidParameter(format!(
                    "scale must be finite and non-zero, got {scale}"
                )));
            }
            Ok(Self {
                means: feature_means(features),
                scale,
            })
        }

        /// Fitted per-feature means
        pub fn means(&self) -> &[f64] {
            &self.means
        }

        /// Scale divisor
        pub fn scale(&self) -> f64 {
            self.scale
        }

        /// Output width: input features plus the bias column
        pub fn output_dim(&self) -> usize {
            self.means.len() + 1
        }

        /// Centre, scale and append the bias column
        pub fn transform(&self, features: &Matrix) -> Result<Matrix> {
            if features.cols() != self.means.len() {
                return Err(LossError::ShapeMismatch {
                    context: "preprocessor feature count",
                    expected: self.means.len(),
                    actual: features.cols(),
                });
            }

            let (means, scale) = (&self.means, self.scale);
            let centred: Vec<f64> = features
                .iter_rows()
                .flat_map(move |row| {
                    row.iter()
                        .zip(means)
                        .map(move |(&value, &mean)| (value - mean) / scale)
                })
                .collect();

            let centred = Matrix::new(features.rows(), features.cols(), centred)?;
            Ok(append_bias(&centred))
        }
    }

    /// Column means of a matrix; zeros when it has no rows
    pub fn feature_means(features: &Matrix) -> Vec<f64> {
        let mut sums = vec![0.0; features.cols()];
        for row in features.iter_rows() {
            for (sum, &value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }

        let n = features.rows().max(1) as f64;
        sums.into_iter().map(|sum| sum / n).collect()
    }

    /// Append a constant column of ones
    pub fn append_bias(features: &Matrix) -> Matrix {
        let width = features.cols() + 1;
        let mut out = Matrix::zeros(features.rows(), width);
        for (i, row) in features.iter_rows().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                out.set(i, j, value);
            }
            out.set(i, width - 1, 1.0);
        }
        out
    }
}

/// Validation utilities for labelled data
pub mod validation {
    use super::*;

    /// Check that every label indexes one of `n_classes` classes
    pub fn validate_labels<D: Dataset>(dataset: &D, n_classes: usize) -> Result<()> {
        match dataset
            .labels()
            .iter()
            .enumerate()
            .find(|(_, &label)| label >= n_classes)
        {
            Some((index, &label)) => Err(LossError::IndexOutOfRange {
                index,
                label,
                n_classes,
            }),
            None => Ok(()),
        }
    }

    /// Number of examples per class
    pub fn class_counts<D: Dataset>(dataset: &D, n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; n_classes];
        for &label in dataset.labels() {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
        }
        counts
    }
}
