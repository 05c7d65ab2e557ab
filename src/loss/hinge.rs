//! Multiclass SVM hinge loss with L2 regularization
//!
//! For a feature matrix `X` (N × (D+1), bias column included), labels `y` and a
//! weight matrix `W` (C × (D+1)) the loss is
//!
//! ```text
//! L = Σ_i Σ_{j ≠ y_i} max(0, s_ij - s_iy_i + Δ) + λ Σ_kl W_kl²
//! ```
//!
//! where `S = X · Wᵗ` is the score matrix. The whole batch is scored with a
//! single matrix product; there is no per-example code path.

use crate::core::{LossConfig, LossError, LossReport, Matrix, Result};
use log::debug;

/// Evaluates the regularized multiclass hinge loss for a fixed configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct HingeLossEvaluator {
    config: LossConfig,
}

impl HingeLossEvaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: LossConfig) -> Self {
        Self { config }
    }

    /// Set the margin delta
    pub fn with_margin_delta(mut self, margin_delta: f64) -> Self {
        self.config.margin_delta = margin_delta;
        self
    }

    /// Set the regularization strength
    pub fn with_regularization_strength(mut self, regularization_strength: f64) -> Self {
        self.config.regularization_strength = regularization_strength;
        self
    }

    /// Get the evaluator configuration
    pub fn config(&self) -> &LossConfig {
        &self.config
    }

    /// Total regularized loss
    pub fn loss(&self, x: &Matrix, y: &[usize], w: &Matrix) -> Result<f64> {
        self.evaluate(x, y, w).map(|report| report.total)
    }

    /// Evaluate the loss and return its full breakdown
    pub fn evaluate(&self, x: &Matrix, y: &[usize], w: &Matrix) -> Result<LossReport> {
        self.config.validate()?;
        check_inputs(x, y, w)?;

        debug!(
            "Evaluating hinge loss: {} examples, {} features, {} classes",
            x.rows(),
            x.cols(),
            w.rows()
        );

        let scores = x.matmul_transposed(w)?;
        let correct = scores.gather_columns(y)?;
        let delta = self.config.margin_delta;

        let per_example: Vec<f64> = scores
            .iter_rows()
            .zip(y.iter().zip(&correct))
            .map(|(row, (&label, &correct_score))| {
                row.iter()
                    .enumerate()
                    .filter(|&(j, _)| j != label)
                    .map(|(_, &s)| hinge(s - correct_score + delta))
                    .sum::<f64>()
            })
            .collect();

        let data_loss: f64 = per_example.iter().sum();
        let regularization = l2_penalty(w, self.config.regularization_strength);
        let total = data_loss + regularization;

        debug!(
            "Hinge loss: data={:.6}, regularization={:.6}, total={:.6}",
            data_loss, regularization, total
        );

        Ok(LossReport {
            data_loss,
            regularization,
            total,
            per_example,
        })
    }
}

/// Compute the total regularized multiclass hinge loss
///
/// Convenience wrapper around [`HingeLossEvaluator`]; use
/// [`LossConfig::default`] values (1.0 and 0.1) for the usual setting.
pub fn compute_loss(
    x: &Matrix,
    y: &[usize],
    w: &Matrix,
    margin_delta: f64,
    regularization_strength: f64,
) -> Result<f64> {
    HingeLossEvaluator::default()
        .with_margin_delta(margin_delta)
        .with_regularization_strength(regularization_strength)
        .loss(x, y, w)
}

/// `max(0, margin)` that keeps NaN instead of clamping it to zero
fn hinge(margin: f64) -> f64 {
    if margin > 0.0 || margin.is_nan() {
        margin
    } else {
        0.0
    }
}

/// L2 penalty over every weight, bias column included
pub fn l2_penalty(w: &Matrix, regularization_strength: f64) -> f64 {
    regularization_strength * w.sum_of_squares()
}

fn check_inputs(x: &Matrix, y: &[usize], w: &Matrix) -> Result<()> {
    if x.rows() != y.len() {
        return Err(LossError::ShapeMismatch {
            context: "label count",
            expected: x.rows(),
            actual: y.len(),
        });
    }
    if x.cols() != w.cols() {
        return Err(LossError::ShapeMismatch {
            context: "feature columns",
            expected: w.cols(),
            actual: x.cols(),
        });
    }
    if x.rows() == 0 {
        return Err(LossError::EmptyDataset);
    }
    if w.rows() < 2 {
        return Err(LossError::InvalidParameter(format!(
            "at least two classes are required, weight matrix has {} rows",
            w.rows()
        )));
    }
    if let Some((index, &label)) = y.iter().enumerate().find(|(_, &label)| label >= w.rows()) {
        return Err(LossError::IndexOutOfRange {
            index,
            label,
            n_classes: w.rows(),
        });
    }
    Ok(())
}
