//! High-level API for evaluating the hinge loss on a dataset
//!
//! [`LossPipeline`] binds a preprocessed training set to a
//! [`HingeLossEvaluator`], so candidate weight matrices can be scored without
//! repeating the data preparation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hinge_svm::api::LossPipeline;
//! use hinge_svm::LossConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (pipeline, test) =
//!     LossPipeline::from_cifar10_dir("cifar-10-batches-bin", LossConfig::default())?;
//!
//! // All-zero weights: every wrong class sits exactly at the margin
//! let w = pipeline.zero_weights();
//! println!("Training loss: {:.4}", pipeline.loss(&w)?);
//! println!("Test loss: {:.4}", pipeline.evaluate_split(&test, &w)?.total);
//! # Ok(())
//! # }
//! ```

use crate::core::{Dataset, LabeledDataset, LossConfig, LossError, LossReport, Matrix, Result};
use crate::data::cifar::{Cifar10, N_CLASSES};
use crate::loss::HingeLossEvaluator;
use crate::utils::preprocessing::{Preprocessor, DEFAULT_PIXEL_SCALE};
use crate::utils::validation::{class_counts, validate_labels};
use log::{debug, info};
use std::path::Path;

/// Preprocessed training tensors paired with a loss evaluator
#[derive(Debug, Clone)]
pub struct LossPipeline {
    preprocessor: Preprocessor,
    features: Matrix,
    labels: Vec<usize>,
    n_classes: usize,
    evaluator: HingeLossEvaluator,
}

impl LossPipeline {
    /// Preprocess `train` with the default pixel scale
    pub fn new<D: Dataset>(train: &D, config: LossConfig) -> Result<Self> {
        Self::with_scale(train, config, DEFAULT_PIXEL_SCALE)
    }

    /// Preprocess `train` dividing centred features by `scale`
    ///
    /// The class count is one past the largest training label.
    pub fn with_scale<D: Dataset>(train: &D, config: LossConfig, scale: f64) -> Result<Self> {
        Self::build(train, config, scale, train.n_classes())
    }

    /// Preprocess `train` for a known number of classes
    ///
    /// Use this when the training set may not contain every class.
    pub fn with_classes<D: Dataset>(
        train: &D,
        config: LossConfig,
        n_classes: usize,
    ) -> Result<Self> {
        Self::build(train, config, DEFAULT_PIXEL_SCALE, n_classes)
    }

    fn build<D: Dataset>(
        train: &D,
        config: LossConfig,
        scale: f64,
        n_classes: usize,
    ) -> Result<Self> {
        config.validate()?;
        if train.is_empty() {
            return Err(LossError::EmptyDataset);
        }
        if n_classes < 2 {
            return Err(LossError::InvalidParameter(format!(
                "at least two classes are required, got {n_classes}"
            )));
        }
        validate_labels(train, n_classes)?;

        let preprocessor = Preprocessor::fit(train.features(), scale)?;
        let features = preprocessor.transform(train.features())?;

        info!(
            "Prepared {} training examples with {} features (bias included), {} classes",
            features.rows(),
            features.cols(),
            n_classes
        );
        debug!("Class counts: {:?}", class_counts(train, n_classes));

        Ok(Self {
            preprocessor,
            features,
            labels: train.labels().to_vec(),
            n_classes,
            evaluator: HingeLossEvaluator::new(config),
        })
    }

    /// Load CIFAR-10 from a `cifar-10-batches-bin` directory
    ///
    /// Prepares the training split for all ten classes and returns the raw test
    /// split for [`evaluate_split`](Self::evaluate_split).
    pub fn from_cifar10_dir<P: AsRef<Path>>(
        dir: P,
        config: LossConfig,
    ) -> Result<(Self, LabeledDataset)> {
        let (train, test) = Cifar10::load(dir)?;
        let pipeline = Self::with_classes(&train, config, N_CLASSES)?;
        Ok((pipeline, test))
    }

    /// Total regularized loss of `w` on the training set
    pub fn loss(&self, w: &Matrix) -> Result<f64> {
        self.evaluator.loss(&self.features, &self.labels, w)
    }

    /// Loss breakdown of `w` on the training set
    pub fn report(&self, w: &Matrix) -> Result<LossReport> {
        self.evaluator.evaluate(&self.features, &self.labels, w)
    }

    /// Loss of `w` on a held-out split, preprocessed with the training means
    pub fn evaluate_split<D: Dataset>(&self, split: &D, w: &Matrix) -> Result<LossReport> {
        validate_labels(split, w.rows())?;
        let features = self.preprocessor.transform(split.features())?;
        self.evaluator.evaluate(&features, split.labels(), w)
    }

    /// All-zero weight matrix shaped for this pipeline
    pub fn zero_weights(&self) -> Matrix {
        Matrix::zeros(self.n_classes, self.features.cols())
    }

    /// Preprocessed training features, bias column last
    pub fn features(&self) -> &Matrix {
        &self.features
    }

    /// Training labels
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of classes seen in the training labels
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Fitted preprocessor
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Loss configuration in use
    pub fn config(&self) -> &LossConfig {
        self.evaluator.config()
    }
}
