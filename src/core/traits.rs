//! Core traits for hinge loss evaluation

use crate::core::{LabeledDataset, Matrix};

/// Labelled data source feeding the loss evaluator
pub trait Dataset {
    /// Feature matrix, one example per row
    fn features(&self) -> &Matrix;

    /// Class index of each example
    fn labels(&self) -> &[usize];

    /// Number of examples in the dataset
    fn len(&self) -> usize {
        self.labels().len()
    }

    /// Number of features per example
    fn dim(&self) -> usize {
        self.features().cols()
    }

    /// Number of classes, taken as one past the largest label seen
    fn n_classes(&self) -> usize {
        self.labels().iter().max().map_or(0, |&max| max + 1)
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Dataset for LabeledDataset {
    fn features(&self) -> &Matrix {
        &self.features
    }

    fn labels(&self) -> &[usize] {
        &self.labels
    }
}
