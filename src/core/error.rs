//! Error types for hinge loss evaluation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LossError {
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Label {label} at index {index} is out of range for {n_classes} classes")]
    IndexOutOfRange {
        index: usize,
        label: usize,
        n_classes: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LossError>;
