//! Multiclass SVM hinge loss for linear classifiers
//!
//! Computes the regularized Weston–Watkins hinge loss of a weight matrix over
//! a feature matrix, with loaders and preprocessing for CIFAR-10 style image data.

pub mod api;
pub mod core;
pub mod data;
pub mod loss;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::LossPipeline;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{LossError, Result};
pub use crate::data::{Cifar10, CsvDataset};
pub use crate::loss::{compute_loss, HingeLossEvaluator};
pub use crate::utils::preprocessing::Preprocessor;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
