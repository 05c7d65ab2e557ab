//! Data loading and dataset implementations
//!
//! Loaders decode on-disk formats into a [`LabeledDataset`](crate::core::LabeledDataset);
//! they never preprocess.

pub mod cifar;
pub mod csv;

pub use self::cifar::Cifar10;
pub use self::csv::*;
