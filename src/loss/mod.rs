//! Loss functions for linear multiclass classifiers

pub mod hinge;

pub use self::hinge::*;
