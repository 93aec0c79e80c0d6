//! # Cost Math
//!
//! Numeric building blocks for cost forecasting.
//! This crate provides the averages, growth ramps, percent changes and
//! decimal rounding the forecast engine composes.

use thiserror::Error;

pub mod averages;
pub mod growth;
pub mod rounding;

pub use averages::{mean, window_average};
pub use growth::{linear_decay, linear_ramp, percent_change};
pub use rounding::{format_fixed, round_to};

/// Errors that can occur in cost calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for cost math operations
pub type Result<T> = std::result::Result<T, MathError>;
