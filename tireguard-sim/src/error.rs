//! Simulation setup errors

use thiserror_no_std::Error;
use tireguard_core::ConfigError;

/// Result type for simulation setup
pub type SimResult<T> = Result<T, SimError>;

/// Invalid simulation parameters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SimError {
    /// A noise or drift spread is negative or not finite
    #[error("Invalid {name} spread: {value}")]
    InvalidSpread {
        /// Which distribution was rejected
        name: &'static str,
        /// The rejected standard deviation
        value: f32,
    },

    /// Base impedance must be finite and strictly positive
    #[error("Base impedance {0} must be finite and > 0")]
    InvalidImpedance(f32),

    /// The pipeline under test rejected its configuration
    #[error("Pipeline configuration: {0}")]
    Pipeline(#[from] ConfigError),
}
