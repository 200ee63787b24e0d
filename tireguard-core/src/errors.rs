//! Construction-Time Error Types
//!
//! The per-tick path has no error taxonomy: readings come from a trusted
//! upstream source and every edge condition (short history, zero regression
//! denominator, unknown location) is handled by policy. What *can* go wrong
//! is configuration, and that is rejected once, when a component is built.
//!
//! Like the rest of the core, errors are small and `Copy`, with only
//! `&'static str` for text so they never allocate.
//!
//! ```rust
//! use tireguard_core::{ConfigError, Preprocessor, PreprocessorConfig};
//!
//! let mut config = PreprocessorConfig::default();
//! config.window_size = 0;
//!
//! match Preprocessor::new(config) {
//!     Err(ConfigError::WindowSize { requested, .. }) => assert_eq!(requested, 0),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

use crate::sensors::SensorId;

/// Result type for component construction
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid configuration, reported before any tick is processed
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Baseline impedance must be finite and strictly positive
    #[error("Baseline impedance {value} for sensor {sensor} must be finite and > 0")]
    InvalidBaseline {
        /// Sensor whose baseline was rejected
        sensor: SensorId,
        /// The rejected baseline in ohms
        value: f32,
    },

    /// Moving-average window outside the supported range
    #[error("Window size {requested} outside [1, {max}]")]
    WindowSize {
        /// Configured window size
        requested: usize,
        /// Largest window the preprocessor can hold
        max: usize,
    },

    /// Detector history outside the supported range
    #[error("History length {requested} outside [1, {max}]")]
    HistoryLength {
        /// Configured history length
        requested: usize,
        /// Largest history the detector can hold
        max: usize,
    },

    /// A detection or alerting threshold is non-finite or out of range
    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Raw sensor id does not map to a known sensor position
    #[error("Unknown sensor id {0}")]
    UnknownSensor(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigError::InvalidBaseline {
            sensor: SensorId::Sidewall,
            value: -1.0,
        };
        let text = err.to_string();
        assert!(text.contains("-1"));
        assert!(text.contains('3'));

        let err = ConfigError::WindowSize { requested: 500, max: 64 };
        assert_eq!(err.to_string(), "Window size 500 outside [1, 64]");
    }

    #[test]
    fn errors_are_small() {
        assert!(core::mem::size_of::<ConfigError>() <= 32);
    }
}
