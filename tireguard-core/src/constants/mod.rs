//! Constants for TireGuard Core
//!
//! Centralized numeric configuration for the diagnostic pipeline. These
//! values are fixed defaults, not calibrated: a deployment tunes them
//! through the config structs, which start from the values here.
//!
//! ## Organization
//!
//! - **Buffers**: compile-time storage limits for per-sensor history
//! - **Sensors**: baseline impedances and temperature compensation
//! - **Thresholds**: detection ceilings, wear rates, alert confidence bands

/// Storage limits for per-sensor history buffers.
pub mod buffers;

/// Sensor baselines and temperature compensation parameters.
pub mod sensors;

/// Detection and alerting thresholds.
pub mod thresholds;

pub use buffers::{MAX_HISTORY_LENGTH, MAX_WINDOW_SIZE, SENSOR_COUNT};
pub use sensors::{REFERENCE_TEMP_C, TEMP_COEFFICIENT_PER_C};
pub use thresholds::{TEMPERATURE_HIGH_C, TEMPERATURE_LOW_C};
