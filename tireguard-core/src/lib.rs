//! Core diagnostic engine for TireGuard
//!
//! Turns periodic impedance/temperature readings from tire-mounted sensors
//! into graded, human-actionable alerts.
//!
//! Each tick flows through three stages, each owning its own state:
//!
//! ```text
//! SensorReading[] → Preprocessor → ProcessedReading[]
//!                 → AnomalyDetector → AnomalyTickResult
//!                 → AlertSystem → Alert[]
//! ```
//!
//! Key constraints:
//! - No global state: every component is an independent instance
//! - Bounded per-sensor history, fixed at compile time
//! - No heap allocation in the detection hot path
//!
//! ```no_run
//! use tireguard_core::pipeline::{PipelineConfig, TirePipeline, TickReadings};
//!
//! let mut pipeline = TirePipeline::new(PipelineConfig::default())?;
//! let tick = TickReadings::new(1, 30_000);
//! let outcome = pipeline.process_tick(&tick);
//! for alert in &outcome.alerts {
//!     println!("{}", alert.message);
//! }
//! println!("{}", pipeline.alerts().maintenance_report());
//! # Ok::<(), tireguard_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Optional logging, compiled out without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod alerts;
pub mod buffer;
pub mod constants;
pub mod detection;
pub mod errors;
pub mod pipeline;
pub mod preprocess;
pub mod reading;
pub mod sensors;
pub mod time;
pub mod traits;

// Public API
pub use alerts::{Alert, AlertConfig, AlertLevel, AlertSystem};
pub use detection::{
    AnomalyDetector, AnomalyResult, AnomalyTickResult, AnomalyType, DetectionSource,
    DetectorConfig,
};
pub use errors::{ConfigError, ConfigResult};
pub use preprocess::{Preprocessor, PreprocessorConfig};
pub use reading::{ProcessedReading, SensorReading};
pub use sensors::{Location, SensorCatalogue, SensorId, SensorMap};
pub use traits::{AlertSink, ReadingSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
