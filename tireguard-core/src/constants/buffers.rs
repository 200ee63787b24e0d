//! Buffer Sizes and Memory Constraints
//!
//! History buffers are fixed arrays so that per-sensor state never grows.
//! The configured window size and history length must fit inside these.

/// Number of sensor positions on one tire.
///
/// Tread left, tread right, sidewall, bead. Every per-sensor table in the
/// core is an array of this length.
pub const SENSOR_COUNT: usize = 4;

/// Largest moving-average window the preprocessor can hold.
///
/// 64 samples × 4 bytes × 4 sensors = 1KB of storage. At a 30 s reading
/// interval this already covers more than half an hour.
pub const MAX_WINDOW_SIZE: usize = 64;

/// Largest normalized-value / rate history the detector can hold.
///
/// Two windows per sensor: 2 × 128 × 4 bytes × 4 sensors = 4KB.
pub const MAX_HISTORY_LENGTH: usize = 128;

/// Default moving-average window (samples).
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Default detector history length (samples).
pub const DEFAULT_HISTORY_LENGTH: usize = 30;

/// Window and history used by the integrated pipeline.
pub const PIPELINE_WINDOW_SIZE: usize = 10;

/// History length used by the integrated pipeline.
pub const PIPELINE_HISTORY_LENGTH: usize = 20;
