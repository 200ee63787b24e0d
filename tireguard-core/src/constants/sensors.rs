//! Sensor Baselines and Temperature Compensation
//!
//! Impedance of the tire compound drifts with temperature. Readings are
//! referred back to a fixed reference temperature before smoothing, then
//! divided by a per-position baseline so that ~1.0 means nominal.

/// Reference temperature for compensation (°C).
pub const REFERENCE_TEMP_C: f32 = 25.0;

/// Fractional impedance change per °C away from the reference.
///
/// `compensated = filtered / (1 + 0.001 × (T − 25))`
pub const TEMP_COEFFICIENT_PER_C: f32 = 0.001;

/// Baseline impedance of the left tread sensor (ohms).
pub const BASELINE_TREAD_LEFT_OHMS: f32 = 100.0;

/// Baseline impedance of the right tread sensor (ohms).
pub const BASELINE_TREAD_RIGHT_OHMS: f32 = 100.0;

/// Baseline impedance of the sidewall sensor (ohms).
///
/// The sidewall compound is thinner and more flexible, so it sits higher.
pub const BASELINE_SIDEWALL_OHMS: f32 = 120.0;

/// Baseline impedance of the bead-area sensor (ohms).
pub const BASELINE_BEAD_OHMS: f32 = 150.0;
