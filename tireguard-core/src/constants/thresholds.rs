//! Detection and Alerting Thresholds
//!
//! All impedance thresholds apply to *normalized* values (ratio to the
//! sensor's baseline). Rates are per tick, wear rates are slope per tick.

// ===== TEMPERATURE =====

/// Above this the tire is running hot (°C).
pub const TEMPERATURE_HIGH_C: f32 = 65.0;

/// Below this the compound is out of its operating band (°C).
pub const TEMPERATURE_LOW_C: f32 = 5.0;

/// Degrees beyond a temperature bound that map to full confidence.
pub const TEMPERATURE_CONFIDENCE_SPAN_C: f32 = 10.0;

// ===== ABSOLUTE CEILINGS =====

/// Tread ceiling, also the default for unknown locations.
pub const TREAD_ABSOLUTE_HIGH: f32 = 1.3;

/// Sidewall ceiling.
pub const SIDEWALL_ABSOLUTE_HIGH: f32 = 1.4;

/// Bead ceiling. The bead area is the most sensitive position.
pub const BEAD_ABSOLUTE_HIGH: f32 = 1.2;

// ===== RATE CEILINGS =====

/// Tread per-tick rise ceiling, also the default.
pub const TREAD_RATE_HIGH: f32 = 0.02;

/// Sidewall per-tick rise ceiling.
pub const SIDEWALL_RATE_HIGH: f32 = 0.03;

/// Bead per-tick rise ceiling.
pub const BEAD_RATE_HIGH: f32 = 0.01;

// ===== NORMAL WEAR RATES =====

/// Expected tread slope, also the default.
pub const TREAD_WEAR_RATE_NORMAL: f32 = 0.005;

/// Expected sidewall slope.
pub const SIDEWALL_WEAR_RATE_NORMAL: f32 = 0.003;

/// Expected bead slope.
pub const BEAD_WEAR_RATE_NORMAL: f32 = 0.002;

/// Slope above `normal × this` counts as accelerated wear.
pub const WEAR_TRIGGER_MULTIPLIER: f32 = 3.0;

/// Slope of `normal × this` maps to full confidence.
pub const WEAR_CONFIDENCE_MULTIPLIER: f32 = 5.0;

// ===== UNEVEN WEAR =====

/// Number of newest samples compared between the two tread sensors.
pub const UNEVEN_WEAR_WINDOW: usize = 5;

/// Relative left/right difference that counts as uneven wear.
pub const UNEVEN_WEAR_RATIO: f32 = 0.15;

/// Relative difference that maps to full confidence.
pub const UNEVEN_WEAR_CONFIDENCE_SPAN: f32 = 0.3;

// ===== ALERT ADJUSTMENT =====

/// Confidence above this promotes an alert one level.
pub const ALERT_PROMOTE_ABOVE: f32 = 0.9;

/// Confidence below this demotes an alert one level.
pub const ALERT_DEMOTE_BELOW: f32 = 0.4;
