//! Rate-of-change strategy
//!
//! Only a rise counts. The first entry in a rate history is a placeholder
//! zero, so nothing fires until two entries exist.

use super::{details, AnomalyType, DetectorConfig, Finding, History};
use crate::sensors::Location;

/// Check the newest first difference against the position's rate ceiling
pub(crate) fn detect(
    location: Location,
    rates: &History,
    config: &DetectorConfig,
) -> Option<Finding> {
    if rates.len() < 2 {
        return None;
    }

    let rate = *rates.last()?;
    let ceiling = config.thresholds.for_location(location).rate_high;
    if rate <= ceiling {
        return None;
    }

    let (anomaly_type, text) = match location {
        Location::Sidewall => (
            AnomalyType::SidewallDamage,
            "Rapid sidewall impedance change detected",
        ),
        Location::TreadLeft | Location::TreadRight => {
            (AnomalyType::AcceleratedWear, "Accelerated tread wear detected")
        }
        Location::Bead => (AnomalyType::BeadDamage, "Rapid bead area impedance change detected"),
        Location::Unknown => (AnomalyType::Unknown, "Rapid impedance change detected"),
    };

    Some(Finding::new(
        anomaly_type,
        rate / (2.0 * ceiling),
        details(format_args!("{}", text)),
    ))
}
