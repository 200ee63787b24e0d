//! Absolute-threshold strategy
//!
//! Temperature is checked first and short-circuits: an out-of-band
//! temperature is reported as such and the impedance ceiling is not
//! consulted for that sensor on that tick.

use super::{details, AnomalyType, DetectorConfig, Finding};
use crate::constants::thresholds::TEMPERATURE_CONFIDENCE_SPAN_C;
use crate::reading::ProcessedReading;
use crate::sensors::Location;

/// Check one reading against the temperature band and its position's ceiling
pub(crate) fn detect(reading: &ProcessedReading, config: &DetectorConfig) -> Option<Finding> {
    let temperature = reading.temperature;

    if temperature > config.temperature_high_c {
        return Some(Finding::new(
            AnomalyType::TemperatureIssue,
            (temperature - config.temperature_high_c) / TEMPERATURE_CONFIDENCE_SPAN_C,
            details(format_args!("High temperature detected: {:.1}°C", temperature)),
        ));
    }

    if temperature < config.temperature_low_c {
        return Some(Finding::new(
            AnomalyType::TemperatureIssue,
            (config.temperature_low_c - temperature) / TEMPERATURE_CONFIDENCE_SPAN_C,
            details(format_args!("Low temperature detected: {:.1}°C", temperature)),
        ));
    }

    let ceiling = config.thresholds.for_location(reading.location).absolute_high;
    let value = reading.normalized_value;
    if value <= ceiling {
        return None;
    }

    let (anomaly_type, text) = match reading.location {
        Location::Sidewall => (AnomalyType::SidewallDamage, "Potential sidewall damage detected"),
        Location::TreadLeft | Location::TreadRight => {
            (AnomalyType::TreadDamage, "Potential tread damage detected")
        }
        Location::Bead => (AnomalyType::BeadDamage, "Potential bead area issue detected"),
        Location::Unknown => (AnomalyType::Unknown, "Unknown anomaly detected"),
    };

    Some(Finding::new(
        anomaly_type,
        (value - ceiling) / ceiling,
        details(format_args!("{}", text)),
    ))
}
