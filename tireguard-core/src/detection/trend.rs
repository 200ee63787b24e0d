//! Long-term trend strategy
//!
//! Two checks share the trend slot:
//!
//! - **Slope**: an ordinary least-squares line through a sensor's
//!   normalized history (value against sample index). A slope beyond three
//!   times the position's normal wear rate is accelerated wear.
//! - **Uneven wear**: the mean of the newest samples on the left tread is
//!   compared with the right. A relative gap above 15% is reported on the
//!   higher side and replaces that side's slope finding.

use super::{details, AnomalyType, DetectorConfig, Finding, UnevenWearConfig};
use crate::buffer::CircularBuffer;
use crate::constants::thresholds::{WEAR_CONFIDENCE_MULTIPLIER, WEAR_TRIGGER_MULTIPLIER};
use crate::sensors::SensorId;

/// Least-squares slope of the values against their index (0..n-1)
///
/// `None` with fewer than two values, or when the regression is degenerate.
pub fn least_squares_slope<const N: usize>(values: &CircularBuffer<f32, N>) -> Option<f32> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let x_mean = (n - 1) as f32 / 2.0;
    let y_mean = values.mean()?;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f32 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Slope check for one sensor's normalized history
pub(crate) fn detect_slope<const N: usize>(
    sensor: SensorId,
    history: &CircularBuffer<f32, N>,
    config: &DetectorConfig,
) -> Option<Finding> {
    if history.len() < config.history_length / 2 {
        return None;
    }

    let first = *history.get(0)?;
    if history.iter().all(|v| *v == first) {
        return None;
    }

    let slope = least_squares_slope(history)?;
    let normal = config.thresholds.for_location(sensor.location()).wear_rate_normal;
    if slope <= normal * WEAR_TRIGGER_MULTIPLIER {
        return None;
    }

    Some(Finding::new(
        AnomalyType::AcceleratedWear,
        slope / (normal * WEAR_CONFIDENCE_MULTIPLIER),
        details(format_args!("Long-term accelerated wear detected")),
    ))
}

/// Compare the newest samples of the two tread sensors
///
/// Returns the side with the higher mean when the gap is large enough.
pub(crate) fn detect_uneven_wear<const N: usize>(
    left: &CircularBuffer<f32, N>,
    right: &CircularBuffer<f32, N>,
    config: &UnevenWearConfig,
) -> Option<(SensorId, Finding)> {
    let left_avg = left.tail_mean(config.window)?;
    let right_avg = right.tail_mean(config.window)?;

    let larger = left_avg.max(right_avg);
    if larger <= 0.0 {
        return None;
    }

    let diff_ratio = libm::fabsf(left_avg - right_avg) / larger;
    if diff_ratio <= config.ratio {
        return None;
    }

    let side = if left_avg > right_avg {
        SensorId::TreadLeft
    } else {
        SensorId::TreadRight
    };

    Some((
        side,
        Finding::new(
            AnomalyType::UnevenWear,
            diff_ratio / config.confidence_span,
            details(format_args!(
                "Uneven tread wear detected ({:.2}% difference)",
                diff_ratio * 100.0
            )),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(values: &[f32]) -> CircularBuffer<f32, 128> {
        let mut h = CircularBuffer::with_capacity(30);
        for v in values {
            h.push(*v);
        }
        h
    }

    fn ramp(start: f32, step: f32, n: usize) -> CircularBuffer<f32, 128> {
        let values: alloc::vec::Vec<f32> = (0..n).map(|i| start + step * i as f32).collect();
        history(&values)
    }

    #[test]
    fn slope_of_a_line() {
        let slope = least_squares_slope(&ramp(1.0, 0.02, 10)).unwrap();
        assert!(libm::fabsf(slope - 0.02) < 1e-5);

        let falling = least_squares_slope(&ramp(2.0, -0.5, 4)).unwrap();
        assert!(libm::fabsf(falling + 0.5) < 1e-5);
    }

    #[test]
    fn slope_needs_two_points() {
        assert!(least_squares_slope(&history(&[])).is_none());
        assert!(least_squares_slope(&history(&[1.0])).is_none());
    }

    #[test]
    fn waits_for_half_the_history() {
        let config = DetectorConfig::default(); // history 30, needs 15
        assert!(detect_slope(SensorId::TreadLeft, &ramp(1.0, 0.05, 14), &config).is_none());
        assert!(detect_slope(SensorId::TreadLeft, &ramp(1.0, 0.05, 15), &config).is_some());
    }

    #[test]
    fn constant_history_is_skipped() {
        let config = DetectorConfig::with_history_length(4);
        assert!(detect_slope(SensorId::Bead, &history(&[1.1; 4]), &config).is_none());
    }

    #[test]
    fn slope_is_compared_per_location() {
        let config = DetectorConfig::with_history_length(10);
        // 0.01/tick: above 3 × bead (0.006), below 3 × tread (0.015)
        let h = ramp(1.0, 0.01, 10);

        assert!(detect_slope(SensorId::TreadRight, &h, &config).is_none());

        let bead = detect_slope(SensorId::Bead, &h, &config).unwrap();
        assert_eq!(bead.anomaly_type, AnomalyType::AcceleratedWear);
        // 0.01 / (5 × 0.002)
        assert!(libm::fabsf(bead.confidence - 1.0) < 1e-4);

        let sidewall = detect_slope(SensorId::Sidewall, &h, &config).unwrap();
        // 0.01 / (5 × 0.003)
        assert!(libm::fabsf(sidewall.confidence - 0.6667) < 1e-3);
    }

    #[test]
    fn uneven_wear_reports_higher_side() {
        let config = UnevenWearConfig::default();
        let left = history(&[1.0, 1.2, 1.2, 1.2, 1.2, 1.2]);
        let right = history(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

        let (side, finding) = detect_uneven_wear(&left, &right, &config).unwrap();
        assert_eq!(side, SensorId::TreadLeft);
        assert_eq!(finding.anomaly_type, AnomalyType::UnevenWear);
        // gap 0.2 / 1.2
        assert!(libm::fabsf(finding.confidence - (0.2 / 1.2) / 0.3) < 1e-4);
        assert_eq!(finding.details.as_str(), "Uneven tread wear detected (16.67% difference)");

        let (side, _) = detect_uneven_wear(&right, &left, &config).unwrap();
        assert_eq!(side, SensorId::TreadRight);
    }

    #[test]
    fn uneven_wear_needs_window_on_both_sides() {
        let config = UnevenWearConfig::default();
        let left = history(&[1.5; 5]);
        let right = history(&[1.0; 4]);
        assert!(detect_uneven_wear(&left, &right, &config).is_none());
    }

    #[test]
    fn small_gap_is_even() {
        let config = UnevenWearConfig::default();
        let left = history(&[1.1; 5]);
        let right = history(&[1.0; 5]);
        assert!(detect_uneven_wear(&left, &right, &config).is_none());
    }
}
