//! Anomaly Detection
//!
//! ## Overview
//!
//! Every tick the detector decides, for each sensor, whether something is
//! wrong, what it is, and how sure it is. Three independent strategies look
//! at the same data from different time scales:
//!
//! | Strategy  | Looks at                         | Catches                    |
//! |-----------|----------------------------------|----------------------------|
//! | Threshold | this tick's value + temperature  | damage, overheating        |
//! | Rate      | newest first difference          | sudden structural change   |
//! | Trend     | least-squares slope over history | accelerated / uneven wear  |
//!
//! ## Fusion
//!
//! The strategies never blend. Fusion is a strict fallback chain,
//! threshold → rate → trend → normal, so exactly one [`AnomalyResult`] comes
//! out per sensor and the winning strategy is recorded in
//! [`AnomalyResult::source`].
//!
//! ## State
//!
//! Per sensor the detector keeps two bounded windows of `history_length`:
//! normalized values and their first differences. [`AnomalyDetector::analyze`]
//! appends exactly one entry to each before any strategy runs. The very
//! first difference for a sensor is recorded as 0, and the rate strategy
//! waits for at least two entries.
//!
//! ```rust
//! use tireguard_core::{AnomalyDetector, DetectorConfig, ProcessedReading};
//! # use tireguard_core::{SensorId, Location};
//! # fn reading(value: f32) -> ProcessedReading {
//! #     ProcessedReading {
//! #         sensor_id: SensorId::Sidewall, raw_value: value * 120.0,
//! #         filtered_value: value * 120.0, compensated_value: value * 120.0,
//! #         moving_average: value * 120.0, normalized_value: value,
//! #         location: Location::Sidewall, temperature: 25.0,
//! #         timestamp: 0, tick_index: 0,
//! #     }
//! # }
//!
//! let mut detector = AnomalyDetector::new(DetectorConfig::default())?;
//! let tick = detector.analyze(1, 30_000, &[reading(1.5)]);
//!
//! let result = tick.results.get(SensorId::Sidewall).unwrap();
//! assert!(result.detected);
//! # Ok::<(), tireguard_core::ConfigError>(())
//! ```

use core::fmt::{self, Write};

use crate::buffer::CircularBuffer;
use crate::constants::buffers::{DEFAULT_HISTORY_LENGTH, MAX_HISTORY_LENGTH, SENSOR_COUNT};
use crate::constants::thresholds::*;
use crate::errors::{ConfigError, ConfigResult};
use crate::reading::ProcessedReading;
use crate::sensors::{Location, SensorId, SensorMap};
use crate::time::{TickIndex, Timestamp};

mod fusion;
mod rate;
mod threshold;
mod trend;

pub use trend::least_squares_slope;

/// Capacity of the inline details text on each result
pub const DETAILS_CAPACITY: usize = 96;

/// Free-text explanation attached to a result, stored inline
pub type Details = heapless::String<DETAILS_CAPACITY>;

/// History window type used by the detector
pub type History = CircularBuffer<f32, MAX_HISTORY_LENGTH>;

/// Kind of tire condition a detector can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AnomalyType {
    /// Nothing wrong
    Normal,
    /// Expected wear progression
    GradualWear,
    /// Wear faster than the position's normal rate
    AcceleratedWear,
    /// Sidewall structural damage
    SidewallDamage,
    /// Tread damage
    TreadDamage,
    /// Damage near the bead seat
    BeadDamage,
    /// Possible puncture
    Puncture,
    /// Left and right tread diverging
    UnevenWear,
    /// Operating temperature out of band
    TemperatureIssue,
    /// Anomaly at an unrecognised position
    Unknown,
}

impl AnomalyType {
    /// Upper-snake-case name used in alert text
    pub const fn name(self) -> &'static str {
        match self {
            AnomalyType::Normal => "NORMAL",
            AnomalyType::GradualWear => "GRADUAL_WEAR",
            AnomalyType::AcceleratedWear => "ACCELERATED_WEAR",
            AnomalyType::SidewallDamage => "SIDEWALL_DAMAGE",
            AnomalyType::TreadDamage => "TREAD_DAMAGE",
            AnomalyType::BeadDamage => "BEAD_DAMAGE",
            AnomalyType::Puncture => "PUNCTURE",
            AnomalyType::UnevenWear => "UNEVEN_WEAR",
            AnomalyType::TemperatureIssue => "TEMPERATURE_ISSUE",
            AnomalyType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy whose finding won fusion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DetectionSource {
    /// Absolute ceiling or temperature bound
    Threshold,
    /// Newest first difference
    Rate,
    /// Long-term slope or left/right comparison
    Trend,
}

/// Fused detection outcome for one sensor on one tick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnomalyResult {
    /// Sensor the result is about
    pub sensor_id: SensorId,
    /// Whether any strategy fired
    pub detected: bool,
    /// What was found (`Normal` when nothing was)
    pub anomaly_type: AnomalyType,
    /// Certainty in [0, 1]
    pub confidence: f32,
    /// Explanation, empty when nothing was found
    pub details: Details,
    /// Winning strategy, `None` when nothing was found
    pub source: Option<DetectionSource>,
}

impl AnomalyResult {
    /// Not-detected result with zero confidence
    pub fn normal(sensor_id: SensorId) -> Self {
        Self {
            sensor_id,
            detected: false,
            anomaly_type: AnomalyType::Normal,
            confidence: 0.0,
            details: Details::new(),
            source: None,
        }
    }
}

/// Everything the detector concluded on one tick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnomalyTickResult {
    /// Timestamp of the tick
    pub timestamp: Timestamp,
    /// Collection cycle
    pub tick_index: TickIndex,
    /// One result per sensor that reported this tick
    pub results: SensorMap<AnomalyResult>,
}

impl AnomalyTickResult {
    /// Results where an anomaly was detected, in sensor order
    pub fn detected(&self) -> impl Iterator<Item = &AnomalyResult> + '_ {
        self.results.values().filter(|r| r.detected)
    }

    /// Whether any sensor reported an anomaly
    pub fn any_detected(&self) -> bool {
        self.detected().next().is_some()
    }
}

/// A single strategy's positive finding, before fusion
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Finding {
    pub anomaly_type: AnomalyType,
    pub confidence: f32,
    pub details: Details,
}

impl Finding {
    pub fn new(anomaly_type: AnomalyType, confidence: f32, details: Details) -> Self {
        Self {
            anomaly_type,
            confidence: clamp_confidence(confidence),
            details,
        }
    }
}

/// Clamp a raw score into [0, 1]
pub(crate) fn clamp_confidence(raw: f32) -> f32 {
    raw.clamp(0.0, 1.0)
}

/// Render details into inline storage
pub(crate) fn details(args: fmt::Arguments<'_>) -> Details {
    let mut text = Details::new();
    // A piece that overflows is dropped; every built-in message fits
    let _ = text.write_fmt(args);
    text
}

/// Ceilings for one mounting position (normalized units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationThresholds {
    /// Absolute ceiling on the normalized value
    pub absolute_high: f32,
    /// Ceiling on a single tick's rise
    pub rate_high: f32,
    /// Expected long-term slope per tick
    pub wear_rate_normal: f32,
}

impl LocationThresholds {
    fn validate(&self) -> ConfigResult<()> {
        positive("absolute_high", self.absolute_high)?;
        positive("rate_high", self.rate_high)?;
        positive("wear_rate_normal", self.wear_rate_normal)
    }
}

/// Ceilings for every position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    /// Both tread sensors
    pub tread: LocationThresholds,
    /// Sidewall sensor
    pub sidewall: LocationThresholds,
    /// Bead sensor
    pub bead: LocationThresholds,
    /// Unrecognised positions
    pub fallback: LocationThresholds,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let tread = LocationThresholds {
            absolute_high: TREAD_ABSOLUTE_HIGH,
            rate_high: TREAD_RATE_HIGH,
            wear_rate_normal: TREAD_WEAR_RATE_NORMAL,
        };
        Self {
            tread,
            sidewall: LocationThresholds {
                absolute_high: SIDEWALL_ABSOLUTE_HIGH,
                rate_high: SIDEWALL_RATE_HIGH,
                wear_rate_normal: SIDEWALL_WEAR_RATE_NORMAL,
            },
            bead: LocationThresholds {
                absolute_high: BEAD_ABSOLUTE_HIGH,
                rate_high: BEAD_RATE_HIGH,
                wear_rate_normal: BEAD_WEAR_RATE_NORMAL,
            },
            fallback: tread,
        }
    }
}

impl ThresholdTable {
    /// Ceilings that apply to a position
    pub fn for_location(&self, location: Location) -> &LocationThresholds {
        match location {
            Location::TreadLeft | Location::TreadRight => &self.tread,
            Location::Sidewall => &self.sidewall,
            Location::Bead => &self.bead,
            Location::Unknown => &self.fallback,
        }
    }
}

/// Parameters of the cross-sensor uneven-wear check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnevenWearConfig {
    /// Newest samples averaged on each side
    pub window: usize,
    /// Relative difference that triggers
    pub ratio: f32,
    /// Relative difference that maps to full confidence
    pub confidence_span: f32,
}

impl Default for UnevenWearConfig {
    fn default() -> Self {
        Self {
            window: UNEVEN_WEAR_WINDOW,
            ratio: UNEVEN_WEAR_RATIO,
            confidence_span: UNEVEN_WEAR_CONFIDENCE_SPAN,
        }
    }
}

/// Detector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Capacity of the value and rate histories (1..=128)
    pub history_length: usize,
    /// Upper temperature bound (°C)
    pub temperature_high_c: f32,
    /// Lower temperature bound (°C)
    pub temperature_low_c: f32,
    /// Per-position ceilings
    pub thresholds: ThresholdTable,
    /// Left/right tread comparison
    pub uneven_wear: UnevenWearConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            history_length: DEFAULT_HISTORY_LENGTH,
            temperature_high_c: TEMPERATURE_HIGH_C,
            temperature_low_c: TEMPERATURE_LOW_C,
            thresholds: ThresholdTable::default(),
            uneven_wear: UnevenWearConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Config with a specific history length and default everything else
    pub fn with_history_length(history_length: usize) -> Self {
        Self {
            history_length,
            ..Self::default()
        }
    }

    /// Check every field before a detector is built
    pub fn validate(&self) -> ConfigResult<()> {
        if self.history_length == 0 || self.history_length > MAX_HISTORY_LENGTH {
            return Err(ConfigError::HistoryLength {
                requested: self.history_length,
                max: MAX_HISTORY_LENGTH,
            });
        }
        if !self.temperature_high_c.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                name: "temperature_high_c",
                value: self.temperature_high_c,
            });
        }
        if !self.temperature_low_c.is_finite()
            || self.temperature_low_c >= self.temperature_high_c
        {
            return Err(ConfigError::InvalidThreshold {
                name: "temperature_low_c",
                value: self.temperature_low_c,
            });
        }

        self.thresholds.tread.validate()?;
        self.thresholds.sidewall.validate()?;
        self.thresholds.bead.validate()?;
        self.thresholds.fallback.validate()?;

        let uneven = &self.uneven_wear;
        if uneven.window == 0 || uneven.window > MAX_HISTORY_LENGTH {
            return Err(ConfigError::InvalidThreshold {
                name: "uneven_wear.window",
                value: uneven.window as f32,
            });
        }
        positive("uneven_wear.ratio", uneven.ratio)?;
        positive("uneven_wear.confidence_span", uneven.confidence_span)
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

/// Stateful anomaly detector for one tire
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: DetectorConfig,
    values: [History; SENSOR_COUNT],
    rates: [History; SENSOR_COUNT],
}

impl AnomalyDetector {
    /// Build a detector, rejecting invalid configuration
    pub fn new(config: DetectorConfig) -> ConfigResult<Self> {
        config.validate()?;

        let empty = History::with_capacity(config.history_length);
        Ok(Self {
            config,
            values: core::array::from_fn(|_| empty.clone()),
            rates: core::array::from_fn(|_| empty.clone()),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Normalized-value history for a sensor, oldest first
    pub fn history(&self, sensor: SensorId) -> &History {
        &self.values[sensor.index()]
    }

    /// First-difference history for a sensor, oldest first
    pub fn rate_history(&self, sensor: SensorId) -> &History {
        &self.rates[sensor.index()]
    }

    /// Append one normalized value and one first difference per reading
    pub fn update_history(&mut self, readings: &[ProcessedReading]) {
        for reading in readings {
            let idx = reading.sensor_id.index();
            let values = &mut self.values[idx];
            values.push(reading.normalized_value);

            let rate = match (values.nth_back(0), values.nth_back(1)) {
                (Some(current), Some(previous)) => current - previous,
                _ => 0.0,
            };
            self.rates[idx].push(rate);

            log_debug!(
                "sensor {} history: value={} rate={} len={}",
                reading.sensor_id,
                reading.normalized_value,
                rate,
                values.len()
            );
        }
    }

    /// Update history, run all three strategies and fuse per sensor
    pub fn analyze(
        &mut self,
        tick_index: TickIndex,
        timestamp: Timestamp,
        readings: &[ProcessedReading],
    ) -> AnomalyTickResult {
        self.update_history(readings);

        let trend_findings = self.detect_trend_anomalies();
        let mut results = SensorMap::new();

        for reading in readings {
            let sensor = reading.sensor_id;
            let verdicts = fusion::Verdicts {
                threshold: threshold::detect(reading, &self.config),
                rate: rate::detect(reading.location, self.rate_history(sensor), &self.config),
                trend: trend_findings.get(sensor).cloned(),
            };
            let result = fusion::fuse(sensor, verdicts);

            if result.detected {
                log_info!(
                    "tick {}: sensor {} {} (confidence {:.2}): {}",
                    tick_index,
                    sensor,
                    result.anomaly_type,
                    result.confidence,
                    result.details
                );
            }
            results.insert(sensor, result);
        }

        AnomalyTickResult {
            timestamp,
            tick_index,
            results,
        }
    }

    /// Trend findings for every sensor, uneven wear applied last
    fn detect_trend_anomalies(&self) -> SensorMap<Finding> {
        let mut findings = SensorMap::new();

        for sensor in SensorId::ALL {
            if let Some(finding) = trend::detect_slope(sensor, self.history(sensor), &self.config) {
                findings.insert(sensor, finding);
            }
        }

        // Overwrites whatever slope finding the higher side already had
        if let Some((sensor, finding)) = trend::detect_uneven_wear(
            self.history(SensorId::TreadLeft),
            self.history(SensorId::TreadRight),
            &self.config.uneven_wear,
        ) {
            findings.insert(sensor, finding);
        }

        findings
    }

    /// Forget all history, keeping the configuration
    pub fn reset(&mut self) {
        for history in self.values.iter_mut().chain(self.rates.iter_mut()) {
            history.clear();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn processed(
        sensor: SensorId,
        normalized: f32,
        temperature: f32,
    ) -> ProcessedReading {
        let baseline = sensor.default_baseline();
        ProcessedReading {
            sensor_id: sensor,
            raw_value: normalized * baseline,
            filtered_value: normalized * baseline,
            compensated_value: normalized * baseline,
            moving_average: normalized * baseline,
            normalized_value: normalized,
            location: sensor.location(),
            temperature,
            timestamp: 0,
            tick_index: 0,
        }
    }

    #[test]
    fn first_rate_is_zero() {
        let mut detector = AnomalyDetector::new(DetectorConfig::default()).unwrap();
        detector.update_history(&[processed(SensorId::Bead, 1.0, 25.0)]);
        detector.update_history(&[processed(SensorId::Bead, 1.05, 25.0)]);

        let rates: alloc::vec::Vec<f32> = detector
            .rate_history(SensorId::Bead)
            .iter()
            .copied()
            .collect();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0], 0.0);
        assert!(libm::fabsf(rates[1] - 0.05) < 1e-6);
    }

    #[test]
    fn history_is_bounded() {
        let mut detector = AnomalyDetector::new(DetectorConfig::with_history_length(4)).unwrap();
        for i in 0..10 {
            detector.update_history(&[processed(SensorId::Sidewall, 1.0 + i as f32 * 0.001, 25.0)]);
        }
        assert_eq!(detector.history(SensorId::Sidewall).len(), 4);
        assert_eq!(detector.rate_history(SensorId::Sidewall).len(), 4);
        assert!(detector.history(SensorId::Bead).is_empty());
    }

    #[test]
    fn nominal_tick_is_normal() {
        let mut detector = AnomalyDetector::new(DetectorConfig::default()).unwrap();
        let readings: alloc::vec::Vec<_> =
            SensorId::ALL.iter().map(|s| processed(*s, 1.0, 25.0)).collect();
        let tick = detector.analyze(1, 30_000, &readings);

        assert_eq!(tick.results.len(), SENSOR_COUNT);
        assert!(!tick.any_detected());
        for result in tick.results.values() {
            assert_eq!(*result, AnomalyResult::normal(result.sensor_id));
        }
    }

    #[test]
    fn only_reporting_sensors_get_results() {
        let mut detector = AnomalyDetector::new(DetectorConfig::default()).unwrap();
        let tick = detector.analyze(1, 0, &[processed(SensorId::TreadLeft, 1.0, 25.0)]);
        assert_eq!(tick.results.len(), 1);
        assert!(tick.results.contains(SensorId::TreadLeft));
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            AnomalyDetector::new(DetectorConfig::with_history_length(0)),
            Err(ConfigError::HistoryLength { requested: 0, .. })
        ));

        let mut config = DetectorConfig::default();
        config.thresholds.bead.rate_high = 0.0;
        assert!(matches!(
            AnomalyDetector::new(config),
            Err(ConfigError::InvalidThreshold { name: "rate_high", .. })
        ));

        let mut config = DetectorConfig::default();
        config.temperature_low_c = 70.0;
        assert!(AnomalyDetector::new(config).is_err());
    }

    #[test]
    fn uneven_wear_replaces_slope_finding() {
        let config = DetectorConfig::with_history_length(10);
        let mut detector = AnomalyDetector::new(config).unwrap();

        // Left drifts 0.018 per tick: under the rate ceiling, over the slope trigger
        let mut tick = None;
        for t in 1..=14u64 {
            let readings = [
                processed(SensorId::TreadLeft, 1.0 + 0.018 * t as f32, 25.0),
                processed(SensorId::TreadRight, 1.0, 25.0),
            ];
            tick = Some(detector.analyze(t, t * 30_000, &readings));
        }
        let tick = tick.unwrap();

        let slope = trend::detect_slope(
            SensorId::TreadLeft,
            detector.history(SensorId::TreadLeft),
            &config,
        )
        .unwrap();
        assert_eq!(slope.anomaly_type, AnomalyType::AcceleratedWear);

        let left = tick.results.get(SensorId::TreadLeft).unwrap();
        assert!(left.detected);
        assert_eq!(left.anomaly_type, AnomalyType::UnevenWear);
        assert_eq!(left.source, Some(DetectionSource::Trend));
        assert!(libm::fabsf(left.confidence - 0.592) < 1e-3);
        assert!(left.details.starts_with("Uneven tread wear detected"));

        assert!(!tick.results.get(SensorId::TreadRight).unwrap().detected);
    }

    #[test]
    fn anomaly_names() {
        assert_eq!(AnomalyType::SidewallDamage.name(), "SIDEWALL_DAMAGE");
        assert_eq!(alloc::format!("{}", AnomalyType::UnevenWear), "UNEVEN_WEAR");
    }

    #[test]
    fn oversized_details_do_not_panic() {
        let long = "x".repeat(DETAILS_CAPACITY * 2);
        let text = details(format_args!("{}", long));
        assert!(text.len() <= DETAILS_CAPACITY);
    }
}
