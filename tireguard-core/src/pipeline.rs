//! Tick Pipeline
//!
//! ## Overview
//!
//! [`TirePipeline`] owns one instance of each stage and pushes a tick of
//! readings through them in order:
//!
//! ```text
//! ReadingSource → TickReadings
//!     → Preprocessor::process_all   → ProcessedReading[]
//!     → AnomalyDetector::analyze    → AnomalyTickResult
//!     → AlertSystem::generate_alerts → Alert[] → AlertSink
//! ```
//!
//! Ticks must be fed in increasing `tick_index` order. Nothing here
//! sleeps or reads a clock; the source decides what a tick's timestamp is.

use alloc::vec::Vec;

use crate::alerts::{Alert, AlertConfig, AlertLevel, AlertSystem};
use crate::constants::buffers::{PIPELINE_HISTORY_LENGTH, PIPELINE_WINDOW_SIZE, SENSOR_COUNT};
use crate::detection::{AnomalyDetector, AnomalyTickResult, DetectorConfig};
use crate::errors::ConfigResult;
use crate::preprocess::{Preprocessor, PreprocessorConfig};
use crate::reading::{ProcessedReading, SensorReading};
use crate::time::{TickIndex, Timestamp};
use crate::traits::{AlertSink, ReadingSource};

/// Readings collected in one tick, at most one per sensor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickReadings {
    /// Collection cycle
    pub tick_index: TickIndex,
    /// Time the cycle was taken
    pub timestamp: Timestamp,
    readings: heapless::Vec<SensorReading, SENSOR_COUNT>,
}

impl TickReadings {
    /// Empty tick
    pub fn new(tick_index: TickIndex, timestamp: Timestamp) -> Self {
        Self {
            tick_index,
            timestamp,
            readings: heapless::Vec::new(),
        }
    }

    /// Add a reading stamped with this tick, replacing any earlier reading
    /// from the same sensor
    pub fn insert(&mut self, reading: SensorReading) -> Option<SensorReading> {
        let reading = reading.at(self.tick_index, self.timestamp);

        if let Some(slot) = self
            .readings
            .iter_mut()
            .find(|r| r.sensor_id == reading.sensor_id)
        {
            return Some(core::mem::replace(slot, reading));
        }

        // One slot per sensor, so a sensor not yet present always fits
        let _ = self.readings.push(reading);
        None
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_reading(mut self, reading: SensorReading) -> Self {
        self.insert(reading);
        self
    }

    /// Readings in insertion order
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    /// Number of sensors that reported
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when no sensor reported
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Configuration for all three stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Smoothing and normalization
    pub preprocessor: PreprocessorConfig,
    /// Strategies and history
    pub detector: DetectorConfig,
    /// Severity bands
    pub alerts: AlertConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            preprocessor: PreprocessorConfig::with_window_size(PIPELINE_WINDOW_SIZE),
            detector: DetectorConfig::with_history_length(PIPELINE_HISTORY_LENGTH),
            alerts: AlertConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate every stage's configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.preprocessor.validate()?;
        self.detector.validate()?;
        self.alerts.validate()
    }
}

/// Everything one tick produced
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickOutcome {
    /// Preprocessed readings, in input order
    pub processed: Vec<ProcessedReading>,
    /// Fused detection results
    pub anomalies: AnomalyTickResult,
    /// Alerts raised this tick
    pub alerts: Vec<Alert>,
}

/// Preprocessor, detector and alert system for one tire
#[derive(Debug, Clone)]
pub struct TirePipeline {
    preprocessor: Preprocessor,
    detector: AnomalyDetector,
    alerts: AlertSystem,
    ticks_processed: u64,
}

impl TirePipeline {
    /// Build all three stages, failing on the first invalid config
    pub fn new(config: PipelineConfig) -> ConfigResult<Self> {
        Ok(Self {
            preprocessor: Preprocessor::new(config.preprocessor)?,
            detector: AnomalyDetector::new(config.detector)?,
            alerts: AlertSystem::new(config.alerts)?,
            ticks_processed: 0,
        })
    }

    /// Run one tick through every stage
    pub fn process_tick(&mut self, tick: &TickReadings) -> TickOutcome {
        let processed = self.preprocessor.process_all(tick.readings());
        let anomalies = self
            .detector
            .analyze(tick.tick_index, tick.timestamp, &processed);
        let alerts = self.alerts.generate_alerts(&anomalies);

        self.ticks_processed += 1;

        TickOutcome {
            processed,
            anomalies,
            alerts,
        }
    }

    /// Pull up to `ticks` ticks from a source, delivering each non-empty
    /// alert batch to the sink
    ///
    /// Returns the number of ticks actually processed, which is lower than
    /// `ticks` only if the source ran dry.
    pub fn run<S, K>(&mut self, mut source: S, ticks: usize, mut sink: K) -> usize
    where
        S: ReadingSource,
        K: AlertSink,
    {
        let mut processed = 0;
        while processed < ticks {
            let Some(tick) = source.next_tick() else {
                log_info!("source exhausted after {} ticks", processed);
                break;
            };

            let outcome = self.process_tick(&tick);
            if !outcome.alerts.is_empty() {
                sink.deliver(&outcome.alerts);
            }
            processed += 1;
        }
        processed
    }

    /// The alert system and its log
    pub fn alerts(&self) -> &AlertSystem {
        &self.alerts
    }

    /// The preprocessing stage
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// The detection stage
    pub fn detector(&self) -> &AnomalyDetector {
        &self.detector
    }

    /// Ticks processed since construction
    pub fn ticks_processed(&self) -> u64 {
        self.ticks_processed
    }
}

/// Sink that forwards alerts to the `log` facade
///
/// Critical and Emergency alerts go out at warn, the rest at info.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AlertSink for LogSink {
    #[allow(unused_variables)]
    fn deliver(&mut self, alerts: &[Alert]) {
        #[cfg(feature = "log")]
        for alert in alerts {
            if alert.alert_level >= AlertLevel::Critical {
                log_warn!(
                    "sensor {}: {} | {}",
                    alert.sensor_id,
                    alert.message,
                    alert.recommendation
                );
            } else {
                log_info!(
                    "sensor {}: {} | {}",
                    alert.sensor_id,
                    alert.message,
                    alert.recommendation
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::AnomalyType;
    use crate::sensors::SensorId;

    fn nominal_tick(tick: TickIndex) -> TickReadings {
        SensorId::ALL
            .iter()
            .fold(TickReadings::new(tick, tick * 30_000), |t, s| {
                t.with_reading(SensorReading::new(*s, s.default_baseline(), 25.0))
            })
    }

    struct Scripted(Vec<TickReadings>);

    impl ReadingSource for Scripted {
        fn next_tick(&mut self) -> Option<TickReadings> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    #[test]
    fn readings_are_stamped_and_deduplicated() {
        let mut tick = TickReadings::new(7, 210_000);
        assert!(tick.insert(SensorReading::new(SensorId::Bead, 150.0, 25.0)).is_none());

        let old = tick.insert(SensorReading::new(SensorId::Bead, 151.0, 26.0)).unwrap();
        assert_eq!(old.raw_impedance, 150.0);
        assert_eq!(tick.len(), 1);

        let reading = tick.readings()[0];
        assert_eq!(reading.raw_impedance, 151.0);
        assert_eq!(reading.tick_index, 7);
        assert_eq!(reading.timestamp, 210_000);
    }

    #[test]
    fn default_config_uses_pipeline_sizes() {
        let config = PipelineConfig::default();
        assert_eq!(config.preprocessor.window_size, PIPELINE_WINDOW_SIZE);
        assert_eq!(config.detector.history_length, PIPELINE_HISTORY_LENGTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nominal_tick_flows_through() {
        let mut pipeline = TirePipeline::new(PipelineConfig::default()).unwrap();
        let outcome = pipeline.process_tick(&nominal_tick(1));

        assert_eq!(outcome.processed.len(), 4);
        assert!(outcome.processed.iter().all(|p| p.normalized_value == 1.0));
        assert!(!outcome.anomalies.any_detected());
        assert!(outcome.alerts.is_empty());
        assert_eq!(pipeline.ticks_processed(), 1);
    }

    #[test]
    fn empty_tick_is_harmless() {
        let mut pipeline = TirePipeline::new(PipelineConfig::default()).unwrap();
        let outcome = pipeline.process_tick(&TickReadings::new(1, 0));
        assert!(outcome.processed.is_empty());
        assert!(outcome.anomalies.results.is_empty());
        assert!(pipeline.alerts().is_empty());
    }

    #[test]
    fn overheating_raises_an_alert() {
        let mut pipeline = TirePipeline::new(PipelineConfig::default()).unwrap();
        let tick = TickReadings::new(1, 30_000)
            .with_reading(SensorReading::new(SensorId::TreadLeft, 100.0, 75.0));

        let outcome = pipeline.process_tick(&tick);
        assert_eq!(outcome.alerts.len(), 1);

        let alert = &outcome.alerts[0];
        assert_eq!(alert.anomaly_type, AnomalyType::TemperatureIssue);
        // Confidence 1.0 promotes the Warning base level
        assert_eq!(alert.alert_level, AlertLevel::Critical);
        assert_eq!(pipeline.alerts().len(), 1);
    }

    #[test]
    fn run_stops_when_source_is_dry() {
        let mut pipeline = TirePipeline::new(PipelineConfig::default()).unwrap();
        let source = Scripted((1..=3).map(nominal_tick).collect());
        let mut delivered: Vec<Alert> = Vec::new();

        let ticks = pipeline.run(source, 10, &mut delivered);
        assert_eq!(ticks, 3);
        assert!(delivered.is_empty());
    }

    #[test]
    fn run_delivers_alert_batches() {
        let mut pipeline = TirePipeline::new(PipelineConfig::default()).unwrap();
        let hot = TickReadings::new(1, 30_000)
            .with_reading(SensorReading::new(SensorId::Sidewall, 120.0, 70.0));
        let source = Scripted(alloc::vec![hot, nominal_tick(2)]);
        let mut delivered: Vec<Alert> = Vec::new();

        assert_eq!(pipeline.run(source, 2, &mut delivered), 2);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered.as_slice(), pipeline.alerts().log());
    }
}
