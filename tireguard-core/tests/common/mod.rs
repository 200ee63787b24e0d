//! Shared builders for integration tests
//!
//! - Nominal and per-sensor reading builders
//! - A scripted reading source driven by a per-tick closure
//! - Pipeline constructors with test-friendly sizes

#![allow(dead_code)]

use tireguard_core::{
    pipeline::{PipelineConfig, TickReadings, TirePipeline},
    time::{TickIndex, DEFAULT_TICK_INTERVAL_MS},
    traits::ReadingSource,
    Location, PreprocessorConfig, SensorId, SensorReading,
};

/// Reference temperature used for quiet readings (°C)
pub const AMBIENT_C: f32 = 25.0;

/// Timestamp for a tick on the default interval
pub fn timestamp(tick: TickIndex) -> u64 {
    tick * DEFAULT_TICK_INTERVAL_MS
}

/// Reading at `factor` × the sensor's baseline
pub fn scaled(sensor: SensorId, factor: f32, temperature: f32) -> SensorReading {
    SensorReading::new(sensor, sensor.default_baseline() * factor, temperature)
}

/// All four sensors at baseline and ambient temperature
pub fn nominal_tick(tick: TickIndex) -> TickReadings {
    SensorId::ALL
        .iter()
        .fold(TickReadings::new(tick, timestamp(tick)), |t, s| {
            t.with_reading(scaled(*s, 1.0, AMBIENT_C))
        })
}

/// Nominal tick with one sensor's reading replaced
pub fn tick_with(tick: TickIndex, reading: SensorReading) -> TickReadings {
    nominal_tick(tick).with_reading(reading)
}

/// Nominal tick with an extra reading tagged at an unrecognised position
pub fn unknown_position(tick: TickIndex, sensor: SensorId, factor: f32) -> TickReadings {
    tick_with(tick, scaled(sensor, factor, AMBIENT_C).with_location(Location::Unknown))
}

/// Pipeline with the default sizes
pub fn pipeline() -> TirePipeline {
    TirePipeline::new(PipelineConfig::default()).expect("default config is valid")
}

/// Pipeline without smoothing, so normalized values track raw readings
pub fn unsmoothed_pipeline() -> TirePipeline {
    let config = PipelineConfig {
        preprocessor: PreprocessorConfig::with_window_size(1),
        ..PipelineConfig::default()
    };
    TirePipeline::new(config).expect("window 1 is valid")
}

/// Reading source that asks a closure for each tick
pub struct Scripted<F> {
    tick: TickIndex,
    limit: TickIndex,
    script: F,
}

impl<F: FnMut(TickIndex) -> TickReadings> Scripted<F> {
    /// Source yielding ticks 1..=limit
    pub fn new(limit: TickIndex, script: F) -> Self {
        Self {
            tick: 0,
            limit,
            script,
        }
    }
}

impl<F: FnMut(TickIndex) -> TickReadings> ReadingSource for Scripted<F> {
    fn next_tick(&mut self) -> Option<TickReadings> {
        if self.tick >= self.limit {
            return None;
        }
        self.tick += 1;
        Some((self.script)(self.tick))
    }
}
