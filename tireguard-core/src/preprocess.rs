//! Impedance Preprocessing
//!
//! Turns a raw impedance reading into a value that can be compared across
//! sensors and over time. Four steps, always in this order:
//!
//! 1. **Noise filtering**: currently a pass-through.
//! 2. **Temperature compensation**: impedance rises with temperature, so
//!    the reading is referred back to 25 °C:
//!    `compensated = filtered / (1 + 0.001 × (T − 25))`.
//! 3. **Moving average**: the compensated value joins the sensor's bounded
//!    window and the window mean is taken.
//! 4. **Normalization**: the mean is divided by the sensor's baseline, so
//!    ~1.0 means nominal regardless of position.
//!
//! Each sensor's window is independent; feeding one sensor never affects
//! another's average.
//!
//! ## Compensation Range
//!
//! The compensation divisor reaches zero at −975 °C with the default
//! coefficient. Nothing here clamps it: readings that far outside physics
//! are a precondition violation of the reading source.

use alloc::vec::Vec;

use crate::buffer::CircularBuffer;
use crate::constants::buffers::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE, SENSOR_COUNT};
use crate::constants::sensors::{REFERENCE_TEMP_C, TEMP_COEFFICIENT_PER_C};
use crate::errors::{ConfigError, ConfigResult};
use crate::reading::{ProcessedReading, SensorReading};
use crate::sensors::{SensorCatalogue, SensorId};

/// Preprocessor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessorConfig {
    /// Samples in each sensor's moving-average window (1..=64)
    pub window_size: usize,
    /// Temperature readings are referred back to (°C)
    pub reference_temp_c: f32,
    /// Fractional impedance change per °C
    pub temp_coefficient: f32,
    /// Baseline impedance per sensor
    pub catalogue: SensorCatalogue,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            reference_temp_c: REFERENCE_TEMP_C,
            temp_coefficient: TEMP_COEFFICIENT_PER_C,
            catalogue: SensorCatalogue::default(),
        }
    }
}

impl PreprocessorConfig {
    /// Config with a specific window size and default everything else
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }

    /// Check every field before a preprocessor is built
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window_size == 0 || self.window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowSize {
                requested: self.window_size,
                max: MAX_WINDOW_SIZE,
            });
        }
        if !self.reference_temp_c.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                name: "reference_temp_c",
                value: self.reference_temp_c,
            });
        }
        if !self.temp_coefficient.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                name: "temp_coefficient",
                value: self.temp_coefficient,
            });
        }
        self.catalogue.validate()
    }
}

/// Per-sensor preprocessing stage
///
/// Owns one bounded window of compensated values per sensor.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessorConfig,
    windows: [CircularBuffer<f32, MAX_WINDOW_SIZE>; SENSOR_COUNT],
}

impl Preprocessor {
    /// Build a preprocessor, rejecting invalid configuration
    pub fn new(config: PreprocessorConfig) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            windows: core::array::from_fn(|_| CircularBuffer::with_capacity(config.window_size)),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Noise filter applied to the raw value
    ///
    /// Pass-through: the reading source already delivers a usable signal.
    pub fn filter_noise(&self, raw: f32) -> f32 {
        raw
    }

    /// Refer a filtered value back to the reference temperature
    pub fn compensate_temperature(&self, filtered: f32, temperature: f32) -> f32 {
        let temp_diff = temperature - self.config.reference_temp_c;
        let factor = 1.0 / (1.0 + temp_diff * self.config.temp_coefficient);
        filtered * factor
    }

    /// Push a compensated value into the sensor's window and return the
    /// window mean
    pub fn moving_average(&mut self, sensor: SensorId, compensated: f32) -> f32 {
        let window = &mut self.windows[sensor.index()];
        window.push(compensated);
        window.mean().unwrap_or(compensated)
    }

    /// Ratio of a smoothed value to the sensor's baseline
    pub fn normalize(&self, sensor: SensorId, average: f32) -> f32 {
        average / self.config.catalogue.baseline(sensor)
    }

    /// Run all four steps for one reading
    pub fn process(&mut self, reading: &SensorReading) -> ProcessedReading {
        let filtered_value = self.filter_noise(reading.raw_impedance);
        let compensated_value = self.compensate_temperature(filtered_value, reading.temperature);
        let moving_average = self.moving_average(reading.sensor_id, compensated_value);
        let normalized_value = self.normalize(reading.sensor_id, moving_average);

        log_debug!(
            "sensor {} tick {}: raw={} compensated={} avg={} normalized={}",
            reading.sensor_id,
            reading.tick_index,
            reading.raw_impedance,
            compensated_value,
            moving_average,
            normalized_value
        );

        ProcessedReading {
            sensor_id: reading.sensor_id,
            raw_value: reading.raw_impedance,
            filtered_value,
            compensated_value,
            moving_average,
            normalized_value,
            location: reading.location,
            temperature: reading.temperature,
            timestamp: reading.timestamp,
            tick_index: reading.tick_index,
        }
    }

    /// Process a tick's readings in order
    pub fn process_all(&mut self, readings: &[SensorReading]) -> Vec<ProcessedReading> {
        readings.iter().map(|r| self.process(r)).collect()
    }

    /// Compensated-value window for a sensor
    pub fn window(&self, sensor: SensorId) -> &CircularBuffer<f32, MAX_WINDOW_SIZE> {
        &self.windows[sensor.index()]
    }

    /// Forget all history, keeping the configuration
    pub fn reset(&mut self) {
        for window in &mut self.windows {
            window.clear();
        }
    }
}
