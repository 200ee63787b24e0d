//! Reading types flowing into and out of the preprocessor

use crate::sensors::{Location, SensorId};
use crate::time::{TickIndex, Timestamp};

/// One raw measurement from one sensor for one tick
///
/// Produced by the reading source and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorReading {
    /// Sensor that produced the reading
    pub sensor_id: SensorId,
    /// Position tag reported with the reading
    pub location: Location,
    /// Raw impedance in ohms (> 0)
    pub raw_impedance: f32,
    /// Temperature at the sensor in °C
    pub temperature: f32,
    /// When the reading was taken
    pub timestamp: Timestamp,
    /// Collection cycle the reading belongs to
    pub tick_index: TickIndex,
}

impl SensorReading {
    /// Reading tagged with the sensor's own mounting position
    pub fn new(sensor_id: SensorId, raw_impedance: f32, temperature: f32) -> Self {
        Self {
            sensor_id,
            location: sensor_id.location(),
            raw_impedance,
            temperature,
            timestamp: 0,
            tick_index: 0,
        }
    }

    /// Stamp the reading with its tick and time
    pub fn at(mut self, tick_index: TickIndex, timestamp: Timestamp) -> Self {
        self.tick_index = tick_index;
        self.timestamp = timestamp;
        self
    }

    /// Override the reported position tag
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// A reading after filtering, temperature compensation, smoothing and
/// normalization
///
/// `normalized_value == moving_average / baseline(sensor_id)` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessedReading {
    /// Sensor that produced the reading
    pub sensor_id: SensorId,
    /// Raw impedance, passed through (ohms)
    pub raw_value: f32,
    /// After noise filtering (ohms)
    pub filtered_value: f32,
    /// Referred to the reference temperature (ohms)
    pub compensated_value: f32,
    /// Mean of the sensor's compensated window (ohms)
    pub moving_average: f32,
    /// Ratio of the moving average to the baseline (~1.0 nominal)
    pub normalized_value: f32,
    /// Position tag, passed through
    pub location: Location,
    /// Temperature, passed through (°C)
    pub temperature: f32,
    /// When the source reading was taken
    pub timestamp: Timestamp,
    /// Collection cycle
    pub tick_index: TickIndex,
}
