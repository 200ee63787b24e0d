//! Sensor Positions and Per-Sensor Storage
//!
//! A tire carries a fixed set of impedance sensors, each bound to a
//! position and a baseline impedance. The set is small and closed, so the
//! core models it as a compact enum and stores per-sensor state in plain
//! arrays indexed by that enum rather than in maps.
//!
//! ```text
//!        ┌──────── tread ────────┐
//!        │  [1] left   [2] right │
//!   [3] sidewall                 │
//!        └── [4] bead ───────────┘
//! ```

use core::fmt;

use crate::constants::buffers::SENSOR_COUNT;
use crate::constants::sensors::{
    BASELINE_BEAD_OHMS, BASELINE_SIDEWALL_OHMS, BASELINE_TREAD_LEFT_OHMS,
    BASELINE_TREAD_RIGHT_OHMS,
};
use crate::errors::{ConfigError, ConfigResult};

/// One of the fixed sensor positions on a tire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum SensorId {
    /// Left side of the tread
    TreadLeft = 1,
    /// Right side of the tread
    TreadRight = 2,
    /// Sidewall
    Sidewall = 3,
    /// Bead area, where the tire seats on the rim
    Bead = 4,
}

impl SensorId {
    /// Every sensor, in id order
    pub const ALL: [SensorId; SENSOR_COUNT] = [
        SensorId::TreadLeft,
        SensorId::TreadRight,
        SensorId::Sidewall,
        SensorId::Bead,
    ];

    /// Raw numeric id as reported by the hardware (1-based)
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Dense array index (0-based)
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Position this sensor is mounted at
    pub const fn location(self) -> Location {
        match self {
            SensorId::TreadLeft => Location::TreadLeft,
            SensorId::TreadRight => Location::TreadRight,
            SensorId::Sidewall => Location::Sidewall,
            SensorId::Bead => Location::Bead,
        }
    }

    /// Human-readable position used in alert messages
    pub const fn description(self) -> &'static str {
        match self {
            SensorId::TreadLeft => "left side of tire tread",
            SensorId::TreadRight => "right side of tire tread",
            SensorId::Sidewall => "tire sidewall",
            SensorId::Bead => "tire bead area",
        }
    }

    /// Factory baseline impedance in ohms
    pub const fn default_baseline(self) -> f32 {
        match self {
            SensorId::TreadLeft => BASELINE_TREAD_LEFT_OHMS,
            SensorId::TreadRight => BASELINE_TREAD_RIGHT_OHMS,
            SensorId::Sidewall => BASELINE_SIDEWALL_OHMS,
            SensorId::Bead => BASELINE_BEAD_OHMS,
        }
    }
}

/// Raw ids outside 1..=4 are rejected. Sources reporting from unrecognised
/// hardware keep a known id and tag the reading with [`Location::Unknown`].
impl TryFrom<u8> for SensorId {
    type Error = ConfigError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(SensorId::TreadLeft),
            2 => Ok(SensorId::TreadRight),
            3 => Ok(SensorId::Sidewall),
            4 => Ok(SensorId::Bead),
            other => Err(ConfigError::UnknownSensor(other)),
        }
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// Mounting position tag carried by every reading
///
/// `Unknown` covers tags the core does not recognise; such readings fall
/// back to default thresholds and `Unknown` anomaly types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Location {
    /// Left side of the tread
    TreadLeft,
    /// Right side of the tread
    TreadRight,
    /// Sidewall
    Sidewall,
    /// Bead area
    Bead,
    /// Unrecognised position
    Unknown,
}

impl Location {
    /// Snake-case tag, as used by reading sources
    pub const fn name(self) -> &'static str {
        match self {
            Location::TreadLeft => "tread_left",
            Location::TreadRight => "tread_right",
            Location::Sidewall => "sidewall",
            Location::Bead => "bead",
            Location::Unknown => "unknown",
        }
    }

    /// Parse a location tag, mapping anything unrecognised to `Unknown`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "tread_left" => Location::TreadLeft,
            "tread_right" => Location::TreadRight,
            "sidewall" => Location::Sidewall,
            "bead" => Location::Bead,
            _ => Location::Unknown,
        }
    }

    /// Either side of the tread
    pub const fn is_tread(self) -> bool {
        matches!(self, Location::TreadLeft | Location::TreadRight)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size map from sensor to value
///
/// One slot per [`SensorId`]; iteration is always in id order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorMap<T> {
    slots: [Option<T>; SENSOR_COUNT],
}

impl<T> SensorMap<T> {
    /// Empty map
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, sensor: SensorId, value: T) -> Option<T> {
        self.slots[sensor.index()].replace(value)
    }

    /// Value for a sensor, if present
    pub fn get(&self, sensor: SensorId) -> Option<&T> {
        self.slots[sensor.index()].as_ref()
    }

    /// Mutable value for a sensor, if present
    pub fn get_mut(&mut self, sensor: SensorId) -> Option<&mut T> {
        self.slots[sensor.index()].as_mut()
    }

    /// Whether a sensor has a value
    pub fn contains(&self, sensor: SensorId) -> bool {
        self.slots[sensor.index()].is_some()
    }

    /// Number of sensors with a value
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no sensor has a value
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Present entries in sensor id order
    pub fn iter(&self) -> impl Iterator<Item = (SensorId, &T)> + '_ {
        SensorId::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(id, slot)| slot.as_ref().map(|v| (*id, v)))
    }

    /// Present values in sensor id order
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

impl<T> Default for SensorMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline impedance per sensor
///
/// Baselines are fixed for the lifetime of a component; a different tire
/// model gets a different catalogue at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCatalogue {
    baselines: [f32; SENSOR_COUNT],
}

impl Default for SensorCatalogue {
    fn default() -> Self {
        Self {
            baselines: SensorId::ALL.map(SensorId::default_baseline),
        }
    }
}

impl SensorCatalogue {
    /// Override one sensor's baseline (ohms)
    pub fn with_baseline(mut self, sensor: SensorId, ohms: f32) -> Self {
        self.baselines[sensor.index()] = ohms;
        self
    }

    /// Baseline impedance for a sensor (ohms)
    pub fn baseline(&self, sensor: SensorId) -> f32 {
        self.baselines[sensor.index()]
    }

    /// Reject non-finite or non-positive baselines
    pub fn validate(&self) -> ConfigResult<()> {
        for sensor in SensorId::ALL {
            let value = self.baseline(sensor);
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidBaseline { sensor, value });
            }
        }
        Ok(())
    }
}
