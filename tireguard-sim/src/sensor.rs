//! One simulated impedance sensor
//!
//! Each reading advances the sensor's state by one tick:
//!
//! 1. wear factor grows by the wear rate
//! 2. temperature takes a Gaussian step, clamped to [10, 80] °C
//! 3. impedance = base × wear × (1 + 0.001 (T − 25)) + noise
//! 4. a damaged sidewall reads ×1.5, a damaged tread ×1.2
//!
//! Noise is Gaussian with σ = noise_level × base impedance.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tireguard_core::{
    constants::sensors::{REFERENCE_TEMP_C, TEMP_COEFFICIENT_PER_C},
    Location, SensorId, SensorReading,
};

use crate::error::{SimError, SimResult};

/// Wear factor added per reading on a healthy sensor
pub const DEFAULT_WEAR_RATE: f32 = 1e-4;

/// Temperature at power-on (°C)
pub const START_TEMPERATURE_C: f32 = 25.0;

/// Standard deviation of the per-tick temperature step (°C)
pub const TEMPERATURE_STEP_SIGMA_C: f32 = 0.5;

/// Temperature range the random walk is held in (°C)
pub const TEMPERATURE_RANGE_C: (f32, f32) = (10.0, 80.0);

/// Reading multiplier on a damaged sidewall sensor
pub const SIDEWALL_DAMAGE_GAIN: f32 = 1.5;

/// Reading multiplier on a damaged tread sensor
pub const TREAD_DAMAGE_GAIN: f32 = 1.2;

/// Kind of damage injected into a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    /// Wear rate ×5
    Wear,
    /// Wear factor ×1.3 at once
    Puncture,
    /// Wear factor ×1.8, on sidewall sensors only
    Sidewall,
    /// Wear factor ×1.2 at once
    Generic,
}

fn normal(name: &'static str, sigma: f32) -> SimResult<Normal<f32>> {
    // rand_distr accepts a negative spread and mirrors the samples
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(SimError::InvalidSpread { name, value: sigma });
    }
    Normal::new(0.0, sigma).map_err(|_| SimError::InvalidSpread { name, value: sigma })
}

/// Simulated sensor state
#[derive(Debug, Clone)]
pub struct TireSensor {
    sensor_id: SensorId,
    location: Location,
    base_impedance: f32,
    noise_level: f32,
    wear_rate: f32,
    wear_factor: f32,
    temperature: f32,
    damaged: bool,
    noise: Normal<f32>,
    temperature_step: Normal<f32>,
}

impl TireSensor {
    /// Healthy sensor at its mounting position
    pub fn new(sensor_id: SensorId, base_impedance: f32, noise_level: f32) -> SimResult<Self> {
        if !base_impedance.is_finite() || base_impedance <= 0.0 {
            return Err(SimError::InvalidImpedance(base_impedance));
        }

        Ok(Self {
            sensor_id,
            location: sensor_id.location(),
            base_impedance,
            noise_level,
            wear_rate: DEFAULT_WEAR_RATE,
            wear_factor: 1.0,
            temperature: START_TEMPERATURE_C,
            damaged: false,
            noise: normal("noise", noise_level * base_impedance)?,
            temperature_step: normal("temperature", TEMPERATURE_STEP_SIGMA_C)?,
        })
    }

    /// Replace the temperature step spread; zero holds temperature fixed
    pub fn with_temperature_sigma(mut self, sigma: f32) -> SimResult<Self> {
        self.temperature_step = normal("temperature", sigma)?;
        Ok(self)
    }

    /// Advance one tick and produce a reading
    pub fn read<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SensorReading {
        self.wear_factor += self.wear_rate;

        let (low, high) = TEMPERATURE_RANGE_C;
        self.temperature = (self.temperature + self.temperature_step.sample(rng)).clamp(low, high);

        let temp_effect = 1.0 + (self.temperature - REFERENCE_TEMP_C) * TEMP_COEFFICIENT_PER_C;
        let mut impedance = self.base_impedance * self.wear_factor * temp_effect;
        impedance += self.noise.sample(rng);

        if self.damaged {
            if self.location == Location::Sidewall {
                impedance *= SIDEWALL_DAMAGE_GAIN;
            } else if self.location.is_tread() {
                impedance *= TREAD_DAMAGE_GAIN;
            }
        }

        SensorReading::new(self.sensor_id, impedance, self.temperature).with_location(self.location)
    }

    /// Mark the sensor damaged and apply the kind's one-off effect
    pub fn apply_damage(&mut self, kind: DamageKind) {
        self.damaged = true;
        match kind {
            DamageKind::Wear => self.wear_rate *= 5.0,
            DamageKind::Puncture => self.wear_factor *= 1.3,
            DamageKind::Sidewall if self.location == Location::Sidewall => self.wear_factor *= 1.8,
            DamageKind::Sidewall => {}
            DamageKind::Generic => self.wear_factor *= 1.2,
        }
    }

    /// Sensor identity
    pub fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    /// Healthy impedance (ohms)
    pub fn base_impedance(&self) -> f32 {
        self.base_impedance
    }

    /// Noise as a fraction of base impedance
    pub fn noise_level(&self) -> f32 {
        self.noise_level
    }

    /// Current wear multiplier
    pub fn wear_factor(&self) -> f32 {
        self.wear_factor
    }

    /// Current wear increment per tick
    pub fn wear_rate(&self) -> f32 {
        self.wear_rate
    }

    /// Current temperature (°C)
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// True once any damage was applied
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet(sensor: SensorId, base: f32) -> TireSensor {
        TireSensor::new(sensor, base, 0.0)
            .unwrap()
            .with_temperature_sigma(0.0)
            .unwrap()
    }

    #[test]
    fn quiet_sensor_only_wears() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sensor = quiet(SensorId::TreadLeft, 100.0);

        let first = sensor.read(&mut rng);
        assert!((first.raw_impedance - 100.01).abs() < 1e-3);
        assert_eq!(first.temperature, 25.0);
        assert_eq!(first.location, Location::TreadLeft);

        for _ in 0..9 {
            sensor.read(&mut rng);
        }
        assert!((sensor.wear_factor() - 1.001).abs() < 1e-5);
    }

    #[test]
    fn sidewall_damage_compounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sensor = quiet(SensorId::Sidewall, 120.0);
        sensor.apply_damage(DamageKind::Sidewall);

        let reading = sensor.read(&mut rng);
        // 120 × (1.8 + 1e-4) × 1.5
        assert!((reading.raw_impedance - 120.0 * 1.8001 * 1.5).abs() < 1e-2);
    }

    #[test]
    fn sidewall_kind_spares_other_positions() {
        let mut sensor = quiet(SensorId::Bead, 150.0);
        sensor.apply_damage(DamageKind::Sidewall);
        assert!(sensor.is_damaged());
        assert_eq!(sensor.wear_factor(), 1.0);
    }

    #[test]
    fn damaged_tread_reads_high() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sensor = quiet(SensorId::TreadRight, 100.0);
        sensor.apply_damage(DamageKind::Generic);

        let reading = sensor.read(&mut rng);
        // 100 × (1.2 + 1e-4) × 1.2
        assert!((reading.raw_impedance - 100.0 * 1.2001 * 1.2).abs() < 1e-2);
    }

    #[test]
    fn wear_damage_speeds_up_wear() {
        let mut sensor = quiet(SensorId::TreadLeft, 100.0);
        sensor.apply_damage(DamageKind::Wear);
        assert!((sensor.wear_rate() - 5e-4).abs() < 1e-9);

        let mut punctured = quiet(SensorId::TreadLeft, 100.0);
        punctured.apply_damage(DamageKind::Puncture);
        assert!((punctured.wear_factor() - 1.3).abs() < 1e-6);
    }

    #[test]
    fn temperature_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sensor = TireSensor::new(SensorId::Bead, 150.0, 0.02)
            .unwrap()
            .with_temperature_sigma(20.0)
            .unwrap();
        for _ in 0..500 {
            let reading = sensor.read(&mut rng);
            assert!((10.0..=80.0).contains(&reading.temperature));
        }
    }

    #[test]
    fn bad_parameters_are_rejected() {
        assert_eq!(
            TireSensor::new(SensorId::Bead, 0.0, 0.02).unwrap_err(),
            SimError::InvalidImpedance(0.0)
        );
        assert!(matches!(
            TireSensor::new(SensorId::Bead, 150.0, -0.1),
            Err(SimError::InvalidSpread { name: "noise", .. })
        ));
        assert!(matches!(
            TireSensor::new(SensorId::Bead, 150.0, f32::NAN),
            Err(SimError::InvalidSpread { name: "noise", .. })
        ));

        let sensor = TireSensor::new(SensorId::Bead, 150.0, 0.0).unwrap();
        assert!(matches!(
            sensor.with_temperature_sigma(-1.0),
            Err(SimError::InvalidSpread { name: "temperature", .. })
        ));
    }
}
