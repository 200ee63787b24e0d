//! The four-sensor array mounted in one tire

use rand::rngs::StdRng;
use rand::SeedableRng;
use tireguard_core::{
    pipeline::TickReadings,
    time::{TickClock, TimeSource},
    traits::ReadingSource,
    SensorId,
};

use crate::error::SimResult;
use crate::sensor::{DamageKind, TireSensor};

/// Per-sensor noise as a fraction of base impedance, in sensor order
pub const DEFAULT_NOISE_LEVELS: [f32; 4] = [0.03, 0.03, 0.05, 0.02];

/// Seeded array of the four tire sensors
///
/// Every call to [`collect`](Self::collect) advances the shared clock by
/// one tick and reads each sensor once, in sensor order.
#[derive(Debug, Clone)]
pub struct SensorArray {
    sensors: [TireSensor; 4],
    rng: StdRng,
    clock: TickClock,
}

impl SensorArray {
    /// Default sensors at their catalogue baselines
    pub fn new(seed: u64, clock: TickClock) -> SimResult<Self> {
        let sensor = |id: SensorId| {
            TireSensor::new(id, id.default_baseline(), DEFAULT_NOISE_LEVELS[id.index()])
        };

        Ok(Self::from_sensors(
            [
                sensor(SensorId::TreadLeft)?,
                sensor(SensorId::TreadRight)?,
                sensor(SensorId::Sidewall)?,
                sensor(SensorId::Bead)?,
            ],
            seed,
            clock,
        ))
    }

    /// Array from custom sensors, one per position in sensor order
    pub fn from_sensors(sensors: [TireSensor; 4], seed: u64, clock: TickClock) -> Self {
        Self {
            sensors,
            rng: StdRng::seed_from_u64(seed),
            clock,
        }
    }

    /// Read every sensor for the next tick
    pub fn collect(&mut self) -> TickReadings {
        let tick = self.clock.advance();
        let mut readings = TickReadings::new(tick, self.clock.now());

        for sensor in &mut self.sensors {
            readings.insert(sensor.read(&mut self.rng));
        }

        log::debug!("collected tick {} ({} readings)", tick, readings.len());
        readings
    }

    /// Damage one sensor
    pub fn inject_damage(&mut self, sensor: SensorId, kind: DamageKind) {
        log::info!("injecting {:?} damage into sensor {}", kind, sensor);
        self.sensors[sensor.index()].apply_damage(kind);
    }

    /// State of one sensor
    pub fn sensor(&self, sensor: SensorId) -> &TireSensor {
        &self.sensors[sensor.index()]
    }

    /// Ticks collected so far
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }
}

impl ReadingSource for SensorArray {
    fn next_tick(&mut self) -> Option<TickReadings> {
        Some(self.collect())
    }
}
