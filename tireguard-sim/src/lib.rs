//! Simulated tire sensor array for TireGuard
//!
//! Stands in for the hardware: four impedance sensors embedded in a tire,
//! each with its own noise, slow wear and a drifting temperature. Damage
//! can be injected mid-run to watch the core pipeline react.
//!
//! ```text
//! SensorArray ──ReadingSource──▶ TirePipeline ──AlertSink──▶ alerts
//!      ▲
//!      └── DamageScenario injected after a chosen tick
//! ```
//!
//! All randomness comes from one seeded [`rand::rngs::StdRng`], so a run
//! is fully determined by its seed.
//!
//! ```no_run
//! use tireguard_sim::{DamageScenario, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let report = sim.run(40, 20, DamageScenario::Sidewall);
//! println!("{}", report.maintenance_report);
//! # Ok::<(), tireguard_sim::SimError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod array;
pub mod error;
pub mod scenario;
pub mod sensor;

pub use array::SensorArray;
pub use error::{SimError, SimResult};
pub use scenario::{DamageScenario, Simulation, SimulationConfig, SimulationReport};
pub use sensor::{DamageKind, TireSensor};
