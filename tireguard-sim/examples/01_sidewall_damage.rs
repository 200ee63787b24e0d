//! Sidewall Damage Simulation
//!
//! Runs a seeded tire for 40 ticks (20 minutes at 30 s per tick), cuts the
//! sidewall after tick 20 and prints every alert plus the final
//! maintenance report.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_sidewall_damage
//! ```

use tireguard_core::{traits::AlertSink, Alert};
use tireguard_sim::{DamageScenario, SimError, Simulation, SimulationConfig};

struct Console;

impl AlertSink for Console {
    fn deliver(&mut self, alerts: &[Alert]) {
        println!("\n!!! ALERTS DETECTED !!!");
        for alert in alerts {
            println!("[{}] {}", alert.alert_level, alert.message);
            println!("Recommendation: {}", alert.recommendation);
        }
    }
}

fn main() -> Result<(), SimError> {
    println!("TireGuard Sidewall Damage Simulation");
    println!("====================================");

    let mut sim = Simulation::new(SimulationConfig::default())?;
    let report = sim.run_with_sink(40, 20, DamageScenario::Sidewall, Console);

    println!(
        "\n{} ticks, {} alerts ({} after damage), worst level: {}",
        report.ticks_run,
        report.alerts.len(),
        report.alerts_after_damage().count(),
        report
            .worst_level()
            .map_or_else(|| "none".to_string(), |l| l.to_string())
    );
    println!("\n{}", report.maintenance_report);
    Ok(())
}
