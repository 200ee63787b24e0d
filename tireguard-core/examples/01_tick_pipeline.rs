//! Tick Pipeline Example
//!
//! Feeds a scripted tire through the full pipeline: ten quiet ticks, then
//! the sidewall sensor's impedance jumps as if the casing had been cut.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_tick_pipeline
//! ```

use tireguard_core::{
    pipeline::{LogSink, PipelineConfig, TickReadings, TirePipeline},
    time::{TickClock, TimeSource, DEFAULT_TICK_INTERVAL_MS},
    traits::{AlertSink, ReadingSource},
    Alert, ConfigError, SensorId, SensorReading,
};

/// Scripted tire: nominal until `damage_at`, then a sidewall step
struct ScriptedTire {
    clock: TickClock,
    damage_at: u64,
}

impl ReadingSource for ScriptedTire {
    fn next_tick(&mut self) -> Option<TickReadings> {
        let tick = self.clock.advance();
        let mut readings = TickReadings::new(tick, self.clock.now());

        for sensor in SensorId::ALL {
            let mut impedance = sensor.default_baseline();
            if sensor == SensorId::Sidewall && tick >= self.damage_at {
                impedance *= 1.8;
            }
            readings.insert(SensorReading::new(sensor, impedance, 25.0));
        }
        Some(readings)
    }
}

/// Prints each batch and keeps a copy for the summary
#[derive(Default)]
struct Console {
    seen: Vec<Alert>,
}

impl AlertSink for Console {
    fn deliver(&mut self, alerts: &[Alert]) {
        for alert in alerts {
            println!("tick {:>3}  {}", alert.tick_index, alert.message);
            println!("          → {}", alert.recommendation);
        }
        LogSink.deliver(alerts);
        self.seen.extend_from_slice(alerts);
    }
}

fn main() -> Result<(), ConfigError> {
    println!("TireGuard Tick Pipeline Example");
    println!("===============================\n");

    let mut pipeline = TirePipeline::new(PipelineConfig::default())?;
    let source = ScriptedTire {
        clock: TickClock::new(0, DEFAULT_TICK_INTERVAL_MS),
        damage_at: 11,
    };
    let mut console = Console::default();

    let ticks = pipeline.run(source, 25, &mut console);

    println!("\nProcessed {} ticks, {} alerts\n", ticks, console.seen.len());
    println!("{}", pipeline.alerts().maintenance_report());
    Ok(())
}
