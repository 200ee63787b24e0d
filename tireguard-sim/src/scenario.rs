//! Damage scenarios and the end-to-end simulation runner

use core::fmt;

use tireguard_core::{
    pipeline::{LogSink, PipelineConfig, TirePipeline},
    time::{TickClock, TickIndex, Timestamp, DEFAULT_TICK_INTERVAL_MS},
    traits::AlertSink,
    Alert, AlertLevel, SensorId,
};

use crate::array::SensorArray;
use crate::error::SimResult;
use crate::sensor::DamageKind;

/// Named damage event applied to the whole array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageScenario {
    /// Cut sidewall
    Sidewall,
    /// Damaged left tread
    Tread,
    /// Puncture under both tread sensors
    Puncture,
    /// Rapid wear across the tread
    Wear,
}

impl DamageScenario {
    /// Every scenario
    pub const ALL: [DamageScenario; 4] = [
        DamageScenario::Sidewall,
        DamageScenario::Tread,
        DamageScenario::Puncture,
        DamageScenario::Wear,
    ];

    /// Sensors hit and how
    pub const fn targets(self) -> &'static [(SensorId, DamageKind)] {
        match self {
            DamageScenario::Sidewall => &[(SensorId::Sidewall, DamageKind::Sidewall)],
            DamageScenario::Tread => &[(SensorId::TreadLeft, DamageKind::Generic)],
            DamageScenario::Puncture => &[
                (SensorId::TreadLeft, DamageKind::Puncture),
                (SensorId::TreadRight, DamageKind::Puncture),
            ],
            DamageScenario::Wear => &[
                (SensorId::TreadLeft, DamageKind::Wear),
                (SensorId::TreadRight, DamageKind::Wear),
            ],
        }
    }

    /// Lower-case name
    pub const fn name(self) -> &'static str {
        match self {
            DamageScenario::Sidewall => "sidewall",
            DamageScenario::Tread => "tread",
            DamageScenario::Puncture => "puncture",
            DamageScenario::Wear => "wear",
        }
    }

    /// Apply the scenario to an array
    pub fn apply(self, array: &mut SensorArray) {
        for (sensor, kind) in self.targets() {
            array.inject_damage(*sensor, *kind);
        }
    }
}

impl fmt::Display for DamageScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Simulation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// RNG seed; equal seeds give identical runs
    pub seed: u64,
    /// Timestamp before the first tick (ms)
    pub start: Timestamp,
    /// Time between ticks (ms)
    pub interval_ms: u64,
    /// Pipeline under test
    pub pipeline: PipelineConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start: 0,
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
            pipeline: PipelineConfig::default(),
        }
    }
}

/// What a simulation run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// Ticks processed in this run
    pub ticks_run: u64,
    /// Tick after which damage was injected, if it was reached
    pub damaged_after: Option<TickIndex>,
    /// Scenario that was injected
    pub scenario: DamageScenario,
    /// Alerts raised in this run, in order
    pub alerts: Vec<Alert>,
    /// Maintenance report over the pipeline's whole log
    pub maintenance_report: String,
}

impl SimulationReport {
    /// Alerts raised after the damage went in
    pub fn alerts_after_damage(&self) -> impl Iterator<Item = &Alert> + '_ {
        let after = self.damaged_after;
        self.alerts
            .iter()
            .filter(move |a| after.map_or(false, |t| a.tick_index > t))
    }

    /// Most severe level raised in this run
    pub fn worst_level(&self) -> Option<AlertLevel> {
        self.alerts.iter().map(|a| a.alert_level).max()
    }
}

/// A sensor array wired to a pipeline
#[derive(Debug, Clone)]
pub struct Simulation {
    array: SensorArray,
    pipeline: TirePipeline,
}

impl Simulation {
    /// Build the array and the pipeline
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        let clock = TickClock::new(config.start, config.interval_ms);
        Ok(Self {
            array: SensorArray::new(config.seed, clock)?,
            pipeline: TirePipeline::new(config.pipeline)?,
        })
    }

    /// Run `ticks` ticks, injecting `scenario` once tick `damage_at` has
    /// been processed; alerts go to the log
    pub fn run(
        &mut self,
        ticks: u64,
        damage_at: TickIndex,
        scenario: DamageScenario,
    ) -> SimulationReport {
        self.run_with_sink(ticks, damage_at, scenario, LogSink)
    }

    /// [`run`](Self::run) with alert batches also delivered to `sink`
    pub fn run_with_sink<K: AlertSink>(
        &mut self,
        ticks: u64,
        damage_at: TickIndex,
        scenario: DamageScenario,
        mut sink: K,
    ) -> SimulationReport {
        log::info!(
            "running {} ticks, {} damage after tick {}",
            ticks,
            scenario,
            damage_at
        );

        let mut alerts = Vec::new();
        let mut damaged_after = None;

        for _ in 0..ticks {
            let tick = self.array.collect();
            let outcome = self.pipeline.process_tick(&tick);

            if !outcome.alerts.is_empty() {
                sink.deliver(&outcome.alerts);
                alerts.extend(outcome.alerts);
            }

            if tick.tick_index == damage_at {
                scenario.apply(&mut self.array);
                damaged_after = Some(damage_at);
            }
        }

        log::info!("simulation finished: {} alerts", alerts.len());

        SimulationReport {
            ticks_run: ticks,
            damaged_after,
            scenario,
            alerts,
            maintenance_report: self.pipeline.alerts().maintenance_report(),
        }
    }

    /// The sensor array
    pub fn array(&self) -> &SensorArray {
        &self.array
    }

    /// The pipeline and its accumulated state
    pub fn pipeline(&self) -> &TirePipeline {
        &self.pipeline
    }
}
