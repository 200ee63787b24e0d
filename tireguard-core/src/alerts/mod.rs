//! Graded Alerts
//!
//! ## Overview
//!
//! The alert system turns each detected anomaly into something a driver or
//! mechanic can act on: a severity level, a one-line message and a fixed
//! recommendation. Undetected sensors never produce an alert.
//!
//! ## Severity
//!
//! Each anomaly type has a base level. Confidence then nudges it by at
//! most one step:
//!
//! ```text
//!   confidence > 0.9  → one level up   (capped at Emergency)
//!   confidence < 0.4  → one level down (floored at Info)
//!   otherwise         → unchanged
//! ```
//!
//! ## Alert Log
//!
//! Every alert is appended to an in-memory log in emission order. Alerts
//! are never edited or removed; the maintenance report is derived from the
//! whole log on demand.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::constants::thresholds::{ALERT_DEMOTE_BELOW, ALERT_PROMOTE_ABOVE};
use crate::detection::{AnomalyResult, AnomalyTickResult, AnomalyType};
use crate::errors::{ConfigError, ConfigResult};
use crate::sensors::SensorId;
use crate::time::{TickIndex, Timestamp};

mod recommend;
mod report;

pub use recommend::recommendation;

/// Alert severity, totally ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum AlertLevel {
    /// No action needed
    Info = 0,
    /// Plan maintenance
    Advisory = 1,
    /// Attention needed soon
    Warning = 2,
    /// Immediate attention
    Critical = 3,
    /// Stop the vehicle
    Emergency = 4,
}

impl AlertLevel {
    /// Every level, least urgent first
    pub const ALL: [AlertLevel; 5] = [
        AlertLevel::Info,
        AlertLevel::Advisory,
        AlertLevel::Warning,
        AlertLevel::Critical,
        AlertLevel::Emergency,
    ];

    /// Position on the 0..=4 scale
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Level at an ordinal, saturating at Emergency
    pub const fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 => AlertLevel::Info,
            1 => AlertLevel::Advisory,
            2 => AlertLevel::Warning,
            3 => AlertLevel::Critical,
            _ => AlertLevel::Emergency,
        }
    }

    /// One step more urgent, capped at Emergency
    pub const fn promote(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// One step less urgent, floored at Info
    pub const fn demote(self) -> Self {
        Self::from_ordinal(self.ordinal().saturating_sub(1))
    }

    /// Base level for an anomaly type, before confidence adjustment
    pub const fn base_for(anomaly_type: AnomalyType) -> Self {
        match anomaly_type {
            AnomalyType::Normal | AnomalyType::GradualWear => AlertLevel::Info,
            AnomalyType::AcceleratedWear | AnomalyType::UnevenWear => AlertLevel::Advisory,
            AnomalyType::TreadDamage | AnomalyType::TemperatureIssue | AnomalyType::Unknown => {
                AlertLevel::Warning
            }
            AnomalyType::SidewallDamage | AnomalyType::BeadDamage => AlertLevel::Critical,
            AnomalyType::Puncture => AlertLevel::Emergency,
        }
    }

    /// Message prefix for this level
    pub const fn prefix(self) -> &'static str {
        match self {
            AlertLevel::Info => "INFO",
            AlertLevel::Advisory => "ADVISORY",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL ALERT",
            AlertLevel::Emergency => "EMERGENCY",
        }
    }

    /// Upper-case level name
    pub const fn name(self) -> &'static str {
        match self {
            AlertLevel::Info => "INFO",
            AlertLevel::Advisory => "ADVISORY",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
            AlertLevel::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Confidence bands for severity adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertConfig {
    /// Confidence strictly above this promotes one level
    pub promote_above: f32,
    /// Confidence strictly below this demotes one level
    pub demote_below: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            promote_above: ALERT_PROMOTE_ABOVE,
            demote_below: ALERT_DEMOTE_BELOW,
        }
    }
}

impl AlertConfig {
    /// Bands must be finite, within [0, 1], and not overlap
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.promote_above) {
            return Err(ConfigError::InvalidThreshold {
                name: "promote_above",
                value: self.promote_above,
            });
        }
        if !(0.0..=1.0).contains(&self.demote_below) || self.demote_below > self.promote_above {
            return Err(ConfigError::InvalidThreshold {
                name: "demote_below",
                value: self.demote_below,
            });
        }
        Ok(())
    }

    /// Apply the confidence bands to a base level
    pub fn adjust(&self, base: AlertLevel, confidence: f32) -> AlertLevel {
        if confidence > self.promote_above {
            base.promote()
        } else if confidence < self.demote_below {
            base.demote()
        } else {
            base
        }
    }
}

/// One graded alert, immutable once created
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Alert {
    /// Timestamp of the tick that raised it
    pub timestamp: Timestamp,
    /// Tick that raised it
    pub tick_index: TickIndex,
    /// Sensor the anomaly was seen on
    pub sensor_id: SensorId,
    /// What was detected
    pub anomaly_type: AnomalyType,
    /// Detector confidence in [0, 1]
    pub confidence: f32,
    /// Severity after confidence adjustment
    pub alert_level: AlertLevel,
    /// Human-readable summary
    pub message: String,
    /// What to do about it
    pub recommendation: &'static str,
}

/// Build the alert message line
///
/// `"{PREFIX}: {TYPE} detected in {location} (Confidence: {pct}%). {details}"`
pub fn format_message(level: AlertLevel, result: &AnomalyResult) -> String {
    format!(
        "{}: {} detected in {} (Confidence: {:.0}%). {}",
        level.prefix(),
        result.anomaly_type,
        result.sensor_id.description(),
        result.confidence * 100.0,
        result.details
    )
}

/// Alert generator and append-only alert log for one tire
#[derive(Debug, Clone, Default)]
pub struct AlertSystem {
    config: AlertConfig,
    log: Vec<Alert>,
}

impl AlertSystem {
    /// Build an alert system, rejecting invalid confidence bands
    pub fn new(config: AlertConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            log: Vec::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Build the alert for one detected result, without logging it
    pub fn build_alert(&self, tick: &AnomalyTickResult, result: &AnomalyResult) -> Alert {
        let base = AlertLevel::base_for(result.anomaly_type);
        let level = self.config.adjust(base, result.confidence);

        Alert {
            timestamp: tick.timestamp,
            tick_index: tick.tick_index,
            sensor_id: result.sensor_id,
            anomaly_type: result.anomaly_type,
            confidence: result.confidence,
            alert_level: level,
            message: format_message(level, result),
            recommendation: recommendation(level, result.anomaly_type),
        }
    }

    /// Raise one alert per detected anomaly, append them to the log and
    /// return this tick's batch
    pub fn generate_alerts(&mut self, tick: &AnomalyTickResult) -> Vec<Alert> {
        let batch: Vec<Alert> = tick
            .detected()
            .map(|result| self.build_alert(tick, result))
            .collect();

        #[cfg(feature = "log")]
        for alert in &batch {
            if alert.alert_level >= AlertLevel::Critical {
                log_warn!("[{}] {}", alert.alert_level, alert.message);
            } else {
                log_info!("[{}] {}", alert.alert_level, alert.message);
            }
        }

        self.log.extend(batch.iter().cloned());
        batch
    }

    /// Every alert raised so far, in emission order
    pub fn log(&self) -> &[Alert] {
        &self.log
    }

    /// Alerts raised for one sensor, in emission order
    pub fn alerts_for(&self, sensor: SensorId) -> impl Iterator<Item = &Alert> + '_ {
        self.log.iter().filter(move |a| a.sensor_id == sensor)
    }

    /// Most severe level ever raised
    pub fn worst_level(&self) -> Option<AlertLevel> {
        self.log.iter().map(|a| a.alert_level).max()
    }

    /// Number of alerts in the log
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True before the first alert
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Maintenance summary derived from the full log
    pub fn maintenance_report(&self) -> String {
        report::render(&self.log)
    }
}
