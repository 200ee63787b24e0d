//! Maintenance report rendering
//!
//! ```text
//! TIRE MAINTENANCE REPORT
//! =======================
//! Total alerts: 3
//!
//! Alert Statistics:
//! - SIDEWALL_DAMAGE: 2 alerts
//! - UNEVEN_WEAR: 1 alerts
//!
//! Maintenance Recommendations:
//! - URGENT: Immediate tire replacement recommended
//! - Wheel alignment check recommended
//! ```
//!
//! Statistics are listed in the order each type first appeared. The
//! report reads the log and never changes it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use super::{Alert, AlertLevel};
use crate::detection::AnomalyType;

const TITLE: &str = "TIRE MAINTENANCE REPORT";

/// Per-type alert counts in first-seen order
pub(crate) fn type_counts(log: &[Alert]) -> Vec<(AnomalyType, usize)> {
    let mut counts: Vec<(AnomalyType, usize)> = Vec::new();
    for alert in log {
        match counts.iter_mut().find(|(t, _)| *t == alert.anomaly_type) {
            Some((_, n)) => *n += 1,
            None => counts.push((alert.anomaly_type, 1)),
        }
    }
    counts
}

/// Render the report for a full alert log
pub(crate) fn render(log: &[Alert]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, log);
    out
}

fn write_report(out: &mut String, log: &[Alert]) -> core::fmt::Result {
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;
    writeln!(out, "Total alerts: {}", log.len())?;

    writeln!(out)?;
    writeln!(out, "Alert Statistics:")?;
    for (anomaly_type, count) in type_counts(log) {
        writeln!(out, "- {}: {} alerts", anomaly_type, count)?;
    }

    writeln!(out)?;
    writeln!(out, "Maintenance Recommendations:")?;

    let worst = log.iter().map(|a| a.alert_level).max();
    let headline = match worst {
        Some(level) if level >= AlertLevel::Critical => {
            "URGENT: Immediate tire replacement recommended"
        }
        Some(AlertLevel::Warning) => "Schedule tire inspection within 1 week",
        Some(AlertLevel::Advisory) => "Schedule tire rotation and inspection at next service",
        _ => "Continue regular tire maintenance as scheduled",
    };
    writeln!(out, "- {}", headline)?;

    if log.iter().any(|a| a.anomaly_type == AnomalyType::UnevenWear) {
        writeln!(out, "- Wheel alignment check recommended")?;
    }
    if log.iter().any(|a| a.anomaly_type == AnomalyType::TemperatureIssue) {
        writeln!(out, "- Tire pressure check recommended")?;
    }

    Ok(())
}
