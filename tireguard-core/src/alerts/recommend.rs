//! Fixed recommendation table, keyed by level and anomaly type

use super::AlertLevel;
use crate::detection::AnomalyType;

/// Recommendation text for an adjusted level and anomaly type
pub fn recommendation(level: AlertLevel, anomaly_type: AnomalyType) -> &'static str {
    match (level, anomaly_type) {
        (AlertLevel::Emergency, _) => {
            "STOP VEHICLE IMMEDIATELY and inspect tire. Contact roadside assistance."
        }

        (AlertLevel::Critical, AnomalyType::SidewallDamage) => {
            "Reduce speed immediately. Schedule urgent tire replacement."
        }
        (AlertLevel::Critical, AnomalyType::BeadDamage) => {
            "Reduce speed and avoid sharp turns. Schedule urgent tire inspection."
        }
        (AlertLevel::Critical, _) => "Reduce speed and schedule urgent tire inspection.",

        (AlertLevel::Warning, AnomalyType::TreadDamage) => {
            "Schedule tire inspection within next 100 miles."
        }
        (AlertLevel::Warning, AnomalyType::TemperatureIssue) => {
            "Check tire pressure and reduce speed if temperature continues to rise."
        }
        (AlertLevel::Warning, _) => "Schedule tire inspection at next opportunity.",

        (AlertLevel::Advisory, AnomalyType::AcceleratedWear) => {
            "Schedule regular tire maintenance. Consider tire rotation."
        }
        (AlertLevel::Advisory, AnomalyType::UnevenWear) => {
            "Schedule tire rotation and alignment check."
        }
        (AlertLevel::Advisory, _) => "Monitor condition. Schedule regular maintenance.",

        (AlertLevel::Info, _) => "No immediate action needed. Continue regular tire maintenance.",
    }
}
