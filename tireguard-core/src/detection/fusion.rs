//! Fusion of per-strategy findings
//!
//! Priority is a fixed chain, not a score: threshold beats rate beats
//! trend. The match below is the whole rule.

use super::{AnomalyResult, DetectionSource, Finding};
use crate::sensors::SensorId;

/// What each strategy concluded for one sensor
#[derive(Debug, Clone, Default)]
pub(crate) struct Verdicts {
    pub threshold: Option<Finding>,
    pub rate: Option<Finding>,
    pub trend: Option<Finding>,
}

/// Pick the single winning finding for a sensor
pub(crate) fn fuse(sensor_id: SensorId, verdicts: Verdicts) -> AnomalyResult {
    let (finding, source) = match verdicts {
        Verdicts { threshold: Some(f), .. } => (f, DetectionSource::Threshold),
        Verdicts { rate: Some(f), .. } => (f, DetectionSource::Rate),
        Verdicts { trend: Some(f), .. } => (f, DetectionSource::Trend),
        _ => return AnomalyResult::normal(sensor_id),
    };

    AnomalyResult {
        sensor_id,
        detected: true,
        anomaly_type: finding.anomaly_type,
        confidence: finding.confidence,
        details: finding.details,
        source: Some(source),
    }
}
