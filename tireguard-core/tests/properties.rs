//! Property tests for the invariants every tick must uphold

use proptest::prelude::*;
use tireguard_core::{
    buffer::CircularBuffer, AlertConfig, AlertLevel, AnomalyDetector, DetectorConfig,
    Preprocessor, PreprocessorConfig, ProcessedReading, SensorId, SensorReading,
};

fn sensor() -> impl Strategy<Value = SensorId> {
    prop::sample::select(SensorId::ALL.to_vec())
}

fn level() -> impl Strategy<Value = AlertLevel> {
    prop::sample::select(AlertLevel::ALL.to_vec())
}

proptest! {
    #[test]
    fn buffer_never_exceeds_capacity(
        capacity in 1usize..=32,
        values in prop::collection::vec(-1e3f32..1e3, 0..100),
    ) {
        let mut buffer: CircularBuffer<f32, 32> = CircularBuffer::with_capacity(capacity);
        for v in &values {
            buffer.push(*v);
            prop_assert!(buffer.len() <= capacity);
            prop_assert_eq!(buffer.last(), Some(v));
        }

        let kept: Vec<f32> = buffer.iter().copied().collect();
        let start = values.len().saturating_sub(capacity);
        prop_assert_eq!(kept.as_slice(), &values[start..]);
    }

    #[test]
    fn normalized_is_average_over_baseline(
        window in 1usize..=20,
        readings in prop::collection::vec((sensor(), 50f32..300.0, -20f32..90.0), 1..60),
    ) {
        let config = PreprocessorConfig::with_window_size(window);
        let mut preprocessor = Preprocessor::new(config).unwrap();
        for (sensor, raw, temperature) in readings {
            let p = preprocessor.process(&SensorReading::new(sensor, raw, temperature));
            let expected = p.moving_average / sensor.default_baseline();
            prop_assert!((p.normalized_value - expected).abs() <= 1e-6 * expected.abs().max(1.0));
            prop_assert!(preprocessor.window(sensor).len() <= window);
        }
    }

    #[test]
    fn constant_stream_converges(
        sensor in sensor(),
        window in 1usize..=20,
        factor in 0.5f32..2.0,
        extra in 0usize..10,
    ) {
        let config = PreprocessorConfig::with_window_size(window);
        let mut preprocessor = Preprocessor::new(config).unwrap();
        let raw = sensor.default_baseline() * factor;

        let mut last = None;
        for _ in 0..window + extra {
            last = Some(preprocessor.process(&SensorReading::new(sensor, raw, 25.0)));
        }

        let p = last.unwrap();
        prop_assert!((p.moving_average - raw).abs() < 1e-3 * raw);
        prop_assert!((p.normalized_value - factor).abs() < 1e-4);
    }

    #[test]
    fn confidence_stays_in_unit_interval(
        ticks in prop::collection::vec(
            prop::collection::vec((sensor(), 0f32..3.0, -30f32..120.0), 0..5),
            1..40,
        ),
    ) {
        let mut detector = AnomalyDetector::new(DetectorConfig::with_history_length(10)).unwrap();

        for (i, tick) in ticks.into_iter().enumerate() {
            let mut seen = Vec::new();
            let readings: Vec<ProcessedReading> = tick
                .into_iter()
                .filter(|(s, _, _)| {
                    let fresh = !seen.contains(s);
                    seen.push(*s);
                    fresh
                })
                .map(|(s, v, t)| processed(s, v, t))
                .collect();

            let result = detector.analyze(i as u64 + 1, 0, &readings);
            prop_assert_eq!(result.results.len(), readings.len());

            for r in result.results.values() {
                prop_assert!((0.0..=1.0).contains(&r.confidence));
                if !r.detected {
                    prop_assert_eq!(r.confidence, 0.0);
                    prop_assert!(r.source.is_none());
                }
            }
        }
    }

    #[test]
    fn adjustment_moves_at_most_one_level(base in level(), confidence in 0f32..=1.0) {
        let adjusted = AlertConfig::default().adjust(base, confidence);
        let step = adjusted.ordinal() as i16 - base.ordinal() as i16;
        prop_assert!((-1..=1).contains(&step));
    }
}

fn processed(sensor: SensorId, normalized: f32, temperature: f32) -> ProcessedReading {
    let baseline = sensor.default_baseline();
    ProcessedReading {
        sensor_id: sensor,
        raw_value: normalized * baseline,
        filtered_value: normalized * baseline,
        compensated_value: normalized * baseline,
        moving_average: normalized * baseline,
        normalized_value: normalized,
        location: sensor.location(),
        temperature,
        timestamp: 0,
        tick_index: 0,
    }
}
