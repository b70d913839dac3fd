//! Tests for call generation
//!
//! These tests check the shape of the generated call stream: start of day,
//! class mix, clamping and reproducibility under a fixed seed.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scan_appointment_simulator::calls::{sort_chronologically, ArrivalGenerator, CallEvent};
use scan_appointment_simulator::scheduling::BusinessHours;
use scan_appointment_simulator::types::{
    ClassParameters, DistributionSpec, RequestClass, SimulationConfig,
};
use std::collections::BTreeMap;

fn generate(config: &SimulationConfig, seed: u64) -> Vec<CallEvent> {
    let generator = ArrivalGenerator::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    generator.generate_calls(config.start_date, config.days, &mut rng)
}

/// Each day's first call of each class is at the opening hour
#[test]
fn test_each_class_starts_at_opening() {
    let config = SimulationConfig { days: 10, ..Default::default() };
    let calls = generate(&config, 17);

    let mut first_per_day: BTreeMap<(NaiveDate, RequestClass), f64> = BTreeMap::new();
    for call in &calls {
        first_per_day.entry((call.calendar_date, call.request_class)).or_insert(call.time_of_day_hours);
    }

    assert!(!first_per_day.is_empty());
    for (_, first) in first_per_day {
        assert_eq!(first, 8.0);
    }
}

/// The opening hour comes from the configured business hours
#[test]
fn test_custom_opening_hour() {
    let config = SimulationConfig {
        days: 3,
        business_hours: BusinessHours::new(7, 15).unwrap(),
        ..Default::default()
    };
    let calls = generate(&config, 2);

    assert!(calls.iter().all(|c| c.time_of_day_hours >= 7.0));
    assert!(calls.iter().any(|c| c.time_of_day_hours == 7.0));
}

/// Call volumes follow the configured daily means
#[test]
fn test_daily_volume_matches_means() {
    let config = SimulationConfig { days: 200, ..Default::default() };
    let calls = generate(&config, 99);

    let class_a = calls.iter().filter(|c| c.request_class == RequestClass::ClassA).count() as f64;
    let class_b = calls.iter().filter(|c| c.request_class == RequestClass::ClassB).count() as f64;

    let mean_a = class_a / config.days as f64;
    let mean_b = class_b / config.days as f64;
    assert!((mean_a - 379.0 / 23.0).abs() < 1.0, "class A mean {}", mean_a);
    assert!((mean_b - 239.0 / 23.0).abs() < 1.0, "class B mean {}", mean_b);
}

/// Sampled values are never negative
#[test]
fn test_sampled_values_are_non_negative() {
    let heavy_tail = ClassParameters {
        mean_daily_calls: 30.0,
        inter_arrival: DistributionSpec::Normal { mean: 0.1, std_dev: 1.0 },
        service_duration: DistributionSpec::Normal { mean: 0.0, std_dev: 1.0 },
        slot_duration_hours: 0.5,
    };
    let config = SimulationConfig {
        days: 20,
        class_a: heavy_tail,
        class_b: heavy_tail,
        ..Default::default()
    };
    let calls = generate(&config, 5);

    assert!(calls.iter().all(|c| c.service_duration >= 0.0));

    // Within a class and day, call times never move backwards
    for pair in calls.windows(2) {
        if pair[0].calendar_date == pair[1].calendar_date
            && pair[0].request_class == pair[1].request_class
        {
            assert!(pair[1].time_of_day_hours >= pair[0].time_of_day_hours);
        }
    }
}

/// Generation is grouped by day with Class A before Class B
#[test]
fn test_generation_order_before_sorting() {
    let config = SimulationConfig { days: 4, ..Default::default() };
    let calls = generate(&config, 12);

    for pair in calls.windows(2) {
        assert!(pair[0].calendar_date <= pair[1].calendar_date);
        if pair[0].calendar_date == pair[1].calendar_date {
            assert!(pair[0].request_class <= pair[1].request_class);
        }
    }
}

/// Sorting interleaves the classes by call time
#[test]
fn test_sorting_interleaves_classes() {
    let config = SimulationConfig { days: 4, ..Default::default() };
    let mut calls = generate(&config, 12);
    sort_chronologically(&mut calls);

    assert!(calls.windows(2).all(|w| w[0].call_timestamp() <= w[1].call_timestamp()));
    // Both classes open the first day at 08:00
    assert_eq!(calls[0].time_of_day_hours, 8.0);
    assert_eq!(calls[1].time_of_day_hours, 8.0);
    assert_ne!(calls[0].request_class, calls[1].request_class);
}

/// Same seed, same calls; different seed, different calls
#[test]
fn test_seed_controls_generation() {
    let config = SimulationConfig { days: 5, ..Default::default() };

    assert_eq!(generate(&config, 123), generate(&config, 123));
    assert_ne!(generate(&config, 123), generate(&config, 124));
}
