//! End-to-end tests for the simulation pipeline

use scan_appointment_simulator::calls::CallEvent;
use scan_appointment_simulator::scheduling::BusinessHours;
use scan_appointment_simulator::simulation::{
    run_simulation, PerformanceReport, SimulationOrchestrator,
};
use scan_appointment_simulator::types::{ClassParameters, RequestClass, SimulationConfig};
use std::io::Write;

fn seeded(days: usize, seed: u64) -> SimulationConfig {
    SimulationConfig { days, seed: Some(seed), ..Default::default() }
}

/// A fixed seed reproduces the whole pipeline
#[test]
fn test_seeded_runs_are_identical() {
    let mut first = SimulationOrchestrator::new(seeded(10, 2024)).unwrap();
    let mut second = SimulationOrchestrator::new(seeded(10, 2024)).unwrap();

    let a = first.run();
    let b = second.run();
    assert_eq!(a.calls, b.calls);
    assert_eq!(a.schedules, b.schedules);
    assert_eq!(a.report, b.report);
}

/// A full default month produces sensible headline numbers
#[test]
fn test_default_month_report() {
    let report = run_simulation(&seeded(30, 42)).unwrap();

    for class in RequestClass::ALL {
        let waiting = report.waiting_time(class);
        assert!(waiting.average > 0.0);
        assert!(waiting.maximum >= waiting.average);
        assert!(report.idle_time(class) >= 0.0);
        assert!(report.total_appointments_per_class[&class] > 0);
        assert!(report.avg_appointments_per_class[&class] > 0.0);
    }

    // Every booking waits at least through the rest of its call day
    assert!(report.avg_waiting_class_b > 1.0);
}

/// No calls gives an all-zero report with empty volume maps
#[test]
fn test_empty_call_list() {
    let orchestrator = SimulationOrchestrator::new(seeded(1, 0)).unwrap();
    let outcome = orchestrator.evaluate(Vec::<CallEvent>::new());

    assert!(outcome.calls.is_empty());
    assert_eq!(outcome.report, PerformanceReport::default());
}

/// Both classes silenced also gives an empty report
#[test]
fn test_zero_rate_configuration() {
    let config = SimulationConfig {
        class_a: ClassParameters { mean_daily_calls: 0.0, ..ClassParameters::class_a() },
        class_b: ClassParameters { mean_daily_calls: 0.0, ..ClassParameters::class_b() },
        ..seeded(5, 3)
    };

    let report = run_simulation(&config).unwrap();
    assert_eq!(report, PerformanceReport::default());
}

/// Evaluate sorts calls before allocating them
#[test]
fn test_evaluate_sorts_input() {
    let orchestrator = SimulationOrchestrator::new(seeded(1, 0)).unwrap();
    let day = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let calls = vec![
        CallEvent::new(day, 14.0, 0.4, RequestClass::ClassA),
        CallEvent::new(day, 9.0, 0.4, RequestClass::ClassA),
    ];

    let outcome = orchestrator.evaluate(calls);
    let first = &outcome.schedules.class_a[0];
    assert_eq!(first.call_timestamp, day.and_hms_opt(9, 0, 0).unwrap());
    assert_eq!(first.scheduled_timestamp, day.succ_opt().unwrap().and_hms_opt(8, 0, 0).unwrap());
}

/// Invalid configuration is rejected before anything runs
#[test]
fn test_invalid_configuration_rejected() {
    let bad_hours = SimulationConfig {
        business_hours: BusinessHours { day_start: 17, day_end: 8 },
        ..Default::default()
    };
    assert!(SimulationOrchestrator::new(bad_hours).is_err());

    let bad_slot = SimulationConfig {
        class_b: ClassParameters { slot_duration_hours: -1.0, ..ClassParameters::class_b() },
        ..Default::default()
    };
    assert!(run_simulation(&bad_slot).is_err());

    let endless_slot = SimulationConfig {
        class_a: ClassParameters {
            mean_daily_calls: 100.0,
            slot_duration_hours: 1e9,
            ..ClassParameters::class_a()
        },
        ..seeded(10, 1)
    };
    assert!(endless_slot.validate().is_err());
    assert!(run_simulation(&endless_slot).is_err());
}

/// A configuration file drives the run the same way as defaults do
#[test]
fn test_run_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
            "days": 3,
            "seed": 77,
            "business_hours": {{ "day_start": 9, "day_end": 15 }},
            "class_b": {{
                "mean_daily_calls": 5.0,
                "inter_arrival": {{ "type": "normal", "mean": 1.0, "std_dev": 0.0 }},
                "service_duration": {{ "type": "gamma", "shape": 2.0, "scale": 0.5 }},
                "slot_duration_hours": 1.0
            }}
        }}"#
    )
    .unwrap();

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.days, 3);
    assert_eq!(config.business_hours, BusinessHours { day_start: 9, day_end: 15 });

    let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
    let outcome = orchestrator.run();
    for appointment in outcome.schedules.iter() {
        let hour = chrono::Timelike::hour(&appointment.scheduled_timestamp);
        assert!((9..15).contains(&hour));
    }

    let json = outcome.report.to_json().unwrap();
    let parsed: PerformanceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.total_appointments_per_class, outcome.report.total_appointments_per_class);
    assert!((parsed.avg_waiting_class_b - outcome.report.avg_waiting_class_b).abs() < 1e-9);
}
