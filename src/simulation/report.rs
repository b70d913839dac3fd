//! Performance report of a simulation run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::RequestClass;

/// Mean and maximum waiting time of one class, in business hours
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitingTimeSummary {
    /// Mean waiting time
    pub average: f64,
    /// Longest waiting time
    pub maximum: f64,
}

/// Headline metrics of a simulation run
///
/// Waiting times are business hours between call and appointment. Idle time is
/// hours per operational day during which a machine sat unused inside business
/// hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Mean waiting time of Class A calls
    pub avg_waiting_class_a: f64,
    /// Longest waiting time of a Class A call
    pub max_waiting_class_a: f64,
    /// Mean waiting time of Class B calls
    pub avg_waiting_class_b: f64,
    /// Longest waiting time of a Class B call
    pub max_waiting_class_b: f64,
    /// Idle hours per day of the Class A machine
    pub idle_time_resource_a: f64,
    /// Idle hours per day of the Class B machine
    pub idle_time_resource_b: f64,
    /// Mean appointments per day, per class
    pub avg_appointments_per_class: BTreeMap<RequestClass, f64>,
    /// Total appointments, per class
    pub total_appointments_per_class: BTreeMap<RequestClass, usize>,
}

impl PerformanceReport {
    /// Waiting time summary of one class
    pub fn waiting_time(&self, class: RequestClass) -> WaitingTimeSummary {
        match class {
            RequestClass::ClassA => WaitingTimeSummary {
                average: self.avg_waiting_class_a,
                maximum: self.max_waiting_class_a,
            },
            RequestClass::ClassB => WaitingTimeSummary {
                average: self.avg_waiting_class_b,
                maximum: self.max_waiting_class_b,
            },
        }
    }

    /// Idle hours per day of the machine serving a class
    pub fn idle_time(&self, class: RequestClass) -> f64 {
        match class {
            RequestClass::ClassA => self.idle_time_resource_a,
            RequestClass::ClassB => self.idle_time_resource_b,
        }
    }

    /// Number of appointments across both classes
    pub fn total_appointments(&self) -> usize {
        self.total_appointments_per_class.values().sum()
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Generate a human-readable summary
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Scan Scheduling Performance Report ===\n\n");

        report.push_str("Waiting Time (business hours):\n");
        for class in RequestClass::ALL {
            let waiting = self.waiting_time(class);
            report.push_str(&format!(
                "  • {}: avg {:.2} h, max {:.2} h\n",
                class, waiting.average, waiting.maximum
            ));
        }
        report.push('\n');

        report.push_str("Idle Time (hours per day):\n");
        for class in RequestClass::ALL {
            report.push_str(&format!(
                "  • {}: {:.2} h\n",
                class.resource_label(),
                self.idle_time(class)
            ));
        }
        report.push('\n');

        report.push_str("Appointments:\n");
        for class in RequestClass::ALL {
            let total = self.total_appointments_per_class.get(&class).copied().unwrap_or(0);
            match self.avg_appointments_per_class.get(&class) {
                Some(avg) => report.push_str(&format!(
                    "  • {}: {} total (avg {:.2}/day)\n",
                    class, total, avg
                )),
                None => report.push_str(&format!("  • {}: {} total\n", class, total)),
            }
        }
        report.push_str(&format!("  • All classes: {}\n", self.total_appointments()));

        report
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> PerformanceReport {
        PerformanceReport {
            avg_waiting_class_a: 4.25,
            max_waiting_class_a: 9.0,
            avg_waiting_class_b: 6.5,
            max_waiting_class_b: 14.0,
            idle_time_resource_a: 0.75,
            idle_time_resource_b: 1.5,
            avg_appointments_per_class: BTreeMap::from([
                (RequestClass::ClassA, 16.5),
                (RequestClass::ClassB, 10.4),
            ]),
            total_appointments_per_class: BTreeMap::from([
                (RequestClass::ClassA, 495),
                (RequestClass::ClassB, 312),
            ]),
        }
    }

    #[test]
    fn test_accessors() {
        let report = sample_report();
        assert_eq!(report.waiting_time(RequestClass::ClassB).maximum, 14.0);
        assert_eq!(report.idle_time(RequestClass::ClassA), 0.75);
        assert_eq!(report.total_appointments(), 807);
    }

    #[test]
    fn test_summary_report_contents() {
        let summary = sample_report().generate_summary_report();
        assert!(summary.contains("Class A: avg 4.25 h, max 9.00 h"));
        assert!(summary.contains("Resource B: 1.50 h"));
        assert!(summary.contains("Class B: 312 total (avg 10.40/day)"));
        assert!(summary.contains("All classes: 807"));
        assert_eq!(summary, sample_report().to_string());
    }

    #[test]
    fn test_empty_report_summary() {
        let summary = PerformanceReport::default().generate_summary_report();
        assert!(summary.contains("Class A: 0 total\n"));
        assert!(summary.contains("All classes: 0"));
    }

    #[test]
    fn test_json_has_fixed_keys() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for key in [
            "avg_waiting_class_a",
            "max_waiting_class_a",
            "avg_waiting_class_b",
            "max_waiting_class_b",
            "idle_time_resource_a",
            "idle_time_resource_b",
            "avg_appointments_per_class",
            "total_appointments_per_class",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["total_appointments_per_class"]["ClassA"], 495);
    }
}
