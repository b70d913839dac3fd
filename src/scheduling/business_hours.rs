//! Business-hour window shared by allocation and metrics
//!
//! Both machines open and close at the same whole hours every calendar day.
//! There is no weekend handling: every day is a working day.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::ConfigValidationError;

/// Opening hours of the scan machines, as whole hours of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// First hour of the working day (inclusive)
    pub day_start: u32,
    /// Hour at which the working day ends (exclusive)
    pub day_end: u32,
}

impl BusinessHours {
    /// Default opening hour (08:00)
    pub const DEFAULT_DAY_START: u32 = 8;
    /// Default closing hour (17:00)
    pub const DEFAULT_DAY_END: u32 = 17;

    /// Create validated business hours
    pub fn new(day_start: u32, day_end: u32) -> Result<Self, ConfigValidationError> {
        let hours = Self { day_start, day_end };
        hours.validate()?;
        Ok(hours)
    }

    /// Check that the window is non-empty and fits inside one calendar day
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.day_start >= self.day_end || self.day_end > 24 {
            return Err(ConfigValidationError::InvalidBusinessHours {
                day_start: self.day_start,
                day_end: self.day_end,
            });
        }
        Ok(())
    }

    /// Whether an hour of the day lies in `[day_start, day_end)`
    pub fn contains_hour(&self, hour: u32) -> bool {
        (self.day_start..self.day_end).contains(&hour)
    }

    /// Whether a timestamp falls inside business hours
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.contains_hour(timestamp.hour())
    }

    /// Whether a timestamp is at or past the closing hour of its day
    pub fn is_after_close(&self, timestamp: NaiveDateTime) -> bool {
        timestamp.hour() >= self.day_end
    }

    /// Opening time on the given date
    pub fn opening_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.day_start))
    }

    /// Opening time on the calendar day after the timestamp's date
    pub fn next_day_opening(&self, timestamp: NaiveDateTime) -> NaiveDateTime {
        self.opening_on(timestamp.date() + Duration::days(1))
    }

    /// Length of the working day in hours
    pub fn hours_per_day(&self) -> u32 {
        self.day_end.saturating_sub(self.day_start)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self { day_start: Self::DEFAULT_DAY_START, day_end: Self::DEFAULT_DAY_END }
    }
}

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// Convert fractional hours to a duration with nanosecond resolution
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::nanoseconds((hours * NANOS_PER_HOUR).round() as i64)
}

/// Convert a duration to fractional hours
pub fn duration_to_hours(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_HOUR,
        None => duration.num_milliseconds() as f64 / 3_600_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_default_business_hours() {
        let hours = BusinessHours::default();
        assert_eq!(hours.day_start, 8);
        assert_eq!(hours.day_end, 17);
        assert_eq!(hours.hours_per_day(), 9);
    }

    #[test]
    fn test_business_hours_validation() {
        assert!(BusinessHours::new(8, 17).is_ok());
        assert!(BusinessHours::new(0, 24).is_ok());
        assert!(BusinessHours::new(17, 8).is_err());
        assert!(BusinessHours::new(9, 9).is_err());
        assert!(BusinessHours::new(8, 25).is_err());
    }

    #[test]
    fn test_business_hours_containment() {
        let hours = BusinessHours::default();

        assert!(hours.contains(at(1, 8, 0)));
        assert!(hours.contains(at(1, 16, 59)));
        assert!(!hours.contains(at(1, 17, 0)));
        assert!(!hours.contains(at(1, 7, 59)));
        assert!(!hours.contains(at(1, 23, 0)));
    }

    #[test]
    fn test_after_close() {
        let hours = BusinessHours::default();
        assert!(hours.is_after_close(at(1, 17, 0)));
        assert!(hours.is_after_close(at(1, 22, 30)));
        assert!(!hours.is_after_close(at(1, 16, 55)));
    }

    #[test]
    fn test_hour_conversions() {
        assert_eq!(hours_to_duration(1.0), Duration::hours(1));
        assert_eq!(hours_to_duration(0.25), Duration::minutes(15));
        assert_eq!(hours_to_duration(0.0), Duration::zero());
        assert!((duration_to_hours(Duration::minutes(90)) - 1.5).abs() < 1e-12);
        // 0.5833 h is 2099.88 seconds
        assert_eq!(hours_to_duration(0.5833), Duration::milliseconds(2_099_880));
    }

    #[test]
    fn test_openings() {
        let hours = BusinessHours::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        assert_eq!(hours.opening_on(date), at(31, 8, 0));
        // Month boundary
        assert_eq!(
            hours.next_day_opening(at(31, 15, 20)),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(8, 0, 0).unwrap()
        );
    }
}
