//! Call event data structure
//!
//! A call is an external request for an appointment. Calls are created once by
//! the arrival generator and never modified afterwards.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::scheduling::hours_to_duration;
use crate::types::RequestClass;

/// A single incoming call requesting an appointment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallEvent {
    /// Calendar day the call was generated for
    pub calendar_date: NaiveDate,
    /// Hour of the call relative to midnight of `calendar_date`
    ///
    /// Calls are not confined to business hours, so this may run past the
    /// closing hour or even past midnight.
    pub time_of_day_hours: f64,
    /// Sampled service duration in hours (never negative)
    pub service_duration: f64,
    /// Class of the request
    pub request_class: RequestClass,
}

impl CallEvent {
    /// Create a call, clamping negative times and durations to zero
    pub fn new(
        calendar_date: NaiveDate,
        time_of_day_hours: f64,
        service_duration: f64,
        request_class: RequestClass,
    ) -> Self {
        Self {
            calendar_date,
            time_of_day_hours: time_of_day_hours.max(0.0),
            service_duration: service_duration.max(0.0),
            request_class,
        }
    }

    /// Moment the call was placed
    pub fn call_timestamp(&self) -> NaiveDateTime {
        self.calendar_date.and_time(NaiveTime::MIN) + hours_to_duration(self.time_of_day_hours)
    }

    /// Order by calendar date, then by time of day
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.calendar_date
            .cmp(&other.calendar_date)
            .then_with(|| self.time_of_day_hours.total_cmp(&other.time_of_day_hours))
    }
}

impl fmt::Display for CallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:>7.4}  {:>7.4}  {}  ({})",
            self.calendar_date,
            self.time_of_day_hours,
            self.service_duration,
            self.request_class,
            self.call_timestamp().format("%Y-%m-%d %H:%M:%S")
        )
    }
}
