//! Scheduled appointments and per-machine booking cursors

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scheduling::{duration_to_hours, hours_to_duration};
use crate::types::RequestClass;

/// A call booked onto the machine of its class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAppointment {
    /// Moment the call was placed
    pub call_timestamp: NaiveDateTime,
    /// Class of the request, which also names the machine
    pub request_class: RequestClass,
    /// Start of the booked slot
    pub scheduled_timestamp: NaiveDateTime,
    /// Length of the booked slot in hours
    pub slot_duration_hours: f64,
}

impl ScheduledAppointment {
    /// Create a new appointment
    pub fn new(
        call_timestamp: NaiveDateTime,
        request_class: RequestClass,
        scheduled_timestamp: NaiveDateTime,
        slot_duration_hours: f64,
    ) -> Self {
        Self { call_timestamp, request_class, scheduled_timestamp, slot_duration_hours }
    }

    /// End of the booked slot
    pub fn end_timestamp(&self) -> NaiveDateTime {
        self.scheduled_timestamp + hours_to_duration(self.slot_duration_hours)
    }

    /// Calendar day of the appointment
    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_timestamp.date()
    }

    /// Elapsed wall-clock hours between call and appointment, closures included
    pub fn wall_clock_wait_hours(&self) -> f64 {
        duration_to_hours(self.scheduled_timestamp - self.call_timestamp)
    }
}

impl fmt::Display for ScheduledAppointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} called {} booked {}",
            self.request_class,
            self.call_timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.scheduled_timestamp.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Earliest moment a machine is free for its next booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCursor {
    next_available: NaiveDateTime,
}

impl ResourceCursor {
    /// A cursor for a machine that is free immediately
    pub fn new() -> Self {
        Self { next_available: NaiveDateTime::MIN }
    }

    /// Earliest moment the machine is free
    pub fn next_available(&self) -> NaiveDateTime {
        self.next_available
    }

    /// Move the cursor to the end of a new booking
    pub fn advance_to(&mut self, timestamp: NaiveDateTime) {
        debug_assert!(timestamp >= self.next_available, "resource cursor moved backwards");
        self.next_available = timestamp;
    }
}

impl Default for ResourceCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// One cursor per machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCursors {
    /// Cursor of the Class A machine
    pub resource_a: ResourceCursor,
    /// Cursor of the Class B machine
    pub resource_b: ResourceCursor,
}

impl ResourceCursors {
    /// Cursor of the machine dedicated to a class
    pub fn for_class_mut(&mut self, class: RequestClass) -> &mut ResourceCursor {
        match class {
            RequestClass::ClassA => &mut self.resource_a,
            RequestClass::ClassB => &mut self.resource_b,
        }
    }
}
