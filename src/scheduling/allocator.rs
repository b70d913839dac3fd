//! Greedy slot allocation
//!
//! Every call is booked, in call order, on the earliest 5-minute slot of its
//! class's machine that is no earlier than the opening of the next business
//! day and no earlier than the end of the machine's previous booking. A slot
//! that would start at or after closing moves to the next day's opening.

use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::{debug, info, instrument};

use crate::calls::CallEvent;
use crate::scheduling::{BusinessHours, ResourceCursor, ResourceCursors, ScheduledAppointment};
use crate::simulation::SimulationResult;
use crate::types::{ClassParameters, RequestClass, SimulationConfig};

/// Granularity of the booking grid in minutes
pub const SLOT_GRID_MINUTES: u32 = 5;

/// Round a timestamp up to the booking grid
///
/// Timestamps already on the grid are returned unchanged. Anything else moves
/// to the next multiple of [`SLOT_GRID_MINUTES`] with zero seconds. Leftover
/// seconds on an aligned minute round up instead of being truncated, so a slot
/// never starts before the previous booking ends.
pub fn round_up_to_grid(timestamp: NaiveDateTime) -> NaiveDateTime {
    let sub_minute = Duration::seconds(i64::from(timestamp.second()))
        + Duration::nanoseconds(i64::from(timestamp.nanosecond()));
    let whole_minute = timestamp - sub_minute;

    let remainder = timestamp.minute() % SLOT_GRID_MINUTES;
    if remainder == 0 && sub_minute.is_zero() {
        return timestamp;
    }

    let step = if remainder == 0 { SLOT_GRID_MINUTES } else { SLOT_GRID_MINUTES - remainder };
    whole_minute + Duration::minutes(i64::from(step))
}

/// Appointments produced by one allocation pass, one list per machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocatedSchedules {
    /// Appointments on the Class A machine, in call order
    pub class_a: Vec<ScheduledAppointment>,
    /// Appointments on the Class B machine, in call order
    pub class_b: Vec<ScheduledAppointment>,
}

impl AllocatedSchedules {
    /// Appointments of one class
    pub fn for_class(&self, class: RequestClass) -> &[ScheduledAppointment] {
        match class {
            RequestClass::ClassA => &self.class_a,
            RequestClass::ClassB => &self.class_b,
        }
    }

    fn push(&mut self, appointment: ScheduledAppointment) {
        match appointment.request_class {
            RequestClass::ClassA => self.class_a.push(appointment),
            RequestClass::ClassB => self.class_b.push(appointment),
        }
    }

    /// All appointments, Class A first
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledAppointment> {
        self.class_a.iter().chain(self.class_b.iter())
    }

    /// Total number of appointments
    pub fn len(&self) -> usize {
        self.class_a.len() + self.class_b.len()
    }

    /// Whether no appointment was booked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Books calls onto the two machines
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    business_hours: BusinessHours,
    slot_hours_a: f64,
    slot_hours_b: f64,
}

impl SlotAllocator {
    /// Create an allocator from the simulation configuration
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        Self::from_parameters(config.business_hours, &config.class_a, &config.class_b)
    }

    /// Create an allocator from business hours and per-class slot lengths
    pub fn from_parameters(
        business_hours: BusinessHours,
        class_a: &ClassParameters,
        class_b: &ClassParameters,
    ) -> SimulationResult<Self> {
        business_hours.validate()?;
        class_a.validate(RequestClass::ClassA)?;
        class_b.validate(RequestClass::ClassB)?;

        Ok(Self {
            business_hours,
            slot_hours_a: class_a.slot_duration_hours,
            slot_hours_b: class_b.slot_duration_hours,
        })
    }

    /// Fixed slot length booked for a class, in hours
    pub fn slot_duration_hours(&self, class: RequestClass) -> f64 {
        match class {
            RequestClass::ClassA => self.slot_hours_a,
            RequestClass::ClassB => self.slot_hours_b,
        }
    }

    /// Earliest bookable slot for a call given the machine's cursor
    pub fn next_slot(
        &self,
        call_timestamp: NaiveDateTime,
        cursor: NaiveDateTime,
    ) -> NaiveDateTime {
        let earliest_next_day = self.business_hours.next_day_opening(call_timestamp);
        let candidate = round_up_to_grid(cursor.max(earliest_next_day));

        if !self.business_hours.is_after_close(candidate) {
            // A booking running past midnight leaves the cursor before opening
            if candidate.hour() < self.business_hours.day_start {
                return self.business_hours.opening_on(candidate.date());
            }
            return earliest_next_day.max(candidate);
        }

        let rolled = round_up_to_grid(self.business_hours.next_day_opening(candidate));
        debug!("Slot candidate {} is past closing, rolled over to {}", candidate, rolled);
        rolled
    }

    /// Book one call and advance the machine's cursor past the booking
    pub fn book(&self, call: &CallEvent, cursor: &mut ResourceCursor) -> ScheduledAppointment {
        let call_timestamp = call.call_timestamp();
        let scheduled_timestamp = self.next_slot(call_timestamp, cursor.next_available());

        let appointment = ScheduledAppointment::new(
            call_timestamp,
            call.request_class,
            scheduled_timestamp,
            self.slot_duration_hours(call.request_class),
        );
        cursor.advance_to(appointment.end_timestamp());
        appointment
    }

    /// Book every call in order
    ///
    /// `calls` must already be in chronological order (see
    /// [`crate::calls::sort_chronologically`]); the cursors are discarded once
    /// the pass completes.
    #[instrument(skip(self, calls), fields(call_count = calls.len()))]
    pub fn allocate(&self, calls: &[CallEvent]) -> AllocatedSchedules {
        let (_, schedules) = calls.iter().fold(
            (ResourceCursors::default(), AllocatedSchedules::default()),
            |(mut cursors, mut schedules), call| {
                let cursor = cursors.for_class_mut(call.request_class);
                schedules.push(self.book(call, cursor));
                (cursors, schedules)
            },
        );

        info!(
            "Allocated {} appointments ({} on Resource A, {} on Resource B)",
            schedules.len(),
            schedules.class_a.len(),
            schedules.class_b.len()
        );
        schedules
    }
}
