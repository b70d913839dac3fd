//! Performance metrics over allocated schedules

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::scheduling::{duration_to_hours, AllocatedSchedules, BusinessHours, ScheduledAppointment};
use crate::simulation::{PerformanceReport, WaitingTimeSummary};
use crate::types::RequestClass;

/// Computes waiting, idle and volume metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEngine {
    business_hours: BusinessHours,
}

fn start_of_hour(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(timestamp.hour()))
}

impl MetricsEngine {
    /// Create an engine for the given business hours
    pub fn new(business_hours: BusinessHours) -> Self {
        Self { business_hours }
    }

    /// Business-hour time elapsed between a call and its appointment, in hours
    ///
    /// Walks from the call towards the appointment one clock hour at a time,
    /// counting only the parts of each hour that lie inside business hours.
    /// Reaching the closing hour jumps straight to the next day's opening.
    pub fn waiting_time(&self, call: NaiveDateTime, scheduled: NaiveDateTime) -> f64 {
        let mut total = Duration::zero();
        let mut current = call;

        while current < scheduled {
            let next_hour = start_of_hour(current) + Duration::hours(1);

            if self.business_hours.contains(current) {
                if scheduled < next_hour {
                    total = total + (scheduled - current);
                    break;
                }
                total = total + (next_hour - current);
            }

            current = next_hour;
            if self.business_hours.is_after_close(current) {
                current = self.business_hours.next_day_opening(current);
            }
        }

        duration_to_hours(total)
    }

    /// Mean and maximum waiting time over a set of appointments
    pub fn aggregate_waiting_time(&self, appointments: &[ScheduledAppointment]) -> WaitingTimeSummary {
        if appointments.is_empty() {
            return WaitingTimeSummary::default();
        }

        let waits: Vec<f64> = appointments
            .iter()
            .map(|a| self.waiting_time(a.call_timestamp, a.scheduled_timestamp))
            .collect();

        WaitingTimeSummary {
            average: waits.iter().sum::<f64>() / waits.len() as f64,
            maximum: waits.iter().copied().fold(0.0, f64::max),
        }
    }

    /// Idle hours per operational day on one machine
    ///
    /// Gaps are counted only when the previous appointment ended inside
    /// business hours. A gap opened by an appointment ending at or after
    /// closing is an overnight closure and is ignored in full, even if part of
    /// it falls in the next morning.
    pub fn idle_time(&self, appointments: &[ScheduledAppointment]) -> f64 {
        let mut ordered: Vec<&ScheduledAppointment> = appointments.iter().collect();
        ordered.sort_by_key(|a| a.scheduled_timestamp);

        let (first, last) = match (ordered.first(), ordered.last()) {
            (Some(first), Some(last)) => (first.scheduled_date(), last.scheduled_date()),
            _ => return 0.0,
        };

        let mut idle = Duration::zero();
        let mut previous_end: Option<NaiveDateTime> = None;
        for appointment in &ordered {
            if let Some(end) = previous_end {
                let gap = appointment.scheduled_timestamp - end;
                if self.business_hours.contains(end) && gap > Duration::zero() {
                    idle = idle + gap;
                }
            }
            previous_end = Some(appointment.end_timestamp());
        }

        let operational_days = (last - first).num_days() + 1;
        if operational_days <= 0 {
            return 0.0;
        }
        duration_to_hours(idle) / operational_days as f64
    }

    /// Mean number of appointments per class over the days that class has any
    ///
    /// Days without an appointment of a class do not count as zero for it.
    pub fn average_appointments_per_day<'a, I>(&self, appointments: I) -> BTreeMap<RequestClass, f64>
    where
        I: IntoIterator<Item = &'a ScheduledAppointment>,
    {
        let mut per_day: BTreeMap<(RequestClass, NaiveDate), usize> = BTreeMap::new();
        for appointment in appointments {
            *per_day.entry((appointment.request_class, appointment.scheduled_date())).or_insert(0) += 1;
        }

        let mut totals: BTreeMap<RequestClass, (usize, usize)> = BTreeMap::new();
        for ((class, _), count) in per_day {
            let entry = totals.entry(class).or_insert((0, 0));
            entry.0 += count;
            entry.1 += 1;
        }

        totals
            .into_iter()
            .map(|(class, (count, days))| (class, count as f64 / days as f64))
            .collect()
    }

    /// Number of appointments per class
    pub fn total_appointments<'a, I>(&self, appointments: I) -> BTreeMap<RequestClass, usize>
    where
        I: IntoIterator<Item = &'a ScheduledAppointment>,
    {
        appointments.into_iter().fold(BTreeMap::new(), |mut totals, appointment| {
            *totals.entry(appointment.request_class).or_insert(0) += 1;
            totals
        })
    }

    /// Compute the full performance report for both machines
    #[instrument(skip(self, schedules), fields(appointments = schedules.len()))]
    pub fn report(&self, schedules: &AllocatedSchedules) -> PerformanceReport {
        let waiting_a = self.aggregate_waiting_time(&schedules.class_a);
        let waiting_b = self.aggregate_waiting_time(&schedules.class_b);
        debug!("Waiting time Class A {:?}, Class B {:?}", waiting_a, waiting_b);

        PerformanceReport {
            avg_waiting_class_a: waiting_a.average,
            max_waiting_class_a: waiting_a.maximum,
            avg_waiting_class_b: waiting_b.average,
            max_waiting_class_b: waiting_b.maximum,
            idle_time_resource_a: self.idle_time(&schedules.class_a),
            idle_time_resource_b: self.idle_time(&schedules.class_b),
            avg_appointments_per_class: self.average_appointments_per_day(schedules.iter()),
            total_appointments_per_class: self.total_appointments(schedules.iter()),
        }
    }
}
