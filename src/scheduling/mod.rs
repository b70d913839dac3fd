//! Appointment scheduling
//!
//! Turns the chronologically sorted call stream into bookings on the two scan
//! machines.
//!
//! - **BusinessHours**: the daily opening window both machines share
//! - **ScheduledAppointment**: a call together with its booked slot
//! - **ResourceCursor**: earliest free moment of one machine
//! - **SlotAllocator**: greedy next-business-day allocation on a 5-minute grid
//!
//! # Usage Example
//!
//! ```rust
//! use scan_appointment_simulator::calls::CallEvent;
//! use scan_appointment_simulator::scheduling::*;
//! use scan_appointment_simulator::types::*;
//!
//! let allocator = SlotAllocator::new(&SimulationConfig::default()).unwrap();
//! let day = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let calls = vec![CallEvent::new(day, 8.0, 0.45, RequestClass::ClassA)];
//!
//! let schedules = allocator.allocate(&calls);
//! assert_eq!(schedules.class_a[0].scheduled_timestamp.to_string(), "2025-01-02 08:00:00");
//! ```

pub mod allocator;
pub mod appointment;
pub mod business_hours;

pub use allocator::*;
pub use appointment::*;
pub use business_hours::*;
