//! Scan Appointment Simulator
//!
//! A discrete-time simulation of appointment scheduling for two scan machines,
//! each dedicated to one class of request.
//!
//! # Overview
//!
//! Calls arrive over a horizon of days. Every call is booked on the machine of
//! its class, no earlier than the opening of the next business day, on the
//! earliest free slot of a 5-minute grid. The simulation then reports how long
//! patients waited in business hours, how much machine time sat idle and how
//! many appointments each class received.
//!
//! ## Quick Start
//!
//! ```rust
//! use scan_appointment_simulator::*;
//!
//! let config = SimulationConfig {
//!     days: 10,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let report = run_simulation(&config)?;
//! println!("{}", report);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: request classes, output formats and configuration
//! - [`calls`]: random call generation
//! - [`scheduling`]: business hours and slot allocation
//! - [`simulation`]: metrics, reporting, orchestration, logging and errors
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌────────────┐    ┌────────────┐
//! │  Arrival   │    │   Sort     │    │   Slot     │    │  Metrics   │
//! │ Generator  │───►│ by (date,  │───►│ Allocator  │───►│  Engine    │
//! │            │    │   time)    │    │ (2 cursors)│    │            │
//! └────────────┘    └────────────┘    └────────────┘    └────────────┘
//!                                                              │
//!                                                              ▼
//!                                                     PerformanceReport
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod calls;
pub mod scheduling;
pub mod simulation;
pub mod types;

pub use types::{
    ClassParameters, ConfigError, ConfigValidationError, DistributionSpec, OutputFormat,
    RequestClass, SimulationConfig,
};

pub use calls::{sort_chronologically, ArrivalGenerator, CallEvent};

pub use scheduling::{
    AllocatedSchedules, BusinessHours, ResourceCursor, ScheduledAppointment, SlotAllocator,
};

pub use simulation::{
    run_simulation, LoggingConfig, MetricsEngine, PerformanceReport, SimulationError,
    SimulationOrchestrator, SimulationOutcome, SimulationResult, WaitingTimeSummary,
};
