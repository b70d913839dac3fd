//! Simulation orchestration and control
//!
//! This module contains the pipeline orchestrator, metrics, reporting, logging
//! and error handling.
//!
//! # Overview
//!
//! - **SimulationOrchestrator**: runs generation, allocation and metrics in order
//! - **MetricsEngine**: waiting time, idle time and volume statistics
//! - **PerformanceReport**: the fixed set of headline metrics
//! - **LoggingConfig**: tracing subscriber setup
//! - **SimulationError**: error handling for the whole crate
//!
//! # Usage Example
//!
//! ```rust
//! use scan_appointment_simulator::simulation::*;
//! use scan_appointment_simulator::types::*;
//!
//! let config = SimulationConfig { days: 3, seed: Some(7), ..Default::default() };
//! let report = run_simulation(&config).unwrap();
//! assert!(report.avg_waiting_class_a >= 0.0);
//! ```

pub mod error;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod report;

pub use error::*;
pub use logging::*;
pub use metrics::*;
pub use orchestrator::*;
pub use report::*;
