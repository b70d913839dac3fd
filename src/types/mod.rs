//! Core types and configuration for the appointment simulator
//!
//! This module contains the fundamental enumerations and the configuration
//! structures used throughout the simulation pipeline.
//!
//! # Overview
//!
//! - **Enums**: Request classes and report output formats
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use scan_appointment_simulator::types::*;
//!
//! // Use enums for type safety
//! let class = RequestClass::ClassA;
//! assert_eq!(class.to_string(), "Class A");
//!
//! // Configure simulation
//! let config = SimulationConfig {
//!     days: 10,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
