//! Call generation
//!
//! This module contains the incoming call data structure, the samplers for
//! call gaps and service durations, and the arrival generator that produces
//! the call stream for both request classes.
//!
//! # Usage Example
//!
//! ```rust
//! use scan_appointment_simulator::calls::*;
//! use scan_appointment_simulator::types::SimulationConfig;
//! use rand::SeedableRng;
//!
//! let config = SimulationConfig { days: 3, ..Default::default() };
//! let generator = ArrivalGenerator::new(&config).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let mut calls = generator.generate_calls(config.start_date, config.days, &mut rng);
//! sort_chronologically(&mut calls);
//! assert!(calls.windows(2).all(|w| w[0].chronological_cmp(&w[1]).is_le()));
//! ```

pub mod call_event;
pub mod distribution;
pub mod generator;

// Re-export all public types for convenience
pub use call_event::*;
pub use distribution::*;
pub use generator::*;
