//! Ride-hailing telemetry simulation engine.
//!
//! Builds a fixed population of drivers and users over a city with demand
//! hotspots, then emits batches of ride-request events and driver-status
//! snapshots on every clock tick.

pub mod agents;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod geo;
pub mod hotspots;
pub mod pool;
pub mod pricing;
pub mod records;
pub mod runner;
pub mod sampling;
pub mod simulation;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use config::SimulationConfig;
pub use error::ConfigError;
pub use simulation::SimulationContext;
