//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures so unit tests, integration tests and benches build
//! contexts the same reproducible way.

use crate::config::SimulationConfig;
use crate::geo::BoundingBox;
use crate::hotspots::{Hotspot, HotspotCategory};
use crate::simulation::SimulationContext;

/// Fixed seed used across test files.
pub const TEST_SEED: u64 = 42;

/// 2023-11-14T22:13:20Z.
pub const TEST_EPOCH_SECS: i64 = 1_700_000_000;

/// Config with a fixed seed and start time.
pub fn seeded_config(num_drivers: i64, num_users: i64, base_request_rate: f64) -> SimulationConfig {
    SimulationConfig::new(num_drivers, num_users, base_request_rate)
        .with_seed(TEST_SEED)
        .with_start_epoch_secs(TEST_EPOCH_SECS)
}

/// Build a reproducible context over the default NYC hotspots.
///
/// # Panics
///
/// Panics if the counts are negative or the rate is not finite.
pub fn seeded_context(num_drivers: i64, num_users: i64, base_request_rate: f64) -> SimulationContext {
    SimulationContext::new(seeded_config(num_drivers, num_users, base_request_rate))
        .expect("seeded test config should be valid")
}

/// A one-degree box around (0, 0).
pub fn equator_bounds() -> BoundingBox {
    BoundingBox::new(-0.5, 0.5, -0.5, 0.5)
}

/// Two business hotspots 0.015 degrees apart, each with a 0.01 degree radius.
/// The origin is covered by the first and out of range of the second.
pub fn adjacent_business_hotspots() -> Vec<Hotspot> {
    vec![
        Hotspot::new(HotspotCategory::Business, (0.0, 0.0), 0.01, "West"),
        Hotspot::new(HotspotCategory::Business, (0.015, 0.0), 0.01, "East"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_context_uses_fixed_epoch() {
        let ctx = seeded_context(1, 1, 1.0);
        assert_eq!(ctx.now(), TEST_EPOCH_SECS);
    }

    #[test]
    fn equator_bounds_are_valid() {
        assert!(equator_bounds().validate().is_ok());
    }
}
