#![allow(dead_code)]

use bevy_ecs::prelude::World;
use ridegen_core::hotspots::Hotspot;
use ridegen_core::runner::TelemetryOutbox;
use ridegen_core::test_helpers::{TEST_EPOCH_SECS, TEST_SEED};
use ridegen_core::{SimulationConfig, SimulationContext};

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug)]
pub struct TestWorldConfig {
    pub seed: u64,
    pub start_epoch_secs: i64,
    pub num_drivers: i64,
    pub num_users: i64,
    pub base_request_rate: f64,
    pub hotspots: Option<Vec<Hotspot>>,
}

impl Default for TestWorldConfig {
    fn default() -> Self {
        Self {
            seed: TEST_SEED,
            start_epoch_secs: TEST_EPOCH_SECS,
            num_drivers: 10,
            num_users: 50,
            base_request_rate: 5.0,
            hotspots: None,
        }
    }
}

/// Helper that populates the ECS world with a simulation context and an outbox.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_population(mut self, num_drivers: i64, num_users: i64) -> Self {
        self.config.num_drivers = num_drivers;
        self.config.num_users = num_users;
        self
    }

    pub fn with_request_rate(mut self, rate: f64) -> Self {
        self.config.base_request_rate = rate;
        self
    }

    pub fn with_hotspots(mut self, hotspots: Vec<Hotspot>) -> Self {
        self.config.hotspots = Some(hotspots);
        self
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::new(
            self.config.num_drivers,
            self.config.num_users,
            self.config.base_request_rate,
        )
        .with_seed(self.config.seed)
        .with_start_epoch_secs(self.config.start_epoch_secs);
        if let Some(hotspots) = self.config.hotspots.clone() {
            config = config.with_hotspots(hotspots);
        }
        config
    }

    /// Build the world. Panics if the configuration is invalid.
    pub fn build(self) -> World {
        let context =
            SimulationContext::new(self.simulation_config()).expect("test world config is valid");
        let mut world = World::new();
        world.insert_resource(context);
        world.insert_resource(TelemetryOutbox::default());
        world
    }
}
