#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use ridegen_core::runner::{generation_schedule, run_ticks};

/// Helper that owns a reusable `Schedule` so tests can step the generator.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    pub fn new() -> Self {
        Self {
            schedule: generation_schedule(),
        }
    }

    /// Run a single tick (returns `true` if it ran).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_ticks(world, &mut self.schedule, 1) == 1
    }

    /// Run `ticks` ticks, returning how many ran.
    pub fn run(&mut self, world: &mut World, ticks: usize) -> usize {
        run_ticks(world, &mut self.schedule, ticks)
    }
}
