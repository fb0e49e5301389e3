//! ECS runner: drives a [`SimulationContext`] stored as a bevy resource.
//!
//! Each run of the schedule performs one generation tick and appends the
//! emitted ride requests and driver statuses to [`TelemetryOutbox`], where the
//! publishing side drains them. Pacing is left to whoever calls [`run_ticks`].

use bevy_ecs::prelude::{ResMut, Resource, Schedule, World};

use crate::records::{DriverStatusRecord, RideRequest};
use crate::simulation::SimulationContext;

/// Records emitted by the schedule and not yet collected.
#[derive(Debug, Default, Resource)]
pub struct TelemetryOutbox {
    pub ride_requests: Vec<RideRequest>,
    pub driver_statuses: Vec<DriverStatusRecord>,
    /// Total ticks run since the outbox was created.
    pub ticks: u64,
}

impl TelemetryOutbox {
    pub fn drain_ride_requests(&mut self) -> Vec<RideRequest> {
        std::mem::take(&mut self.ride_requests)
    }

    pub fn drain_driver_statuses(&mut self) -> Vec<DriverStatusRecord> {
        std::mem::take(&mut self.driver_statuses)
    }
}

/// One tick: a request batch, then a driver status batch stamped from the
/// pre-advance clock time.
pub fn generation_tick_system(
    mut context: ResMut<SimulationContext>,
    mut outbox: ResMut<TelemetryOutbox>,
) {
    let emitted_at = context.now();
    let requests = context.tick();
    let statuses = context.driver_status_records(emitted_at);

    outbox.ride_requests.extend(requests);
    outbox.driver_statuses.extend(statuses);
    outbox.ticks += 1;
}

pub fn generation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(generation_tick_system);
    schedule
}

/// Run `ticks` generation ticks. Returns the number actually run, which is
/// zero when the world holds no [`SimulationContext`].
///
/// `schedule` must only ever run against `world`: bevy binds a schedule's
/// systems to the first world they run on and panics on any other.
pub fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: usize) -> usize {
    if !world.contains_resource::<SimulationContext>() {
        return 0;
    }
    world.init_resource::<TelemetryOutbox>();
    for _ in 0..ticks {
        schedule.run(world);
    }
    ticks
}
