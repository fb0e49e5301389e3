//! Run the default 10 drivers / 50 users scenario and print a few ticks.
//!
//! Run with: cargo run -p ridegen_core --example scenario_run

use bevy_ecs::prelude::World;
use ridegen_core::runner::{generation_schedule, run_ticks, TelemetryOutbox};
use ridegen_core::{SimulationConfig, SimulationContext};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const TICKS: usize = 12;

    let context = SimulationContext::new(SimulationConfig::default().with_seed(123))?;
    let demand = context
        .pool()
        .users()
        .first()
        .map(|user| context.demand_factor_at(&user.home_location, context.now()))
        .unwrap_or(1.0);

    let mut world = World::new();
    world.insert_resource(context);
    let mut schedule = generation_schedule();
    run_ticks(&mut world, &mut schedule, TICKS);

    let mut outbox = world.resource_mut::<TelemetryOutbox>();
    let requests = outbox.drain_ride_requests();
    let statuses = outbox.drain_driver_statuses();

    println!("--- Scenario run (10 drivers, 50 users, {TICKS} ticks, seed 123) ---");
    println!("Ride requests emitted:  {}", requests.len());
    println!("Driver statuses emitted: {}", statuses.len());
    println!("Demand factor at first user's home now: {demand:.2}");

    println!("\nSample ride requests (first 3):");
    for request in requests.iter().take(3) {
        println!("{}", serde_json::to_string_pretty(request)?);
    }
    if let Some(status) = statuses.first() {
        println!("\nSample driver status:");
        println!("{}", serde_json::to_string_pretty(status)?);
    }
    Ok(())
}
