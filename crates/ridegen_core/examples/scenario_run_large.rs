//! Large scenario: 5,000 drivers / 50,000 users, one simulated hour of ticks.
//!
//! Run with: cargo run -p ridegen_core --example scenario_run_large --release

use std::time::Instant;

use ridegen_core::pricing::TripEstimate;
use ridegen_core::{SimulationConfig, SimulationContext};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const NUM_DRIVERS: i64 = 5_000;
    const NUM_USERS: i64 = 50_000;
    const TICKS: usize = 720; // one hour at 5 s per tick

    let build_start = Instant::now();
    let mut context = SimulationContext::new(
        SimulationConfig::new(NUM_DRIVERS, NUM_USERS, 40.0).with_seed(42),
    )?;
    println!(
        "Built {} drivers / {} users in {:.2}s",
        NUM_DRIVERS,
        NUM_USERS,
        build_start.elapsed().as_secs_f64()
    );

    let run_start = Instant::now();
    let mut total_requests = 0usize;
    let mut estimates: Vec<TripEstimate> = Vec::new();
    for _ in 0..TICKS {
        let batch = context.tick();
        total_requests += batch.len();
        if let Some(request) = batch.first() {
            estimates.push(context.estimate_trip(&request.pickup_location, &request.destination));
        }
    }
    let elapsed = run_start.elapsed().as_secs_f64();

    println!("\n--- Generation Results ---");
    println!("Ticks:               {TICKS}");
    println!("Ride requests:       {total_requests}");
    println!(
        "Requests per tick:   {:.1}",
        total_requests as f64 / TICKS as f64
    );
    println!("Wall-clock time:     {elapsed:.2}s");

    if !estimates.is_empty() {
        let n = estimates.len() as f64;
        let mean_fare = estimates.iter().map(|e| e.fare).sum::<f64>() / n;
        let mean_km = estimates.iter().map(|e| e.distance_km).sum::<f64>() / n;
        println!("\n--- Commute Estimates (first request per tick) ---");
        println!("Mean distance:       {mean_km:.2} km");
        println!("Mean fare:           {mean_fare:.2}");
    }
    Ok(())
}
