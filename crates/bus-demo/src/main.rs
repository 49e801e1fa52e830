//! # Hokey Pokey
//!
//! Runs the reference bus scenario with logging configured from the
//! environment and prints the final bus counters as JSON.

use anyhow::{Context, Result};
use bus_demo::run_scenario;
use bus_telemetry::{init_tracing, TelemetryConfig};
use priority_bus::{Bus, BusConfig, Subscriber};
use tracing::info;

fn main() -> Result<()> {
    init_tracing(&TelemetryConfig::for_service("hokey-pokey"))
        .context("failed to initialize logging")?;

    let bus: Bus<String> =
        Bus::with_config(BusConfig::from_env()).context("invalid bus configuration")?;
    info!(bus = %bus.config().name, "Starting scenario");

    let dancers = run_scenario(&bus).context("scenario post failed")?;
    for dancer in [&dancers.one, &dancers.two, &dancers.three] {
        info!(dancer = dancer.name(), received = ?dancer.received(), "Dancer finished");
    }

    let stats = serde_json::to_string_pretty(&bus.stats()).context("failed to encode stats")?;
    println!("{stats}");
    Ok(())
}
