//! Journeys command implementation

use anyhow::Result;

use ecotrace::{Config, TraceStore};

/// List the most recent journeys
pub fn journeys_command(config: &Config, limit: u32, json: bool) -> Result<()> {
    let store = TraceStore::open(&config.database_path())?;
    let journeys = store.query().recent_journeys(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&journeys)?);
        return Ok(());
    }

    if journeys.is_empty() {
        println!("No journeys logged yet.");
        return Ok(());
    }

    println!("Journeys ({}):\n", journeys.len());
    for journey in journeys {
        println!(
            "  {}  {:>8.1} km  {:<14} {:>7.2} kg CO2e",
            journey.logged_at.format("%Y-%m-%d %H:%M"),
            journey.distance_km,
            journey.mode.as_str(),
            journey.emissions_kg
        );
    }

    Ok(())
}
