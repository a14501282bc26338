//! Summary command implementation

use anyhow::Result;

use ecotrace::{Config, TraceStore};

/// Show totals, per-mode breakdown, and recent daily activity
pub fn summary_command(config: &Config, days: u32, json: bool) -> Result<()> {
    let store = TraceStore::open(&config.database_path())?;
    let summary = store.query().summary(days)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.journey_count == 0 {
        println!("No journeys logged yet.");
        return Ok(());
    }

    println!("EcoTrace summary\n");
    println!("  Journeys:        {}", summary.journey_count);
    println!("  Distance:        {:.1} km", summary.total_distance_km);
    println!("  Emissions:       {:.2} kg CO2e", summary.total_emissions_kg);
    println!("  Average/journey: {:.2} kg CO2e", summary.average_emissions_kg);
    println!("  Zero-emission:   {}", summary.zero_emission_count);

    if !summary.by_mode.is_empty() {
        println!("\nBy mode:");
        for (mode, count, distance_km) in &summary.by_mode {
            println!("  {:<14} {:>4} journeys  {:>8.1} km", mode, count, distance_km);
        }
    }

    if !summary.daily.is_empty() {
        println!("\nLast {} days:", days);
        for day in &summary.daily {
            println!(
                "  {}  {:>3} journeys  {:>8.1} km  {:>7.2} kg",
                day.day, day.journeys, day.distance_km, day.emissions_kg
            );
        }
    }

    Ok(())
}
