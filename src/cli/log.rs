//! Log command implementation

use anyhow::Result;

use ecotrace::gamification::{GamificationEvent, GamificationManager};
use ecotrace::{Config, Journey, TraceStore, TransportMode};

/// Log a journey, then re-evaluate achievements and challenges
pub fn log_command(
    config: &Config,
    distance_km: f64,
    mode_label: &str,
    emissions_kg: Option<f64>,
) -> Result<()> {
    let mode = TransportMode::from_label(mode_label);
    let emissions_kg = emissions_kg.unwrap_or_else(|| config.estimate_kg(mode, distance_km));

    let store = TraceStore::open(&config.database_path())?;
    let journey = Journey::new(distance_km, mode, emissions_kg);
    store.recorder().record_journey(&journey)?;

    println!(
        "Logged {:.1} km by {} ({:.2} kg CO2e)",
        distance_km,
        mode.as_str(),
        emissions_kg
    );

    let manager = GamificationManager::new(store.db());
    let events = manager.refresh()?;

    for event in events {
        match event {
            GamificationEvent::AchievementUnlocked(unlocked) => {
                println!(
                    "  {} Achievement unlocked: {} - {}",
                    unlocked.achievement.icon,
                    unlocked.achievement.name,
                    unlocked.achievement.description
                );
            }
            GamificationEvent::ChallengeCompleted { challenge, .. } => {
                println!(
                    "  {} Challenge completed: {}",
                    challenge.icon, challenge.name
                );
            }
        }
    }

    Ok(())
}
