//! Achievements command implementation

use anyhow::Result;
use serde::Serialize;

use ecotrace::gamification::GamificationManager;
use ecotrace::{Config, TraceStore, ACHIEVEMENTS};

#[derive(Serialize)]
struct AchievementView {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    unlocked: bool,
    awarded_at: Option<String>,
}

/// Show the full catalog with unlock state
pub fn achievements_command(config: &Config, json: bool) -> Result<()> {
    let store = TraceStore::open(&config.database_path())?;
    let manager = GamificationManager::new(store.db());
    let awarded = manager.awarded()?;

    let views: Vec<AchievementView> = ACHIEVEMENTS
        .iter()
        .map(|achievement| {
            let award = awarded
                .iter()
                .find(|a| a.achievement.id == achievement.id);
            AchievementView {
                id: achievement.id.as_str(),
                name: achievement.name,
                description: achievement.description,
                unlocked: award.is_some(),
                awarded_at: award.map(|a| a.awarded_at.format("%Y-%m-%d").to_string()),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    let unlocked = views.iter().filter(|v| v.unlocked).count();
    println!("Achievements ({}/{}):\n", unlocked, views.len());

    for (view, achievement) in views.iter().zip(ACHIEVEMENTS) {
        let marker = if view.unlocked { achievement.icon } else { "🔒" };
        let when = view
            .awarded_at
            .as_deref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        println!(
            "  {} {:<22} {}{}",
            marker, view.name, view.description, when
        );
    }

    Ok(())
}
