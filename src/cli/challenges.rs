//! Challenges command implementation

use anyhow::Result;
use chrono::Utc;

use ecotrace::gamification::{Challenge, ChallengeId, GamificationManager, CHALLENGES};
use ecotrace::{Config, TraceStore};

/// List challenges with progress, or join one
pub fn challenges_command(config: &Config, join: Option<&str>) -> Result<()> {
    let store = TraceStore::open(&config.database_path())?;
    let manager = GamificationManager::new(store.db());

    if let Some(id_str) = join {
        let Some(id) = ChallengeId::from_str(id_str) else {
            eprintln!("Unknown challenge: {}", id_str);
            return Ok(());
        };
        manager.join_challenge(id)?;
        let challenge = Challenge::get(id);
        println!(
            "{} Joined {}: {} ({} days)",
            challenge.icon, challenge.name, challenge.description, challenge.duration_days
        );
        return Ok(());
    }

    let progress = manager.challenge_progress()?;
    let now = Utc::now();

    println!("Challenges:\n");
    for challenge in CHALLENGES {
        match progress.iter().find(|p| p.challenge.id == challenge.id) {
            Some(p) if p.completed => {
                println!("  {} {:<18} completed", challenge.icon, challenge.name);
            }
            Some(p) => {
                let state = if p.ends_at < now { "expired" } else { "active" };
                println!(
                    "  {} {:<18} {:>5.0}% ({:.0}/{:.0}, {})",
                    challenge.icon,
                    challenge.name,
                    f64::from(p.progress_percent()) * 100.0,
                    p.current,
                    p.target,
                    state
                );
            }
            None => {
                println!(
                    "  {} {:<18} {} [{}]",
                    challenge.icon, challenge.name, challenge.description,
                    challenge.id.as_str()
                );
            }
        }
    }

    println!("\nJoin one with: ecotrace challenges --join <id>");
    Ok(())
}
