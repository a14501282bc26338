//! Reset command implementation

use anyhow::Result;

use ecotrace::store::TraceDb;
use ecotrace::Config;

/// Delete logged journeys, and optionally all gamification state
pub fn reset_command(config: &Config, gamification: bool) -> Result<()> {
    let db = TraceDb::open(&config.database_path())?;

    db.reset_journeys()?;
    println!("Journeys deleted.");

    if gamification {
        db.reset_gamification()?;
        println!("Achievements and challenge enrollments deleted.");
    }

    Ok(())
}
