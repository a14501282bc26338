//! Journey recorder - writes journeys to the database
//!
//! Validates incoming journeys, inserts them, and keeps the profile
//! aggregates in step on the same connection.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::journey::Journey;

use super::db::TraceDb;

/// Records journeys and maintains profile aggregates
#[derive(Clone)]
pub struct JourneyRecorder {
    db: TraceDb,
}

impl JourneyRecorder {
    pub fn new(db: TraceDb) -> Self {
        Self { db }
    }

    /// Record a journey.
    ///
    /// Rejects invalid input (negative or non-finite distance/emissions)
    /// before anything touches the database. The insert and the profile
    /// aggregate update share one connection so the two cannot drift.
    pub fn record_journey(&self, journey: &Journey) -> Result<()> {
        journey
            .validate()
            .with_context(|| format!("Rejected journey {}", journey.id))?;

        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO journeys (id, distance_km, mode, emissions_kg, logged_at, day_bucket)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            rusqlite::params![
                journey.id.to_string(),
                journey.distance_km,
                journey.mode.as_str(),
                journey.emissions_kg,
                journey.logged_at.timestamp_millis(),
                day_bucket(journey.logged_at),
            ],
        )?;

        conn.execute(
            r#"UPDATE profile SET
                   journey_count = journey_count + 1,
                   total_distance_km = total_distance_km + ?1,
                   total_emissions_kg = total_emissions_kg + ?2
               WHERE id = 1"#,
            rusqlite::params![journey.distance_km, journey.emissions_kg],
        )?;

        debug!(
            journey = %journey.id,
            mode = journey.mode.as_str(),
            distance_km = journey.distance_km,
            emissions_kg = journey.emissions_kg,
            "journey recorded"
        );
        Ok(())
    }
}

/// Day bucket ("YYYY-MM-DD", UTC) for daily summary queries
pub(crate) fn day_bucket(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
