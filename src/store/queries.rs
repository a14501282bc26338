//! Trace query functions for reading journeys and aggregates
//!
//! Read-side counterpart to the recorder: ordered journey loads for the
//! achievement engine, window reads for challenges, and the dashboard
//! summary.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use crate::journey::{Journey, TransportMode};

use super::db::TraceDb;
use super::models::{DailyActivity, ProfileSnapshot, TraceSummary};

/// Query interface over the trace database
#[derive(Clone)]
pub struct TraceQuery {
    db: TraceDb,
}

impl TraceQuery {
    pub fn new(db: TraceDb) -> Self {
        Self { db }
    }

    /// All journeys, oldest first
    pub fn all_journeys(&self) -> Result<Vec<Journey>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, distance_km, mode, emissions_kg, logged_at
             FROM journeys ORDER BY logged_at ASC",
        )?;
        let journeys = stmt
            .query_map([], row_to_journey)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(journeys)
    }

    /// The most recent journeys, newest first
    pub fn recent_journeys(&self, limit: u32) -> Result<Vec<Journey>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, distance_km, mode, emissions_kg, logged_at
             FROM journeys ORDER BY logged_at DESC LIMIT ?1",
        )?;
        let journeys = stmt
            .query_map([limit], row_to_journey)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(journeys)
    }

    /// Journeys logged inside [start, end), oldest first
    pub fn journeys_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Journey>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, distance_km, mode, emissions_kg, logged_at
             FROM journeys WHERE logged_at >= ?1 AND logged_at < ?2
             ORDER BY logged_at ASC",
        )?;
        let journeys = stmt
            .query_map(
                [start.timestamp_millis(), end.timestamp_millis()],
                row_to_journey,
            )?
            .filter_map(|r| r.ok())
            .collect();
        Ok(journeys)
    }

    /// Current profile aggregates
    pub fn profile(&self) -> Result<ProfileSnapshot> {
        let conn = self.db.conn();
        let snapshot = conn.query_row(
            "SELECT journey_count, total_distance_km, total_emissions_kg FROM profile WHERE id = 1",
            [],
            |r| {
                Ok(ProfileSnapshot {
                    journey_count: r.get(0)?,
                    total_distance_km: r.get(1)?,
                    total_emissions_kg: r.get(2)?,
                })
            },
        )?;
        Ok(snapshot)
    }

    /// Dashboard summary: totals, per-mode breakdown, and the last
    /// `days` of daily activity (newest first)
    pub fn summary(&self, days: u32) -> Result<TraceSummary> {
        let profile = self.profile()?;
        let conn = self.db.conn();

        let zero_emission_count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM journeys WHERE emissions_kg = 0.0",
            [],
            |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT mode, COUNT(*), COALESCE(SUM(distance_km), 0.0)
             FROM journeys GROUP BY mode ORDER BY COUNT(*) DESC",
        )?;
        let by_mode: Vec<(String, u64, f64)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
            .filter_map(|r| r.ok())
            .collect();

        let mut stmt = conn.prepare(
            "SELECT day_bucket, COUNT(*), COALESCE(SUM(distance_km), 0.0),
                    COALESCE(SUM(emissions_kg), 0.0)
             FROM journeys GROUP BY day_bucket ORDER BY day_bucket DESC LIMIT ?1",
        )?;
        let daily: Vec<DailyActivity> = stmt
            .query_map([days], |r| {
                Ok(DailyActivity {
                    day: r.get(0)?,
                    journeys: r.get(1)?,
                    distance_km: r.get(2)?,
                    emissions_kg: r.get(3)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(TraceSummary {
            journey_count: profile.journey_count,
            total_distance_km: profile.total_distance_km,
            total_emissions_kg: profile.total_emissions_kg,
            average_emissions_kg: profile.average_emissions_kg(),
            zero_emission_count,
            by_mode,
            daily,
        })
    }
}

fn row_to_journey(row: &Row<'_>) -> rusqlite::Result<Journey> {
    let id: String = row.get(0)?;
    let mode: String = row.get(2)?;
    let logged_at_ms: i64 = row.get(4)?;
    Ok(Journey {
        id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::nil()),
        distance_km: row.get(1)?,
        mode: TransportMode::from_label(&mode),
        emissions_kg: row.get(3)?,
        logged_at: DateTime::from_timestamp_millis(logged_at_ms).unwrap_or_else(Utc::now),
    })
}
