//! Data models for the trace store
//!
//! Views and records read from or written to the database, separate from
//! the `Journey` domain type itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::UserStats;

/// Running profile aggregates (singleton row in the database)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub journey_count: u64,
    pub total_distance_km: f64,
    pub total_emissions_kg: f64,
}

impl ProfileSnapshot {
    /// Running average emissions per journey, 0.0 for an empty history
    pub fn average_emissions_kg(&self) -> f64 {
        if self.journey_count == 0 {
            0.0
        } else {
            self.total_emissions_kg / self.journey_count as f64
        }
    }

    /// The aggregate slice the achievement engine consumes
    pub fn user_stats(&self) -> UserStats {
        UserStats {
            average_emissions_kg: self.average_emissions_kg(),
        }
    }
}

/// A challenge the user has joined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeEnrollment {
    pub challenge_id: String,
    pub joined_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-day activity for the summary view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyActivity {
    pub day: String, // YYYY-MM-DD
    pub journeys: u64,
    pub distance_km: f64,
    pub emissions_kg: f64,
}

/// Dashboard summary over the whole journey log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceSummary {
    pub journey_count: u64,
    pub total_distance_km: f64,
    pub total_emissions_kg: f64,
    pub average_emissions_kg: f64,
    pub zero_emission_count: u64,

    /// Per-mode breakdown (mode label, journey count, distance)
    pub by_mode: Vec<(String, u64, f64)>,

    /// Recent daily activity, newest first
    pub daily: Vec<DailyActivity>,
}
