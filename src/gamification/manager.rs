//! Gamification manager - evaluation driver and persistence
//!
//! Loads the journey history, awarded set, and profile aggregates, runs
//! the achievement engine, persists new awards idempotently, and sweeps
//! challenge enrollments for completions. Evaluation is triggered after a
//! journey is logged or on explicit refresh, never on reads.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::store::{ChallengeEnrollment, TraceDb, TraceQuery};

use super::challenges::{Challenge, ChallengeId, ChallengeProgress};
use super::definitions::{Achievement, AchievementId, ACHIEVEMENTS};
use super::engine::evaluate;

/// An achievement that was just awarded
#[derive(Debug, Clone)]
pub struct AwardedAchievement {
    pub achievement: &'static Achievement,
    pub awarded_at: DateTime<Utc>,
}

/// Events produced by a gamification refresh
#[derive(Debug, Clone)]
pub enum GamificationEvent {
    AchievementUnlocked(AwardedAchievement),
    ChallengeCompleted {
        challenge: &'static Challenge,
        completed_at: DateTime<Utc>,
    },
}

/// Coordinates the achievement engine and challenge progress against the store
pub struct GamificationManager {
    db: TraceDb,
}

impl GamificationManager {
    pub fn new(db: TraceDb) -> Self {
        Self { db }
    }

    fn query(&self) -> TraceQuery {
        TraceQuery::new(self.db.clone())
    }

    // ========================================
    // ACHIEVEMENT OPERATIONS
    // ========================================

    /// Get all awarded achievement IDs
    pub fn awarded_ids(&self) -> Result<HashSet<String>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare("SELECT id FROM achievements")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(ids)
    }

    /// Awarded achievements with their timestamps, in catalog order
    pub fn awarded(&self) -> Result<Vec<AwardedAchievement>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare("SELECT id, awarded_at FROM achievements")?;
        let rows: Vec<(String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        drop(stmt);
        drop(conn);

        let mut awarded: Vec<AwardedAchievement> = rows
            .into_iter()
            .filter_map(|(id, at)| {
                let id = AchievementId::from_str(&id)?;
                Some(AwardedAchievement {
                    achievement: Achievement::get(id),
                    awarded_at: DateTime::from_timestamp_millis(at).unwrap_or_else(Utc::now),
                })
            })
            .collect();
        awarded.sort_by_key(|a| catalog_position(a.achievement.id));
        Ok(awarded)
    }

    /// Persist an award. `INSERT OR IGNORE` keeps re-runs from creating
    /// duplicates, which is what makes the whole refresh retryable.
    fn award(&self, id: AchievementId, at: DateTime<Utc>) -> Result<AwardedAchievement> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT OR IGNORE INTO achievements (id, awarded_at) VALUES (?1, ?2)",
            (id.as_str(), at.timestamp_millis()),
        )?;
        drop(conn);

        Ok(AwardedAchievement {
            achievement: Achievement::get(id),
            awarded_at: at,
        })
    }

    // ========================================
    // CHALLENGE OPERATIONS
    // ========================================

    /// Join a challenge, opening its window now. Joining a challenge the
    /// user is already enrolled in is a no-op.
    pub fn join_challenge(&self, id: ChallengeId) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT OR IGNORE INTO challenge_enrollments (challenge_id, joined_at) VALUES (?1, ?2)",
            (id.as_str(), Utc::now().timestamp_millis()),
        )?;
        Ok(())
    }

    /// All enrollments, completed or not
    pub fn enrollments(&self) -> Result<Vec<ChallengeEnrollment>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT challenge_id, joined_at, completed_at FROM challenge_enrollments",
        )?;
        let enrollments = stmt
            .query_map([], |row| {
                let joined_ms: i64 = row.get(1)?;
                let completed_ms: Option<i64> = row.get(2)?;
                Ok(ChallengeEnrollment {
                    challenge_id: row.get(0)?,
                    joined_at: DateTime::from_timestamp_millis(joined_ms)
                        .unwrap_or_else(Utc::now),
                    completed_at: completed_ms.and_then(DateTime::from_timestamp_millis),
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(enrollments)
    }

    /// Progress for every joined challenge
    pub fn challenge_progress(&self) -> Result<Vec<ChallengeProgress>> {
        let now = Utc::now();
        let query = self.query();
        let mut progress = Vec::new();

        for enrollment in self.enrollments()? {
            let Some(id) = ChallengeId::from_str(&enrollment.challenge_id) else {
                continue;
            };
            let challenge = Challenge::get(id);
            let ends_at = challenge.window_end(enrollment.joined_at);
            let window_end = ends_at.min(now);
            let journeys = query.journeys_between(enrollment.joined_at, window_end)?;
            let current = challenge.goal.measure(&journeys);

            progress.push(ChallengeProgress {
                challenge,
                current,
                target: challenge.goal.target(),
                completed: enrollment.completed_at.is_some(),
                joined_at: enrollment.joined_at,
                ends_at,
            });
        }
        Ok(progress)
    }

    fn complete_challenge(&self, id: ChallengeId, at: DateTime<Utc>) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "UPDATE challenge_enrollments SET completed_at = ?1
             WHERE challenge_id = ?2 AND completed_at IS NULL",
            (at.timestamp_millis(), id.as_str()),
        )?;
        Ok(())
    }

    // ========================================
    // MAIN REFRESH
    // ========================================

    /// Re-evaluate achievements and challenges against the current
    /// journey history. Returns every event that occurred; running it
    /// again immediately returns nothing new.
    pub fn refresh(&self) -> Result<Vec<GamificationEvent>> {
        let now = Utc::now();
        let query = self.query();
        let mut events = Vec::new();

        // Achievements: evaluate the full catalog against the full history
        let journeys = query.all_journeys()?;
        let awarded = self.awarded_ids()?;
        let stats = query.profile()?.user_stats();

        for achievement in evaluate(ACHIEVEMENTS, &journeys, &awarded, &stats) {
            let unlocked = self.award(achievement.id, now)?;
            info!(achievement = achievement.id.as_str(), "achievement unlocked");
            events.push(GamificationEvent::AchievementUnlocked(unlocked));
        }

        // Challenges: sweep open enrollments for completions
        for enrollment in self.enrollments()? {
            if enrollment.completed_at.is_some() {
                continue;
            }
            let Some(id) = ChallengeId::from_str(&enrollment.challenge_id) else {
                continue;
            };
            let challenge = Challenge::get(id);
            let ends_at = challenge.window_end(enrollment.joined_at);
            let window_closed = now >= ends_at;
            let window_end = ends_at.min(now);
            let window = query.journeys_between(enrollment.joined_at, window_end)?;
            let measured = challenge.goal.measure(&window);

            if challenge.goal.is_met(measured, window_closed) {
                self.complete_challenge(id, now)?;
                info!(challenge = id.as_str(), "challenge completed");
                events.push(GamificationEvent::ChallengeCompleted {
                    challenge,
                    completed_at: now,
                });
            }
        }

        Ok(events)
    }
}

fn catalog_position(id: AchievementId) -> usize {
    ACHIEVEMENTS
        .iter()
        .position(|a| a.id == id)
        .unwrap_or(usize::MAX)
}
