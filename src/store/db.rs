//! SQLite database connection and schema management
//!
//! Manages the `~/.ecotrace/trace.db` database holding journeys, the
//! profile aggregates, awarded achievements, and challenge enrollments.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;

/// Database wrapper shared across stores and the gamification manager
#[derive(Clone)]
pub struct TraceDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl TraceDb {
    /// Open or create the database at the default location (~/.ecotrace/trace.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Config::global_config_dir().join("trace.db");
        Self::open(&db_path)
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open trace db: {}", path.display()))?;

        // WAL keeps readers unblocked while a journey is being recorded
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection (for queries)
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Trace DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Delete all journeys and reset the profile aggregates.
    /// Awards and enrollments are kept; use `reset_gamification` for those.
    pub fn reset_journeys(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM journeys;
            UPDATE profile SET journey_count = 0, total_distance_km = 0.0,
                total_emissions_kg = 0.0 WHERE id = 1;
            "#,
        )?;
        Ok(())
    }

    /// Delete all awarded achievements and challenge enrollments
    pub fn reset_gamification(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM achievements;
            DELETE FROM challenge_enrollments;
            "#,
        )?;
        Ok(())
    }
}

/// SQL schema for the trace database
const SCHEMA_SQL: &str = r#"
-- Logged journeys (one row per trip)
CREATE TABLE IF NOT EXISTS journeys (
    id TEXT PRIMARY KEY,
    distance_km REAL NOT NULL,
    mode TEXT NOT NULL,
    emissions_kg REAL NOT NULL,
    logged_at INTEGER NOT NULL,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_journeys_logged_at ON journeys(logged_at);
CREATE INDEX IF NOT EXISTS idx_journeys_mode ON journeys(mode);
CREATE INDEX IF NOT EXISTS idx_journeys_day ON journeys(day_bucket);

-- Awarded achievements (one row per unlocked definition)
CREATE TABLE IF NOT EXISTS achievements (
    id TEXT PRIMARY KEY,
    awarded_at INTEGER NOT NULL
);

-- Profile aggregates (singleton row)
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    journey_count INTEGER DEFAULT 0,
    total_distance_km REAL DEFAULT 0.0,
    total_emissions_kg REAL DEFAULT 0.0
);
INSERT OR IGNORE INTO profile (id) VALUES (1);

-- Challenge enrollments (opt-in, one active window per challenge)
CREATE TABLE IF NOT EXISTS challenge_enrollments (
    challenge_id TEXT PRIMARY KEY,
    joined_at INTEGER NOT NULL,
    completed_at INTEGER
);

-- Schema version, for forward migrations
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_trace.db");
        let db = TraceDb::open(&db_path).unwrap();

        let conn = db.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"journeys".to_string()));
        assert!(tables.contains(&"achievements".to_string()));
        assert!(tables.contains(&"profile".to_string()));
        assert!(tables.contains(&"challenge_enrollments".to_string()));
    }

    #[test]
    fn test_profile_singleton_seeded() {
        let dir = tempdir().unwrap();
        let db = TraceDb::open(&dir.path().join("trace.db")).unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM profile", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
