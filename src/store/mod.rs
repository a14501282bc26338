//! Trace store: journeys, profile aggregates, and enrollments
//!
//! Persistence layer over a single SQLite database. The write and read
//! sides are split the same way the data flows: the recorder validates
//! and inserts, the query side serves the engine and the CLI.
//!
//! ```ignore
//! let store = TraceStore::open(&db_path)?;
//! store.recorder().record_journey(&journey)?;
//! let journeys = store.query().all_journeys()?;
//! ```

mod db;
mod models;
mod queries;
mod recorder;

pub use db::TraceDb;
pub use models::{ChallengeEnrollment, DailyActivity, ProfileSnapshot, TraceSummary};
pub use queries::TraceQuery;
pub use recorder::JourneyRecorder;

use std::path::Path;

use anyhow::Result;

/// Central handle over the trace database
///
/// Thread-safe through the internal mutex on the connection; clones share
/// the same database.
#[derive(Clone)]
pub struct TraceStore {
    db: TraceDb,
}

impl TraceStore {
    /// Open the store at the default location (~/.ecotrace/trace.db)
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            db: TraceDb::open_default()?,
        })
    }

    /// Open the store at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: TraceDb::open(path)?,
        })
    }

    /// Write side: record journeys
    pub fn recorder(&self) -> JourneyRecorder {
        JourneyRecorder::new(self.db.clone())
    }

    /// Read side: journeys, profile, summary
    pub fn query(&self) -> TraceQuery {
        TraceQuery::new(self.db.clone())
    }

    /// Underlying database handle (shared with the gamification manager)
    pub fn db(&self) -> TraceDb {
        self.db.clone()
    }
}
