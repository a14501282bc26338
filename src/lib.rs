//! EcoTrace - journey logging with carbon accounting
//!
//! EcoTrace keeps a local log of travel journeys, attaches a CO2-equivalent
//! figure to each (supplied or estimated from per-mode factors), and layers
//! a gamification system on top: a fixed achievement catalog evaluated by a
//! pure engine over the journey history, plus opt-in time-bounded
//! challenges.
//!
//! The achievement engine is deliberately side-effect free: it takes the
//! journey history, the set of already-awarded identifiers, and the profile
//! aggregates, and returns the definitions newly satisfied. Persisting the
//! awards (idempotently) is the store's job.

pub mod config;
pub mod emissions;
pub mod gamification;
pub mod journey;
pub mod store;

pub use config::Config;
pub use gamification::{
    evaluate, Achievement, AchievementId, GamificationEvent, GamificationManager, UserStats,
    ACHIEVEMENTS,
};
pub use journey::{Journey, JourneyError, TransportMode};
pub use store::TraceStore;
