//! Gamification system: achievements and challenges
//!
//! A static achievement catalog, a pure evaluation engine over the
//! journey history, time-bounded challenges, and a manager that persists
//! awards idempotently.

mod challenges;
mod definitions;
mod engine;
mod manager;

pub use challenges::{
    Challenge, ChallengeGoal, ChallengeId, ChallengeProgress, CHALLENGES,
};
pub use definitions::{Achievement, AchievementId, UnlockRule, ACHIEVEMENTS};
pub use engine::{evaluate, UserStats};
pub use manager::{AwardedAchievement, GamificationEvent, GamificationManager};
