//! Time-bounded challenges
//!
//! Challenges are opt-in: joining one opens a window of `duration_days`
//! during which journey activity counts toward the goal. Accumulation
//! goals complete as soon as the target is reached; budget goals (stay
//! under an emission total) can only complete once the window has closed.

use chrono::{DateTime, Duration, Utc};

use crate::journey::{Journey, TransportMode};

/// Unique identifier for each challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeId {
    GreenCommute,
    CarFreeWeek,
    PedalPusher,
    TransitTripper,
    WalkingWeek,
    CenturyTrek,
    CarbonBudget,
    LowCarbonMonth,
}

impl ChallengeId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreenCommute => "ch_green_commute",
            Self::CarFreeWeek => "ch_car_free_week",
            Self::PedalPusher => "ch_pedal_pusher",
            Self::TransitTripper => "ch_transit_tripper",
            Self::WalkingWeek => "ch_walking_week",
            Self::CenturyTrek => "ch_century_trek",
            Self::CarbonBudget => "ch_carbon_budget",
            Self::LowCarbonMonth => "ch_low_carbon_month",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ch_green_commute" => Some(Self::GreenCommute),
            "ch_car_free_week" => Some(Self::CarFreeWeek),
            "ch_pedal_pusher" => Some(Self::PedalPusher),
            "ch_transit_tripper" => Some(Self::TransitTripper),
            "ch_walking_week" => Some(Self::WalkingWeek),
            "ch_century_trek" => Some(Self::CenturyTrek),
            "ch_carbon_budget" => Some(Self::CarbonBudget),
            "ch_low_carbon_month" => Some(Self::LowCarbonMonth),
            _ => None,
        }
    }

    /// Get all challenge IDs
    pub fn all() -> &'static [ChallengeId] {
        &[
            Self::GreenCommute,
            Self::CarFreeWeek,
            Self::PedalPusher,
            Self::TransitTripper,
            Self::WalkingWeek,
            Self::CenturyTrek,
            Self::CarbonBudget,
            Self::LowCarbonMonth,
        ]
    }
}

/// Goal a challenge measures journeys against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChallengeGoal {
    /// Log N journeys inside the window
    Journeys(u32),
    /// Log N zero-emission journeys inside the window
    ZeroEmissionJourneys(u32),
    /// Log N journeys with the given mode inside the window
    ModeJourneys(TransportMode, u32),
    /// Cover N kilometers inside the window
    Distance(f64),
    /// Keep total emissions inside the window under N kilograms
    EmissionsUnder(f64),
}

impl ChallengeGoal {
    /// Target value, in the goal's own unit
    pub fn target(&self) -> f64 {
        match self {
            Self::Journeys(n) | Self::ZeroEmissionJourneys(n) | Self::ModeJourneys(_, n) => {
                f64::from(*n)
            }
            Self::Distance(km) => *km,
            Self::EmissionsUnder(kg) => *kg,
        }
    }

    /// Measure the goal's metric over journeys inside the window
    pub fn measure(&self, journeys: &[Journey]) -> f64 {
        match self {
            Self::Journeys(_) => journeys.len() as f64,
            Self::ZeroEmissionJourneys(_) => {
                journeys.iter().filter(|j| j.emissions_kg == 0.0).count() as f64
            }
            Self::ModeJourneys(mode, _) => {
                journeys.iter().filter(|j| j.mode == *mode).count() as f64
            }
            Self::Distance(_) => journeys.iter().map(|j| j.distance_km).sum(),
            Self::EmissionsUnder(_) => journeys.iter().map(|j| j.emissions_kg).sum(),
        }
    }

    /// Budget goals invert the comparison: lower is better and the
    /// window must run out before the challenge can complete.
    pub fn is_budget(&self) -> bool {
        matches!(self, Self::EmissionsUnder(_))
    }

    /// Decide completion given the measured value and whether the
    /// enrollment window has closed.
    pub fn is_met(&self, measured: f64, window_closed: bool) -> bool {
        if self.is_budget() {
            window_closed && measured <= self.target()
        } else {
            measured >= self.target()
        }
    }
}

/// Challenge definition with all metadata
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: ChallengeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub duration_days: i64,
    pub goal: ChallengeGoal,
}

/// All challenge definitions
pub static CHALLENGES: &[Challenge] = &[
    Challenge {
        id: ChallengeId::GreenCommute,
        name: "Green Commute",
        description: "Log 5 journeys in a week",
        icon: "🌿",
        duration_days: 7,
        goal: ChallengeGoal::Journeys(5),
    },
    Challenge {
        id: ChallengeId::CarFreeWeek,
        name: "Car-Free Week",
        description: "Log 5 zero-emission journeys in a week",
        icon: "🚳",
        duration_days: 7,
        goal: ChallengeGoal::ZeroEmissionJourneys(5),
    },
    Challenge {
        id: ChallengeId::PedalPusher,
        name: "Pedal Pusher",
        description: "Log 10 cycling journeys in two weeks",
        icon: "🚲",
        duration_days: 14,
        goal: ChallengeGoal::ModeJourneys(TransportMode::Cycling, 10),
    },
    Challenge {
        id: ChallengeId::TransitTripper,
        name: "Transit Tripper",
        description: "Log 8 public transit journeys in two weeks",
        icon: "🚇",
        duration_days: 14,
        goal: ChallengeGoal::ModeJourneys(TransportMode::PublicTransit, 8),
    },
    Challenge {
        id: ChallengeId::WalkingWeek,
        name: "Walking Week",
        description: "Log 7 walking journeys in a week",
        icon: "👟",
        duration_days: 7,
        goal: ChallengeGoal::ModeJourneys(TransportMode::Walking, 7),
    },
    Challenge {
        id: ChallengeId::CenturyTrek,
        name: "Century Trek",
        description: "Cover 100 km in a month",
        icon: "📏",
        duration_days: 30,
        goal: ChallengeGoal::Distance(100.0),
    },
    Challenge {
        id: ChallengeId::CarbonBudget,
        name: "Carbon Budget",
        description: "Stay under 10 kg of CO2e for a week",
        icon: "⚖️",
        duration_days: 7,
        goal: ChallengeGoal::EmissionsUnder(10.0),
    },
    Challenge {
        id: ChallengeId::LowCarbonMonth,
        name: "Low-Carbon Month",
        description: "Stay under 30 kg of CO2e for a month",
        icon: "🌙",
        duration_days: 30,
        goal: ChallengeGoal::EmissionsUnder(30.0),
    },
];

impl Challenge {
    /// Get challenge definition by ID
    pub fn get(id: ChallengeId) -> &'static Challenge {
        CHALLENGES
            .iter()
            .find(|c| c.id == id)
            .expect("All challenges should be defined")
    }

    /// Get total number of challenges
    pub fn total_count() -> usize {
        CHALLENGES.len()
    }

    /// End of the enrollment window opened at `joined_at`
    pub fn window_end(&self, joined_at: DateTime<Utc>) -> DateTime<Utc> {
        joined_at + Duration::days(self.duration_days)
    }
}

/// Progress state for a joined challenge
#[derive(Debug, Clone)]
pub struct ChallengeProgress {
    pub challenge: &'static Challenge,
    pub current: f64,
    pub target: f64,
    pub completed: bool,
    pub joined_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl ChallengeProgress {
    /// Calculate progress percentage (0.0 - 1.0)
    pub fn progress_percent(&self) -> f32 {
        if self.completed || self.target == 0.0 {
            1.0
        } else {
            ((self.current / self.target) as f32).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journey(distance_km: f64, mode: &str, emissions_kg: f64) -> Journey {
        Journey::new(distance_km, TransportMode::from_label(mode), emissions_kg)
    }

    #[test]
    fn test_challenge_count() {
        assert_eq!(CHALLENGES.len(), 8);
    }

    #[test]
    fn test_all_ids_unique() {
        let mut ids: Vec<_> = ChallengeId::all().iter().map(|id| id.as_str()).collect();
        ids.sort();
        let total = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), total, "All challenge IDs should be unique");
    }

    #[test]
    fn test_id_round_trip() {
        for id in ChallengeId::all() {
            assert_eq!(ChallengeId::from_str(id.as_str()), Some(*id));
        }
    }

    #[test]
    fn test_accumulation_goal_completes_inside_window() {
        let goal = ChallengeGoal::Journeys(3);
        let journeys: Vec<_> = (0..3).map(|_| journey(1.0, "walking", 0.0)).collect();
        let measured = goal.measure(&journeys);
        assert!(goal.is_met(measured, false));
    }

    #[test]
    fn test_budget_goal_needs_closed_window() {
        let goal = ChallengeGoal::EmissionsUnder(10.0);
        let journeys = vec![journey(5.0, "driving", 4.0)];
        let measured = goal.measure(&journeys);
        assert!(!goal.is_met(measured, false), "open window can still be blown");
        assert!(goal.is_met(measured, true));
        assert!(!goal.is_met(12.0, true), "over budget never completes");
    }

    #[test]
    fn test_mode_goal_counts_only_matching_mode() {
        let goal = ChallengeGoal::ModeJourneys(TransportMode::Cycling, 2);
        let journeys = vec![
            journey(1.0, "cycling", 0.0),
            journey(1.0, "walking", 0.0),
            journey(1.0, "Cycling", 0.0),
        ];
        assert_eq!(goal.measure(&journeys), 2.0);
    }

    #[test]
    fn test_progress_percent() {
        let progress = ChallengeProgress {
            challenge: Challenge::get(ChallengeId::GreenCommute),
            current: 2.0,
            target: 5.0,
            completed: false,
            joined_at: Utc::now(),
            ends_at: Utc::now(),
        };
        assert!((progress.progress_percent() - 0.4).abs() < 0.001);

        let done = ChallengeProgress {
            completed: true,
            ..progress
        };
        assert_eq!(done.progress_percent(), 1.0);
    }
}
