//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock rules. The catalog
//! is a process-wide constant; its declared order is the order evaluation
//! results are returned in.

use crate::journey::TransportMode;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    // Milestone achievements
    FirstJourney,
    FrequentTraveler,
    SuperSaver,

    // Emission achievements
    EcoBeginner,
    CarbonConscious,
    EcoWarrior,

    // Mode achievements
    WalkTheWalk,
    PedalPower,
    PublicTransportPro,
    ModeMaster,

    // Distance achievements
    LongHaul,
    GlobalTrotter,
    RoadWarrior,
}

impl AchievementId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstJourney => "first_journey",
            Self::FrequentTraveler => "frequent_traveler",
            Self::SuperSaver => "super_saver",
            Self::EcoBeginner => "eco_beginner",
            Self::CarbonConscious => "carbon_conscious",
            Self::EcoWarrior => "eco_warrior",
            Self::WalkTheWalk => "walk_the_walk",
            Self::PedalPower => "pedal_power",
            Self::PublicTransportPro => "public_transport_pro",
            Self::ModeMaster => "mode_master",
            Self::LongHaul => "long_haul",
            Self::GlobalTrotter => "global_trotter",
            Self::RoadWarrior => "road_warrior",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_journey" => Some(Self::FirstJourney),
            "frequent_traveler" => Some(Self::FrequentTraveler),
            "super_saver" => Some(Self::SuperSaver),
            "eco_beginner" => Some(Self::EcoBeginner),
            "carbon_conscious" => Some(Self::CarbonConscious),
            "eco_warrior" => Some(Self::EcoWarrior),
            "walk_the_walk" => Some(Self::WalkTheWalk),
            "pedal_power" => Some(Self::PedalPower),
            "public_transport_pro" => Some(Self::PublicTransportPro),
            "mode_master" => Some(Self::ModeMaster),
            "long_haul" => Some(Self::LongHaul),
            "global_trotter" => Some(Self::GlobalTrotter),
            "road_warrior" => Some(Self::RoadWarrior),
            _ => None,
        }
    }

    /// Get all achievement IDs in catalog order
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstJourney,
            Self::EcoBeginner,
            Self::FrequentTraveler,
            Self::SuperSaver,
            Self::WalkTheWalk,
            Self::PedalPower,
            Self::PublicTransportPro,
            Self::LongHaul,
            Self::GlobalTrotter,
            Self::CarbonConscious,
            Self::ModeMaster,
            Self::RoadWarrior,
            Self::EcoWarrior,
        ]
    }
}

/// Unlock rule for an achievement.
///
/// Rules are plain data evaluated against the full journey history (and,
/// for `EcoAverage`, the profile's running average). Every rule is a
/// monotonic threshold over counts, sums, maxima, or distinct sets, so an
/// achievement can never become unsatisfied by logging more journeys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnlockRule {
    /// At least N journeys logged
    TotalJourneys(usize),
    /// At least one journey with zero emissions
    AnyZeroEmission,
    /// At least N journeys with the given mode
    ModeJourneys(TransportMode, usize),
    /// At least one journey strictly longer than N kilometers
    AnyDistanceOver(f64),
    /// At least `count` journeys emitting less than `below_kg`
    LowEmissionJourneys { below_kg: f64, count: usize },
    /// At least N distinct transport modes used
    DistinctModes(usize),
    /// Total distance across all journeys of at least N kilometers
    TotalDistance(f64),
    /// At least `min_journeys` journeys with a running average emission
    /// figure below `below_kg`
    EcoAverage { min_journeys: usize, below_kg: f64 },
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: UnlockRule,
}

/// All achievement definitions, in award order
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstJourney,
        name: "First Journey",
        description: "Log your first journey",
        icon: "🧭",
        rule: UnlockRule::TotalJourneys(1),
    },
    Achievement {
        id: AchievementId::EcoBeginner,
        name: "Eco-Beginner",
        description: "Log a zero-emission journey",
        icon: "🌱",
        rule: UnlockRule::AnyZeroEmission,
    },
    Achievement {
        id: AchievementId::FrequentTraveler,
        name: "Frequent Traveler",
        description: "Log 10 journeys",
        icon: "🧳",
        rule: UnlockRule::TotalJourneys(10),
    },
    Achievement {
        id: AchievementId::SuperSaver,
        name: "Super Saver",
        description: "Log 25 journeys",
        icon: "⭐",
        rule: UnlockRule::TotalJourneys(25),
    },
    Achievement {
        id: AchievementId::WalkTheWalk,
        name: "Walk the Walk",
        description: "Log 5 walking journeys",
        icon: "🚶",
        rule: UnlockRule::ModeJourneys(TransportMode::Walking, 5),
    },
    Achievement {
        id: AchievementId::PedalPower,
        name: "Pedal Power",
        description: "Log 5 cycling journeys",
        icon: "🚴",
        rule: UnlockRule::ModeJourneys(TransportMode::Cycling, 5),
    },
    Achievement {
        id: AchievementId::PublicTransportPro,
        name: "Public Transport Pro",
        description: "Log 5 public transit journeys",
        icon: "🚌",
        rule: UnlockRule::ModeJourneys(TransportMode::PublicTransit, 5),
    },
    Achievement {
        id: AchievementId::LongHaul,
        name: "Long Haul",
        description: "Log a journey over 100 km",
        icon: "🛤️",
        rule: UnlockRule::AnyDistanceOver(100.0),
    },
    Achievement {
        id: AchievementId::GlobalTrotter,
        name: "Global Trotter",
        description: "Log a journey over 500 km",
        icon: "🌍",
        rule: UnlockRule::AnyDistanceOver(500.0),
    },
    Achievement {
        id: AchievementId::CarbonConscious,
        name: "Carbon Conscious",
        description: "Log 10 journeys under 1 kg of CO2e each",
        icon: "🍃",
        rule: UnlockRule::LowEmissionJourneys {
            below_kg: 1.0,
            count: 10,
        },
    },
    Achievement {
        id: AchievementId::ModeMaster,
        name: "Mode Master",
        description: "Use 3 different transport modes",
        icon: "🎭",
        rule: UnlockRule::DistinctModes(3),
    },
    Achievement {
        id: AchievementId::RoadWarrior,
        name: "Road Warrior",
        description: "Travel 1,000 km in total",
        icon: "🏁",
        rule: UnlockRule::TotalDistance(1000.0),
    },
    Achievement {
        id: AchievementId::EcoWarrior,
        name: "Eco-Warrior",
        description: "Keep your average under 2 kg of CO2e across 20 journeys",
        icon: "🏆",
        rule: UnlockRule::EcoAverage {
            min_journeys: 20,
            below_kg: 2.0,
        },
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .expect("All achievements should be defined")
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_count() {
        assert_eq!(ACHIEVEMENTS.len(), 13);
        assert_eq!(AchievementId::all().len(), 13);
    }

    #[test]
    fn test_all_ids_unique() {
        let mut ids: Vec<_> = AchievementId::all().iter().map(|id| id.as_str()).collect();
        ids.sort();
        let total = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), total, "All achievement IDs should be unique");
    }

    #[test]
    fn test_id_round_trip() {
        for id in AchievementId::all() {
            assert_eq!(AchievementId::from_str(id.as_str()), Some(*id));
        }
        assert_eq!(AchievementId::from_str("no_such_award"), None);
    }

    #[test]
    fn test_catalog_matches_id_order() {
        let catalog_ids: Vec<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(catalog_ids, AchievementId::all());
    }

    #[test]
    fn test_every_id_has_a_definition() {
        for id in AchievementId::all() {
            assert_eq!(Achievement::get(*id).id, *id);
        }
    }
}
