//! Achievement evaluation engine
//!
//! A pure, synchronous pass over a user's journey history: for every
//! catalog entry not yet awarded, decide whether its rule is now
//! satisfied. The engine performs no I/O and has no error states;
//! persisting the returned awards (and merging them into the awarded set
//! before the next evaluation) is the caller's job.

use std::collections::HashSet;

use crate::journey::Journey;

use super::definitions::{Achievement, UnlockRule};

/// Profile aggregates consulted by unlock rules.
///
/// Only the running average emission figure is used today; it backs the
/// `EcoAverage` rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserStats {
    pub average_emissions_kg: f64,
}

impl UserStats {
    /// Compute stats directly from a journey history. Empty histories
    /// yield an average of 0.0, which is harmless: every rule that reads
    /// the average also requires a minimum journey count.
    pub fn from_journeys(journeys: &[Journey]) -> Self {
        if journeys.is_empty() {
            return Self::default();
        }
        let total: f64 = journeys.iter().map(|j| j.emissions_kg).sum();
        Self {
            average_emissions_kg: total / journeys.len() as f64,
        }
    }
}

impl UnlockRule {
    /// Evaluate this rule against a full journey history.
    ///
    /// Each rule is a single linear pass over the journeys; order of the
    /// history is irrelevant to every rule.
    pub fn is_satisfied(&self, journeys: &[Journey], stats: &UserStats) -> bool {
        match self {
            UnlockRule::TotalJourneys(n) => journeys.len() >= *n,
            UnlockRule::AnyZeroEmission => journeys.iter().any(|j| j.emissions_kg == 0.0),
            UnlockRule::ModeJourneys(mode, n) => {
                journeys.iter().filter(|j| j.mode == *mode).count() >= *n
            }
            UnlockRule::AnyDistanceOver(km) => journeys.iter().any(|j| j.distance_km > *km),
            UnlockRule::LowEmissionJourneys { below_kg, count } => {
                journeys.iter().filter(|j| j.emissions_kg < *below_kg).count() >= *count
            }
            UnlockRule::DistinctModes(n) => {
                let modes: HashSet<_> = journeys.iter().map(|j| j.mode).collect();
                modes.len() >= *n
            }
            UnlockRule::TotalDistance(km) => {
                journeys.iter().map(|j| j.distance_km).sum::<f64>() >= *km
            }
            UnlockRule::EcoAverage {
                min_journeys,
                below_kg,
            } => journeys.len() >= *min_journeys && stats.average_emissions_kg < *below_kg,
        }
    }
}

/// Evaluate the catalog against a journey history.
///
/// Returns the definitions newly satisfied since the last evaluation,
/// each exactly once, in catalog order. Entries already present in
/// `already_awarded` are skipped; the caller must merge the returned ids
/// into that set before evaluating again to keep awarding idempotent.
pub fn evaluate<'a>(
    catalog: &'a [Achievement],
    journeys: &[Journey],
    already_awarded: &HashSet<String>,
    stats: &UserStats,
) -> Vec<&'a Achievement> {
    catalog
        .iter()
        .filter(|a| !already_awarded.contains(a.id.as_str()))
        .filter(|a| a.rule.is_satisfied(journeys, stats))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::definitions::{AchievementId, ACHIEVEMENTS};
    use crate::journey::TransportMode;

    fn journey(distance_km: f64, mode: &str, emissions_kg: f64) -> Journey {
        Journey::new(distance_km, TransportMode::from_label(mode), emissions_kg)
    }

    fn ids(results: &[&Achievement]) -> Vec<&'static str> {
        results.iter().map(|a| a.id.as_str()).collect()
    }

    fn run(journeys: &[Journey], awarded: &HashSet<String>) -> Vec<&'static Achievement> {
        let stats = UserStats::from_journeys(journeys);
        evaluate(ACHIEVEMENTS, journeys, awarded, &stats)
    }

    #[test]
    fn test_empty_history_awards_nothing() {
        let results = run(&[], &HashSet::new());
        assert!(results.is_empty());
    }

    #[test]
    fn test_single_walking_journey() {
        let journeys = vec![journey(5.0, "walking", 0.0)];
        let results = run(&journeys, &HashSet::new());
        assert_eq!(ids(&results), vec!["first_journey", "eco_beginner"]);
    }

    #[test]
    fn test_five_walking_journeys() {
        let journeys: Vec<_> = (0..5).map(|_| journey(2.0, "walking", 0.0)).collect();
        let results = run(&journeys, &HashSet::new());
        assert_eq!(
            ids(&results),
            vec!["first_journey", "eco_beginner", "walk_the_walk"]
        );
    }

    #[test]
    fn test_road_warrior_with_prior_award() {
        let journeys: Vec<_> = (0..4).map(|_| journey(250.0, "driving", 25.0)).collect();
        let awarded: HashSet<String> = ["first_journey".to_string()].into();
        let results = run(&journeys, &awarded);
        // 250 km trips also clear the 100 km bar; first_journey stays suppressed.
        assert_eq!(ids(&results), vec!["long_haul", "road_warrior"]);
    }

    #[test]
    fn test_eco_warrior_requires_twenty_journeys() {
        // 20 journeys, 30 kg total: average 1.5 is under the 2.0 bar.
        let journeys: Vec<_> = (0..20).map(|_| journey(2.0, "driving", 1.5)).collect();
        let results = run(&journeys, &HashSet::new());
        assert!(ids(&results).contains(&"eco_warrior"));

        // Same average over 19 journeys is not enough.
        let journeys: Vec<_> = (0..19).map(|_| journey(2.0, "driving", 1.5)).collect();
        let results = run(&journeys, &HashSet::new());
        assert!(!ids(&results).contains(&"eco_warrior"));
    }

    #[test]
    fn test_distance_thresholds_are_not_exclusive() {
        let journeys = vec![journey(600.0, "driving", 90.0)];
        let results = run(&journeys, &HashSet::new());
        let got = ids(&results);
        assert!(got.contains(&"long_haul"));
        assert!(got.contains(&"global_trotter"));
    }

    #[test]
    fn test_deterministic() {
        let journeys: Vec<_> = (0..12).map(|i| journey(i as f64, "cycling", 0.0)).collect();
        let first = ids(&run(&journeys, &HashSet::new()));
        let second = ids(&run(&journeys, &HashSet::new()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_idempotent_after_merge() {
        let journeys: Vec<_> = (0..10).map(|_| journey(3.0, "walking", 0.0)).collect();
        let mut awarded = HashSet::new();

        let results = run(&journeys, &awarded);
        assert!(!results.is_empty());
        for a in &results {
            awarded.insert(a.id.as_str().to_string());
        }

        let rerun = run(&journeys, &awarded);
        assert!(rerun.is_empty(), "merged awards must not be re-awarded");
    }

    #[test]
    fn test_monotonic_under_new_journeys() {
        let mut journeys: Vec<_> = (0..9).map(|_| journey(4.0, "cycling", 0.5)).collect();
        let before: HashSet<_> = ids(&run(&journeys, &HashSet::new())).into_iter().collect();

        // A high-emission journey never retracts anything already satisfied.
        journeys.push(journey(800.0, "driving", 150.0));
        let after: HashSet<_> = ids(&run(&journeys, &HashSet::new())).into_iter().collect();

        assert!(before.is_subset(&after));
    }

    #[test]
    fn test_mode_matching_is_case_insensitive() {
        let journeys = vec![
            journey(1.0, "Cycling", 0.0),
            journey(1.0, "cycling", 0.0),
            journey(1.0, "CYCLING", 0.0),
            journey(1.0, "cycling", 0.0),
            journey(1.0, "Cycling", 0.0),
        ];
        let results = run(&journeys, &HashSet::new());
        assert!(ids(&results).contains(&"pedal_power"));
    }

    #[test]
    fn test_unknown_modes_never_match_mode_rules() {
        let journeys: Vec<_> = (0..5).map(|_| journey(1.0, "hoverboard", 0.0)).collect();
        let results = run(&journeys, &HashSet::new());
        let got = ids(&results);
        assert!(!got.contains(&"walk_the_walk"));
        assert!(!got.contains(&"pedal_power"));
        assert!(!got.contains(&"public_transport_pro"));
    }

    #[test]
    fn test_distinct_modes() {
        let journeys = vec![
            journey(1.0, "walking", 0.0),
            journey(1.0, "cycling", 0.0),
            journey(1.0, "driving", 2.0),
        ];
        let results = run(&journeys, &HashSet::new());
        assert!(ids(&results).contains(&"mode_master"));
    }

    #[test]
    fn test_custom_catalog_injection() {
        let catalog = [Achievement {
            id: AchievementId::FirstJourney,
            name: "Pair",
            description: "Two journeys",
            icon: "2",
            rule: UnlockRule::TotalJourneys(2),
        }];

        let one = vec![journey(1.0, "walking", 0.0)];
        let stats = UserStats::from_journeys(&one);
        assert!(evaluate(&catalog, &one, &HashSet::new(), &stats).is_empty());

        let two = vec![journey(1.0, "walking", 0.0), journey(1.0, "walking", 0.0)];
        let stats = UserStats::from_journeys(&two);
        assert_eq!(evaluate(&catalog, &two, &HashSet::new(), &stats).len(), 1);
    }
}
