//! Per-mode emission factors
//!
//! Default kg-CO2e-per-kilometer figures used when a journey is logged
//! without an explicit emissions value. The achievement engine never
//! derives emissions itself; estimation happens once, at logging time,
//! and the result is stored on the journey like any caller-supplied
//! figure.

use crate::journey::TransportMode;

/// Default emission factors in kg CO2e per km
pub static EMISSION_FACTORS: &[(TransportMode, f64)] = &[
    (TransportMode::Walking, 0.0),
    (TransportMode::Cycling, 0.0),
    (TransportMode::PublicTransit, 0.105),
    (TransportMode::Driving, 0.192),
    (TransportMode::Other, 0.150),
];

/// Default factor for a mode, in kg CO2e per km
pub fn factor_kg_per_km(mode: TransportMode) -> f64 {
    EMISSION_FACTORS
        .iter()
        .find(|(m, _)| *m == mode)
        .map(|(_, f)| *f)
        .unwrap_or(0.0)
}

/// Estimate emissions for a journey from the default factor table
pub fn estimate_kg(mode: TransportMode, distance_km: f64) -> f64 {
    factor_kg_per_km(mode) * distance_km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_has_a_factor() {
        for mode in TransportMode::all() {
            assert!(EMISSION_FACTORS.iter().any(|(m, _)| m == mode));
        }
    }

    #[test]
    fn test_zero_emission_modes() {
        assert_eq!(estimate_kg(TransportMode::Walking, 12.0), 0.0);
        assert_eq!(estimate_kg(TransportMode::Cycling, 30.0), 0.0);
    }

    #[test]
    fn test_driving_estimate() {
        let kg = estimate_kg(TransportMode::Driving, 100.0);
        assert!((kg - 19.2).abs() < 1e-9);
    }
}
