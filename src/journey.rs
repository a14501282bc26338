//! Journey domain model
//!
//! A journey is a single logged trip: how far, by what mode, and how much
//! CO2-equivalent it produced. Distance and emissions are supplied
//! independently by the caller; nothing here derives one from the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Transport mode for a journey.
///
/// Mode labels arrive as free-form strings and are normalized
/// case-insensitively; anything unrecognized becomes `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    Walking,
    Cycling,
    PublicTransit,
    Driving,
    Other,
}

impl TransportMode {
    /// Canonical lowercase label for storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::PublicTransit => "public-transit",
            Self::Driving => "driving",
            Self::Other => "other",
        }
    }

    /// Parse a free-form mode label. Matching is case-insensitive;
    /// unknown labels map to `Other` rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "walking" => Self::Walking,
            "cycling" => Self::Cycling,
            "public-transit" | "public transit" | "public_transit" => Self::PublicTransit,
            "driving" => Self::Driving,
            _ => Self::Other,
        }
    }

    /// All modes, in display order.
    pub fn all() -> &'static [TransportMode] {
        &[
            Self::Walking,
            Self::Cycling,
            Self::PublicTransit,
            Self::Driving,
            Self::Other,
        ]
    }
}

/// A single logged journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journey {
    pub id: Uuid,
    /// Distance traveled in kilometers (non-negative).
    pub distance_km: f64,
    pub mode: TransportMode,
    /// Kilograms of CO2-equivalent; 0.0 signifies a zero-emission mode.
    pub emissions_kg: f64,
    pub logged_at: DateTime<Utc>,
}

impl Journey {
    /// Create a journey logged now with a fresh id.
    pub fn new(distance_km: f64, mode: TransportMode, emissions_kg: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            distance_km,
            mode,
            emissions_kg,
            logged_at: Utc::now(),
        }
    }

    /// Validate the journey's numeric fields.
    ///
    /// Validation lives at the store boundary; the achievement engine
    /// assumes it only ever sees journeys that passed this check.
    pub fn validate(&self) -> Result<(), JourneyError> {
        if !self.distance_km.is_finite() || !self.emissions_kg.is_finite() {
            return Err(JourneyError::NonFinite);
        }
        if self.distance_km < 0.0 {
            return Err(JourneyError::NegativeDistance(self.distance_km));
        }
        if self.emissions_kg < 0.0 {
            return Err(JourneyError::NegativeEmissions(self.emissions_kg));
        }
        Ok(())
    }
}

/// Validation failures for journey input.
#[derive(Debug, Error, PartialEq)]
pub enum JourneyError {
    #[error("distance must be non-negative, got {0}")]
    NegativeDistance(f64),

    #[error("emissions must be non-negative, got {0}")]
    NegativeEmissions(f64),

    #[error("distance and emissions must be finite numbers")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_case_insensitive() {
        assert_eq!(TransportMode::from_label("Walking"), TransportMode::Walking);
        assert_eq!(TransportMode::from_label("walking"), TransportMode::Walking);
        assert_eq!(TransportMode::from_label("CYCLING"), TransportMode::Cycling);
        assert_eq!(
            TransportMode::from_label("Public-Transit"),
            TransportMode::PublicTransit
        );
        assert_eq!(
            TransportMode::from_label("public transit"),
            TransportMode::PublicTransit
        );
        assert_eq!(TransportMode::from_label("driving"), TransportMode::Driving);
    }

    #[test]
    fn test_from_label_unknown_is_other() {
        assert_eq!(TransportMode::from_label("teleport"), TransportMode::Other);
        assert_eq!(TransportMode::from_label(""), TransportMode::Other);
        assert_eq!(TransportMode::from_label("  rowing "), TransportMode::Other);
    }

    #[test]
    fn test_label_round_trip() {
        for mode in TransportMode::all() {
            assert_eq!(TransportMode::from_label(mode.as_str()), *mode);
        }
    }

    #[test]
    fn test_validate() {
        assert!(Journey::new(5.0, TransportMode::Walking, 0.0).validate().is_ok());
        assert_eq!(
            Journey::new(-1.0, TransportMode::Walking, 0.0).validate(),
            Err(JourneyError::NegativeDistance(-1.0))
        );
        assert_eq!(
            Journey::new(1.0, TransportMode::Driving, -0.5).validate(),
            Err(JourneyError::NegativeEmissions(-0.5))
        );
        assert_eq!(
            Journey::new(f64::NAN, TransportMode::Driving, 0.0).validate(),
            Err(JourneyError::NonFinite)
        );
    }
}
