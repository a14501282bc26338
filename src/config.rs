//! Configuration loading and management
//!
//! Optional TOML file at `~/.ecotrace/config.toml` overriding the
//! database location and per-mode emission factors.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::emissions;
use crate::journey::TransportMode;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database file path; defaults to ~/.ecotrace/trace.db
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Emission factor overrides (kg CO2e per km)
    #[serde(default)]
    pub factors: FactorOverrides,
}

/// Per-mode emission factor overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactorOverrides {
    pub walking: Option<f64>,
    pub cycling: Option<f64>,
    pub public_transit: Option<f64>,
    pub driving: Option<f64>,
    pub other: Option<f64>,
}

impl FactorOverrides {
    fn get(&self, mode: TransportMode) -> Option<f64> {
        match mode {
            TransportMode::Walking => self.walking,
            TransportMode::Cycling => self.cycling,
            TransportMode::PublicTransit => self.public_transit,
            TransportMode::Driving => self.driving,
            TransportMode::Other => self.other,
        }
    }
}

impl Config {
    /// Get the global config directory path (~/.ecotrace/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ecotrace")
    }

    /// Get the global config file path (~/.ecotrace/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicitly given path must exist; the default path may be
    /// absent, in which case built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::global_config_path();
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Resolved database path
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("trace.db"))
    }

    /// Emission factor for a mode, honoring overrides
    pub fn factor_kg_per_km(&self, mode: TransportMode) -> f64 {
        self.factors
            .get(mode)
            .unwrap_or_else(|| emissions::factor_kg_per_km(mode))
    }

    /// Estimate emissions for a journey, honoring overrides
    pub fn estimate_kg(&self, mode: TransportMode, distance_km: f64) -> f64 {
        self.factor_kg_per_km(mode) * distance_km
    }

    /// Write a commented default config file
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!("Config file already exists: {} (use --force to overwrite)", path.display());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

/// Template written by `ecotrace init`
const DEFAULT_CONFIG_TOML: &str = r#"# EcoTrace configuration

# Database location (defaults to ~/.ecotrace/trace.db)
# database = "/path/to/trace.db"

# Emission factor overrides, in kg CO2e per km.
# Unset modes use the built-in defaults.
[factors]
# walking = 0.0
# cycling = 0.0
# public_transit = 0.105
# driving = 0.192
# other = 0.150
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_overrides() {
        let config: Config = toml::from_str(
            r#"
            [factors]
            driving = 0.25
            "#,
        )
        .unwrap();

        assert!((config.factor_kg_per_km(TransportMode::Driving) - 0.25).abs() < 1e-9);
        // Unset modes fall back to defaults
        assert!((config.factor_kg_per_km(TransportMode::PublicTransit) - 0.105).abs() < 1e-9);
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert!(config.database.is_none());
        assert!(config.factors.driving.is_none());
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::write_default(&path, false).unwrap();
        assert!(Config::write_default(&path, false).is_err());
        assert!(Config::write_default(&path, true).is_ok());

        let config = Config::from_file(&path).unwrap();
        assert!(config.database.is_none());
    }

    #[test]
    fn test_estimate_with_override() {
        let config: Config = toml::from_str(
            r#"
            [factors]
            other = 0.5
            "#,
        )
        .unwrap();
        assert!((config.estimate_kg(TransportMode::Other, 10.0) - 5.0).abs() < 1e-9);
    }
}
