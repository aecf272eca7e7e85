//! Plant configuration
//!
//! Calibration constants and scheduling parameters loaded from TOML,
//! replacing hardcoded values with operator-tunable ones.
//!
//! ## Loading Order
//!
//! 1. `--config` CLI argument
//! 2. `WEARWATCH_CONFIG` environment variable (path to TOML file)
//! 3. `wearwatch.toml` in the current working directory
//! 4. Built-in defaults (matching the plant's observed calibration)
//!
//! The configuration is an explicit object passed to the engines at call
//! time — there is no global singleton. The API layer holds it in an
//! `ArcSwap` so formula edits replace the whole object atomically while
//! readers keep going lock-free.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::types::{ExtruderType, WearFormulaSet};

/// Errors raised while loading or validating plant configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {extruder} formula set: all constants must be finite numbers")]
    NonFiniteConstant { extruder: ExtruderType },

    #[error("verification interval must be at least 1 day, got {0}")]
    InvalidInterval(i64),
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: "0.0.0.0:8080".to_string() }
    }
}

/// Calibration constants for both extruders of the plant.
///
/// Defaults match the constants in service when the system was commissioned;
/// the shared screw B constant comes from the micrometer jig offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormulaConfig {
    pub principal: WearFormulaSet,
    pub secondary: WearFormulaSet,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            principal: WearFormulaSet { screw_a: 75.0, screw_b: 8.94, barrel_c: 64.66 },
            secondary: WearFormulaSet { screw_a: 50.0, screw_b: 8.94, barrel_c: 46.18 },
        }
    }
}

/// Top-level plant configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlantConfig {
    pub server: ServerConfig,
    pub formulas: FormulaConfig,
    /// Days between scheduled verifications of the same extruder
    pub verification_interval_days: i64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            formulas: FormulaConfig::default(),
            verification_interval_days: 365,
        }
    }
}

impl PlantConfig {
    /// Load configuration following the documented precedence order.
    ///
    /// A missing file is not an error (defaults apply); an unreadable or
    /// unparseable file is.
    pub fn load(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate = cli_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("WEARWATCH_CONFIG").ok().map(Into::into))
            .unwrap_or_else(|| "wearwatch.toml".into());

        if !candidate.exists() {
            info!("No config file at {}, using built-in defaults", candidate.display());
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let path = candidate.display().to_string();
        let raw = std::fs::read_to_string(&candidate)
            .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
        let config: Self =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        config.validate()?;
        info!("Loaded plant configuration from {}", path);
        Ok(config)
    }

    /// Validate constants before they ever reach the wear engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.formulas.principal.is_finite() {
            return Err(ConfigError::NonFiniteConstant { extruder: ExtruderType::Principal });
        }
        if !self.formulas.secondary.is_finite() {
            return Err(ConfigError::NonFiniteConstant { extruder: ExtruderType::Secondary });
        }
        if self.verification_interval_days < 1 {
            return Err(ConfigError::InvalidInterval(self.verification_interval_days));
        }
        Ok(())
    }

    /// Select the formula set for an extruder type.
    pub fn formulas_for(&self, extruder: ExtruderType) -> WearFormulaSet {
        match extruder {
            ExtruderType::Principal => self.formulas.principal,
            ExtruderType::Secondary => self.formulas.secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.formulas_for(ExtruderType::Principal).screw_a, 75.0);
        assert_eq!(config.formulas_for(ExtruderType::Secondary).barrel_c, 46.18);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: PlantConfig = toml::from_str(
            r#"
            [formulas.principal]
            screw_a = 80.0
            screw_b = 9.0
            barrel_c = 65.0
            "#,
        )
        .unwrap();
        assert_eq!(config.formulas.principal.screw_a, 80.0);
        // Untouched sections keep their defaults
        assert_eq!(config.formulas.secondary.screw_a, 50.0);
        assert_eq!(config.verification_interval_days, 365);
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_non_finite_constant_rejected() {
        let mut config = PlantConfig::default();
        config.formulas.secondary.barrel_c = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteConstant { extruder: ExtruderType::Secondary }));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let mut config = PlantConfig::default();
        config.verification_interval_days = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidInterval(0))));
    }
}
