//! Configuration for the collision pass.
//!
//! Defaults live as plain constants so callers can reference them directly;
//! [`CollisionConfig`] bundles them into a serde-friendly struct that can be
//! loaded from TOML.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{core::body::CollisionType, error::ConfigError};

/// Default edge length of a spatial grid cell, in world units.
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Default ceiling on narrow-phase tests per frame.
pub const DEFAULT_CHECK_BUDGET: usize = 4096;

/// Safety margin applied to the summed half-diagonals in the center-distance pre-reject.
pub const DEFAULT_DISTANCE_MARGIN: f32 = 1.5;

/// Maximum gap between a player's bottom edge and a surface's top edge that
/// still counts as standing on it.
pub const DEFAULT_GROUND_TOLERANCE: f32 = 5.0;

/// Downward speed (units/s) above which a ground contact is reported as a landing.
pub const DEFAULT_LANDING_SPEED: f32 = 50.0;

/// Wall-clock budget for one collision pass before a warning is logged.
pub const DEFAULT_TIME_BUDGET_MS: f32 = 2.0;

/// Optional overrides for the type/layer filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Replaces the built-in type matrix when present.
    pub pairs: Option<BTreeMap<CollisionType, Vec<CollisionType>>>,
    /// Layer pairs that never collide (order-insensitive).
    pub blocked_layers: Vec<[u32; 2]>,
}

/// Tunables for a [`CollisionManager`](crate::world::collision_manager::CollisionManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub cell_size: f32,
    pub check_budget: usize,
    pub distance_margin: f32,
    pub ground_tolerance: f32,
    pub landing_speed: f32,
    pub time_budget_ms: f32,
    pub filter: FilterConfig,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            check_budget: DEFAULT_CHECK_BUDGET,
            distance_margin: DEFAULT_DISTANCE_MARGIN,
            ground_tolerance: DEFAULT_GROUND_TOLERANCE,
            landing_speed: DEFAULT_LANDING_SPEED,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            filter: FilterConfig::default(),
        }
    }
}

impl CollisionConfig {
    /// Parses and validates a TOML document. Missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        // Overlapping boxes can sit up to their summed half-diagonals apart.
        if !(self.distance_margin.is_finite() && self.distance_margin >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "distance_margin must be at least 1.0, got {}",
                self.distance_margin
            )));
        }
        if self.ground_tolerance < 0.0 || self.landing_speed < 0.0 || self.time_budget_ms < 0.0 {
            return Err(ConfigError::Invalid(
                "tolerances and thresholds must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_check_budget(mut self, check_budget: usize) -> Self {
        self.check_budget = check_budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CollisionConfig::from_toml_str("").unwrap();
        assert_eq!(config, CollisionConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_keys() {
        let config = CollisionConfig::from_toml_str(
            r#"
            cell_size = 32.0
            check_budget = 10

            [filter]
            blocked_layers = [[1, 2]]

            [filter.pairs]
            ball = ["tile"]
            "#,
        )
        .unwrap();

        assert_eq!(config.cell_size, 32.0);
        assert_eq!(config.check_budget, 10);
        assert_eq!(config.ground_tolerance, DEFAULT_GROUND_TOLERANCE);
        assert_eq!(config.filter.blocked_layers, vec![[1, 2]]);
        let pairs = config.filter.pairs.unwrap();
        assert_eq!(pairs[&CollisionType::Ball], vec![CollisionType::Tile]);
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let err = CollisionConfig::from_toml_str("cell_size = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_margin_that_would_cull_real_overlaps() {
        let err = CollisionConfig::from_toml_str("distance_margin = 0.9").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(CollisionConfig::from_toml_str("distance_margin = 1.0").is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CollisionConfig::from_toml_str("cell_size = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
