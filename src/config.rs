//! World configuration, loadable from TOML.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::collision::aabb::Aabb;
use crate::math::vec2::Vec2;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A value parsed but is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Subdivision limits for the broad-phase quadtree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// Entries a node holds before it tries to split.
    pub max_objects: usize,
    /// Deepest level a node may reach (the root is level 0).
    pub max_levels: u32,
    /// Smallest width or height a child node may have.
    pub min_size: f64,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        QuadTreeConfig {
            max_objects: 4,
            max_levels: 4,
            min_size: 1.0,
        }
    }
}

impl QuadTreeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_objects == 0 {
            return Err(ConfigError::Invalid("quadtree.max_objects must be at least 1".into()));
        }
        if !(self.min_size.is_finite() && self.min_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "quadtree.min_size must be positive and finite, got {}",
                self.min_size
            )));
        }
        Ok(())
    }
}

/// Everything a [`CollisionWorld`](crate::world::CollisionWorld) needs to start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Region covered by the quadtree root. Bodies outside it still collide, they just
    /// get no spatial pruning.
    pub bounds: Aabb,
    /// Acceleration added to every non-static body each step, in units per second squared.
    pub gravity: Vec2,
    pub quadtree: QuadTreeConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            bounds: Aabb::from_rect(0.0, 0.0, 1024.0, 768.0),
            gravity: Vec2::ZERO,
            quadtree: QuadTreeConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!("loaded world config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !(self.bounds.min.is_finite() && size_ok(self.bounds.width()) && size_ok(self.bounds.height())) {
            return Err(ConfigError::Invalid(format!(
                "bounds must have a finite, non-zero area, got {:?}",
                self.bounds
            )));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".into()));
        }
        self.quadtree.validate()
    }
}
