//! Builder Configuration
//!
//! Ray reach, rotation step and the layer layout used by the placement
//! controller. `Default` returns the values the sandbox ships with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::catalog::DefinitionId;
use crate::game::error::{ConfigError, ConfigResult};
use crate::physics::{GROUND_LAYER, Layer, LayerMask, PREVIEW_LAYER, STRUCTURE_LAYER};

/// Default reach of the aiming ray (meters)
pub const DEFAULT_RAY_DISTANCE: f32 = 50.0;
/// Default rotation per rotate press (degrees)
pub const DEFAULT_ROTATION_STEP_DEGREES: f32 = 90.0;

/// Placement controller configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Maximum distance of the aiming ray
    pub max_ray_distance: f32,
    /// Fixed yaw applied per rotate input
    pub rotation_step_degrees: f32,
    /// Floor layer; overlaps against it never block placement
    pub ground_layer: Layer,
    /// Layer committed structures live on
    pub structure_layer: Layer,
    /// Layer of the candidate while it follows the ray
    pub preview_layer: Layer,
    /// What a Build-mode ray may land on
    pub buildable_mask: LayerMask,
    /// What a Delete-mode ray may pick
    pub deletable_mask: LayerMask,
    /// Definition selected at startup, if any
    pub default_definition: Option<DefinitionId>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_ray_distance: DEFAULT_RAY_DISTANCE,
            rotation_step_degrees: DEFAULT_ROTATION_STEP_DEGREES,
            ground_layer: GROUND_LAYER,
            structure_layer: STRUCTURE_LAYER,
            preview_layer: PREVIEW_LAYER,
            buildable_mask: LayerMask::from_layers(&[GROUND_LAYER, STRUCTURE_LAYER]),
            deletable_mask: STRUCTURE_LAYER.mask(),
            default_definition: None,
        }
    }
}

impl BuilderConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), "loaded builder config");
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.max_ray_distance.is_finite() && self.max_ray_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_ray_distance must be positive, got {}",
                self.max_ray_distance
            )));
        }
        if !(self.rotation_step_degrees.is_finite() && self.rotation_step_degrees > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rotation_step_degrees must be positive, got {}",
                self.rotation_step_degrees
            )));
        }
        if self.buildable_mask.is_empty() || self.deletable_mask.is_empty() {
            return Err(ConfigError::Invalid("layer masks must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.max_ray_distance, 50.0);
        assert_eq!(config.rotation_step_degrees, 90.0);
        assert!(config.buildable_mask.contains(GROUND_LAYER));
        assert!(config.deletable_mask.contains(STRUCTURE_LAYER));
        assert!(!config.deletable_mask.contains(GROUND_LAYER));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"rotation_step_degrees": 45.0, "default_definition": "tall_box"}"#;
        let config = BuilderConfig::from_json_str(json).unwrap();
        assert_eq!(config.rotation_step_degrees, 45.0);
        assert_eq!(config.max_ray_distance, DEFAULT_RAY_DISTANCE);
        assert_eq!(config.default_definition, Some(DefinitionId::from("tall_box")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            BuilderConfig::from_json_str(r#"{"max_ray_distance": -1.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BuilderConfig::from_json_str(r#"{"rotation_step_degrees": 0.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BuilderConfig::from_json_str(r#"{"deletable_mask": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(BuilderConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }
}
