//! Structure Catalog
//!
//! Immutable structure definitions supplied to the builder. Definitions are
//! loaded once and shared by `Arc`; the builder never mutates them.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::builder::Pose;
use crate::game::error::{ConfigError, ConfigResult};
use crate::physics::Aabb;

/// Clearance added under the collision volume so a placed structure never
/// reports the floor it stands on as an overlap.
const FLOOR_CLEARANCE: f32 = 0.2;

/// Stable catalog key for a structure definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(pub String);

impl From<&str> for DefinitionId {
    fn from(id: &str) -> Self {
        DefinitionId(id.to_string())
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_cell_size() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// A placeable structure type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDefinition {
    pub id: DefinitionId,
    /// Display name
    pub name: String,
    /// Full 3D extent of the collision volume (meters)
    pub footprint: Vec3,
    /// Renderer asset reference, opaque to the builder
    pub prefab: String,
    /// Grid cell size used when snapping this structure
    #[serde(default = "default_cell_size")]
    pub cell_size: NonZeroU32,
}

impl StructureDefinition {
    /// Convenience constructor, mostly for tests and scripted scenes.
    pub fn new(id: &str, footprint: Vec3, cell_size: NonZeroU32) -> Self {
        Self {
            id: DefinitionId::from(id),
            name: id.to_string(),
            footprint,
            prefab: id.to_string(),
            cell_size,
        }
    }

    /// Collision volume for this structure placed at `pose`.
    ///
    /// The box rests on the pose position, lifted by half the floor clearance,
    /// and is rotated with the pose.
    pub fn bounds_at(&self, pose: &Pose) -> Aabb {
        let half = self.footprint.abs() * 0.5;
        let local_center = Vec3::new(0.0, (self.footprint.y.abs() + FLOOR_CLEARANCE) * 0.5, 0.0);
        let center = pose.position + pose.orientation * local_center;
        Aabb::from_oriented_box(center, half, pose.orientation)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !self.footprint.is_finite() || self.footprint.cmple(Vec3::ZERO).any() {
            return Err(ConfigError::Invalid(format!(
                "definition '{}' needs a positive footprint, got {}",
                self.id, self.footprint
            )));
        }
        Ok(())
    }
}

/// Source of structure definitions, injected into the controller.
pub trait CatalogPort {
    fn definition(&self, id: &DefinitionId) -> Option<Arc<StructureDefinition>>;
}

/// Definitions in load order; the order doubles as the number-key slot.
#[derive(Debug, Clone, Default)]
pub struct StructureCatalog {
    order: Vec<DefinitionId>,
    definitions: HashMap<DefinitionId, Arc<StructureDefinition>>,
}

impl StructureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = StructureDefinition>,
    ) -> ConfigResult<Self> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of definitions.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let definitions: Vec<StructureDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let catalog = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), definitions = catalog.len(), "loaded structure catalog");
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: StructureDefinition) -> ConfigResult<()> {
        definition.validate()?;
        if self.definitions.contains_key(&definition.id) {
            return Err(ConfigError::DuplicateDefinition(definition.id));
        }
        self.order.push(definition.id.clone());
        self.definitions.insert(definition.id.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, id: &DefinitionId) -> Option<&Arc<StructureDefinition>> {
        self.definitions.get(id)
    }

    /// Definition id bound to a number-key slot.
    pub fn id_at(&self, slot: usize) -> Option<&DefinitionId> {
        self.order.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<StructureDefinition>> {
        self.order.iter().filter_map(|id| self.definitions.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl CatalogPort for StructureCatalog {
    fn definition(&self, id: &DefinitionId) -> Option<Arc<StructureDefinition>> {
        self.get(id).cloned()
    }
}

impl<T: CatalogPort + ?Sized> CatalogPort for Arc<T> {
    fn definition(&self, id: &DefinitionId) -> Option<Arc<StructureDefinition>> {
        (**self).definition(id)
    }
}
