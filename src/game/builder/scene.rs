//! Structure Scene
//!
//! The instance set: every candidate and committed structure currently
//! alive. The controller holds handles into it, never the instances
//! themselves, so a destroyed instance is detectable by lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::game::builder::instance::{Pose, StructureInstance};
use crate::game::catalog::StructureDefinition;
use crate::handle::InstanceId;
use crate::physics::Layer;

#[derive(Debug, Default, Clone)]
pub struct StructureScene {
    instances: BTreeMap<InstanceId, StructureInstance>,
    next_id: u64,
}

impl StructureScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a candidate and return its handle. Handles are never reused.
    pub fn spawn_candidate(
        &mut self,
        definition: Arc<StructureDefinition>,
        pose: Pose,
        ground_layer: Layer,
    ) -> InstanceId {
        self.next_id += 1;
        let id = InstanceId(self.next_id);
        let instance = StructureInstance::candidate(id, definition, pose, ground_layer);
        self.instances.insert(id, instance);
        id
    }

    pub fn get(&self, id: InstanceId) -> Option<&StructureInstance> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut StructureInstance> {
        self.instances.get_mut(&id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Destroy an instance, returning it if it was alive.
    pub fn remove(&mut self, id: InstanceId) -> Option<StructureInstance> {
        self.instances.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureInstance> {
        self.instances.values()
    }

    pub fn committed(&self) -> impl Iterator<Item = &StructureInstance> {
        self.iter().filter(|instance| instance.is_committed())
    }

    pub fn committed_count(&self) -> usize {
        self.committed().count()
    }

    pub fn candidate_count(&self) -> usize {
        self.iter().filter(|instance| !instance.is_committed()).count()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
