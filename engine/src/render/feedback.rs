//! Render Feedback
//!
//! The builder never touches materials. It tells the renderer which
//! [`VisualState`] an instance should show and lets it mirror spawns,
//! moves, commits and removals through [`RenderFeedbackPort`].

use std::collections::HashMap;
use std::fmt;

use crate::game::builder::{Pose, StructureInstance};
use crate::handle::InstanceId;

/// Visual state requested for a structure instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// Default material of a committed structure
    #[default]
    Normal,
    /// Candidate can be placed here
    Valid,
    /// Candidate is blocked or not over buildable ground
    Invalid,
    /// Committed structure will be removed on confirm
    DeleteFlagged,
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VisualState::Normal => "normal",
            VisualState::Valid => "valid",
            VisualState::Invalid => "invalid",
            VisualState::DeleteFlagged => "delete-flagged",
        };
        f.write_str(name)
    }
}

/// Renderer-side sink for builder feedback.
///
/// `set_visual_state` must be idempotent. The lifecycle hooks default to
/// no-ops for renderers that only care about materials.
pub trait RenderFeedbackPort {
    fn set_visual_state(&mut self, instance: InstanceId, state: VisualState);

    /// A candidate was instantiated.
    fn spawn_visual(&mut self, instance: &StructureInstance) {
        let _ = instance;
    }

    /// The candidate moved or rotated.
    fn sync_pose(&mut self, instance: InstanceId, pose: &Pose) {
        let _ = (instance, pose);
    }

    /// The candidate became a permanent structure (enable colliders, move to the structure layer).
    fn commit_visual(&mut self, instance: &StructureInstance) {
        let _ = instance;
    }

    /// The instance was destroyed.
    fn despawn_visual(&mut self, instance: InstanceId) {
        let _ = instance;
    }
}

/// Feedback sink that remembers the last state per instance.
///
/// Used by the sandbox and tests to observe what a renderer would show.
#[derive(Debug, Default, Clone)]
pub struct FeedbackLog {
    states: HashMap<InstanceId, VisualState>,
    /// Every `set_visual_state` call in order
    pub calls: Vec<(InstanceId, VisualState)>,
    pub spawned: Vec<InstanceId>,
    pub committed: Vec<InstanceId>,
    pub despawned: Vec<InstanceId>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, instance: InstanceId) -> Option<VisualState> {
        self.states.get(&instance).copied()
    }

    /// Number of live instances currently showing `state`.
    pub fn count_in_state(&self, state: VisualState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RenderFeedbackPort for FeedbackLog {
    fn set_visual_state(&mut self, instance: InstanceId, state: VisualState) {
        self.states.insert(instance, state);
        self.calls.push((instance, state));
    }

    fn spawn_visual(&mut self, instance: &StructureInstance) {
        self.states.insert(instance.id(), instance.visual_state());
        self.spawned.push(instance.id());
    }

    fn commit_visual(&mut self, instance: &StructureInstance) {
        self.committed.push(instance.id());
    }

    fn despawn_visual(&mut self, instance: InstanceId) {
        self.states.remove(&instance);
        self.despawned.push(instance);
    }
}
